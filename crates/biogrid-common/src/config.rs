//! Configuration management
//!
//! Connection settings for the BioGRID web service. Values come from a
//! `.env` file (if present) and then the process environment.

use crate::error::{CommonError, Result};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Interaction search endpoint of the BioGRID REST service.
pub const DEFAULT_BASE_URL: &str = "https://webservice.thebiogrid.org/interactions/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// NCBI taxonomy id for Homo sapiens.
pub const DEFAULT_TAX_ID: &str = "9606";

/// Largest result page the service returns for a single request.
pub const DEFAULT_MAX_RESULTS: u32 = 10_000;

/// Environment variable holding the BioGRID access key.
pub const ACCESS_KEY_ENV: &str = "BIOGRID_API_KEY";

/// Load variables from a `.env` file into the process environment
///
/// `None` searches the current directory and its parents. Variables that are
/// already set keep their value. A missing file is not an error.
pub fn load_env_file(path: Option<&Path>) {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    if let Ok(path) = loaded {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }
}

/// BioGRID access key.
///
/// Kept out of `Debug` and `Display` output so it never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey(String);

impl AccessKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key value, for placing on the request URL only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessKey(***)")
    }
}

impl fmt::Display for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// BioGRID client configuration
#[derive(Debug, Clone)]
pub struct BiogridConfig {
    pub access_key: AccessKey,
    pub base_url: Url,
    pub timeout_secs: u64,
    pub default_tax_id: String,
    pub max_results: u32,
}

impl BiogridConfig {
    /// Load configuration from `.env` and the environment
    ///
    /// Environment variables:
    /// - `BIOGRID_API_KEY`: access key (required)
    /// - `BIOGRID_BASE_URL`: interaction endpoint
    /// - `BIOGRID_TIMEOUT_SECS`: request timeout
    /// - `BIOGRID_DEFAULT_TAX_ID`: organism used when a query names none
    /// - `BIOGRID_MAX_RESULTS`: default result cap
    pub fn load() -> Result<Self> {
        load_env_file(None);
        Self::from_env()
    }

    /// Read configuration from the process environment only
    pub fn from_env() -> Result<Self> {
        let access_key = std::env::var(ACCESS_KEY_ENV)
            .map_err(|_| CommonError::MissingEnv(ACCESS_KEY_ENV.to_string()))?;

        let base_url = match std::env::var("BIOGRID_BASE_URL") {
            Ok(raw) => Url::parse(&raw)
                .map_err(|e| CommonError::config(format!("Invalid BIOGRID_BASE_URL '{}': {}", raw, e)))?,
            Err(_) => default_base_url()?,
        };

        let config = Self {
            access_key: AccessKey::new(access_key),
            base_url,
            timeout_secs: std::env::var("BIOGRID_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            default_tax_id: std::env::var("BIOGRID_DEFAULT_TAX_ID")
                .unwrap_or_else(|_| DEFAULT_TAX_ID.to_string()),
            max_results: std::env::var("BIOGRID_MAX_RESULTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_RESULTS),
        };

        config.validate()?;

        Ok(config)
    }

    /// Create a builder, mostly for tests pointing at a mock server
    pub fn builder(access_key: impl Into<String>) -> BiogridConfigBuilder {
        BiogridConfigBuilder {
            access_key: AccessKey::new(access_key),
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_tax_id: DEFAULT_TAX_ID.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.access_key.expose().trim().is_empty() {
            return Err(CommonError::config(format!("{} cannot be empty", ACCESS_KEY_ENV)));
        }

        if self.timeout_secs == 0 {
            return Err(CommonError::config("Timeout must be greater than 0"));
        }

        if self.max_results == 0 {
            return Err(CommonError::config("Max results must be greater than 0"));
        }

        if self.default_tax_id.is_empty() {
            return Err(CommonError::config("Default taxonomy id cannot be empty"));
        }

        Ok(())
    }
}

fn default_base_url() -> Result<Url> {
    Url::parse(DEFAULT_BASE_URL).map_err(|e| CommonError::config(e.to_string()))
}

/// Builder for BiogridConfig
pub struct BiogridConfigBuilder {
    access_key: AccessKey,
    base_url: Option<String>,
    timeout_secs: u64,
    default_tax_id: String,
    max_results: u32,
}

impl BiogridConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn default_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.default_tax_id = tax_id.into();
        self
    }

    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = max;
        self
    }

    pub fn build(self) -> Result<BiogridConfig> {
        let base_url = match self.base_url {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| CommonError::config(format!("Invalid base URL '{}': {}", raw, e)))?,
            None => default_base_url()?,
        };

        let config = BiogridConfig {
            access_key: self.access_key,
            base_url,
            timeout_secs: self.timeout_secs,
            default_tax_id: self.default_tax_id,
            max_results: self.max_results,
        };

        config.validate()?;

        Ok(config)
    }
}
