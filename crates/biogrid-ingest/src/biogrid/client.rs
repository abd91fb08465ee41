//! BioGRID REST client
//!
//! Builds interaction-search URLs and performs the single GET each query
//! needs. The network call sits behind [`Transport`] so tests can swap in a
//! stub.

use crate::biogrid::error::{FetchError, Result};
use crate::biogrid::models::{InteractionQuery, InteractionRecord, RawResponse};
use crate::biogrid::parser::normalize;
use async_trait::async_trait;
use biogrid_common::{AccessKey, BiogridConfig};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Performs one GET; no retries
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<TransportResponse>;
}

/// reqwest-backed transport with a request timeout
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("biogrid-ingest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}

/// Build the interaction-search URL for `query`
///
/// Validates the query first. Exactly one search-mode flag is set, and all
/// values go through the form encoder.
pub fn build_request_url(
    base_url: &Url,
    query: &InteractionQuery,
    access_key: &AccessKey,
) -> Result<Url> {
    query.validate()?;

    let mut url = base_url.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("accesskey", access_key.expose())
            .append_pair("geneList", query.gene.trim())
            .append_pair("taxId", query.taxonomy_id.trim())
            .append_pair("includeInteractors", if query.include_interactors { "true" } else { "false" })
            .append_pair("max", &query.max_results.to_string());

        let (flag, value) = query.search_mode.query_flag();
        pairs.append_pair(flag, value);

        if let Some(format) = query.format.query_value() {
            pairs.append_pair("format", format);
        }
    }

    Ok(url)
}

/// Client for the interaction-search endpoint
pub struct BiogridClient<T = HttpTransport> {
    transport: T,
    base_url: Url,
}

impl BiogridClient<HttpTransport> {
    /// HTTP client using the configured endpoint and timeout
    pub fn from_config(config: &BiogridConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::with_transport(transport, config.base_url.clone()))
    }
}

impl<T: Transport> BiogridClient<T> {
    pub fn with_transport(transport: T, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Validate, send one GET, and return the body verbatim
    #[instrument(skip(self, query, access_key), fields(gene = %query.gene, mode = %query.search_mode))]
    pub async fn build_and_fetch(
        &self,
        query: &InteractionQuery,
        access_key: &AccessKey,
    ) -> Result<RawResponse> {
        let url = build_request_url(&self.base_url, query, access_key)?;

        debug!(
            endpoint = %self.base_url,
            tax_id = %query.taxonomy_id,
            max = query.max_results,
            format = ?query.format,
            "Requesting interactions"
        );

        let response = self.transport.get(&url).await.inspect_err(|e| {
            warn!(error = %e, "Interaction request failed");
        })?;

        if !(200..300).contains(&response.status) {
            warn!(status = response.status, "BioGRID rejected the request");
            return Err(FetchError::HttpStatus(response.status));
        }

        info!(bytes = response.body.len(), "Received interaction payload");

        Ok(RawResponse::new(response.body))
    }

    /// Fetch and normalize in one step
    pub async fn fetch_interactions(
        &self,
        query: &InteractionQuery,
        access_key: &AccessKey,
    ) -> Result<Vec<InteractionRecord>> {
        let raw = self.build_and_fetch(query, access_key).await?;
        Ok(normalize(&raw, query.format))
    }
}
