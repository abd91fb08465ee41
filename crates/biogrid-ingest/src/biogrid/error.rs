//! BioGRID fetch errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Failure of a single interaction query
///
/// Empty or malformed payloads are not represented here: they normalize to
/// zero records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Rejected before any network I/O
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The service answered with a non-2xx status
    #[error("BioGRID returned HTTP {0}")]
    HttpStatus(u16),

    /// DNS, connect, timeout, reset, or body read failure
    #[error("Transport error: {0}")]
    Transport(String),
}

impl FetchError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the access key; keep it out of the message.
        let timed_out = err.is_timeout();
        let err = err.without_url();
        if timed_out {
            Self::Transport(format!("request timed out: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }
}
