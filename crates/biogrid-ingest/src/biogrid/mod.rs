//! BioGRID interaction search
//!
//! - [`client`]: URL construction and the HTTP call
//! - [`parser`]: JSON and tab-delimited normalization
//! - [`models`]: query, raw response, and record types

pub mod client;
pub mod error;
pub mod models;
pub mod parser;

pub use client::{build_request_url, BiogridClient, HttpTransport, Transport, TransportResponse};
pub use error::{FetchError, Result};
pub use models::{
    InteractionQuery, InteractionRecord, InteractorRecord, RawResponse, ResponseFormat,
    SearchMode, TabRow,
};
pub use parser::{normalize, JsonNormalizer, ParsedTab, TabParser};
