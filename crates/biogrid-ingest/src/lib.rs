//! BioGRID Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Query the BioGRID web service for gene interactions and normalize the
//! response, whichever wire format was requested.
//!
//! - [`biogrid`]: request building, the HTTP call, and response normalization
//! - [`filter`]: positive-score filtering and descending sort
//! - [`export`]: CSV output of scored interactions
//! - [`batch`]: sequential export over a gene list
//!
//! # Example
//!
//! ```no_run
//! use biogrid_common::BiogridConfig;
//! use biogrid_ingest::biogrid::{BiogridClient, InteractionQuery, SearchMode};
//! use biogrid_ingest::filter::filter_positive_sorted;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BiogridConfig::load()?;
//!     let client = BiogridClient::from_config(&config)?;
//!
//!     let query = InteractionQuery::new("TP53", SearchMode::Name);
//!     let records = client.fetch_interactions(&query, &config.access_key).await?;
//!     let scored = filter_positive_sorted(records, |r| r.score());
//!
//!     println!("{} scored interactions", scored.len());
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod biogrid;
pub mod cli;
pub mod export;
pub mod filter;
