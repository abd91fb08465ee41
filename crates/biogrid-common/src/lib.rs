//! BioGRID Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared configuration, logging, and error handling for the BioGRID
//! workspace.
//!
//! - **Configuration**: [`config::BiogridConfig`] loaded from `.env` and the environment
//! - **Logging**: `tracing` subscriber setup in [`logging`]
//! - **Errors**: [`CommonError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```no_run
//! use biogrid_common::config::BiogridConfig;
//!
//! fn main() -> biogrid_common::Result<()> {
//!     let config = BiogridConfig::load()?;
//!     println!("Querying {}", config.base_url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AccessKey, BiogridConfig};
pub use error::{CommonError, Result};
