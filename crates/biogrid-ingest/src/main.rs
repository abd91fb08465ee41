//! BioGRID Ingest - interaction query tool

use anyhow::Result;
use biogrid_common::logging::{init_logging, LogConfig, LogLevel};
use biogrid_common::config::load_env_file;
use biogrid_common::BiogridConfig;
use biogrid_ingest::cli::{self, Cli, Command};
use clap::Parser;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // .env first, so LOG_* values set there are seen below
    load_env_file(None);

    // LOG_* environment variables take precedence over the flag
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("biogrid-ingest")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    let config = BiogridConfig::load()?;

    match cli.command {
        Command::Fetch(args) => {
            cli::run_fetch(&config, &args).await?;
        },
        Command::Batch(args) => {
            let summary = cli::run_batch_command(&config, &args).await?;
            for (gene, error) in &summary.failed {
                warn!(gene = %gene, error = %error, "Gene not exported");
            }
        },
    }

    info!("Done");
    Ok(())
}
