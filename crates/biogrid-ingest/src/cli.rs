//! Command-line interface
//!
//! Argument definitions and the command implementations behind
//! `biogrid-ingest fetch` and `biogrid-ingest batch`.

use crate::batch::{read_gene_list, run_batch, BatchOptions, BatchSummary};
use crate::biogrid::{
    BiogridClient, FetchError, InteractionQuery, InteractionRecord, InteractorRecord,
    ResponseFormat, SearchMode, Transport,
};
use crate::export::write_scored_csv_file;
use crate::filter::filter_positive_sorted;
use anyhow::{Context, Result};
use biogrid_common::BiogridConfig;
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "biogrid-ingest")]
#[command(author, version, about = "Query BioGRID for gene interactions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch interactions for one gene
    Fetch(FetchArgs),

    /// Export scored interactions for every gene in a CSV list
    Batch(BatchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Gene identifier (symbol, id, synonym, or UniProt accession)
    #[arg(short, long)]
    pub gene: String,

    /// Search mode: name, id, synonym, uniprot
    #[arg(short = 'm', long, default_value = "name")]
    pub search_mode: String,

    /// NCBI taxonomy id (defaults to BIOGRID_DEFAULT_TAX_ID)
    #[arg(short, long)]
    pub tax_id: Option<String>,

    /// Include interactions among first-order interactors
    #[arg(long)]
    pub include_interactors: bool,

    /// Result cap (defaults to BIOGRID_MAX_RESULTS)
    #[arg(long)]
    pub max: Option<u32>,

    /// Response format: json, json-extended, tab2
    #[arg(short, long, default_value = "tab2")]
    pub format: String,

    /// Keep only positively scored interactions, highest first
    #[arg(long)]
    pub scored_only: bool,

    /// Write CSV here instead of printing a table
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl FetchArgs {
    /// Turn arguments into a query; rejects unknown mode or format names
    pub fn to_query(&self, config: &BiogridConfig) -> Result<InteractionQuery, FetchError> {
        let mode: SearchMode = self.search_mode.parse()?;
        let format: ResponseFormat = self.format.parse()?;

        let query = InteractionQuery::new(self.gene.clone(), mode)
            .taxonomy_id(self.tax_id.clone().unwrap_or_else(|| config.default_tax_id.clone()))
            .include_interactors(self.include_interactors)
            .max_results(self.max.unwrap_or(config.max_results))
            .format(format);

        query.validate()?;
        Ok(query)
    }
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// CSV file with a `gene_name` column
    #[arg(short, long, default_value = "gene_df.csv")]
    pub genes: PathBuf,

    /// Directory for `<GENE>_interactions.csv` files
    #[arg(short, long, default_value = "data/csv")]
    pub output_dir: PathBuf,

    /// NCBI taxonomy id (defaults to BIOGRID_DEFAULT_TAX_ID)
    #[arg(short, long)]
    pub tax_id: Option<String>,

    /// Result cap per gene (defaults to BIOGRID_MAX_RESULTS)
    #[arg(long)]
    pub max: Option<u32>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Run `fetch` against any transport
pub async fn fetch<T: Transport>(
    client: &BiogridClient<T>,
    config: &BiogridConfig,
    args: &FetchArgs,
) -> Result<Vec<InteractionRecord>, FetchError> {
    let query = args.to_query(config)?;
    let records = client.fetch_interactions(&query, &config.access_key).await?;

    if args.scored_only {
        Ok(filter_positive_sorted(records, |r| r.score()))
    } else {
        Ok(records)
    }
}

/// `fetch` command: query, then print or export
pub async fn run_fetch(config: &BiogridConfig, args: &FetchArgs) -> Result<()> {
    // Reject bad arguments before building an HTTP client.
    args.to_query(config)?;

    let client = BiogridClient::from_config(config)?;
    let records = fetch(&client, config, args).await?;

    info!(gene = %args.gene, records = records.len(), "Fetched interactions");

    match &args.output {
        Some(path) => {
            let rows = write_scored_csv_file(path, &records)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(rows, path = %path.display(), "Saved interactions");
        },
        None => println!("{}", render_table(&records)),
    }

    Ok(())
}

/// `batch` command
pub async fn run_batch_command(config: &BiogridConfig, args: &BatchArgs) -> Result<BatchSummary> {
    let genes = read_gene_list(&args.genes)
        .with_context(|| format!("Failed to read gene list {}", args.genes.display()))?;

    let options = BatchOptions {
        output_dir: args.output_dir.clone(),
        taxonomy_id: args.tax_id.clone().unwrap_or_else(|| config.default_tax_id.clone()),
        max_results: args.max.unwrap_or(config.max_results),
        show_progress: !args.no_progress,
    };

    let client = BiogridClient::from_config(config)?;
    run_batch(&client, &config.access_key, &genes, &options).await
}

/// Terminal table of records
pub fn render_table(records: &[InteractionRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Interaction",
        "Type",
        "Evidence",
        "Interactor A",
        "Interactor B",
        "Score",
    ]);

    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();

    for record in records {
        let symbol = |i: Option<&InteractorRecord>| {
            or_dash(i.and_then(|i| i.official_symbol.as_deref()))
        };

        table.add_row(vec![
            record
                .interaction_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            or_dash(record.interaction_type.as_deref()),
            or_dash(record.evidence.as_deref()),
            symbol(record.interactor_a()),
            symbol(record.interactor_b()),
            or_dash(record.quantitative_score.as_deref()),
        ]);
    }

    table
}
