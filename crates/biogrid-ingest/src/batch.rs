//! Batch export over a gene list
//!
//! Reads gene names from a CSV file and, one gene at a time, fetches its
//! interactions, keeps the positively scored ones (highest first), and writes
//! `<output_dir>/<GENE>_interactions.csv`. A gene that fails is logged and
//! the run moves on to the next.

use crate::biogrid::{BiogridClient, InteractionQuery, ResponseFormat, SearchMode, Transport};
use crate::export::write_scored_csv_file;
use crate::filter::filter_positive_sorted;
use anyhow::{Context, Result};
use biogrid_common::config::{DEFAULT_MAX_RESULTS, DEFAULT_TAX_ID};
use biogrid_common::AccessKey;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
struct GeneListRow {
    gene_name: String,
}

/// Read the `gene_name` column of a CSV file, upper-cased
pub fn read_gene_list(path: impl AsRef<Path>) -> biogrid_common::Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut genes = Vec::new();

    for row in reader.deserialize::<GeneListRow>() {
        let gene = row?.gene_name.trim().to_uppercase();
        if !gene.is_empty() {
            genes.push(gene);
        }
    }

    Ok(genes)
}

/// Settings for a batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub output_dir: PathBuf,
    pub taxonomy_id: String,
    pub max_results: u32,
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data/csv"),
            taxonomy_id: DEFAULT_TAX_ID.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            show_progress: true,
        }
    }
}

/// Outcome of a batch run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Genes with a CSV written
    pub exported: Vec<String>,
    /// Genes the service had no interactions for
    pub empty: Vec<String>,
    /// Genes that failed, with the error message
    pub failed: Vec<(String, String)>,
}

enum GeneOutcome {
    Exported { path: PathBuf, rows: usize },
    Empty,
}

/// Reject names that would place the CSV outside the output directory
pub fn check_gene_name(gene: &str) -> Result<()> {
    let mut components = Path::new(gene).components();
    let single = match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => name == OsStr::new(gene),
        _ => false,
    };

    if !single || gene.contains(['/', '\\', '\0']) {
        anyhow::bail!("gene name '{}' is not usable as a file name", gene);
    }

    Ok(())
}

/// Path of the CSV written for `gene`
pub fn output_path(output_dir: &Path, gene: &str) -> PathBuf {
    output_dir.join(format!("{}_interactions.csv", gene))
}

/// Process every gene in order
pub async fn run_batch<T: Transport>(
    client: &BiogridClient<T>,
    access_key: &AccessKey,
    genes: &[String],
    options: &BatchOptions,
) -> Result<BatchSummary> {
    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!("Failed to create output directory {}", options.output_dir.display())
    })?;

    info!(genes = genes.len(), output_dir = %options.output_dir.display(), "Starting batch export");

    let pb = if options.show_progress {
        let pb = ProgressBar::new(genes.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut summary = BatchSummary::default();

    for gene in genes {
        pb.set_message(gene.clone());

        match process_gene(client, access_key, gene, options).await {
            Ok(GeneOutcome::Exported { path, rows }) => {
                info!(gene = %gene, rows, path = %path.display(), "Saved interactions");
                summary.exported.push(gene.clone());
            },
            Ok(GeneOutcome::Empty) => {
                warn!(gene = %gene, "No interaction data found");
                summary.empty.push(gene.clone());
            },
            Err(e) => {
                error!(gene = %gene, error = %e, "Failed to process gene");
                summary.failed.push((gene.clone(), format!("{:#}", e)));
            },
        }

        pb.inc(1);
    }

    pb.finish_with_message("done");

    info!(
        exported = summary.exported.len(),
        empty = summary.empty.len(),
        failed = summary.failed.len(),
        "Batch export complete"
    );

    Ok(summary)
}

async fn process_gene<T: Transport>(
    client: &BiogridClient<T>,
    access_key: &AccessKey,
    gene: &str,
    options: &BatchOptions,
) -> Result<GeneOutcome> {
    check_gene_name(gene)?;

    let query = InteractionQuery::new(gene, SearchMode::Name)
        .taxonomy_id(options.taxonomy_id.clone())
        .max_results(options.max_results)
        .format(ResponseFormat::Tab2);

    let records = client.fetch_interactions(&query, access_key).await?;
    if records.is_empty() {
        return Ok(GeneOutcome::Empty);
    }

    let scored = filter_positive_sorted(records, |r| r.score());

    let path = output_path(&options.output_dir, gene);
    let rows = write_scored_csv_file(&path, &scored)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(GeneOutcome::Exported { path, rows })
}
