//! CSV export of scored interactions

use crate::biogrid::{InteractionRecord, InteractorRecord};
use biogrid_common::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// One exported row, headed with the service's column names
#[derive(Debug, Serialize)]
struct ScoredInteractionRow<'a> {
    #[serde(rename = "Official symbol for Interactor A")]
    symbol_a: &'a str,
    #[serde(rename = "Official symbol for Interactor B")]
    symbol_b: &'a str,
    #[serde(rename = "Synonyms/Aliases for Interactor A")]
    synonyms_a: String,
    #[serde(rename = "Synonyms/Aliases for Interactor B")]
    synonyms_b: String,
    #[serde(rename = "Quantitative Score")]
    score: f64,
}

impl<'a> From<&'a InteractionRecord> for ScoredInteractionRow<'a> {
    fn from(record: &'a InteractionRecord) -> Self {
        let symbol = |i: Option<&'a InteractorRecord>| {
            i.and_then(|i| i.official_symbol.as_deref()).unwrap_or("-")
        };
        let synonyms = |i: Option<&InteractorRecord>| {
            i.map(|i| i.synonyms_joined())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "-".to_string())
        };

        Self {
            symbol_a: symbol(record.interactor_a()),
            symbol_b: symbol(record.interactor_b()),
            synonyms_a: synonyms(record.interactor_a()),
            synonyms_b: synonyms(record.interactor_b()),
            score: record.score(),
        }
    }
}

/// Write records as CSV; returns the number of data rows written
pub fn write_scored_csv<W: Write>(writer: W, records: &[InteractionRecord]) -> Result<usize> {
    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    // Header row is written explicitly so an empty export still has one.
    csv.write_record([
        "Official symbol for Interactor A",
        "Official symbol for Interactor B",
        "Synonyms/Aliases for Interactor A",
        "Synonyms/Aliases for Interactor B",
        "Quantitative Score",
    ])?;

    for record in records {
        csv.serialize(ScoredInteractionRow::from(record))?;
    }

    csv.flush()?;
    Ok(records.len())
}

/// Write records to a CSV file, replacing it if present
pub fn write_scored_csv_file(path: impl AsRef<Path>, records: &[InteractionRecord]) -> Result<usize> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    let written = write_scored_csv(std::io::BufWriter::new(file), records)?;

    debug!(path = %path.display(), rows = written, "Wrote CSV export");
    Ok(written)
}
