//! BioGRID response normalization (JSON and tab-delimited)

use crate::biogrid::models::{
    cell, split_synonyms, unique_in_order, InteractionRecord, InteractorRecord, RawResponse,
    ResponseFormat, TabRow,
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Turn a raw body into interaction records
///
/// Never fails: a body that cannot be read in the requested format yields no
/// records. Record order follows the payload.
pub fn normalize(raw: &RawResponse, format: ResponseFormat) -> Vec<InteractionRecord> {
    if format.is_json() {
        JsonNormalizer::normalize(raw.as_str())
    } else {
        TabParser::normalize(raw.as_str())
    }
}

// ============================================================================
// JSON
// ============================================================================

// Accepted keys per field, camelCase first, then the service's upper-case names.
const INTERACTION_ID_KEYS: &[&str] = &["interactionId", "id", "BIOGRID_INTERACTION_ID"];
const INTERACTION_TYPE_KEYS: &[&str] = &["interactionType", "type", "EXPERIMENTAL_SYSTEM_TYPE"];
const EVIDENCE_KEYS: &[&str] = &["evidence", "experimentalSystem", "EXPERIMENTAL_SYSTEM"];
const PUBMED_KEYS: &[&str] = &["pubmedId", "PUBMED_ID"];
const SCORE_KEYS: &[&str] = &["quantitativeScore", "QUANTITATION"];
const THROUGHPUT_KEYS: &[&str] = &["throughput", "THROUGHPUT"];
const SOURCE_KEYS: &[&str] = &["sourceDatabase", "SOURCEDB"];

const GENE_ID_KEYS: &[&str] = &["geneId", "entrezGeneId", "ENTREZ_GENE"];
const SYMBOL_KEYS: &[&str] = &["officialSymbol", "OFFICIAL_SYMBOL"];
const SYNONYM_KEYS: &[&str] = &["synonyms", "SYNONYMS"];
const ORGANISM_NAME_KEYS: &[&str] = &["organismName", "ORGANISM_NAME"];
const TAX_ID_KEYS: &[&str] = &["taxId", "organismId", "ORGANISM"];

pub struct JsonNormalizer;

impl JsonNormalizer {
    /// Walk `entries[].interactions[].interactors[]`
    pub fn normalize(body: &str) -> Vec<InteractionRecord> {
        let document: Value = match serde_json::from_str(body) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "Response is not valid JSON, treating as no interactions");
                return Vec::new();
            },
        };

        let Some(entries) = document.get("entries").and_then(Value::as_array) else {
            debug!("JSON response has no entries");
            return Vec::new();
        };

        let records: Vec<InteractionRecord> = entries
            .iter()
            .flat_map(|entry| array_at(entry, "interactions"))
            .map(Self::interaction)
            .collect();

        info!(entries = entries.len(), records = records.len(), "Normalized JSON response");

        records
    }

    fn interaction(value: &Value) -> InteractionRecord {
        InteractionRecord {
            interaction_id: field(value, INTERACTION_ID_KEYS).and_then(as_u64),
            interaction_type: field(value, INTERACTION_TYPE_KEYS).and_then(as_text),
            evidence: field(value, EVIDENCE_KEYS).and_then(as_text),
            interactors: array_at(value, "interactors").map(Self::interactor).collect(),
            pubmed_id: field(value, PUBMED_KEYS).and_then(as_text),
            quantitative_score: field(value, SCORE_KEYS).and_then(as_text),
            throughput: field(value, THROUGHPUT_KEYS).and_then(as_text),
            source_database: field(value, SOURCE_KEYS).and_then(as_text),
        }
    }

    fn interactor(value: &Value) -> InteractorRecord {
        InteractorRecord {
            gene_id: field(value, GENE_ID_KEYS).and_then(as_u64),
            official_symbol: field(value, SYMBOL_KEYS).and_then(as_text),
            synonyms: field(value, SYNONYM_KEYS).map(as_synonyms).unwrap_or_default(),
            organism_name: field(value, ORGANISM_NAME_KEYS).and_then(as_text),
            taxonomy_id: field(value, TAX_ID_KEYS)
                .and_then(as_u64)
                .and_then(|t| u32::try_from(t).ok()),
        }
    }
}

/// Items of the array under `key`, or nothing
fn array_at<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// First non-null value among `keys`
fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|v| !v.is_null())
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => cell(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_synonyms(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => unique_in_order(items.iter().filter_map(as_text)),
        Value::String(s) => split_synonyms(s),
        _ => Vec::new(),
    }
}

// ============================================================================
// Tab-delimited
// ============================================================================

/// Result of reading a tab-delimited body
#[derive(Debug, Default)]
pub struct ParsedTab {
    pub rows: Vec<TabRow>,
    /// Data lines dropped for having the wrong column count
    pub skipped: usize,
}

pub struct TabParser;

impl TabParser {
    /// Parse the service's 24-column tab-delimited output
    ///
    /// Lines starting with `#` and blank lines are ignored. A line that does
    /// not split into exactly 24 columns is skipped with a warning and parsing
    /// carries on.
    pub fn parse(body: &str) -> ParsedTab {
        let mut parsed = ParsedTab::default();

        for (index, line) in body.lines().enumerate() {
            let line = line.trim_end_matches('\r');

            // Tabs are column separators, so only spaces count as blank.
            if line.starts_with('#') || line.trim_matches(' ').is_empty() {
                continue;
            }

            let cells: Vec<&str> = line.split('\t').collect();
            match TabRow::from_cells(&cells) {
                Some(row) => parsed.rows.push(row),
                None => {
                    warn!(
                        line = index + 1,
                        columns = cells.len(),
                        expected = TabRow::COLUMN_COUNT,
                        "Skipping malformed tab-delimited line"
                    );
                    parsed.skipped += 1;
                },
            }
        }

        info!(rows = parsed.rows.len(), skipped = parsed.skipped, "Parsed tab-delimited response");

        parsed
    }

    pub fn normalize(body: &str) -> Vec<InteractionRecord> {
        Self::parse(body)
            .rows
            .iter()
            .map(InteractionRecord::from)
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tab_line(id: &str, symbol_a: &str, symbol_b: &str, score: &str) -> String {
        [
            id,
            "7157",
            "4193",
            "112315",
            "110358",
            "-",
            "-",
            symbol_a,
            symbol_b,
            "P53|TRP53",
            "HDMX|MDM2",
            "Two-hybrid",
            "physical",
            "Momand J (1992)",
            "1535557",
            "9606",
            "9606",
            "Low Throughput",
            score,
            "-",
            "-",
            "-",
            "-",
            "BIOGRID",
        ]
        .join("\t")
    }

    #[test]
    fn test_json_without_entries_is_empty() {
        assert!(JsonNormalizer::normalize(r#"{"status": "ok"}"#).is_empty());
        assert!(JsonNormalizer::normalize("null").is_empty());
        assert!(JsonNormalizer::normalize("").is_empty());
        assert!(JsonNormalizer::normalize("<html>oops</html>").is_empty());
        assert!(JsonNormalizer::normalize(r#"{"entries": "nope"}"#).is_empty());
    }

    #[test]
    fn test_json_entries_preserve_order() {
        let entries: Vec<_> = (1..=3)
            .map(|i| {
                json!({
                    "interactions": [{
                        "interactionId": i,
                        "interactionType": "physical",
                        "evidence": "Affinity Capture-MS",
                        "interactors": [
                            {"geneId": 7157, "officialSymbol": "TP53", "synonyms": ["P53"], "organismName": "Homo sapiens", "taxId": 9606},
                            {"geneId": 4193 + i, "officialSymbol": format!("GENE{}", i), "synonyms": [], "organismName": "Homo sapiens", "taxId": 9606},
                        ]
                    }]
                })
            })
            .collect();
        let body = json!({ "entries": entries }).to_string();

        let records = JsonNormalizer::normalize(&body);
        assert_eq!(records.len(), 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.interaction_id, Some(i as u64 + 1));
            assert_eq!(record.interactors.len(), 2);
            assert_eq!(
                record.interactors[1].official_symbol.as_deref(),
                Some(format!("GENE{}", i + 1).as_str())
            );
        }
        assert_eq!(records[0].interactors[0].organism_name.as_deref(), Some("Homo sapiens"));
        assert!(records[0].interactors[0].synonyms.contains(&"P53".to_string()));
    }

    #[test]
    fn test_json_missing_fields_are_absent() {
        let body = json!({
            "entries": [{
                "interactions": [{
                    "interactors": [{ "officialSymbol": "TP53" }, {}]
                }]
            }]
        })
        .to_string();

        let records = JsonNormalizer::normalize(&body);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.interaction_id, None);
        assert_eq!(record.interaction_type, None);
        assert_eq!(record.evidence, None);
        assert_eq!(record.interactors[0].official_symbol.as_deref(), Some("TP53"));
        assert_eq!(record.interactors[1], InteractorRecord::default());
    }

    #[test]
    fn test_json_upper_case_keys_and_string_numbers() {
        let body = json!({
            "entries": [{
                "interactions": [{
                    "BIOGRID_INTERACTION_ID": "103",
                    "EXPERIMENTAL_SYSTEM": "Two-hybrid",
                    "EXPERIMENTAL_SYSTEM_TYPE": "physical",
                    "QUANTITATION": "-",
                    "interactors": [
                        {"ENTREZ_GENE": "6416", "OFFICIAL_SYMBOL": "MAP2K4", "SYNONYMS": "JNKK|MEK4", "ORGANISM": 9606},
                        {"ENTREZ_GENE": "84665", "OFFICIAL_SYMBOL": "MYPN", "SYNONYMS": "-", "ORGANISM": "9606"}
                    ]
                }]
            }]
        })
        .to_string();

        let records = JsonNormalizer::normalize(&body);
        let record = &records[0];
        assert_eq!(record.interaction_id, Some(103));
        assert_eq!(record.evidence.as_deref(), Some("Two-hybrid"));
        assert_eq!(record.interaction_type.as_deref(), Some("physical"));
        assert_eq!(record.quantitative_score, None);
        assert_eq!(record.interactors[0].gene_id, Some(6416));
        assert_eq!(record.interactors[0].synonyms.len(), 2);
        assert!(record.interactors[1].synonyms.is_empty());
        assert_eq!(record.interactors[1].taxonomy_id, Some(9606));
    }

    #[test]
    fn test_tab_three_rows_one_comment() {
        let body = format!(
            "#BioGRID Interaction ID\tEntrez Gene Interactor A\n{}\n{}\n{}\n",
            tab_line("101", "TP53", "MDM2", "-"),
            tab_line("102", "TP53", "MDM4", "5"),
            tab_line("103", "TP53", "EP300", "2"),
        );

        let parsed = TabParser::parse(&body);
        assert_eq!(parsed.rows.len(), 3);
        assert_eq!(parsed.skipped, 0);

        let row = &parsed.rows[1];
        assert_eq!(row.interaction_id, "102");
        assert_eq!(row.entrez_gene_a, "7157");
        assert_eq!(row.entrez_gene_b, "4193");
        assert_eq!(row.biogrid_id_a, "112315");
        assert_eq!(row.official_symbol_a, "TP53");
        assert_eq!(row.official_symbol_b, "MDM4");
        assert_eq!(row.synonyms_b, "HDMX|MDM2");
        assert_eq!(row.experimental_system, "Two-hybrid");
        assert_eq!(row.experimental_system_type, "physical");
        assert_eq!(row.pubmed_id, "1535557");
        assert_eq!(row.organism_a, "9606");
        assert_eq!(row.throughput, "Low Throughput");
        assert_eq!(row.quantitative_score, "5");
        assert_eq!(row.source_database, "BIOGRID");

        let records = TabParser::normalize(&body);
        assert_eq!(records.len(), 3);
        let record = &records[1];
        assert_eq!(record.interaction_id, Some(102));
        assert_eq!(record.evidence.as_deref(), Some("Two-hybrid"));
        assert_eq!(record.interaction_type.as_deref(), Some("physical"));
        assert_eq!(record.quantitative_score.as_deref(), Some("5"));
        assert_eq!(records[0].quantitative_score, None);

        let a = &record.interactors[0];
        assert_eq!(a.gene_id, Some(7157));
        assert_eq!(a.official_symbol.as_deref(), Some("TP53"));
        assert_eq!(a.taxonomy_id, Some(9606));
        assert_eq!(a.organism_name, None);
        assert_eq!(a.synonyms_joined(), "P53|TRP53");
    }

    #[test]
    fn test_tab_line_of_empty_cells_is_not_blank() {
        let empty_cells = "\t".repeat(TabRow::COLUMN_COUNT - 1);
        let short = "\t".repeat(5);
        let body = format!("{}\n{}\n   \n", empty_cells, short);

        let parsed = TabParser::parse(&body);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0], TabRow::default());
        assert_eq!(parsed.skipped, 1);

        let records = TabParser::normalize(&body);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].interaction_id, None);
        assert_eq!(records[0].quantitative_score, None);
    }

    #[test]
    fn test_tab_synonyms_keep_source_order() {
        let line = tab_line("401", "TP53", "MDM2", "3").replace("P53|TRP53", "TRP53|P53|LFS1|P53");

        let records = TabParser::normalize(&line);
        let a = &records[0].interactors[0];
        assert_eq!(a.synonyms, vec!["TRP53", "P53", "LFS1"]);
        assert_eq!(a.synonyms_joined(), "TRP53|P53|LFS1");
    }

    #[test]
    fn test_json_synonyms_keep_source_order() {
        let body = json!({
            "entries": [{
                "interactions": [{
                    "interactors": [{ "synonyms": ["ZETA", "ALPHA", "ZETA", "MU"] }]
                }]
            }]
        })
        .to_string();

        let records = JsonNormalizer::normalize(&body);
        assert_eq!(records[0].interactors[0].synonyms, vec!["ZETA", "ALPHA", "MU"]);
    }

    #[test]
    fn test_tab_malformed_line_is_skipped() {
        let body = format!(
            "{}\ntoo\tfew\tcolumns\n{}\r\n\n",
            tab_line("201", "BRCA1", "BARD1", "1"),
            tab_line("202", "BRCA1", "PALB2", "-"),
        );

        let parsed = TabParser::parse(&body);
        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].interaction_id, "201");
        assert_eq!(parsed.rows[1].interaction_id, "202");
        assert_eq!(parsed.rows[1].source_database, "BIOGRID");
    }

    #[test]
    fn test_normalize_dispatches_on_format() {
        let tab = RawResponse::new(tab_line("301", "EGFR", "GRB2", "4"));
        assert_eq!(normalize(&tab, ResponseFormat::Tab2).len(), 1);
        assert!(normalize(&tab, ResponseFormat::Json).is_empty());

        let json = RawResponse::new(r#"{"entries":[{"interactions":[{"interactors":[]}]}]}"#);
        assert_eq!(normalize(&json, ResponseFormat::JsonExtended).len(), 1);
        assert!(normalize(&json, ResponseFormat::Tab2).is_empty());
    }
}
