//! BioGRID query and record models

use crate::biogrid::error::{FetchError, Result};
use crate::filter::score_value;
use biogrid_common::config::{DEFAULT_MAX_RESULTS, DEFAULT_TAX_ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Search mode
// ============================================================================

/// How the service matches the gene identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Official symbols and systematic names
    Name,
    /// Entrez Gene / BioGRID numeric ids
    Id,
    /// Synonyms and aliases
    Synonym,
    /// External identifiers (UniProt accessions)
    Uniprot,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] =
        [SearchMode::Name, SearchMode::Id, SearchMode::Synonym, SearchMode::Uniprot];

    /// Query parameter that selects this mode, with its value
    pub fn query_flag(self) -> (&'static str, &'static str) {
        match self {
            SearchMode::Name => ("searchNames", "true"),
            SearchMode::Id => ("searchIds", "true"),
            SearchMode::Synonym => ("searchSynonyms", "true"),
            SearchMode::Uniprot => ("additionalIdentifierTypes", "UNIPROT"),
        }
    }

    /// Every parameter name used to select a mode
    pub fn flag_names() -> [&'static str; 4] {
        Self::ALL.map(|mode| mode.query_flag().0)
    }
}

impl FromStr for SearchMode {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" | "names" | "by-name" | "searchnames" => Ok(SearchMode::Name),
            "id" | "ids" | "by-id" | "searchids" => Ok(SearchMode::Id),
            "synonym" | "synonyms" | "by-synonym" | "searchsynonyms" => Ok(SearchMode::Synonym),
            "uniprot" | "external" | "by-external-identifier-type" => Ok(SearchMode::Uniprot),
            other => Err(FetchError::invalid(format!(
                "unknown search mode '{}' (expected name, id, synonym, or uniprot)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Name => write!(f, "name"),
            SearchMode::Id => write!(f, "id"),
            SearchMode::Synonym => write!(f, "synonym"),
            SearchMode::Uniprot => write!(f, "uniprot"),
        }
    }
}

// ============================================================================
// Response format
// ============================================================================

/// Wire format requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseFormat {
    Json,
    JsonExtended,
    /// Tab-delimited text (the service default)
    #[default]
    Tab2,
}

impl ResponseFormat {
    /// Value of the `format` parameter; `None` leaves it unset
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            ResponseFormat::Json => Some("json"),
            ResponseFormat::JsonExtended => Some("jsonExtended"),
            ResponseFormat::Tab2 => None,
        }
    }

    pub fn is_json(self) -> bool {
        matches!(self, ResponseFormat::Json | ResponseFormat::JsonExtended)
    }
}

impl FromStr for ResponseFormat {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ResponseFormat::Json),
            "json-extended" | "jsonextended" => Ok(ResponseFormat::JsonExtended),
            "tab2" | "tab" | "text" | "tsv" => Ok(ResponseFormat::Tab2),
            other => Err(FetchError::invalid(format!(
                "unknown response format '{}' (expected json, json-extended, or tab2)",
                other
            ))),
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// One interaction search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionQuery {
    pub gene: String,
    pub search_mode: SearchMode,
    pub taxonomy_id: String,
    /// Also return interactions among the first-order interactors
    pub include_interactors: bool,
    pub max_results: u32,
    pub format: ResponseFormat,
}

impl InteractionQuery {
    /// Query for `gene` against human, tab-delimited, service-maximum results
    pub fn new(gene: impl Into<String>, search_mode: SearchMode) -> Self {
        Self {
            gene: gene.into(),
            search_mode,
            taxonomy_id: DEFAULT_TAX_ID.to_string(),
            include_interactors: false,
            max_results: DEFAULT_MAX_RESULTS,
            format: ResponseFormat::default(),
        }
    }

    pub fn taxonomy_id(mut self, tax_id: impl Into<String>) -> Self {
        self.taxonomy_id = tax_id.into();
        self
    }

    pub fn include_interactors(mut self, include: bool) -> Self {
        self.include_interactors = include;
        self
    }

    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = max;
        self
    }

    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Check the query before anything goes on the wire
    pub fn validate(&self) -> Result<()> {
        if self.gene.trim().is_empty() {
            return Err(FetchError::invalid("gene identifier cannot be empty"));
        }

        if self.max_results == 0 {
            return Err(FetchError::invalid("result cap must be at least 1"));
        }

        let tax = self.taxonomy_id.trim();
        if tax.is_empty() {
            return Err(FetchError::invalid("taxonomy id cannot be empty"));
        }
        if !tax.eq_ignore_ascii_case("all") && !tax.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FetchError::invalid(format!(
                "taxonomy id '{}' must be numeric or 'All'",
                tax
            )));
        }

        Ok(())
    }
}

/// Response body exactly as returned by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub body: String,
}

impl RawResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }
}

// ============================================================================
// Normalized records
// ============================================================================

/// A participant in an interaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractorRecord {
    /// Entrez Gene id
    pub gene_id: Option<u64>,
    pub official_symbol: Option<String>,
    /// Aliases in the order the service listed them, without repeats
    pub synonyms: Vec<String>,
    pub organism_name: Option<String>,
    pub taxonomy_id: Option<u32>,
}

impl InteractorRecord {
    /// Synonyms joined with `|`, the separator the service uses
    pub fn synonyms_joined(&self) -> String {
        self.synonyms.join("|")
    }
}

/// One curated interaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub interaction_id: Option<u64>,
    /// Experimental system type, e.g. "physical" or "genetic"
    pub interaction_type: Option<String>,
    /// Experimental system name, e.g. "Two-hybrid"
    pub evidence: Option<String>,
    pub interactors: Vec<InteractorRecord>,
    pub pubmed_id: Option<String>,
    /// Raw score text; `None` when the service reports "-"
    pub quantitative_score: Option<String>,
    pub throughput: Option<String>,
    pub source_database: Option<String>,
}

impl InteractionRecord {
    /// Numeric quantitative score, 0.0 when absent
    pub fn score(&self) -> f64 {
        score_value(self.quantitative_score.as_deref())
    }

    pub fn interactor_a(&self) -> Option<&InteractorRecord> {
        self.interactors.first()
    }

    pub fn interactor_b(&self) -> Option<&InteractorRecord> {
        self.interactors.get(1)
    }
}

// ============================================================================
// Tab-delimited row
// ============================================================================

/// One line of the service's 24-column tab-delimited output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRow {
    pub interaction_id: String,
    pub entrez_gene_a: String,
    pub entrez_gene_b: String,
    pub biogrid_id_a: String,
    pub biogrid_id_b: String,
    pub systematic_name_a: String,
    pub systematic_name_b: String,
    pub official_symbol_a: String,
    pub official_symbol_b: String,
    pub synonyms_a: String,
    pub synonyms_b: String,
    pub experimental_system: String,
    pub experimental_system_type: String,
    pub first_author: String,
    pub pubmed_id: String,
    pub organism_a: String,
    pub organism_b: String,
    pub throughput: String,
    pub quantitative_score: String,
    pub post_translational_modification: String,
    pub phenotypes: String,
    pub qualifications: String,
    pub tags: String,
    pub source_database: String,
}

impl TabRow {
    pub const COLUMN_COUNT: usize = 24;

    /// Column headers in wire order
    pub const COLUMNS: [&'static str; 24] = [
        "BioGRID Interaction ID",
        "Entrez Gene ID for Interactor A",
        "Entrez Gene ID for Interactor B",
        "BioGRID ID for Interactor A",
        "BioGRID ID for Interactor B",
        "Systematic name for Interactor A",
        "Systematic name for Interactor B",
        "Official symbol for Interactor A",
        "Official symbol for Interactor B",
        "Synonyms/Aliases for Interactor A",
        "Synonyms/Aliases for Interactor B",
        "Experimental System Name",
        "Experimental System Type",
        "First author surname of the publication",
        "Pubmed ID of the publication",
        "Organism ID for Interactor A",
        "Organism ID for Interactor B",
        "Interaction Throughput",
        "Quantitative Score",
        "Post Translational Modification",
        "Phenotypes",
        "Qualifications",
        "Tags",
        "Source Database",
    ];

    /// Build a row from exactly 24 cells
    pub fn from_cells(cells: &[&str]) -> Option<Self> {
        let [
            interaction_id,
            entrez_gene_a,
            entrez_gene_b,
            biogrid_id_a,
            biogrid_id_b,
            systematic_name_a,
            systematic_name_b,
            official_symbol_a,
            official_symbol_b,
            synonyms_a,
            synonyms_b,
            experimental_system,
            experimental_system_type,
            first_author,
            pubmed_id,
            organism_a,
            organism_b,
            throughput,
            quantitative_score,
            post_translational_modification,
            phenotypes,
            qualifications,
            tags,
            source_database,
        ] = cells
        else {
            return None;
        };

        let own = |s: &&str| s.trim().to_string();

        Some(Self {
            interaction_id: own(interaction_id),
            entrez_gene_a: own(entrez_gene_a),
            entrez_gene_b: own(entrez_gene_b),
            biogrid_id_a: own(biogrid_id_a),
            biogrid_id_b: own(biogrid_id_b),
            systematic_name_a: own(systematic_name_a),
            systematic_name_b: own(systematic_name_b),
            official_symbol_a: own(official_symbol_a),
            official_symbol_b: own(official_symbol_b),
            synonyms_a: own(synonyms_a),
            synonyms_b: own(synonyms_b),
            experimental_system: own(experimental_system),
            experimental_system_type: own(experimental_system_type),
            first_author: own(first_author),
            pubmed_id: own(pubmed_id),
            organism_a: own(organism_a),
            organism_b: own(organism_b),
            throughput: own(throughput),
            quantitative_score: own(quantitative_score),
            post_translational_modification: own(post_translational_modification),
            phenotypes: own(phenotypes),
            qualifications: own(qualifications),
            tags: own(tags),
            source_database: own(source_database),
        })
    }
}

/// "-" and empty cells mean "no value"
pub(crate) fn cell(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "-" {
        None
    } else {
        Some(value.to_string())
    }
}

/// Split a `|`-separated alias list
pub(crate) fn split_synonyms(value: &str) -> Vec<String> {
    unique_in_order(value.split('|').filter_map(cell))
}

/// Drop repeated aliases, keeping the first occurrence
pub(crate) fn unique_in_order(aliases: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for alias in aliases {
        if !unique.contains(&alias) {
            unique.push(alias);
        }
    }
    unique
}

impl From<&TabRow> for InteractionRecord {
    fn from(row: &TabRow) -> Self {
        let interactor = |gene: &str, symbol: &str, synonyms: &str, organism: &str| {
            InteractorRecord {
                gene_id: cell(gene).and_then(|g| g.parse().ok()),
                official_symbol: cell(symbol),
                synonyms: split_synonyms(synonyms),
                // Not carried by the tab-delimited format
                organism_name: None,
                taxonomy_id: cell(organism).and_then(|t| t.parse().ok()),
            }
        };

        InteractionRecord {
            interaction_id: cell(&row.interaction_id).and_then(|id| id.parse().ok()),
            interaction_type: cell(&row.experimental_system_type),
            evidence: cell(&row.experimental_system),
            interactors: vec![
                interactor(
                    &row.entrez_gene_a,
                    &row.official_symbol_a,
                    &row.synonyms_a,
                    &row.organism_a,
                ),
                interactor(
                    &row.entrez_gene_b,
                    &row.official_symbol_b,
                    &row.synonyms_b,
                    &row.organism_b,
                ),
            ],
            pubmed_id: cell(&row.pubmed_id),
            quantitative_score: cell(&row.quantitative_score),
            throughput: cell(&row.throughput),
            source_database: cell(&row.source_database),
        }
    }
}
