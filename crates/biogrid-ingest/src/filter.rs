//! Score filtering
//!
//! BioGRID reports a missing quantitative score as `"-"`. Scores are coerced
//! to numbers with missing and unreadable values counting as zero, so they
//! drop out of a strictly-positive filter.

/// Placeholder the service uses for "no score"
pub const MISSING_SCORE: &str = "-";

/// Numeric value of a score cell
pub fn score_value(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        None | Some("") | Some(MISSING_SCORE) => 0.0,
        Some(text) => text.parse().unwrap_or(0.0),
    }
}

/// Keep records whose key is strictly positive, highest first
///
/// The sort is stable, so records with equal keys keep their input order.
pub fn filter_positive_sorted<T, I, F>(records: I, key_fn: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> f64,
{
    let mut keyed: Vec<(f64, T)> = records
        .into_iter()
        .map(|record| (key_fn(&record), record))
        .filter(|(key, _)| *key > 0.0)
        .collect();

    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));

    keyed.into_iter().map(|(_, record)| record).collect()
}
