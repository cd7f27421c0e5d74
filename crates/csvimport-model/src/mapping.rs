//! Types describing the outcome of matching source headers to schema columns.

use serde::{Deserialize, Serialize};

/// Qualitative strength of a single header-to-column match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Exact,
    Alias,
    Fuzzy,
    None,
}

/// The match chosen (or not) for one source column index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingMatch {
    pub csv_index: usize,
    pub source_header: String,
    /// Empty string when unmapped, matching the source `schemaColumn: ""` convention.
    pub schema_column: String,
    pub confidence: Confidence,
    pub score: f64,
}

impl MappingMatch {
    pub fn is_mapped(&self) -> bool {
        !self.schema_column.is_empty()
    }
}

/// Full report produced by the column mapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingResult {
    pub mappings: Vec<MappingMatch>,
    pub unmapped_source_indices: Vec<usize>,
    pub unmapped_schema_columns: Vec<String>,
    pub auto_mapped: usize,
    pub needs_review: usize,
    pub unmapped: usize,
}

impl MappingResult {
    pub fn count_by_confidence(&self, confidence: Confidence) -> usize {
        self.mappings
            .iter()
            .filter(|m| m.confidence == confidence)
            .count()
    }

    pub fn min_score(&self) -> Option<f64> {
        self.mappings
            .iter()
            .filter(|m| m.is_mapped())
            .map(|m| m.score)
            .fold(None, |acc, s| Some(acc.map_or(s, |a: f64| a.min(s))))
    }

    pub fn max_score(&self) -> Option<f64> {
        self.mappings
            .iter()
            .filter(|m| m.is_mapped())
            .map(|m| m.score)
            .fold(None, |acc, s| Some(acc.map_or(s, |a: f64| a.max(s))))
    }

    pub fn mean_score(&self) -> Option<f64> {
        let mapped: Vec<f64> = self
            .mappings
            .iter()
            .filter(|m| m.is_mapped())
            .map(|m| m.score)
            .collect();
        if mapped.is_empty() {
            None
        } else {
            Some(mapped.iter().sum::<f64>() / mapped.len() as f64)
        }
    }

    /// True iff every schema column is claimed and every claimed mapping is
    /// either exact/alias, or fuzzy with score at least `threshold`.
    pub fn should_auto_map(&self, threshold: f64) -> bool {
        if !self.unmapped_schema_columns.is_empty() {
            return false;
        }
        self.mappings.iter().filter(|m| m.is_mapped()).all(|m| {
            matches!(m.confidence, Confidence::Exact | Confidence::Alias)
                || (m.confidence == Confidence::Fuzzy && m.score >= threshold)
        })
    }
}
