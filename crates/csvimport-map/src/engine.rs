//! Matches source header names onto schema column names using exact,
//! alias, and fuzzy strategies, in that strict priority order, never
//! re-assigning a schema column already claimed by an earlier pass.

use std::collections::HashSet;

use csvimport_model::{CaseInsensitiveSet, Confidence, MappingMatch, MappingResult, Schema};
use rapidfuzz::distance::levenshtein;

use crate::error::MappingError;

/// Default similarity threshold below which a fuzzy candidate is rejected.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// `mapColumns(sourceHeaders, schema, fuzzyThreshold)`.
pub fn map_columns(
    source_headers: &[String],
    schema: &Schema,
    fuzzy_threshold: f64,
) -> MappingResult {
    let schema_names: Vec<String> = schema.column_names().map(String::from).collect();
    let exact_lookup = CaseInsensitiveSet::new(schema_names.iter().map(String::as_str));
    let alias_lookups: Vec<(&str, CaseInsensitiveSet)> = schema_names
        .iter()
        .map(|name| {
            let aliases = schema.columns[name.as_str()].aliases.iter().map(String::as_str);
            (name.as_str(), CaseInsensitiveSet::new(aliases))
        })
        .collect();
    let mut claimed: HashSet<String> = HashSet::new();
    let mut matches: Vec<Option<MappingMatch>> = vec![None; source_headers.len()];

    // Pass 1: exact, case-insensitive, whitespace-trimmed.
    for (i, header) in source_headers.iter().enumerate() {
        if let Some(name) = exact_lookup.get(header.trim()).filter(|n| !claimed.contains(*n)) {
            claimed.insert(name.to_string());
            matches[i] = Some(MappingMatch {
                csv_index: i,
                source_header: header.clone(),
                schema_column: name.to_string(),
                confidence: Confidence::Exact,
                score: 1.0,
            });
        }
    }

    // Pass 2: alias, same comparison against each column's aliases.
    for (i, header) in source_headers.iter().enumerate() {
        if matches[i].is_some() {
            continue;
        }
        let needle = header.trim();
        if let Some((name, _)) = alias_lookups
            .iter()
            .find(|(name, aliases)| !claimed.contains(*name) && aliases.contains(needle))
        {
            claimed.insert(name.to_string());
            matches[i] = Some(MappingMatch {
                csv_index: i,
                source_header: header.clone(),
                schema_column: name.to_string(),
                confidence: Confidence::Alias,
                score: 1.0,
            });
        }
    }

    // Pass 3: fuzzy, normalized similarity against remaining schema columns.
    for (i, header) in source_headers.iter().enumerate() {
        if matches[i].is_some() {
            continue;
        }
        let normalized_header = normalize(header);
        let mut best: Option<(&str, f64)> = None;
        for name in &schema_names {
            if claimed.contains(name) {
                continue;
            }
            let similarity =
                levenshtein::normalized_similarity(normalized_header.chars(), normalize(name).chars());
            if best.is_none_or(|(_, best_score)| similarity > best_score) {
                best = Some((name.as_str(), similarity));
            }
        }

        matches[i] = Some(match best {
            Some((name, score)) if score >= fuzzy_threshold => {
                claimed.insert(name.to_string());
                MappingMatch {
                    csv_index: i,
                    source_header: header.clone(),
                    schema_column: name.to_string(),
                    confidence: Confidence::Fuzzy,
                    score,
                }
            }
            _ => MappingMatch {
                csv_index: i,
                source_header: header.clone(),
                schema_column: String::new(),
                confidence: Confidence::None,
                score: 0.0,
            },
        });
    }

    finish(matches.into_iter().map(|m| m.expect("every index assigned a match")).collect(), schema)
}

/// `UPDATE_MAPPING(csvIndex, schemaColumn)`: reassigns one source column,
/// demoting any other source currently claiming the same schema column,
/// then recomputes every counter from scratch.
pub fn update_mapping(
    result: &MappingResult,
    schema: &Schema,
    csv_index: usize,
    schema_column: &str,
) -> Result<MappingResult, MappingError> {
    if !schema_column.is_empty() && !schema.columns.contains_key(schema_column) {
        return Err(MappingError::SchemaColumnNotFound(schema_column.to_string()));
    }

    let mut mappings = result.mappings.clone();
    let target = mappings
        .iter()
        .position(|m| m.csv_index == csv_index)
        .ok_or(MappingError::CsvIndexOutOfRange(csv_index))?;

    if !schema_column.is_empty() {
        for m in mappings.iter_mut() {
            if m.csv_index != csv_index && m.schema_column == schema_column {
                m.schema_column = String::new();
                m.confidence = Confidence::None;
                m.score = 0.0;
            }
        }
    }

    let target = &mut mappings[target];
    if schema_column.is_empty() {
        target.schema_column = String::new();
        target.confidence = Confidence::None;
        target.score = 0.0;
    } else {
        target.schema_column = schema_column.to_string();
        target.confidence = Confidence::Exact;
        target.score = 1.0;
    }

    Ok(finish(mappings, schema))
}

pub fn should_auto_map(result: &MappingResult, threshold: f64) -> bool {
    result.should_auto_map(threshold)
}

fn finish(mappings: Vec<MappingMatch>, schema: &Schema) -> MappingResult {
    let claimed: HashSet<&str> = mappings
        .iter()
        .filter(|m| m.is_mapped())
        .map(|m| m.schema_column.as_str())
        .collect();
    let unmapped_schema_columns: Vec<String> = schema
        .column_names()
        .filter(|name| !claimed.contains(*name))
        .map(String::from)
        .collect();
    let unmapped_source_indices: Vec<usize> = mappings
        .iter()
        .filter(|m| !m.is_mapped())
        .map(|m| m.csv_index)
        .collect();
    let auto_mapped = mappings
        .iter()
        .filter(|m| matches!(m.confidence, Confidence::Exact | Confidence::Alias))
        .count();
    let needs_review = mappings
        .iter()
        .filter(|m| m.confidence == Confidence::Fuzzy)
        .count();
    let unmapped = mappings
        .iter()
        .filter(|m| m.confidence == Confidence::None)
        .count();

    MappingResult {
        mappings,
        unmapped_source_indices,
        unmapped_schema_columns,
        auto_mapped,
        needs_review,
        unmapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvimport_model::{ColumnDef, ColumnType};

    fn schema() -> Schema {
        Schema::new()
            .with_column("fullName", ColumnDef::new(ColumnType::String))
            .with_column(
                "email",
                ColumnDef::new(ColumnType::String).with_aliases(["e-mail", "mail"]),
            )
            .with_column("phone", ColumnDef::new(ColumnType::Phone))
    }

    #[test]
    fn exact_match_is_case_and_whitespace_insensitive() {
        let headers = vec![" Email ".to_string()];
        let result = map_columns(&headers, &schema(), DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(result.mappings[0].schema_column, "email");
        assert_eq!(result.mappings[0].confidence, Confidence::Exact);
    }

    #[test]
    fn alias_match_wins_over_fuzzy() {
        let headers = vec!["e-mail".to_string()];
        let result = map_columns(&headers, &schema(), DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(result.mappings[0].schema_column, "email");
        assert_eq!(result.mappings[0].confidence, Confidence::Alias);
    }

    #[test]
    fn fuzzy_mapping_scenario_d() {
        let headers = vec!["Full Name".to_string(), "E-mail".to_string(), "Phone #".to_string()];
        let result = map_columns(&headers, &schema(), DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(result.mappings[0].schema_column, "fullName");
        assert_eq!(result.mappings[1].schema_column, "email");
        assert_eq!(result.mappings[1].confidence, Confidence::Alias);
        assert_eq!(result.mappings[2].schema_column, "phone");
        assert!(should_auto_map(&result, 0.6));
    }

    #[test]
    fn never_reassigns_a_claimed_schema_column() {
        let headers = vec!["email".to_string(), "email".to_string()];
        let result = map_columns(&headers, &schema(), DEFAULT_FUZZY_THRESHOLD);
        let claimed: Vec<_> = result
            .mappings
            .iter()
            .filter(|m| m.schema_column == "email")
            .collect();
        assert_eq!(claimed.len(), 1);
    }

    #[test]
    fn update_mapping_demotes_previous_claimant() {
        let headers = vec!["fullName".to_string(), "unrelated".to_string()];
        let result = map_columns(&headers, &schema(), DEFAULT_FUZZY_THRESHOLD);
        let updated = update_mapping(&result, &schema(), 1, "fullName").expect("valid reassignment");
        assert_eq!(updated.mappings[1].schema_column, "fullName");
        assert_eq!(updated.mappings[0].schema_column, "");
        assert_eq!(updated.mappings[0].confidence, Confidence::None);
    }

    #[test]
    fn update_mapping_rejects_unknown_csv_index() {
        let headers = vec!["fullName".to_string()];
        let result = map_columns(&headers, &schema(), DEFAULT_FUZZY_THRESHOLD);
        let err = update_mapping(&result, &schema(), 99, "fullName").unwrap_err();
        assert_eq!(err, MappingError::CsvIndexOutOfRange(99));
    }

    #[test]
    fn update_mapping_rejects_unknown_schema_column() {
        let headers = vec!["fullName".to_string()];
        let result = map_columns(&headers, &schema(), DEFAULT_FUZZY_THRESHOLD);
        let err = update_mapping(&result, &schema(), 0, "not-a-column").unwrap_err();
        assert_eq!(err, MappingError::SchemaColumnNotFound("not-a-column".to_string()));
    }

    #[test]
    fn below_threshold_candidates_are_unmapped() {
        let headers = vec!["zzz".to_string()];
        let result = map_columns(&headers, &schema(), DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(result.mappings[0].confidence, Confidence::None);
        assert_eq!(result.unmapped, 1);
    }
}
