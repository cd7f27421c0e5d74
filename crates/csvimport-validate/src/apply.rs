//! Projects a parsed matrix through a mapping into the schema's declared
//! column order, filling absent sources with empty strings.

use csvimport_model::{MappingResult, Schema};

/// `applyMapping(rows, mappings, schema, hasHeader)`.
///
/// Output row width equals the schema's column count, in declaration
/// order. Never mutates `rows`.
pub fn apply_mapping(
    rows: &[Vec<String>],
    mapping: &MappingResult,
    schema: &Schema,
    has_header: bool,
) -> Vec<Vec<String>> {
    let data_rows: &[Vec<String>] = if has_header && !rows.is_empty() {
        &rows[1..]
    } else {
        rows
    };

    // Schema column name -> source csv index, for columns a mapping claims.
    let source_for: std::collections::HashMap<&str, usize> = mapping
        .mappings
        .iter()
        .filter(|m| m.is_mapped())
        .map(|m| (m.schema_column.as_str(), m.csv_index))
        .collect();

    data_rows
        .iter()
        .map(|row| {
            schema
                .column_names()
                .map(|name| {
                    source_for
                        .get(name)
                        .and_then(|idx| row.get(*idx))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvimport_model::{ColumnDef, ColumnType, Confidence, MappingMatch};

    fn schema() -> Schema {
        Schema::new()
            .with_column("name", ColumnDef::new(ColumnType::String))
            .with_column("email", ColumnDef::new(ColumnType::String))
    }

    fn mapping() -> MappingResult {
        MappingResult {
            mappings: vec![
                MappingMatch {
                    csv_index: 1,
                    source_header: "Email".into(),
                    schema_column: "email".into(),
                    confidence: Confidence::Exact,
                    score: 1.0,
                },
                MappingMatch {
                    csv_index: 0,
                    source_header: "Full Name".into(),
                    schema_column: "name".into(),
                    confidence: Confidence::Fuzzy,
                    score: 0.7,
                },
            ],
            unmapped_source_indices: vec![],
            unmapped_schema_columns: vec![],
            auto_mapped: 1,
            needs_review: 1,
            unmapped: 0,
        }
    }

    #[test]
    fn projects_into_schema_column_order() {
        let rows = vec![
            vec!["Alice".to_string(), "alice@example.com".to_string()],
            vec!["Bob".to_string(), "bob@example.com".to_string()],
        ];
        let result = apply_mapping(&rows, &mapping(), &schema(), false);
        assert_eq!(result[0], vec!["Alice".to_string(), "alice@example.com".to_string()]);
        assert_eq!(result[1], vec!["Bob".to_string(), "bob@example.com".to_string()]);
    }

    #[test]
    fn skips_header_row_when_present() {
        let rows = vec![
            vec!["Full Name".to_string(), "Email".to_string()],
            vec!["Alice".to_string(), "alice@example.com".to_string()],
        ];
        let result = apply_mapping(&rows, &mapping(), &schema(), true);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0][0], "Alice");
    }

    #[test]
    fn unclaimed_schema_columns_are_empty() {
        let rows = vec![vec!["Alice".to_string(), "alice@example.com".to_string()]];
        let sparse = MappingResult {
            mappings: vec![mapping().mappings[1].clone()],
            unmapped_source_indices: vec![1],
            unmapped_schema_columns: vec!["email".to_string()],
            auto_mapped: 0,
            needs_review: 1,
            unmapped: 0,
        };
        let result = apply_mapping(&rows, &sparse, &schema(), false);
        assert_eq!(result[0], vec!["Alice".to_string(), String::new()]);
    }

    #[test]
    fn idempotent_under_identity_mapping() {
        let rows = vec![vec!["Alice".to_string(), "alice@example.com".to_string()]];
        let once = apply_mapping(&rows, &mapping(), &schema(), false);
        let identity = MappingResult {
            mappings: schema()
                .column_names()
                .enumerate()
                .map(|(i, name)| MappingMatch {
                    csv_index: i,
                    source_header: name.to_string(),
                    schema_column: name.to_string(),
                    confidence: Confidence::Exact,
                    score: 1.0,
                })
                .collect(),
            unmapped_source_indices: vec![],
            unmapped_schema_columns: vec![],
            auto_mapped: 2,
            needs_review: 0,
            unmapped: 0,
        };
        let twice = apply_mapping(&once, &identity, &schema(), false);
        assert_eq!(once, twice);
    }
}
