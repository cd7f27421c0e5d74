//! Assembles the final import artifact once an [`ImporterState`] has
//! reached a step that carries a mapping and a validation result.

use csvimport_model::{MappingResult, Schema, ValidationResult};

use crate::state::ImporterState;

/// The projected rows, validator output, and mapping that produced them.
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub mapping: MappingResult,
    pub validation: ValidationResult,
}

/// `buildImportResult(partial, schema) -> ImportResult | null`.
///
/// Returns `None` until `state` carries a parsed matrix, a mapping, and a
/// validation result — i.e. no earlier than the `review` step.
pub fn build_import_result(state: &ImporterState, schema: &Schema) -> Option<ImportResult> {
    let parsed = state.parsed.as_ref()?;
    let mapping = state.mapping.as_ref()?;
    let validation = state.validation.as_ref()?;

    let rows = csvimport_validate::apply_mapping(&parsed.rows, mapping, schema, false);

    Some(ImportResult {
        headers: schema.column_names().map(String::from).collect(),
        rows,
        mapping: mapping.clone(),
        validation: validation.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ImporterAction, ImporterStep, create_initial_state, importer_reducer};
    use csvimport_model::{ColumnDef, ColumnType, Confidence, MappingMatch, ParsedMatrix, ValidationStats};

    fn schema() -> Schema {
        Schema::new().with_column("name", ColumnDef::new(ColumnType::String))
    }

    #[test]
    fn none_before_review() {
        let state = create_initial_state();
        assert!(build_import_result(&state, &schema()).is_none());
    }

    #[test]
    fn some_once_reviewed() {
        let mut state = create_initial_state();
        state.step = ImporterStep::Review;
        state.parsed = Some(ParsedMatrix::new(
            Some(vec!["Name".into()]),
            vec![vec!["Alice".into()]],
            1,
        ));
        state.mapping = Some(MappingResult {
            mappings: vec![MappingMatch {
                csv_index: 0,
                source_header: "Name".into(),
                schema_column: "name".into(),
                confidence: Confidence::Exact,
                score: 1.0,
            }],
            unmapped_source_indices: vec![],
            unmapped_schema_columns: vec![],
            auto_mapped: 1,
            needs_review: 0,
            unmapped: 0,
        });
        state.validation = Some(csvimport_model::ValidationResult {
            valid: true,
            stats: ValidationStats::default(),
            errors: vec![],
            aborted: false,
        });

        let result = build_import_result(&state, &schema()).expect("result present");
        assert_eq!(result.rows, vec![vec!["Alice".to_string()]]);
    }

    #[test]
    fn reducer_reaching_review_feeds_build_import_result() {
        let state = create_initial_state();
        let state = importer_reducer(&state, ImporterAction::LoadString { text: "name\nAlice".into() });
        let state = importer_reducer(
            &state,
            ImporterAction::ParseComplete {
                matrix: ParsedMatrix::new(Some(vec!["name".into()]), vec![vec!["Alice".into()]], 1),
            },
        );
        let state = importer_reducer(&state, ImporterAction::SkipMapping);
        let state = importer_reducer(
            &state,
            ImporterAction::ValidateComplete {
                result: csvimport_model::ValidationResult {
                    valid: true,
                    stats: ValidationStats::default(),
                    errors: vec![],
                    aborted: false,
                },
            },
        );
        assert_eq!(state.step, ImporterStep::Review);
        assert!(build_import_result(&state, &schema()).is_none(), "no mapping was ever set");
    }
}
