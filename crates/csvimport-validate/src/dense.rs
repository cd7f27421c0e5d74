//! Dense validator back-end: returns a flat, row-major error vector plus
//! aggregate stats. Selected for inputs at or below `BITMAP_THRESHOLD` rows.

use std::collections::{BTreeMap, HashSet};

use csvimport_locale::LocaleRegistry;
use csvimport_model::{ErrorCode, Rule, Schema, ValidationError, ValidationResult, ValidationStats};

use crate::rules::evaluate_cell;

/// `validate(rows, schema)`.
pub fn validate(rows: &[Vec<String>], schema: &Schema, registry: &LocaleRegistry) -> ValidationResult {
    let mut errors = Vec::new();
    let mut error_rows: HashSet<usize> = HashSet::new();
    let mut errors_by_rule: BTreeMap<String, usize> = BTreeMap::new();
    let mut errors_by_column: BTreeMap<String, usize> = BTreeMap::new();

    for (row_index, row) in rows.iter().enumerate() {
        for (col_index, (column_name, column_def)) in schema.columns.iter().enumerate() {
            let value = row.get(col_index).map(String::as_str).unwrap_or_default();
            let locale = registry.get_locale(schema.locale_for(column_name));

            for finding in evaluate_cell(value, column_def, &locale, registry) {
                error_rows.insert(row_index);
                *errors_by_rule.entry(finding.code.rule_name().to_string()).or_default() += 1;
                *errors_by_column.entry(column_name.clone()).or_default() += 1;
                errors.push(ValidationError {
                    row: row_index,
                    col: col_index,
                    field: column_name.clone(),
                    value: value.to_string(),
                    code: finding.code,
                    message: finding.message,
                });
            }
        }
    }

    for (col_index, (column_name, column_def)) in schema.columns.iter().enumerate() {
        if !column_def.rules.iter().any(|r| matches!(r, Rule::Unique)) {
            continue;
        }
        let mut seen = HashSet::new();
        for (row_index, row) in rows.iter().enumerate() {
            let value = row.get(col_index).map(String::as_str).unwrap_or_default();
            if value.is_empty() {
                continue;
            }
            if !seen.insert(value.to_string()) {
                error_rows.insert(row_index);
                *errors_by_rule.entry(ErrorCode::Unique.rule_name().to_string()).or_default() += 1;
                *errors_by_column.entry(column_name.clone()).or_default() += 1;
                errors.push(ValidationError {
                    row: row_index,
                    col: col_index,
                    field: column_name.clone(),
                    value: value.to_string(),
                    code: ErrorCode::Unique,
                    message: None,
                });
            }
        }
    }

    errors.sort_by_key(|e| (e.row, e.col));

    let total_rows = rows.len();
    let error_row_count = error_rows.len();
    let stats = ValidationStats {
        total_rows,
        valid_rows: total_rows - error_row_count,
        error_rows: error_row_count,
        errors_by_rule,
        errors_by_column,
    };

    ValidationResult {
        valid: errors.is_empty(),
        aborted: false,
        stats,
        errors,
    }
}
