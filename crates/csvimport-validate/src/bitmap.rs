//! Bitmap validator back-end: one bitset per (column, rule-kind) pair over
//! all rows, selected above [`BITMAP_THRESHOLD`] rows to avoid materializing
//! a `ValidationError` per cell up front. Accessors reconstruct errors
//! lazily from the bitsets on demand.

use std::collections::BTreeMap;

use bitvec::vec::BitVec;
use csvimport_locale::LocaleRegistry;
use csvimport_model::{ErrorCode, Rule, Schema, ValidationError};

use crate::rules::{CellFinding, evaluate_cell};

/// Row counts at or below this use the dense back-end; above it, bitmap.
pub const BITMAP_THRESHOLD: usize = 10_000;

const RULE_KINDS: [ErrorCode; 11] = [
    ErrorCode::Required,
    ErrorCode::Type,
    ErrorCode::Min,
    ErrorCode::Max,
    ErrorCode::Pattern,
    ErrorCode::Enum,
    ErrorCode::Unique,
    ErrorCode::MinLength,
    ErrorCode::MaxLength,
    ErrorCode::Email,
    ErrorCode::Custom,
];

fn rule_slot(code: ErrorCode) -> usize {
    RULE_KINDS
        .iter()
        .position(|k| *k == code)
        .expect("every ErrorCode other than Valid has a bitmap slot")
}

/// One bitset per (column, rule-kind), plus the messages for findings whose
/// text varies (locale-type sub-kinds, custom rule messages).
#[derive(Debug, Clone)]
pub struct BitmapValidationResult {
    row_count: usize,
    column_count: usize,
    column_names: Vec<String>,
    /// Indexed by `column_index * RULE_KINDS.len() + rule_slot`.
    bits: Vec<BitVec>,
    messages: BTreeMap<(usize, usize), String>,
    values: Vec<Vec<String>>,
}

impl BitmapValidationResult {
    fn set(&mut self, row: usize, col: usize, finding: &CellFinding) {
        let slot = col * RULE_KINDS.len() + rule_slot(finding.code);
        self.bits[slot].set(row, true);
        if let Some(message) = &finding.message {
            self.messages.insert((row, slot), message.clone());
        }
    }

    fn is_set(&self, col: usize, slot: usize, row: usize) -> bool {
        self.bits[col * RULE_KINDS.len() + slot]
            .get(row)
            .map(|b| *b)
            .unwrap_or(false)
    }

    fn cell_findings(&self, row: usize, col: usize) -> Vec<ValidationError> {
        let mut out = Vec::new();
        for (slot, code) in RULE_KINDS.iter().enumerate() {
            if self.is_set(col, slot, row) {
                out.push(ValidationError {
                    row,
                    col,
                    field: self.column_names[col].clone(),
                    value: self.values[row][col].clone(),
                    code: *code,
                    message: self.messages.get(&(row, slot)).cloned(),
                });
            }
        }
        out
    }

    /// `getCellError(row, col)`: the first finding for one cell, if any.
    pub fn get_cell_error(&self, row: usize, col: usize) -> Option<ValidationError> {
        self.cell_findings(row, col).into_iter().next()
    }

    /// `getRowErrors(row)`: every finding across the row's columns.
    pub fn get_row_errors(&self, row: usize) -> Vec<ValidationError> {
        (0..self.column_count)
            .flat_map(|col| self.cell_findings(row, col))
            .collect()
    }

    /// `getErrors({limit, offset})`: a page of findings in row-major order.
    pub fn get_errors(&self, offset: usize, limit: usize) -> Vec<ValidationError> {
        let mut out = Vec::new();
        'rows: for row in 0..self.row_count {
            for finding in self.get_row_errors(row) {
                out.push(finding);
                if out.len() >= offset + limit {
                    break 'rows;
                }
            }
        }
        out.into_iter().skip(offset).take(limit).collect()
    }

    /// `getErrorRowCount()`.
    pub fn get_error_row_count(&self) -> usize {
        (0..self.row_count)
            .filter(|row| !self.get_row_errors(*row).is_empty())
            .count()
    }

    /// `getErrorSummary()`: counts by rule and by column, dense-compatible.
    pub fn get_error_summary(&self) -> (BTreeMap<String, usize>, BTreeMap<String, usize>) {
        let mut by_rule = BTreeMap::new();
        let mut by_column = BTreeMap::new();
        for col in 0..self.column_count {
            for (slot, code) in RULE_KINDS.iter().enumerate() {
                let count = self.bits[col * RULE_KINDS.len() + slot].count_ones();
                if count == 0 {
                    continue;
                }
                *by_rule.entry(code.rule_name().to_string()).or_insert(0) += count;
                *by_column
                    .entry(self.column_names[col].clone())
                    .or_insert(0) += count;
            }
        }
        (by_rule, by_column)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }
}

/// `validateBitmap(rows, schema)`.
pub fn validate_bitmap(
    rows: &[Vec<String>],
    schema: &Schema,
    registry: &LocaleRegistry,
) -> BitmapValidationResult {
    let row_count = rows.len();
    let column_count = schema.column_count();
    let column_names: Vec<String> = schema.column_names().map(String::from).collect();

    let mut result = BitmapValidationResult {
        row_count,
        column_count,
        column_names: column_names.clone(),
        bits: (0..column_count * RULE_KINDS.len())
            .map(|_| BitVec::repeat(false, row_count))
            .collect(),
        messages: BTreeMap::new(),
        values: rows.to_vec(),
    };

    for (row_index, row) in rows.iter().enumerate() {
        for (col_index, (column_name, column_def)) in schema.columns.iter().enumerate() {
            let value = row.get(col_index).map(String::as_str).unwrap_or_default();
            let locale = registry.get_locale(schema.locale_for(column_name));
            for finding in evaluate_cell(value, column_def, &locale, registry) {
                result.set(row_index, col_index, &finding);
            }
        }
    }

    for (col_index, (_, column_def)) in schema.columns.iter().enumerate() {
        if !column_def.rules.iter().any(|r| matches!(r, Rule::Unique)) {
            continue;
        }
        let mut seen = std::collections::HashSet::new();
        for row_index in 0..row_count {
            let value = rows[row_index]
                .get(col_index)
                .map(String::as_str)
                .unwrap_or_default();
            if value.is_empty() {
                continue;
            }
            if !seen.insert(value.to_string()) {
                result.set(
                    row_index,
                    col_index,
                    &CellFinding {
                        code: ErrorCode::Unique,
                        message: None,
                    },
                );
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvimport_model::{ColumnDef, ColumnType};

    fn registry() -> &'static LocaleRegistry {
        csvimport_locale::global()
    }

    #[test]
    fn matches_dense_error_counts() {
        let schema = Schema::new().with_column(
            "age",
            ColumnDef::new(ColumnType::Integer).with_rule(Rule::Min(0.0)),
        );
        let rows = vec![vec!["10".to_string()], vec!["-5".to_string()]];

        let dense = crate::dense::validate(&rows, &schema, registry());
        let bitmap = validate_bitmap(&rows, &schema, registry());

        assert_eq!(dense.errors.len(), bitmap.get_errors(0, usize::MAX).len());
        assert_eq!(dense.stats.error_rows, bitmap.get_error_row_count());
    }

    #[test]
    fn unique_semantics_match_dense() {
        let schema = Schema::new().with_column(
            "code",
            ColumnDef::new(ColumnType::String).with_rule(Rule::Unique),
        );
        let rows = vec![
            vec!["A".to_string()],
            vec!["A".to_string()],
            vec!["B".to_string()],
        ];
        let bitmap = validate_bitmap(&rows, &schema, registry());
        assert_eq!(bitmap.get_error_row_count(), 1);
        assert!(bitmap.get_cell_error(1, 0).is_some());
        assert!(bitmap.get_cell_error(0, 0).is_none());
    }

    #[test]
    fn get_errors_respects_offset_and_limit() {
        let schema = Schema::new().with_column(
            "n",
            ColumnDef::new(ColumnType::Integer).with_rule(Rule::Min(100.0)),
        );
        let rows: Vec<Vec<String>> = (0..5).map(|i| vec![i.to_string()]).collect();
        let bitmap = validate_bitmap(&rows, &schema, registry());
        let page = bitmap.get_errors(1, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].row, 1);
    }
}
