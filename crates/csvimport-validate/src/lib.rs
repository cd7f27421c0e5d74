//! Row-and-column validation against a [`csvimport_model::Schema`]: a dense
//! back-end for small inputs and a bitmap back-end for large ones, sharing a
//! single per-cell rule-evaluation engine.

#![deny(unsafe_code)]

pub mod apply;
pub mod checks;
pub mod rules;

pub mod bitmap;
pub mod dense;

pub use apply::apply_mapping;
pub use bitmap::{BITMAP_THRESHOLD, BitmapValidationResult, validate_bitmap};
pub use checks::TypeFailure;
pub use dense::validate;
pub use rules::CellFinding;

use csvimport_locale::LocaleRegistry;
use csvimport_model::{Schema, ValidationError, ValidationResult, ValidationStats};

/// Dense or bitmap validator output behind one interface, so a caller that
/// only needs a page of findings or the summary counters never has to pay
/// for reconstructing the full `ValidationError` list from a bitmap result.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    Dense(ValidationResult),
    Bitmap(BitmapValidationResult),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Dense(result) => result.valid,
            Self::Bitmap(bitmap) => bitmap.get_error_row_count() == 0,
        }
    }

    pub fn stats(&self) -> ValidationStats {
        match self {
            Self::Dense(result) => result.stats.clone(),
            Self::Bitmap(bitmap) => {
                let (errors_by_rule, errors_by_column) = bitmap.get_error_summary();
                let error_rows = bitmap.get_error_row_count();
                let total_rows = bitmap.row_count();
                ValidationStats {
                    total_rows,
                    valid_rows: total_rows - error_rows,
                    error_rows,
                    errors_by_rule,
                    errors_by_column,
                }
            }
        }
    }

    /// A page of findings in row-major order. The bitmap backend reconstructs
    /// only the requested page from its bitsets rather than the whole result.
    pub fn errors(&self, offset: usize, limit: usize) -> Vec<ValidationError> {
        match self {
            Self::Dense(result) => result.errors.iter().skip(offset).take(limit).cloned().collect(),
            Self::Bitmap(bitmap) => bitmap.get_errors(offset, limit),
        }
    }

    /// Materializes the full dense-shaped result. Callers that only need a
    /// page or the summary counters should use [`Self::errors`]/[`Self::stats`]
    /// instead, since this pays the full reconstruction cost for a bitmap result.
    pub fn into_result(self) -> ValidationResult {
        match self {
            Self::Dense(result) => result,
            Self::Bitmap(bitmap) => {
                let (errors_by_rule, errors_by_column) = bitmap.get_error_summary();
                let error_rows = bitmap.get_error_row_count();
                let total_rows = bitmap.row_count();
                let errors = bitmap.get_errors(0, usize::MAX);
                ValidationResult {
                    valid: errors.is_empty(),
                    aborted: false,
                    stats: ValidationStats {
                        total_rows,
                        valid_rows: total_rows - error_rows,
                        error_rows,
                        errors_by_rule,
                        errors_by_column,
                    },
                    errors,
                }
            }
        }
    }
}

/// Picks the dense or bitmap back-end by row count. Above [`BITMAP_THRESHOLD`]
/// rows the result stays in its bitmap shape; see [`ValidationOutcome`] for
/// paginated and summary access without flattening it.
pub fn validate_auto(rows: &[Vec<String>], schema: &Schema, registry: &LocaleRegistry) -> ValidationOutcome {
    if rows.len() <= BITMAP_THRESHOLD {
        tracing::debug!(rows = rows.len(), "validating with the dense backend");
        return ValidationOutcome::Dense(dense::validate(rows, schema, registry));
    }

    tracing::debug!(rows = rows.len(), "validating with the bitmap backend");
    ValidationOutcome::Bitmap(bitmap::validate_bitmap(rows, schema, registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvimport_model::{ColumnDef, ColumnType, Rule};

    #[test]
    fn auto_picks_dense_for_small_input() {
        let schema = Schema::new().with_column(
            "n",
            ColumnDef::new(ColumnType::Integer).with_rule(Rule::Min(0.0)),
        );
        let rows = vec![vec!["-1".to_string()]];
        let result = validate_auto(&rows, &schema, csvimport_locale::global());
        assert_eq!(result.errors(0, usize::MAX).len(), 1);
    }

    #[test]
    fn auto_picks_bitmap_above_threshold_without_eager_materialization() {
        let schema = Schema::new().with_column(
            "n",
            ColumnDef::new(ColumnType::Integer).with_rule(Rule::Min(0.0)),
        );
        let mut rows: Vec<Vec<String>> = (0..BITMAP_THRESHOLD + 1).map(|i| vec![i.to_string()]).collect();
        rows[BITMAP_THRESHOLD] = vec!["-1".to_string()];

        let outcome = validate_auto(&rows, &schema, csvimport_locale::global());
        assert!(matches!(outcome, ValidationOutcome::Bitmap(_)));
        assert_eq!(outcome.stats().error_rows, 1);

        let page = outcome.errors(0, 1);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].row, BITMAP_THRESHOLD);
    }
}
