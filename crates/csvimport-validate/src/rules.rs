//! Per-cell rule evaluation shared by the dense and bitmap validators.
//!
//! Priority order: required, then the column's locale-aware type check,
//! then length rules, then range/pattern/enum/email, then custom. Empty
//! cells skip every rule except `required`. `unique` is evaluated as a
//! separate second pass over a finished column.

use csvimport_locale::{LocaleConfig, LocaleRegistry};
use csvimport_model::{ColumnDef, ColumnType, ErrorCode, Rule};
use regex::Regex;

use crate::checks;

/// One rule-priority-ordered finding for a single cell, prior to being
/// wrapped into a row/column-addressed `ValidationError`.
#[derive(Debug, Clone)]
pub struct CellFinding {
    pub code: ErrorCode,
    pub message: Option<String>,
}

fn email_regex() -> &'static Regex {
    // Pragmatic local@domain.tld shape, not RFC-5322 compliant by design.
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
            .expect("email regex is valid")
    })
}

fn type_check(
    value: &str,
    column_type: ColumnType,
    locale: &LocaleConfig,
    registry: &LocaleRegistry,
) -> Option<CellFinding> {
    let failure = match column_type {
        ColumnType::String | ColumnType::Enum => return None,
        ColumnType::Number => checks::check_number(locale, value).err(),
        ColumnType::Integer => checks::check_integer(locale, value).err(),
        ColumnType::Date => checks::check_date(registry, &locale.id, value).err(),
        ColumnType::Boolean => checks::check_boolean(locale, value).err(),
        ColumnType::Phone => checks::check_phone(locale, value).err(),
        ColumnType::Currency => checks::check_currency(locale, value).err(),
    };
    failure.map(|failure| CellFinding {
        code: ErrorCode::Type,
        message: Some(failure.message().to_string()),
    })
}

/// The numeric interpretation of a cell used by `min`/`max`, stripping a
/// currency symbol first when the column is typed as currency.
fn numeric_value_for(value: &str, column_type: ColumnType, locale: &LocaleConfig) -> Option<f64> {
    match column_type {
        ColumnType::Currency => checks::check_currency(locale, value).ok(),
        _ => csvimport_locale::parse_number(locale, value),
    }
}

/// Evaluates every applicable rule for one non-empty-or-required cell,
/// in spec priority order. Returns at most one finding per rule kind.
pub fn evaluate_cell(
    value: &str,
    column: &ColumnDef,
    locale: &LocaleConfig,
    registry: &LocaleRegistry,
) -> Vec<CellFinding> {
    let mut findings = Vec::new();

    if value.is_empty() {
        if column.is_required() {
            findings.push(CellFinding {
                code: ErrorCode::Required,
                message: None,
            });
        }
        return findings;
    }

    if let Some(finding) = type_check(value, column.column_type, locale, registry) {
        findings.push(finding);
    }

    for rule in &column.rules {
        match rule {
            Rule::MinLength(n) if value.chars().count() < *n => {
                findings.push(CellFinding {
                    code: ErrorCode::MinLength,
                    message: None,
                });
            }
            Rule::MaxLength(n) if value.chars().count() > *n => {
                findings.push(CellFinding {
                    code: ErrorCode::MaxLength,
                    message: None,
                });
            }
            _ => {}
        }
    }

    let numeric_value = numeric_value_for(value, column.column_type, locale);

    for rule in &column.rules {
        match rule {
            Rule::Min(min) => {
                if let Some(parsed) = numeric_value {
                    if parsed < *min {
                        findings.push(CellFinding {
                            code: ErrorCode::Min,
                            message: None,
                        });
                    }
                }
            }
            Rule::Max(max) => {
                if let Some(parsed) = numeric_value {
                    if parsed > *max {
                        findings.push(CellFinding {
                            code: ErrorCode::Max,
                            message: None,
                        });
                    }
                }
            }
            Rule::Pattern(pattern) => {
                let matches = Regex::new(&format!("^(?:{pattern})$"))
                    .map(|re| re.is_match(value))
                    .unwrap_or(false);
                if !matches {
                    findings.push(CellFinding {
                        code: ErrorCode::Pattern,
                        message: None,
                    });
                }
            }
            Rule::Enum(values) => {
                if !values.iter().any(|v| v == value) {
                    findings.push(CellFinding {
                        code: ErrorCode::Enum,
                        message: None,
                    });
                }
            }
            Rule::Email => {
                if !email_regex().is_match(value) {
                    findings.push(CellFinding {
                        code: ErrorCode::Email,
                        message: None,
                    });
                }
            }
            _ => {}
        }
    }

    for rule in &column.rules {
        if let Rule::Custom { predicate, message } = rule {
            if !predicate(value) {
                findings.push(CellFinding {
                    code: ErrorCode::Custom,
                    message: message.clone(),
                });
            }
        }
    }

    findings
}
