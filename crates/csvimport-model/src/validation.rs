//! Types describing validator findings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fixed enumeration of validator failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ErrorCode {
    Valid = 0,
    Required = 1,
    Type = 2,
    Min = 3,
    Max = 4,
    Pattern = 5,
    Enum = 6,
    Unique = 7,
    MinLength = 8,
    MaxLength = 9,
    Email = 10,
    Custom = 11,
}

impl ErrorCode {
    /// The `errorsByRule` key, matching [`crate::Rule::kind_name`] where a
    /// rule exists, and a locale-type sub-code name otherwise.
    pub fn rule_name(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Required => "required",
            Self::Type => "type",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
            Self::Enum => "enum",
            Self::Unique => "unique",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Email => "email",
            Self::Custom => "custom",
        }
    }
}

/// A single cell-level validation finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub row: usize,
    pub col: usize,
    pub field: String,
    pub value: String,
    pub code: ErrorCode,
    pub message: Option<String>,
}

/// Aggregate counters over a dense validation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub error_rows: usize,
    pub errors_by_rule: BTreeMap<String, usize>,
    pub errors_by_column: BTreeMap<String, usize>,
}

/// Result of the dense validator back-end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub stats: ValidationStats,
    pub errors: Vec<ValidationError>,
    pub aborted: bool,
}
