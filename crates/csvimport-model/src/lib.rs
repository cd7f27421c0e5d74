#![deny(unsafe_code)]
//! Shared data model for the CSV import engine: schema declarations, mapping
//! reports, and validation findings used across the parser, mapper, and
//! validator crates.

pub mod lookup;
pub mod mapping;
pub mod types;
pub mod validation;

pub use crate::lookup::CaseInsensitiveSet;
pub use crate::mapping::{Confidence, MappingMatch, MappingResult};
pub use crate::types::{ColumnDef, ColumnType, CustomPredicate, ParsedMatrix, Rule, Schema};
pub use crate::validation::{ErrorCode, ValidationError, ValidationResult, ValidationStats};
