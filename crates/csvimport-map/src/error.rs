//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("csv index {0} out of range for the source header row")]
    CsvIndexOutOfRange(usize),
    #[error("schema column not found: {0}")]
    SchemaColumnNotFound(String),
}
