#![deny(unsafe_code)]
//! Fuzzy column-header mapping onto a declared import schema.

pub mod engine;
pub mod error;

pub use crate::engine::{DEFAULT_FUZZY_THRESHOLD, map_columns, should_auto_map, update_mapping};
pub use crate::error::MappingError;
