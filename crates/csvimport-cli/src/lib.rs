//! CLI library components for the CSV import engine.

#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod schema_file;
