#![deny(unsafe_code)]
//! Locale registry used by the validator for date, number, currency, phone,
//! and boolean formatting conventions.

pub mod config;
pub mod date_format;
pub mod numeric;
pub mod registry;

pub use crate::config::{CurrencyPosition, LocaleConfig};
pub use crate::date_format::DateFormatInfo;
pub use crate::numeric::{parse_number, strip_currency_symbol};
pub use crate::registry::{LocaleRegistry, global};
