//! Locale-aware numeric and currency string parsing, shared by the `min`/
//! `max` rule checks and the `number`/`currency` type checkers.

use crate::config::{CurrencyPosition, LocaleConfig};

/// Strips the locale's thousands separator and normalizes the decimal
/// separator to `.`, then parses as `f64`. Returns `None` on malformed input.
pub fn parse_number(locale: &LocaleConfig, raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut normalized = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        if c == locale.thousands_separator {
            continue;
        }
        if c == locale.decimal_separator {
            normalized.push('.');
        } else {
            normalized.push(c);
        }
    }
    normalized.parse::<f64>().ok()
}

/// Removes a leading or trailing currency symbol (with optional surrounding
/// whitespace) matching the locale's configured symbols and position.
pub fn strip_currency_symbol<'a>(locale: &LocaleConfig, raw: &'a str) -> &'a str {
    let trimmed = raw.trim();
    for symbol in &locale.currency_symbols {
        match locale.currency_position {
            CurrencyPosition::Prefix | CurrencyPosition::Both => {
                if let Some(rest) = trimmed.strip_prefix(symbol.as_str()) {
                    return rest.trim_start();
                }
            }
            CurrencyPosition::Suffix => {}
        }
        match locale.currency_position {
            CurrencyPosition::Suffix | CurrencyPosition::Both => {
                if let Some(rest) = trimmed.strip_suffix(symbol.as_str()) {
                    return rest.trim_end();
                }
            }
            CurrencyPosition::Prefix => {}
        }
    }
    trimmed
}
