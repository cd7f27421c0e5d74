//! Locale bundle definitions: date formats, number/currency conventions,
//! phone digit targets, and boolean token sets.

use std::collections::BTreeSet;

/// Where the currency symbol sits relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyPosition {
    Prefix,
    Suffix,
    Both,
}

/// A named bundle of locale-specific formatting conventions.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    pub id: String,
    /// Date patterns using `DD`/`MM`/`YYYY` tokens, e.g. `"DD.MM.YYYY"`.
    pub date_formats: Vec<String>,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub currency_symbols: Vec<String>,
    pub currency_position: CurrencyPosition,
    pub country_code: String,
    pub phone_total_digits: usize,
    pub true_tokens: BTreeSet<String>,
    pub false_tokens: BTreeSet<String>,
}

impl LocaleConfig {
    pub fn english() -> Self {
        Self {
            id: "en".to_string(),
            date_formats: vec!["MM/DD/YYYY".to_string(), "YYYY-MM-DD".to_string()],
            thousands_separator: ',',
            decimal_separator: '.',
            currency_symbols: vec!["$".to_string()],
            currency_position: CurrencyPosition::Prefix,
            country_code: "1".to_string(),
            phone_total_digits: 10,
            true_tokens: ["true", "yes", "1", "y"].map(str::to_string).into(),
            false_tokens: ["false", "no", "0", "n"].map(str::to_string).into(),
        }
    }

    pub fn english_gb() -> Self {
        Self {
            id: "en-GB".to_string(),
            date_formats: vec!["DD/MM/YYYY".to_string(), "YYYY-MM-DD".to_string()],
            currency_symbols: vec!["£".to_string()],
            country_code: "44".to_string(),
            ..Self::english()
        }
    }

    pub fn turkish() -> Self {
        Self {
            id: "tr".to_string(),
            date_formats: vec!["DD.MM.YYYY".to_string(), "YYYY-MM-DD".to_string()],
            thousands_separator: '.',
            decimal_separator: ',',
            currency_symbols: vec!["₺".to_string(), "TL".to_string()],
            currency_position: CurrencyPosition::Suffix,
            country_code: "90".to_string(),
            phone_total_digits: 10,
            true_tokens: ["evet", "doğru", "1"].map(str::to_string).into(),
            false_tokens: ["hayır", "yanlış", "0"].map(str::to_string).into(),
        }
    }

    pub fn german() -> Self {
        Self {
            id: "de".to_string(),
            date_formats: vec!["DD.MM.YYYY".to_string(), "YYYY-MM-DD".to_string()],
            thousands_separator: '.',
            decimal_separator: ',',
            currency_symbols: vec!["€".to_string()],
            currency_position: CurrencyPosition::Suffix,
            country_code: "49".to_string(),
            phone_total_digits: 11,
            true_tokens: ["wahr", "ja", "1"].map(str::to_string).into(),
            false_tokens: ["falsch", "nein", "0"].map(str::to_string).into(),
        }
    }

    pub fn french() -> Self {
        Self {
            id: "fr".to_string(),
            date_formats: vec!["DD/MM/YYYY".to_string(), "YYYY-MM-DD".to_string()],
            thousands_separator: ' ',
            decimal_separator: ',',
            currency_symbols: vec!["€".to_string()],
            currency_position: CurrencyPosition::Suffix,
            country_code: "33".to_string(),
            phone_total_digits: 9,
            true_tokens: ["vrai", "oui", "1"].map(str::to_string).into(),
            false_tokens: ["faux", "non", "0"].map(str::to_string).into(),
        }
    }
}
