//! Locale-aware type checkers for `date`, `number`, `currency`, `phone`, and
//! `boolean` columns. Each checker is applied uniformly by both validator
//! back-ends; results carry the sub-code used to pick a fixed human message,
//! all of which share the single [`csvimport_model::ErrorCode::Type`]
//! numeric code.

use csvimport_locale::{LocaleConfig, LocaleRegistry, parse_number, strip_currency_symbol};

/// A locale-type failure's sub-kind, used only to select a fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFailure {
    DateFormat,
    DateMonth,
    DateDay,
    DateYear,
    NumberFormat,
    IntegerFormat,
    CurrencyFormat,
    PhoneLength,
    PhoneCountryCode,
    BooleanFormat,
}

impl TypeFailure {
    pub fn message(self) -> &'static str {
        match self {
            Self::DateFormat => "value does not match any configured date format",
            Self::DateMonth => "month is out of range",
            Self::DateDay => "day is out of range for the given month and year",
            Self::DateYear => "year is out of range",
            Self::NumberFormat | Self::CurrencyFormat => "value is not a valid number",
            Self::IntegerFormat => "value is not a valid integer",
            Self::PhoneLength => "digit count is outside the expected range",
            Self::PhoneCountryCode => "country code does not match the locale",
            Self::BooleanFormat => "value is not a recognized boolean token",
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Validates `raw` against every date format registered for `locale_id`.
pub fn check_date(registry: &LocaleRegistry, locale_id: &str, raw: &str) -> Result<(), TypeFailure> {
    for format in registry.get_date_formats(locale_id) {
        let Some(caps) = format.regex.captures(raw) else {
            continue;
        };
        let year: i32 = caps[format.year_index].parse().unwrap_or(0);
        let month: u32 = caps[format.month_index].parse().unwrap_or(0);
        let day: u32 = caps[format.day_index].parse().unwrap_or(0);

        if !(1900..=2100).contains(&year) {
            return Err(TypeFailure::DateYear);
        }
        if !(1..=12).contains(&month) {
            return Err(TypeFailure::DateMonth);
        }
        if day < 1 || day > days_in_month(month, year) {
            return Err(TypeFailure::DateDay);
        }
        return Ok(());
    }
    Err(TypeFailure::DateFormat)
}

pub fn check_number(locale: &LocaleConfig, raw: &str) -> Result<f64, TypeFailure> {
    parse_number(locale, raw).ok_or(TypeFailure::NumberFormat)
}

pub fn check_integer(locale: &LocaleConfig, raw: &str) -> Result<f64, TypeFailure> {
    let value = parse_number(locale, raw).ok_or(TypeFailure::NumberFormat)?;
    if value.fract() == 0.0 {
        Ok(value)
    } else {
        Err(TypeFailure::IntegerFormat)
    }
}

pub fn check_currency(locale: &LocaleConfig, raw: &str) -> Result<f64, TypeFailure> {
    let stripped = strip_currency_symbol(locale, raw);
    parse_number(locale, stripped).ok_or(TypeFailure::CurrencyFormat)
}

pub fn check_phone(locale: &LocaleConfig, raw: &str) -> Result<(), TypeFailure> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !['-', '(', ')', '.'].contains(c))
        .collect();
    let (has_plus, digits) = match cleaned.strip_prefix('+') {
        Some(rest) => (true, rest.to_string()),
        None => (false, cleaned),
    };

    let digit_count = digits.chars().filter(char::is_ascii_digit).count();
    let target = locale.phone_total_digits;
    let lower = target.saturating_sub(2);
    let upper = target + 2;
    if digit_count < lower || digit_count > upper {
        return Err(TypeFailure::PhoneLength);
    }
    if has_plus && !digits.starts_with(locale.country_code.as_str()) {
        return Err(TypeFailure::PhoneCountryCode);
    }
    Ok(())
}

pub fn check_boolean(locale: &LocaleConfig, raw: &str) -> Result<(), TypeFailure> {
    let normalized = raw.trim().to_lowercase();
    if locale.true_tokens.contains(&normalized) || locale.false_tokens.contains(&normalized) {
        Ok(())
    } else {
        Err(TypeFailure::BooleanFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turkish_date_leap_year_scenario_c() {
        let registry = csvimport_locale::global();
        assert!(check_date(registry, "tr", "29.02.2024").is_ok());
        assert_eq!(check_date(registry, "tr", "29.02.2025"), Err(TypeFailure::DateDay));
        assert_eq!(check_date(registry, "tr", "31.04.2025"), Err(TypeFailure::DateDay));
    }

    #[test]
    fn phone_requires_matching_country_code_when_plus_present() {
        let tr = LocaleConfig::turkish();
        assert!(check_phone(&tr, "+90 532 123 45 67").is_ok());
        assert_eq!(check_phone(&tr, "+1 555 123 4567"), Err(TypeFailure::PhoneCountryCode));
    }

    #[test]
    fn boolean_accepts_locale_tokens() {
        let tr = LocaleConfig::turkish();
        assert!(check_boolean(&tr, "evet").is_ok());
        assert_eq!(check_boolean(&tr, "belki"), Err(TypeFailure::BooleanFormat));
    }

    #[test]
    fn currency_strips_symbol_before_parsing() {
        let tr = LocaleConfig::turkish();
        assert_eq!(check_currency(&tr, "1.234,56 ₺"), Ok(1234.56));
    }

    #[test]
    fn integer_rejects_fractional_value() {
        let en = LocaleConfig::english();
        assert!(check_integer(&en, "42").is_ok());
        assert_eq!(check_integer(&en, "42.5"), Err(TypeFailure::IntegerFormat));
    }
}
