//! Derivation of a matching regex and capture-group indices from a
//! `DD`/`MM`/`YYYY` date pattern string.

use regex::Regex;

/// A date format derived once from a pattern string and cached by the registry.
#[derive(Debug, Clone)]
pub struct DateFormatInfo {
    pub format_string: String,
    pub regex: Regex,
    pub day_index: usize,
    pub month_index: usize,
    pub year_index: usize,
}

/// Build a [`DateFormatInfo`] from a pattern such as `"DD.MM.YYYY"`.
///
/// Literal separator characters between tokens are escaped and reused
/// verbatim in the generated regex; the three tokens become numbered
/// capture groups in the order they appear in the pattern.
pub fn compile(pattern: &str) -> DateFormatInfo {
    let chars: Vec<char> = pattern.chars().collect();
    let mut regex_src = String::from("^");
    let mut group_order = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i..].starts_with(&['Y', 'Y', 'Y', 'Y']) {
            regex_src.push_str(r"(\d{4})");
            group_order.push("year");
            i += 4;
        } else if chars[i..].starts_with(&['D', 'D']) {
            regex_src.push_str(r"(\d{1,2})");
            group_order.push("day");
            i += 2;
        } else if chars[i..].starts_with(&['M', 'M']) {
            regex_src.push_str(r"(\d{1,2})");
            group_order.push("month");
            i += 2;
        } else {
            regex_src.push_str(&regex::escape(&chars[i].to_string()));
            i += 1;
        }
    }
    regex_src.push('$');

    let day_index = group_order.iter().position(|t| *t == "day").unwrap_or(0) + 1;
    let month_index = group_order.iter().position(|t| *t == "month").unwrap_or(0) + 1;
    let year_index = group_order.iter().position(|t| *t == "year").unwrap_or(0) + 1;

    DateFormatInfo {
        format_string: pattern.to_string(),
        regex: Regex::new(&regex_src).expect("generated date regex is always valid"),
        day_index,
        month_index,
        year_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_dotted_pattern() {
        let info = compile("DD.MM.YYYY");
        let caps = info.regex.captures("25.01.2025").unwrap();
        assert_eq!(&caps[info.day_index], "25");
        assert_eq!(&caps[info.month_index], "01");
        assert_eq!(&caps[info.year_index], "2025");
    }

    #[test]
    fn compiles_slashed_pattern_with_different_order() {
        let info = compile("MM/DD/YYYY");
        let caps = info.regex.captures("01/25/2025").unwrap();
        assert_eq!(&caps[info.month_index], "01");
        assert_eq!(&caps[info.day_index], "25");
        assert_eq!(&caps[info.year_index], "2025");
    }

    #[test]
    fn compiles_iso_pattern() {
        let info = compile("YYYY-MM-DD");
        let caps = info.regex.captures("2025-01-25").unwrap();
        assert_eq!(&caps[info.year_index], "2025");
        assert_eq!(&caps[info.month_index], "01");
        assert_eq!(&caps[info.day_index], "25");
    }
}
