//! Character-level CSV tokenization shared by the generic and compiled
//! parse paths.
//!
//! Handles RFC-4180-like quoting (a doubled quote inside a quoted field is
//! a literal quote; any other character, including the delimiter and line
//! terminators, is literal while inside quotes) and recognises `\n`,
//! `\r\n`, and bare `\r` line terminators uniformly.

/// Splits `text` into rows of raw (unpadded, untrimmed-for-width) fields.
pub fn scan(text: &str, delimiter: char, quote: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == quote {
                if chars.peek() == Some(&quote) {
                    field.push(quote);
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        if c == quote && field.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            row.push(std::mem::take(&mut field));
        } else if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            row.push(std::mem::take(&mut field));
            rows.push(std::mem::take(&mut row));
        } else if c == '\n' {
            row.push(std::mem::take(&mut field));
            rows.push(std::mem::take(&mut row));
        } else {
            field.push(c);
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_basic_rows() {
        let rows = scan("a,b,c\n1,2,3\n4,5,6", ',', '"');
        assert_eq!(
            rows,
            vec![
                vec!["a", "b", "c"],
                vec!["1", "2", "3"],
                vec!["4", "5", "6"],
            ]
        );
    }

    #[test]
    fn handles_crlf_and_bare_cr() {
        let crlf = scan("a,b\r\n1,2", ',', '"');
        let cr = scan("a,b\r1,2", ',', '"');
        let lf = scan("a,b\n1,2", ',', '"');
        assert_eq!(crlf, cr);
        assert_eq!(cr, lf);
    }

    #[test]
    fn handles_doubled_quote_escape() {
        let rows = scan("a,\"say \"\"hi\"\"\"\n", ',', '"');
        assert_eq!(rows, vec![vec!["a", "say \"hi\""]]);
    }

    #[test]
    fn literal_delimiter_and_newline_inside_quotes() {
        let rows = scan("a,\"b,c\nd\"\n", ',', '"');
        assert_eq!(rows, vec![vec!["a", "b,c\nd"]]);
    }

    #[test]
    fn no_trailing_row_for_final_newline() {
        let rows = scan("a,b\n1,2\n", ',', '"');
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn empty_text_yields_no_rows() {
        assert!(scan("", ',', '"').is_empty());
    }
}
