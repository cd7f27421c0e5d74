//! The generic `parse` entry point: tokenization plus header extraction and
//! row-width normalization.

use csvimport_model::ParsedMatrix;

use crate::options::ParserOptions;
use crate::scanner;

/// Parses `text` into a [`ParsedMatrix`] per `options`.
///
/// Row width is taken from the first row after empty-line filtering; rows
/// narrower than that are padded with empty strings, wider rows are
/// truncated.
pub fn parse(text: &str, options: &ParserOptions) -> ParsedMatrix {
    let delimiter = options.delimiter as char;
    let quote = options.quote as char;
    let mut raw_rows = scanner::scan(text, delimiter, quote);

    if options.skip_empty_lines {
        raw_rows.retain(|row| !(row.len() == 1 && row[0].is_empty()));
    }

    if raw_rows.is_empty() {
        return ParsedMatrix::new(None, Vec::new(), 0);
    }

    let field_count = raw_rows[0].len();
    for row in &mut raw_rows {
        normalize_width(row, field_count);
    }

    let matrix = if options.header {
        let mut rows = raw_rows.into_iter();
        let headers = rows.next().unwrap_or_default();
        ParsedMatrix::new(Some(headers), rows.collect(), field_count)
    } else {
        ParsedMatrix::new(None, raw_rows, field_count)
    };
    tracing::debug!(rows = matrix.row_count, fields = matrix.field_count, "parsed csv text");
    matrix
}

fn normalize_width(row: &mut Vec<String>, width: usize) {
    match row.len().cmp(&width) {
        std::cmp::Ordering::Less => row.resize(width, String::new()),
        std::cmp::Ordering::Greater => row.truncate(width),
        std::cmp::Ordering::Equal => {}
    }
}
