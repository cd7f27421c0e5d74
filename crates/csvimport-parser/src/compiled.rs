//! Compiled-parser cache: given a text sample, detect `(delimiter, quote,
//! fieldCount)` once and reuse that key on subsequent calls instead of
//! re-running detection, falling back to the generic path whenever an
//! input doesn't conform to the detected shape.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, OnceLock};

use csvimport_model::ParsedMatrix;

use crate::options::ParserOptions;
use crate::parse::parse;

const DEFAULT_CAPACITY: usize = 16;
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

type CacheKey = (u8, u8, usize);

/// A scanner specialized for a `(delimiter, quote, fieldCount)` shape.
///
/// Behaviorally identical to [`parse`] on conforming inputs; on inputs
/// whose detected field count differs from the one it was compiled for, it
/// defers to the generic, default-option parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompiledParser {
    pub delimiter: u8,
    pub quote: u8,
    pub field_count: usize,
}

impl CompiledParser {
    pub fn apply(&self, text: &str) -> ParsedMatrix {
        let options = ParserOptions {
            delimiter: self.delimiter,
            quote: self.quote,
            header: true,
            skip_empty_lines: false,
        };
        let matrix = parse(text, &options);
        if matrix.rows.is_empty() || matrix.field_count == self.field_count {
            matrix
        } else {
            parse(text, &ParserOptions::default())
        }
    }
}

struct LruCache {
    capacity: usize,
    order: VecDeque<CacheKey>,
    entries: HashMap<CacheKey, CompiledParser>,
}

impl LruCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::new(),
            entries: HashMap::new(),
        }
    }

    fn get(&mut self, key: &CacheKey) -> Option<CompiledParser> {
        if let Some(value) = self.entries.get(key).copied() {
            self.touch(key);
            Some(value)
        } else {
            None
        }
    }

    fn put(&mut self, key: CacheKey, value: CompiledParser) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key, value);
        self.touch(&key);
    }

    fn touch(&mut self, key: &CacheKey) {
        self.order.retain(|k| k != key);
        self.order.push_back(*key);
    }

    fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
}

fn cache() -> &'static Mutex<LruCache> {
    static CACHE: OnceLock<Mutex<LruCache>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(LruCache::new(DEFAULT_CAPACITY)))
}

fn detect_key(sample_text: &str) -> CacheKey {
    let quote = b'"';
    let first_line = sample_text.lines().next().unwrap_or("");
    let delimiter = DELIMITER_CANDIDATES
        .into_iter()
        .max_by_key(|d| first_line.matches(*d as char).count())
        .unwrap_or(b',');
    let options = ParserOptions {
        delimiter,
        quote,
        header: true,
        skip_empty_lines: false,
    };
    let field_count = parse(sample_text, &options).field_count;
    (delimiter, quote, field_count)
}

/// Detects a sample's shape and returns a cached or newly built [`CompiledParser`].
pub fn compile_parser(sample_text: &str) -> CompiledParser {
    let key = detect_key(sample_text);
    let mut guard = cache().lock().expect("lock poisoned");
    if let Some(cached) = guard.get(&key) {
        tracing::trace!(delimiter = %(key.0 as char), fields = key.2, "compiled-parser cache hit");
        return cached;
    }
    let compiled = CompiledParser {
        delimiter: key.0,
        quote: key.1,
        field_count: key.2,
    };
    guard.put(key, compiled);
    tracing::trace!(delimiter = %(key.0 as char), fields = key.2, "compiled-parser cache miss, detected shape");
    compiled
}

/// Empties the compiled-parser cache. Must not run concurrently with a
/// `parse` call sharing the cache (the engine assumes single-threaded use
/// outside the worker transport boundary).
pub fn clear_parser_cache() {
    cache().lock().expect("lock poisoned").clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_and_reapplies_on_conforming_input() {
        clear_parser_cache();
        let compiled = compile_parser("a,b,c\n1,2,3");
        assert_eq!(compiled.field_count, 3);
        let matrix = compiled.apply("a,b,c\n4,5,6\n7,8,9");
        assert_eq!(matrix.rows.len(), 2);
    }

    #[test]
    fn falls_back_to_generic_on_non_conforming_width() {
        clear_parser_cache();
        let compiled = compile_parser("a,b,c\n1,2,3");
        let matrix = compiled.apply("a,b\n1,2");
        assert_eq!(matrix.field_count, 2);
    }

    #[test]
    fn detects_semicolon_delimiter() {
        clear_parser_cache();
        let compiled = compile_parser("a;b;c\n1;2;3");
        assert_eq!(compiled.delimiter, b';');
        assert_eq!(compiled.field_count, 3);
    }

    #[test]
    fn clear_parser_cache_empties_entries() {
        clear_parser_cache();
        compile_parser("a,b\n1,2");
        assert_eq!(cache().lock().expect("lock poisoned").entries.len(), 1);
        clear_parser_cache();
        assert_eq!(cache().lock().expect("lock poisoned").entries.len(), 0);
    }
}
