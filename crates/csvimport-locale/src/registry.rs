//! Locale lookup with English fallback, plus a process-wide date-format
//! cache keyed by `(locale, pattern)`.
//!
//! Grounded on the fallback-ordered registry shape used elsewhere in the
//! retrieval pack for named catalogs with a default resolution order:
//! entries are registered once and looked up by id, with unknown ids
//! falling back to a default rather than erroring.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::config::LocaleConfig;
use crate::date_format::{self, DateFormatInfo};

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

/// The process-wide locale registry, per `spec.md` §5: one of the three
/// caches shared mutable state is confined to. Built with [`LocaleRegistry::with_builtins`]
/// on first access; a `register_locale` call made through this handle is
/// visible to every other caller of `global()` in the process.
pub fn global() -> &'static LocaleRegistry {
    REGISTRY.get_or_init(LocaleRegistry::with_builtins)
}

/// A registry of named locale bundles with English fallback.
#[derive(Debug)]
pub struct LocaleRegistry {
    locales: RwLock<BTreeMap<String, Arc<LocaleConfig>>>,
    aliases: RwLock<BTreeMap<String, String>>,
    date_format_cache: RwLock<BTreeMap<(String, String), Arc<DateFormatInfo>>>,
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl LocaleRegistry {
    /// An empty registry with no locales registered.
    pub fn empty() -> Self {
        Self {
            locales: RwLock::new(BTreeMap::new()),
            aliases: RwLock::new(BTreeMap::new()),
            date_format_cache: RwLock::new(BTreeMap::new()),
        }
    }

    /// A registry pre-populated with the built-in locales: `tr`, `en`,
    /// `en-US` (alias of `en`), `en-GB`, `de`, `fr`.
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        registry.register_locale(LocaleConfig::english());
        registry.register_locale(LocaleConfig::english_gb());
        registry.register_locale(LocaleConfig::turkish());
        registry.register_locale(LocaleConfig::german());
        registry.register_locale(LocaleConfig::french());
        registry
            .aliases
            .write()
            .expect("lock poisoned")
            .insert("en-US".to_string(), "en".to_string());
        registry
    }

    pub fn register_locale(&self, config: LocaleConfig) {
        self.locales
            .write()
            .expect("lock poisoned")
            .insert(config.id.clone(), Arc::new(config));
    }

    fn resolve_id(&self, id: &str) -> String {
        self.aliases
            .read()
            .expect("lock poisoned")
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    pub fn has_locale(&self, id: &str) -> bool {
        let resolved = self.resolve_id(id);
        self.locales.read().expect("lock poisoned").contains_key(&resolved)
    }

    /// Looks up a locale by id, falling back to `en` if unknown.
    pub fn get_locale(&self, id: &str) -> Arc<LocaleConfig> {
        let resolved = self.resolve_id(id);
        let locales = self.locales.read().expect("lock poisoned");
        locales
            .get(&resolved)
            .or_else(|| locales.get("en"))
            .cloned()
            .expect("the \"en\" locale is always registered")
    }

    pub fn get_locale_ids(&self) -> Vec<String> {
        self.locales.read().expect("lock poisoned").keys().cloned().collect()
    }

    /// Date formats for a locale, derived once per `(locale, pattern)` pair
    /// and cached thereafter.
    pub fn get_date_formats(&self, id: &str) -> Vec<Arc<DateFormatInfo>> {
        let locale = self.get_locale(id);
        locale
            .date_formats
            .iter()
            .map(|pattern| self.date_format_for(&locale.id, pattern))
            .collect()
    }

    fn date_format_for(&self, locale_id: &str, pattern: &str) -> Arc<DateFormatInfo> {
        let key = (locale_id.to_string(), pattern.to_string());
        if let Some(cached) = self.date_format_cache.read().expect("lock poisoned").get(&key) {
            return cached.clone();
        }
        let info = Arc::new(date_format::compile(pattern));
        self.date_format_cache
            .write()
            .expect("lock poisoned")
            .entry(key)
            .or_insert(info)
            .clone()
    }

    #[cfg(test)]
    pub fn reset_for_test(&self) {
        *self.date_format_cache.write().expect("lock poisoned") = BTreeMap::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let registry = LocaleRegistry::with_builtins();
        assert!(!registry.has_locale("zz"));
        assert_eq!(registry.get_locale("zz").id, "en");
    }

    #[test]
    fn alias_resolves_to_target() {
        let registry = LocaleRegistry::with_builtins();
        assert!(registry.has_locale("en-US"));
        assert_eq!(registry.get_locale("en-US").id, "en");
    }

    #[test]
    fn date_formats_are_cached_by_pattern() {
        let registry = LocaleRegistry::with_builtins();
        let first = registry.get_date_formats("tr");
        let second = registry.get_date_formats("tr");
        assert!(Arc::ptr_eq(&first[0], &second[0]));
    }

    #[test]
    fn builtins_cover_required_ids() {
        let registry = LocaleRegistry::with_builtins();
        for id in ["tr", "en", "en-GB", "de", "fr"] {
            assert!(registry.has_locale(id), "missing builtin {id}");
        }
    }
}
