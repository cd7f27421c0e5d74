use csvimport_locale::LocaleRegistry;

#[test]
fn builtin_registry_knows_en_and_tr() {
    let registry = LocaleRegistry::with_builtins();
    assert!(registry.has_locale("en"));
    assert!(registry.has_locale("tr"));
    let ids = registry.get_locale_ids();
    assert!(ids.contains(&"en".to_string()));
    assert!(ids.contains(&"tr".to_string()));
}

#[test]
fn unknown_locale_falls_back_rather_than_panicking() {
    let registry = LocaleRegistry::with_builtins();
    assert!(!registry.has_locale("xx-not-real"));
    let fallback = registry.get_locale("xx-not-real");
    assert_eq!(fallback.id, "en");
}

#[test]
fn turkish_date_formats_differ_from_english() {
    let registry = LocaleRegistry::with_builtins();
    let tr_formats = registry.get_date_formats("tr");
    let en_formats = registry.get_date_formats("en");
    assert!(!tr_formats.is_empty());
    assert!(!en_formats.is_empty());
}
