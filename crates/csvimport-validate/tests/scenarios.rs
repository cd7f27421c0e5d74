use csvimport_model::{ColumnDef, ColumnType, Rule, Schema};
use csvimport_validate::{BITMAP_THRESHOLD, ValidationOutcome, validate, validate_auto, validate_bitmap};

fn turkish_schema() -> Schema {
    Schema::new()
        .with_default_locale("tr")
        .with_column("fiyat", ColumnDef::new(ColumnType::Currency).with_rule(Rule::Min(1000.0)))
        .with_column("tarih", ColumnDef::new(ColumnType::Date))
        .with_column("telefon", ColumnDef::new(ColumnType::Phone))
        .with_column("aktif", ColumnDef::new(ColumnType::Boolean))
}

#[test]
fn scenario_b_turkish_locale_flags_every_bad_cell() {
    let schema = turkish_schema();
    let registry = csvimport_locale::global();
    let rows = vec![vec![
        "999,99".to_string(),
        "2025-01-25".to_string(),
        "+1 555 123 4567".to_string(),
        "belki".to_string(),
    ]];
    let result = validate(&rows, &schema, registry);
    assert_eq!(result.stats.error_rows, 1);
    assert_eq!(result.errors.len(), 4);
}

#[test]
fn scenario_e_bitmap_backend_selected_above_threshold() {
    let schema = Schema::new().with_column("n", ColumnDef::new(ColumnType::Integer).with_rule(Rule::Min(0.0)));
    let registry = csvimport_locale::global();

    let mut rows: Vec<Vec<String>> = (0..BITMAP_THRESHOLD + 1).map(|i| vec![i.to_string()]).collect();
    rows[BITMAP_THRESHOLD] = vec!["-1".to_string()];

    let auto = validate_auto(&rows, &schema, registry);
    let bitmap = validate_bitmap(&rows, &schema, registry);

    assert!(matches!(auto, ValidationOutcome::Bitmap(_)));
    assert_eq!(auto.stats().error_rows, 1);
    assert_eq!(auto.stats().error_rows, bitmap.get_error_row_count());
    assert_eq!(auto.errors(0, usize::MAX).len(), bitmap.get_errors(0, usize::MAX).len());
}

#[test]
fn dense_and_bitmap_agree_on_unique_violations() {
    let schema = Schema::new().with_column("id", ColumnDef::new(ColumnType::String).with_rule(Rule::Unique));
    let registry = csvimport_locale::global();
    let rows = vec![
        vec!["a".to_string()],
        vec!["b".to_string()],
        vec!["a".to_string()],
        vec!["a".to_string()],
    ];

    let dense_result = validate(&rows, &schema, registry);
    let bitmap_result = validate_bitmap(&rows, &schema, registry);

    assert_eq!(dense_result.errors.len(), 2);
    assert_eq!(dense_result.errors.len(), bitmap_result.get_errors(0, usize::MAX).len());
}
