use csvimport_cli::schema_file::load_schema;
use csvimport_parser::ParserOptions;

fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("csvimport-cli-test-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn end_to_end_turkish_schema_scenario_b() {
    let schema_path = write_temp(
        "schema.json",
        r#"{
            "defaultLocale": "tr",
            "columns": {
                "fiyat": {"type": "currency", "rules": [{"min": 1000}]},
                "tarih": {"type": "date"},
                "telefon": {"type": "phone"},
                "aktif": {"type": "boolean"}
            }
        }"#,
    );
    let schema = load_schema(&schema_path).expect("schema parses");
    std::fs::remove_file(&schema_path).ok();

    let csv_path = write_temp(
        "data.csv",
        "fiyat,tarih,telefon,aktif\n1.234,56,25.01.2025,+90 532 123 45 67,evet\n999,99,2025-01-25,+1 555 123 4567,belki\n",
    );
    let text = std::fs::read_to_string(&csv_path).unwrap();
    std::fs::remove_file(&csv_path).ok();

    let matrix = csvimport_parser::parse(&text, &ParserOptions::default());
    let headers = matrix.headers.clone().unwrap();
    let mapping = csvimport_map::map_columns(&headers, &schema, csvimport_map::DEFAULT_FUZZY_THRESHOLD);
    assert!(mapping.unmapped_schema_columns.is_empty());

    let applied = csvimport_validate::apply_mapping(&matrix.rows, &mapping, &schema, false);
    let registry = csvimport_locale::global();
    let result = csvimport_validate::validate_auto(&applied, &schema, registry);
    let stats = result.stats();

    assert_eq!(stats.total_rows, 2);
    assert_eq!(stats.valid_rows, 1);
    assert_eq!(stats.error_rows, 1);
}
