//! JSON schema file format accepted by the `map`/`validate`/`import`
//! subcommands. `Rule::Custom` has no file representation — a predicate is
//! a closure, not data — so schema files may only declare the data-only
//! rule kinds.

use std::path::Path;

use csvimport_model::{ColumnDef, ColumnType, Rule, Schema};
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Deserialize)]
struct SchemaFile {
    #[serde(rename = "defaultLocale")]
    default_locale: Option<String>,
    columns: IndexMap<String, ColumnFile>,
}

#[derive(Deserialize)]
struct ColumnFile {
    #[serde(rename = "type")]
    column_type: ColumnType,
    locale: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    rules: Vec<RuleFile>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleFile {
    Named(String),
    Min { min: f64 },
    Max { max: f64 },
    MinLength { #[serde(rename = "minLength")] min_length: usize },
    MaxLength { #[serde(rename = "maxLength")] max_length: usize },
    Pattern { pattern: String },
    Enum { #[serde(rename = "enum")] values: Vec<String> },
}

impl RuleFile {
    fn into_rule(self) -> anyhow::Result<Rule> {
        Ok(match self {
            RuleFile::Named(name) => match name.as_str() {
                "required" => Rule::Required,
                "email" => Rule::Email,
                "unique" => Rule::Unique,
                other => anyhow::bail!("unrecognized rule name `{other}`"),
            },
            RuleFile::Min { min } => Rule::Min(min),
            RuleFile::Max { max } => Rule::Max(max),
            RuleFile::MinLength { min_length } => Rule::MinLength(min_length),
            RuleFile::MaxLength { max_length } => Rule::MaxLength(max_length),
            RuleFile::Pattern { pattern } => Rule::Pattern(pattern),
            RuleFile::Enum { values } => Rule::Enum(values),
        })
    }
}

/// Loads and parses a schema JSON file into an engine [`Schema`].
pub fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let text = std::fs::read_to_string(path)?;
    let file: SchemaFile = serde_json::from_str(&text)?;

    let mut schema = Schema::new();
    if let Some(locale) = file.default_locale {
        schema = schema.with_default_locale(locale);
    }

    for (name, column) in file.columns {
        let mut def = ColumnDef::new(column.column_type);
        if let Some(locale) = column.locale {
            def = def.with_locale(locale);
        }
        if !column.aliases.is_empty() {
            def = def.with_aliases(column.aliases);
        }
        for rule in column.rules {
            def = def.with_rule(rule.into_rule()?);
        }
        schema = schema.with_column(name, def);
    }

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_columns_in_declaration_order() {
        let path = std::env::temp_dir().join(format!("csvimport-schema-test-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{
                "defaultLocale": "tr",
                "columns": {
                    "fiyat": {"type": "currency", "rules": [{"min": 1000}]},
                    "tarih": {"type": "date"},
                    "aktif": {"type": "boolean", "rules": ["required"]}
                }
            }"#,
        )
        .unwrap();

        let schema = load_schema(&path).expect("valid schema file");
        std::fs::remove_file(&path).ok();

        assert_eq!(schema.default_locale.as_deref(), Some("tr"));
        let names: Vec<&str> = schema.column_names().collect();
        assert_eq!(names, vec!["fiyat", "tarih", "aktif"]);
        assert!(schema.columns["aktif"].is_required());
    }

    #[test]
    fn rejects_unrecognized_named_rule() {
        let path = std::env::temp_dir().join(format!("csvimport-schema-bad-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"columns": {"x": {"type": "string", "rules": ["bogus"]}}}"#).unwrap();
        let result = load_schema(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
