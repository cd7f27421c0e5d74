//! Schema and rule declarations shared by the mapper, applicator, and validator.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The typed interpretation applied to a column's cell values during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
    Integer,
    Date,
    Boolean,
    Enum,
    Phone,
    Currency,
}

/// A user-supplied predicate backing [`Rule::Custom`].
///
/// The source specification models this as a callback; Rust represents a
/// callback as a boxed, cloneable closure rather than a serializable value.
pub type CustomPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A single constraint attached to a [`ColumnDef`].
#[derive(Clone)]
pub enum Rule {
    Required,
    Email,
    Unique,
    Min(f64),
    Max(f64),
    MinLength(usize),
    MaxLength(usize),
    Pattern(String),
    Enum(Vec<String>),
    Custom {
        predicate: CustomPredicate,
        message: Option<String>,
    },
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "Required"),
            Self::Email => write!(f, "Email"),
            Self::Unique => write!(f, "Unique"),
            Self::Min(n) => write!(f, "Min({n})"),
            Self::Max(n) => write!(f, "Max({n})"),
            Self::MinLength(n) => write!(f, "MinLength({n})"),
            Self::MaxLength(n) => write!(f, "MaxLength({n})"),
            Self::Pattern(p) => write!(f, "Pattern({p:?})"),
            Self::Enum(v) => write!(f, "Enum({v:?})"),
            Self::Custom { message, .. } => write!(f, "Custom(message={message:?})"),
        }
    }
}

impl Rule {
    /// The stable name used as the `errorsByRule`/`ErrorCode` key.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Unique => "unique",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::MinLength(_) => "minLength",
            Self::MaxLength(_) => "maxLength",
            Self::Pattern(_) => "pattern",
            Self::Enum(_) => "enum",
            Self::Custom { .. } => "custom",
        }
    }
}

/// Declarative description of one expected output column.
#[derive(Clone, Debug)]
pub struct ColumnDef {
    pub column_type: ColumnType,
    /// Overrides the schema's default locale for this column only.
    pub locale: Option<String>,
    /// Alternate header spellings accepted during mapping.
    pub aliases: Vec<String>,
    pub rules: Vec<Rule>,
}

impl ColumnDef {
    pub fn new(column_type: ColumnType) -> Self {
        Self {
            column_type,
            locale: None,
            aliases: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required))
    }
}

/// Declarative description of expected columns, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    pub columns: IndexMap<String, ColumnDef>,
    pub default_locale: Option<String>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    pub fn with_column(mut self, name: impl Into<String>, def: ColumnDef) -> Self {
        self.columns.insert(name.into(), def);
        self
    }

    /// The effective locale for `column`: the column override, else the
    /// schema default, else `"en"`.
    pub fn locale_for(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|c| c.locale.as_deref())
            .or(self.default_locale.as_deref())
            .unwrap_or("en")
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

/// The output of [`crate::ColumnType`]-agnostic CSV tokenization: a header
/// row (if requested) plus a rectangular sequence of string fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMatrix {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub field_count: usize,
}

impl ParsedMatrix {
    pub fn new(headers: Option<Vec<String>>, rows: Vec<Vec<String>>, field_count: usize) -> Self {
        let row_count = rows.len();
        Self {
            headers,
            rows,
            row_count,
            field_count,
        }
    }
}
