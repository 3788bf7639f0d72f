use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Tag,
    Numeric,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "TEXT",
            FieldKind::Tag => "TAG",
            FieldKind::Numeric => "NUMERIC",
        }
    }
}

/// Secondary index definition over hashes sharing a key prefix
#[derive(Debug, Clone)]
pub struct IndexSchema {
    pub name: String,
    pub prefix: String,
    pub fields: Vec<(&'static str, FieldKind)>,
}

impl IndexSchema {
    /// Index used by the compound user search
    pub fn users(name: &str) -> Self {
        Self {
            name: name.to_string(),
            prefix: super::USER_PREFIX.to_string(),
            fields: vec![
                ("first_name", FieldKind::Text),
                ("gender", FieldKind::Tag),
                ("country", FieldKind::Tag),
                ("latitude", FieldKind::Numeric),
            ],
        }
    }
}

/// Compound user filter: exact gender tag, any of the countries, latitude
/// within an inclusive range.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSearch {
    pub gender: String,
    pub countries: Vec<String>,
    pub latitude: (f64, f64),
    pub limit: usize,
}

impl Default for UserSearch {
    fn default() -> Self {
        Self {
            gender: "female".to_string(),
            countries: vec!["China".to_string(), "Russia".to_string()],
            latitude: (40.0, 46.0),
            limit: 10,
        }
    }
}

impl UserSearch {
    /// RediSearch query string for this filter
    pub fn to_query(&self) -> String {
        let countries = self
            .countries
            .iter()
            .map(|c| format!("@country:{{{}}}", c))
            .collect::<Vec<_>>()
            .join("|");

        format!(
            "@gender:{{{}}} ({}) @latitude:[{} {}]",
            self.gender, countries, self.latitude.0, self.latitude.1
        )
    }
}

/// A document returned by the search index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchDocument {
    pub id: String,
    pub fields: HashMap<String, String>,
}

impl SearchDocument {
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}
