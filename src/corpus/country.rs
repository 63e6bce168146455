// Countries and their short names.
//
// The short name ("德" for "德国") is what news text uses in compounds such
// as "德方" or "德媒"; it drives the generated stopwords.

use std::collections::HashMap;

use super::document::Document;

/// Built-in full name -> short name table.
pub const DEFAULT_SHORT_NAMES: &[(&str, &str)] = &[
    ("德国", "德"),
    ("意大利", "意"),
    ("日本", "日"),
    ("韩国", "韩"),
    ("沙特阿拉伯", "沙特"),
    ("印度尼西亚", "印尼"),
    ("美国", "美"),
    ("英国", "英"),
    ("法国", "法"),
    ("中国", "中"),
];

/// Full and short display name of a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryName {
    pub full: String,
    pub short: String,
}

/// Lookup table from full name to short name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortNames {
    table: HashMap<String, String>,
}

impl Default for ShortNames {
    fn default() -> Self {
        Self {
            table: DEFAULT_SHORT_NAMES
                .iter()
                .map(|(full, short)| (full.to_string(), short.to_string()))
                .collect(),
        }
    }
}

impl ShortNames {
    /// Add or replace entries.
    pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        for (full, short) in overrides {
            let (full, short) = (full.into(), short.into());
            if !full.is_empty() && !short.is_empty() {
                self.table.insert(full, short);
            }
        }
        self
    }

    /// Short name from the table, or the first character of the full name.
    pub fn short_name(&self, full: &str) -> String {
        match self.table.get(full) {
            Some(short) => short.clone(),
            None => full.chars().next().map(String::from).unwrap_or_default(),
        }
    }

    pub fn resolve(&self, full: &str) -> CountryName {
        CountryName {
            full: full.to_string(),
            short: self.short_name(full),
        }
    }
}

/// A country's corpus, documents ordered by id.
#[derive(Debug, Clone)]
pub struct Country {
    pub name: CountryName,
    pub documents: Vec<Document>,
}

impl Country {
    pub fn new(name: CountryName, mut documents: Vec<Document>) -> Self {
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        Self { name, documents }
    }
}
