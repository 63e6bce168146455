// Fixed-term registry: multi-character terms the segmenter must never split.
//
// Terms are collected here before any extraction runs, then handed to
// `Segmenter::new`, which bakes them into its dictionary. After that the
// registry is only ever read.

use std::path::Path;

use anyhow::{Context, Result};

use crate::corpus::loader::decode_text;

/// Policy terms that are registered unless the configuration replaces them.
pub const DEFAULT_FIXED_WORDS: &[&str] = &[
    "一带一路",
    "碳中和",
    "供应链",
    "人工智能",
    "二十国集团",
    "可再生能源",
    "泽连斯基",
    "默克尔",
    "社会民主党",
    "自由民主党",
    "绿色经济",
    "气候变化",
    "命运共同体",
    "大流行",
    "通货膨胀",
    "温室气体",
    "巴黎协定",
    "巴黎大会",
    "贸易战",
    "贸易制裁",
    "贸易保护主义",
    "绿水青山就是金山银山",
    "绿水青山",
];

/// Ordered set of atomic terms, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedTerms {
    terms: Vec<String>,
}

impl FixedTerms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with `DEFAULT_FIXED_WORDS`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for term in DEFAULT_FIXED_WORDS {
            registry.register(term);
        }
        registry
    }

    /// Mark a term as atomic. Registering the same term twice, or a blank
    /// term, changes nothing.
    pub fn register(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() || self.contains(term) {
            return;
        }
        self.terms.push(term.to_string());
    }

    /// Register every non-blank line of a UTF-8 or GB18030 text file.
    pub fn register_file(&mut self, path: &Path) -> Result<usize> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read fixed-term file {}", path.display()))?;
        let before = self.len();
        for line in decode_text(&bytes).lines() {
            self.register(line);
        }
        Ok(self.len() - before)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for FixedTerms {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        for term in iter {
            registry.register(term.as_ref());
        }
        registry
    }
}
