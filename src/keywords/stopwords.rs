// Stopword sets: the shared base list plus per-country entity-name variants.
//
// A country's documents are full of its own name ("德国政府", "德方", ...),
// which would otherwise dominate every keyword list. The effective set is
// built fresh for each country and passed by value into the extraction
// calls, so one country's exclusions can never leak into another's.

use std::collections::HashSet;
use std::path::Path;

use stop_words::{get, LANGUAGE};
use tracing::{info, warn};

use crate::corpus::country::CountryName;
use crate::corpus::loader::decode_text;

/// Suffixes appended to the full country name.
const FULL_NAME_SUFFIXES: &[&str] = &["政府", "官员", "企业"];

/// Suffixes appended to the short name (the bare short name is added too).
const SHORT_NAME_SUFFIXES: &[&str] = &["方", "媒", "国", "政府"];

/// A set of excluded words. Lookups also try the lowercased word so that
/// Latin-script entries match regardless of case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str) {
        let word = word.trim();
        if !word.is_empty() {
            self.words.insert(word.to_string());
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word) || self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// A new set holding the words of both sets.
    pub fn union(&self, other: &StopwordSet) -> StopwordSet {
        StopwordSet {
            words: self.words.union(&other.words).cloned().collect(),
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = StopwordSet::new();
        for word in iter {
            set.insert(word.as_ref());
        }
        set
    }
}

/// Load the base stopword list, one word per line.
///
/// A missing or unreadable file degrades to an empty base set (plus the
/// built-in Chinese list when `include_builtin` is set); extraction still
/// runs, it just filters less.
pub fn load_base(path: &Path, include_builtin: bool) -> StopwordSet {
    let mut base = match std::fs::read(path) {
        Ok(bytes) => {
            let set: StopwordSet = decode_text(&bytes).lines().collect();
            info!(path = %path.display(), count = set.len(), "Loaded base stopwords");
            set
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Base stopword list unreadable, continuing with an empty base set"
            );
            StopwordSet::new()
        }
    };

    if include_builtin {
        let builtin: Vec<String> = get(LANGUAGE::Chinese);
        for word in &builtin {
            base.insert(word);
        }
        info!(count = builtin.len(), "Merged built-in Chinese stopwords");
    }

    base
}

/// The entity-name variants generated for one country.
pub fn generated_stopwords(country: &CountryName) -> StopwordSet {
    let mut set = StopwordSet::new();
    for suffix in FULL_NAME_SUFFIXES {
        set.insert(&format!("{}{}", country.full, suffix));
    }
    set.insert(&country.short);
    for suffix in SHORT_NAME_SUFFIXES {
        set.insert(&format!("{}{}", country.short, suffix));
    }
    set
}

/// Base set plus the country's generated variants.
pub fn effective_stopwords(base: &StopwordSet, country: &CountryName) -> StopwordSet {
    base.union(&generated_stopwords(country))
}
