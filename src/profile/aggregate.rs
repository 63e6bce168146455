// Corpus aggregation: document frequency per term across a country.
//
// Each document contributes at most 1 to a term, however often the term
// appears in its keyword list. Counting is order independent; the only
// thing insertion order decides is the tie-break between terms with equal
// document frequency, so callers fold documents in a fixed order.

use std::collections::HashMap;

/// Term -> document frequency, remembering first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CountryVocabulary {
    order: Vec<String>,
    counts: HashMap<String, u32>,
    documents: usize,
}

impl CountryVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one document's keywords. Empty lists are ignored and do not
    /// count as a contributing document.
    pub fn add_document<S: AsRef<str>>(&mut self, keywords: &[S]) {
        let mut contributed = false;
        let mut seen_here: Vec<&str> = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let term = keyword.as_ref().trim();
            if term.is_empty() || seen_here.contains(&term) {
                continue;
            }
            seen_here.push(term);
            contributed = true;
            self.bump(term, 1);
        }
        if contributed {
            self.documents += 1;
        }
    }

    /// Fold another vocabulary into this one. Terms new to `self` are
    /// appended in `other`'s first-seen order.
    pub fn merge(&mut self, other: CountryVocabulary) {
        for term in &other.order {
            self.bump(term, other.counts[term]);
        }
        self.documents += other.documents;
    }

    fn bump(&mut self, term: &str, by: u32) {
        match self.counts.get_mut(term) {
            Some(count) => *count += by,
            None => {
                self.order.push(term.to_string());
                self.counts.insert(term.to_string(), by);
            }
        }
    }

    /// Document frequency of `term` (0 when absent).
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of documents that contributed at least one term.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// `(term, document frequency)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.order
            .iter()
            .map(move |term| (term.as_str(), self.counts[term]))
    }

    /// Entries sorted by descending document frequency, ties in first-seen
    /// order.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Vocabularies are equal when they hold the same counts, whatever order the
/// documents arrived in.
impl PartialEq for CountryVocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts && self.documents == other.documents
    }
}

impl Eq for CountryVocabulary {}

/// Build a vocabulary from many keyword lists.
pub fn aggregate<'a, I>(keyword_lists: I) -> CountryVocabulary
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut vocabulary = CountryVocabulary::new();
    for keywords in keyword_lists {
        vocabulary.add_document(keywords);
    }
    vocabulary
}
