// Word segmentation and part-of-speech tagging.
//
// Chinese text has no word boundaries, so both salience rankers work on the
// output of a dictionary segmenter (jieba). The segmenter is built once from
// the fixed-term registry and is read-only afterwards, so a single instance
// can be shared across threads behind an `Arc`.

use std::collections::HashSet;

use jieba_rs::Jieba;
use tracing::info;

use super::fixed::FixedTerms;

/// Tag given to registered fixed terms. `nz` (other proper noun) is part of
/// the default allowed class, so fixed terms stay eligible as keywords.
pub const FIXED_TERM_TAG: &str = "nz";

/// Grammatical tags eligible for extraction by default: verbal nouns plus
/// common, person, place, organization and other proper nouns.
pub const DEFAULT_ALLOWED_POS: &[&str] = &["vn", "n", "nr", "ns", "nt", "nz"];

/// A single segmented word with its part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub word: &'a str,
    pub pos: &'a str,
}

/// Immutable segmenter with the fixed terms baked into its dictionary.
pub struct Segmenter {
    jieba: Jieba,
    fixed_terms: FixedTerms,
}

impl Segmenter {
    pub fn new(fixed_terms: FixedTerms) -> Self {
        let mut jieba = Jieba::new();
        for term in fixed_terms.iter() {
            jieba.add_word(term, None, Some(FIXED_TERM_TAG));
        }
        info!(count = fixed_terms.len(), "Loaded fixed terms into segmenter");
        Self { jieba, fixed_terms }
    }

    pub fn fixed_terms(&self) -> &FixedTerms {
        &self.fixed_terms
    }

    /// The underlying dictionary, for jieba's keyword extractors.
    pub(crate) fn jieba(&self) -> &Jieba {
        &self.jieba
    }

    /// Segment `text` and tag every word (HMM enabled for unknown words).
    pub fn tag<'a>(&'a self, text: &'a str) -> Vec<Token<'a>> {
        self.jieba
            .tag(text, true)
            .into_iter()
            .map(|t| Token {
                word: t.word,
                pos: t.tag,
            })
            .collect()
    }

    /// Segment `text` into bare words.
    pub fn cut<'a>(&'a self, text: &'a str) -> Vec<&'a str> {
        self.tag(text).into_iter().map(|t| t.word).collect()
    }
}

/// The set of part-of-speech tags a keyword may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosFilter {
    allowed: HashSet<String>,
}

impl Default for PosFilter {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_POS.iter().copied())
    }
}

impl PosFilter {
    pub fn new<S: AsRef<str>>(tags: impl IntoIterator<Item = S>) -> Self {
        Self {
            allowed: tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Exact tag match, as in `n` allows `n` but not `nr`.
    pub fn allows(&self, pos: &str) -> bool {
        self.allowed.contains(pos)
    }

    /// Allowed tags in sorted order.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.allowed.iter().cloned().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_allows_nouns_only() {
        let filter = PosFilter::default();
        assert!(filter.allows("n"));
        assert!(filter.allows("vn"));
        assert!(filter.allows("ns"));
        assert!(!filter.allows("v"));
        assert!(!filter.allows("x"));
    }

    #[test]
    fn filter_dedupes_and_trims_tags() {
        let filter = PosFilter::new(["vn", " n ", "vn", ""]);
        assert_eq!(filter.len(), 2);
        assert!(filter.allows("n"));
        assert_eq!(filter.tags(), vec!["n", "vn"]);
    }

    #[test]
    fn fixed_terms_are_not_split() {
        let segmenter = Segmenter::new(["绿水青山就是金山银山"].into_iter().collect());
        let words = segmenter.cut("我们坚持绿水青山就是金山银山的理念");
        assert!(words.contains(&"绿水青山就是金山银山"), "got {words:?}");
    }

    #[test]
    fn fixed_terms_carry_the_fixed_tag() {
        let segmenter = Segmenter::new(["二十国集团"].into_iter().collect());
        let tokens = segmenter.tag("二十国集团峰会召开");
        let fixed = tokens.iter().find(|t| t.word == "二十国集团");
        assert_eq!(fixed.map(|t| t.pos), Some(FIXED_TERM_TAG));
    }
}
