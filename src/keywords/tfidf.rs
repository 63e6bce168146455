// Frequency salience: TF-IDF over a single document.
//
// Term frequency comes from the document; inverse document frequency comes
// from jieba's bundled IDF dictionary, or from a `term idf` table that
// replaces it. Terms missing from the table score the table's median IDF,
// so rare domain terms outrank common words mentioned more often.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use jieba_rs::{KeywordExtract, TfIdf};
use tracing::{debug, info};

use super::segment::{PosFilter, Segmenter};
use super::stopwords::StopwordSet;
use super::traits::{candidate_bound, extraction_config, keep_ranked, SalienceRanker};
use crate::corpus::loader::decode_text;

/// TF-IDF ranker (list A of the dual extractor).
pub struct FrequencySalience {
    segmenter: Arc<Segmenter>,
    model: TfIdf,
}

impl FrequencySalience {
    /// Ranker over jieba's bundled IDF dictionary.
    pub fn new(segmenter: Arc<Segmenter>) -> Result<Self> {
        let mut model = TfIdf::default();
        *model.config_mut() = extraction_config(&StopwordSet::new())?;
        Ok(Self { segmenter, model })
    }

    /// Ranker over the IDF table at `path` instead of the bundled one.
    pub fn with_idf_file(segmenter: Arc<Segmenter>, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read IDF table {}", path.display()))?;
        let content = decode_text(&bytes);
        let entries = idf_entries(&content);
        if entries.is_empty() {
            anyhow::bail!("IDF table {} has no `term idf` lines", path.display());
        }

        // Only well-formed lines are handed over; jieba's loader stops
        // reading entries correctly after a malformed line
        let table = entries.join("\n");
        let model = TfIdf::new(
            Some(&mut table.as_bytes()),
            extraction_config(&StopwordSet::new())?,
        );
        let terms = entries.len();
        info!(path = %path.display(), terms, "Loaded IDF table");
        Ok(Self { segmenter, model })
    }

    /// Bundled dictionary, or the table at `idf_path` when given.
    pub fn from_idf_path(segmenter: Arc<Segmenter>, idf_path: Option<&Path>) -> Result<Self> {
        match idf_path {
            Some(path) => Self::with_idf_file(segmenter, path),
            None => Self::new(segmenter),
        }
    }
}

/// Lines of `content` that parse as `term idf`.
fn idf_entries(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| {
            let mut parts = line.split_whitespace();
            parts.next().is_some() && parts.next().is_some_and(|v| v.parse::<f64>().is_ok())
        })
        .collect()
}

impl SalienceRanker for FrequencySalience {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn rank(
        &self,
        text: &str,
        stopwords: &StopwordSet,
        pos_filter: &PosFilter,
        pool_size: usize,
    ) -> Result<Vec<String>> {
        if pos_filter.is_empty() || pool_size == 0 || text.trim().is_empty() {
            return Ok(Vec::new());
        }

        // Stopwords only share the TF denominator, so dropping them after
        // scoring leaves the order of the remaining terms unchanged
        let scored = self.model.extract_keywords(
            self.segmenter.jieba(),
            text,
            candidate_bound(text),
            pos_filter.tags(),
        );
        debug!(candidates = scored.len(), pool_size, "Ranked by TF-IDF");

        Ok(keep_ranked(scored, stopwords, pool_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter(terms: &[&str]) -> Arc<Segmenter> {
        Arc::new(Segmenter::new(terms.iter().copied().collect()))
    }

    #[test]
    fn idf_entries_skip_malformed_lines() {
        assert_eq!(
            idf_entries("能源 5.0\n气候\n合作 abc\n\n政策 3.0\n"),
            vec!["能源 5.0", "政策 3.0"]
        );
    }

    #[test]
    fn rare_terms_outrank_frequent_common_ones() {
        let ranker = FrequencySalience::new(segmenter(&[])).unwrap();
        let ranked = ranker
            .rank(
                "问题问题问题。氢能氢能。",
                &StopwordSet::new(),
                &PosFilter::default(),
                4,
            )
            .unwrap();
        assert_eq!(ranked.first().map(String::as_str), Some("氢能"));
        assert!(ranked.iter().any(|w| w == "问题"));
    }

    #[test]
    fn custom_table_replaces_the_bundled_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idf.txt");
        std::fs::write(&path, "问题 20.0\n表头\n氢能 1.0\n").unwrap();
        let ranker = FrequencySalience::with_idf_file(segmenter(&[]), &path).unwrap();
        let ranked = ranker
            .rank(
                "问题问题问题。氢能氢能。",
                &StopwordSet::new(),
                &PosFilter::default(),
                4,
            )
            .unwrap();
        assert_eq!(ranked.first().map(String::as_str), Some("问题"));
    }

    #[test]
    fn empty_table_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idf.txt");
        std::fs::write(&path, "no numbers here\n").unwrap();
        assert!(FrequencySalience::with_idf_file(segmenter(&[]), &path).is_err());
    }

    #[test]
    fn stopwords_are_excluded() {
        let ranker = FrequencySalience::new(segmenter(&["可再生能源"])).unwrap();
        let stopwords: StopwordSet = ["可再生能源"].into_iter().collect();
        let ranked = ranker
            .rank("可再生能源可再生能源", &stopwords, &PosFilter::default(), 4)
            .unwrap();
        assert!(!ranked.iter().any(|w| w == "可再生能源"));
    }

    #[test]
    fn fixed_terms_are_ranked_whole() {
        let ranker = FrequencySalience::new(segmenter(&["可再生能源"])).unwrap();
        let text = "可再生能源是未来。政府支持可再生能源。可再生能源投资增加。";
        let ranked = ranker
            .rank(text, &StopwordSet::new(), &PosFilter::default(), 4)
            .unwrap();
        assert!(ranked.iter().any(|w| w == "可再生能源"));
    }
}
