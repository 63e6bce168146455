// Salience ranker trait: swap-ready abstraction over keyword ranking.
//
// The dual extractor only needs two ordered term lists. Keeping the rankers
// behind this trait lets the merge logic be tested with stub rankers and
// lets either algorithm be replaced without touching the rest of the
// pipeline.

use anyhow::Result;
use jieba_rs::{Keyword, KeywordExtractConfig};

use super::segment::PosFilter;
use super::stopwords::StopwordSet;

/// Keywords shorter than this (in characters) are never kept.
pub(crate) const MIN_KEYWORD_CHARS: usize = 2;

/// Ranks the terms of a single document by salience.
pub trait SalienceRanker: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Return at most `pool_size` distinct terms of `text`, most salient
    /// first. Only words tagged with an allowed part of speech and absent
    /// from `stopwords` may appear.
    fn rank(
        &self,
        text: &str,
        stopwords: &StopwordSet,
        pos_filter: &PosFilter,
        pool_size: usize,
    ) -> Result<Vec<String>>;
}

/// Keyword extraction settings for jieba's extractors: HMM segmentation
/// for unknown words, two-character minimum, and `stopwords` excluded from
/// scoring.
pub(crate) fn extraction_config(stopwords: &StopwordSet) -> Result<KeywordExtractConfig> {
    KeywordExtractConfig::builder()
        .set_stop_words(stopwords.iter().map(String::from).collect())
        .min_keyword_length(MIN_KEYWORD_CHARS)
        .use_hmm(true)
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid keyword extraction config: {e}"))
}

/// Upper bound on the distinct terms of `text`, used as the extractor's
/// `top_k` so the whole ranking comes back before filtering.
pub(crate) fn candidate_bound(text: &str) -> usize {
    text.chars().count()
}

/// Drop stopwords, short terms and repeats from a ranked list, keeping at
/// most `pool_size` terms in rank order.
pub(crate) fn keep_ranked(
    ranked: Vec<Keyword>,
    stopwords: &StopwordSet,
    pool_size: usize,
) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(pool_size);
    for Keyword { keyword, .. } in ranked {
        if kept.len() == pool_size {
            break;
        }
        let word = keyword.trim();
        if word.chars().count() < MIN_KEYWORD_CHARS
            || stopwords.contains(word)
            || kept.iter().any(|k| k == word)
        {
            continue;
        }
        kept.push(word.to_string());
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(words: &[&str]) -> Vec<Keyword> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| Keyword {
                keyword: w.to_string(),
                weight: 1.0 / (i + 1) as f64,
            })
            .collect()
    }

    #[test]
    fn keep_ranked_filters_and_caps() {
        let stopwords: StopwordSet = ["德方"].into_iter().collect();
        let kept = keep_ranked(
            scored(&["能源", "德方", "的", "能源", "气候", "合作"]),
            &stopwords,
            2,
        );
        assert_eq!(kept, vec!["能源", "气候"]);
    }

    #[test]
    fn config_carries_the_stopwords() {
        let stopwords: StopwordSet = ["德方"].into_iter().collect();
        let config = extraction_config(&stopwords).unwrap();
        assert!(config.stop_words().contains("德方"));
        assert!(config.use_hmm());
        assert_eq!(config.min_keyword_length(), 2);
    }
}
