// Centrality salience: TextRank over the word co-occurrence graph.
//
// Words of an allowed part of speech become graph nodes; two nodes are
// linked when they occur within `span` tokens of each other. Stopwords and
// single characters stay out of the edges, so they cannot lend weight to
// their neighbours.

use std::sync::Arc;

use anyhow::Result;
use jieba_rs::{KeywordExtract, TextRank};
use tracing::debug;

use super::segment::{PosFilter, Segmenter};
use super::stopwords::StopwordSet;
use super::traits::{candidate_bound, extraction_config, keep_ranked, SalienceRanker};

/// Co-occurrence window, in tokens.
pub const DEFAULT_SPAN: usize = 5;

/// TextRank ranker (list B of the dual extractor).
pub struct CentralitySalience {
    segmenter: Arc<Segmenter>,
    span: usize,
}

impl CentralitySalience {
    pub fn new(segmenter: Arc<Segmenter>) -> Self {
        Self {
            segmenter,
            span: DEFAULT_SPAN,
        }
    }
}

impl SalienceRanker for CentralitySalience {
    fn name(&self) -> &'static str {
        "textrank"
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

        // The stopword set differs per country, so the graph settings are
        // built per call
        let text_rank = TextRank::new(self.span, extraction_config(stopwords)?);
        let scored = text_rank.extract_keywords(
            self.segmenter.jieba(),
            text,
            candidate_bound(text),
            pos_filter.tags(),
        );
        debug!(candidates = scored.len(), pool_size, "Ranked by TextRank");

        Ok(keep_ranked(scored, stopwords, pool_size))
    }
}
