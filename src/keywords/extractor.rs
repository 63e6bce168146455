// Dual-algorithm keyword extraction for a single document.
//
// Both rankers propose twice as many candidates as the document's target
// size, the two lists are merged (agreement first, then centrality, then
// frequency) and cut down to the target.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::merge::merge_candidates;
use super::segment::{PosFilter, Segmenter};
use super::sizing::{candidate_pool_size, target_top_k};
use super::stopwords::StopwordSet;
use super::textrank::CentralitySalience;
use super::tfidf::FrequencySalience;
use super::traits::SalienceRanker;
use crate::corpus::document::Document;

/// The ranked keyword list of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentKeywords {
    pub document_id: String,
    /// Character length of the stripped document text
    pub length: usize,
    /// Distinct keywords, most salient first
    pub keywords: Vec<String>,
}

/// Runs the frequency and centrality rankers and merges their output.
pub struct DualExtractor {
    frequency: Box<dyn SalienceRanker>,
    centrality: Box<dyn SalienceRanker>,
    pos_filter: PosFilter,
}

impl DualExtractor {
    pub fn new(
        frequency: Box<dyn SalienceRanker>,
        centrality: Box<dyn SalienceRanker>,
        pos_filter: PosFilter,
    ) -> Self {
        Self {
            frequency,
            centrality,
            pos_filter,
        }
    }

    /// TF-IDF + TextRank over a shared segmenter. TF-IDF uses the IDF
    /// table at `idf_path` when given, jieba's bundled one otherwise.
    pub fn with_segmenter(
        segmenter: Arc<Segmenter>,
        idf_path: Option<&Path>,
        pos_filter: PosFilter,
    ) -> Result<Self> {
        let frequency = FrequencySalience::from_idf_path(Arc::clone(&segmenter), idf_path)?;
        Ok(Self::new(
            Box::new(frequency),
            Box::new(CentralitySalience::new(segmenter)),
            pos_filter,
        ))
    }

    pub fn pos_filter(&self) -> &PosFilter {
        &self.pos_filter
    }

    /// Extract at most `target_top_k` keywords from `text`.
    pub fn extract_text(
        &self,
        text: &str,
        stopwords: &StopwordSet,
        target_top_k: usize,
    ) -> Result<Vec<String>> {
        if text.trim().is_empty() || target_top_k == 0 {
            return Ok(Vec::new());
        }

        let pool_size = candidate_pool_size(target_top_k);
        let frequency = self
            .frequency
            .rank(text, stopwords, &self.pos_filter, pool_size)
            .with_context(|| format!("{} ranking failed", self.frequency.name()))?;
        let centrality = self
            .centrality
            .rank(text, stopwords, &self.pos_filter, pool_size)
            .with_context(|| format!("{} ranking failed", self.centrality.name()))?;

        let merged = merge_candidates(&frequency, &centrality, target_top_k);
        debug!(
            frequency = frequency.len(),
            centrality = centrality.len(),
            agreed = merged.iter().filter(|c| c.agreed).count(),
            kept = merged.len(),
            "Merged candidate lists"
        );

        Ok(merged.into_iter().map(|c| c.term).collect())
    }

    /// Extract a document's keywords with an explicit target size.
    pub fn extract(
        &self,
        document: &Document,
        stopwords: &StopwordSet,
        target_top_k: usize,
    ) -> Result<DocumentKeywords> {
        let keywords = self
            .extract_text(&document.text, stopwords, target_top_k)
            .with_context(|| format!("Keyword extraction failed for {}", document.id))?;
        Ok(DocumentKeywords {
            document_id: document.id.clone(),
            length: document.length,
            keywords,
        })
    }

    /// Extract a document's keywords, sized by its length.
    pub fn extract_document(
        &self,
        document: &Document,
        stopwords: &StopwordSet,
    ) -> Result<DocumentKeywords> {
        self.extract(document, stopwords, target_top_k(document.length))
    }
}
