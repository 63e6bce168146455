// CountryFingerprint: the weighted keyword profile of one country.
//
// This is the artifact handed to similarity and visualization consumers:
// the selected keywords with their document frequencies and tiers, plus the
// numbers that explain how the selection was sized.

use std::collections::HashMap;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::aggregate::CountryVocabulary;
use super::selection::{SelectionPolicy, Tier, WeightedKeyword};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryFingerprint {
    pub country: String,
    /// Documents that contributed at least one keyword
    pub documents: usize,
    /// Distinct terms in the country vocabulary
    pub vocabulary_size: usize,
    /// Selection target after the ratio, floor and cap were applied
    pub target_size: usize,
    /// HighDF entries first, each tier by descending weight
    pub keywords: Vec<WeightedKeyword>,
}

impl CountryFingerprint {
    pub fn build(
        country: impl Into<String>,
        vocabulary: &CountryVocabulary,
        policy: &SelectionPolicy,
    ) -> Self {
        Self {
            country: country.into(),
            documents: vocabulary.document_count(),
            vocabulary_size: vocabulary.len(),
            target_size: policy.target_size(vocabulary.len()),
            keywords: policy.select(vocabulary),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn high_count(&self) -> usize {
        self.keywords
            .iter()
            .filter(|k| k.tier == Tier::HighDf)
            .count()
    }

    pub fn fill_count(&self) -> usize {
        self.keywords.len() - self.high_count()
    }

    /// Keyword -> weight map, the feature vector used for similarity.
    pub fn keyword_weights(&self) -> HashMap<String, f64> {
        let mut weights = HashMap::new();
        for keyword in &self.keywords {
            *weights.entry(keyword.term.clone()).or_insert(0.0) += keyword.weight as f64;
        }
        weights
    }

    /// Print the profile as a bar chart in the terminal.
    pub fn display(&self, limit: usize) {
        println!(
            "\n{}",
            format!(
                "=== {} ({} documents, {} of {} terms) ===",
                self.country,
                self.documents,
                self.keywords.len(),
                self.vocabulary_size
            )
            .bold()
        );

        if self.keywords.is_empty() {
            println!("  {}", "No keywords extracted.".dimmed());
            return;
        }

        let bar_width: usize = 20;
        let max_weight = self.keywords.iter().map(|k| k.weight).max().unwrap_or(1).max(1);

        for (i, keyword) in self.keywords.iter().take(limit).enumerate() {
            let filled = ((keyword.weight as f64 / max_weight as f64) * bar_width as f64)
                .round() as usize;
            let bar = format!(
                "[{}{}]",
                "=".repeat(filled),
                " ".repeat(bar_width.saturating_sub(filled))
            );
            let colored_bar = match keyword.tier {
                Tier::HighDf => bar.bright_green(),
                Tier::LowDfFill => bar.bright_blue(),
            };
            println!(
                "  {:>3}. {:<16} {} {:>4}  {}",
                i + 1,
                keyword.term,
                colored_bar,
                keyword.weight,
                keyword.tier.as_str().dimmed()
            );
        }

        if self.keywords.len() > limit {
            println!(
                "  {}",
                format!("... {} more", self.keywords.len() - limit).dimmed()
            );
        }
    }
}
