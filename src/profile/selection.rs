// Tiered keyword selection for a country profile.
//
// The profile size is a fixed fraction of the country's distinct vocabulary
// (Zipf-style long-tail cut), never below `min_display` and never above the
// vocabulary size. Terms corroborated by at least `priority_min_df`
// documents fill the profile first; weaker terms only fill what is left and
// are tagged so consumers can discount them.

use serde::{Deserialize, Serialize};

use super::aggregate::CountryVocabulary;

pub const DEFAULT_PRIORITY_MIN_DF: u32 = 3;
pub const DEFAULT_ZIPF_RATIO: f64 = 0.15;
pub const DEFAULT_MIN_DISPLAY: usize = 30;

/// Whether a selected keyword met the document-frequency threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "High_DF")]
    HighDf,
    #[serde(rename = "Low_DF_Fill")]
    LowDfFill,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::HighDf => "High_DF",
            Tier::LowDfFill => "Low_DF_Fill",
        }
    }

    /// Parse the label written to weight files.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "High_DF" => Some(Tier::HighDf),
            "Low_DF_Fill" => Some(Tier::LowDfFill),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A selected term with its document frequency as weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedKeyword {
    pub term: String,
    pub weight: u32,
    pub tier: Tier,
}

impl WeightedKeyword {
    pub fn new(term: impl Into<String>, weight: u32, tier: Tier) -> Self {
        Self {
            term: term.into(),
            weight,
            tier,
        }
    }
}

/// Selection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Minimum document frequency for the high tier
    pub priority_min_df: u32,
    /// Fraction of the distinct vocabulary to keep
    pub zipf_ratio: f64,
    /// Floor on the profile size for small corpora
    pub min_display: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            priority_min_df: DEFAULT_PRIORITY_MIN_DF,
            zipf_ratio: DEFAULT_ZIPF_RATIO,
            min_display: DEFAULT_MIN_DISPLAY,
        }
    }
}

impl SelectionPolicy {
    /// round(total * zipf_ratio), raised to `min_display`, capped at `total`.
    pub fn target_size(&self, total: usize) -> usize {
        let zipf = (total as f64 * self.zipf_ratio).round();
        // NaN and negative ratios saturate to 0
        let zipf = if zipf.is_finite() && zipf > 0.0 {
            zipf as usize
        } else {
            0
        };
        zipf.max(self.min_display).min(total)
    }

    /// Select the weighted keyword profile. HighDF entries come first, each
    /// tier in descending weight.
    pub fn select(&self, vocabulary: &CountryVocabulary) -> Vec<WeightedKeyword> {
        let total = vocabulary.len();
        if total == 0 {
            return Vec::new();
        }
        let target_n = self.target_size(total);

        let (high, low): (Vec<(&str, u32)>, Vec<(&str, u32)>) = vocabulary
            .ranked()
            .into_iter()
            .partition(|(_, df)| *df >= self.priority_min_df);

        let high_taken = high.len().min(target_n);
        let fill = target_n - high_taken;

        high.into_iter()
            .take(high_taken)
            .map(|(term, df)| WeightedKeyword::new(term, df, Tier::HighDf))
            .chain(
                low.into_iter()
                    .take(fill)
                    .map(|(term, df)| WeightedKeyword::new(term, df, Tier::LowDfFill)),
            )
            .collect()
    }
}

/// Free-function form of `SelectionPolicy::select`.
pub fn select(
    vocabulary: &CountryVocabulary,
    priority_min_df: u32,
    zipf_ratio: f64,
    min_display: usize,
) -> Vec<WeightedKeyword> {
    SelectionPolicy {
        priority_min_df,
        zipf_ratio,
        min_display,
    }
    .select(vocabulary)
}
