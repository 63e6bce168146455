// Keyword-weighted similarity between country fingerprints.
//
// Each fingerprint is a sparse vector over terms (weight = document
// frequency, 0 for missing terms) compared by cosine:
//
//   cosine: dot(a, b) / (|a| * |b|)
//
// Empty or zero-magnitude inputs score 0.0.

use std::collections::HashMap;

use serde::Serialize;

use super::fingerprint::CountryFingerprint;

/// Cosine similarity between two fingerprints.
pub fn cosine_similarity(fp_a: &CountryFingerprint, fp_b: &CountryFingerprint) -> f64 {
    cosine_from_weights(&fp_a.keyword_weights(), &fp_b.keyword_weights())
}

/// Cosine similarity of two sparse weight maps, clamped to [0, 1].
pub fn cosine_from_weights(
    weights_a: &HashMap<String, f64>,
    weights_b: &HashMap<String, f64>,
) -> f64 {
    let dot: f64 = weights_a
        .iter()
        .filter_map(|(k, a)| weights_b.get(k).map(|b| a * b))
        .sum();
    let norm_a = weights_a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = weights_b.values().map(|v| v * v).sum::<f64>().sqrt();

    let denom = norm_a * norm_b;
    if denom < f64::EPSILON {
        return 0.0;
    }
    (dot / denom).clamp(0.0, 1.0)
}

/// Pairwise cosine similarity between countries, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Build from `(label, weights)` pairs.
    pub fn from_weights(entries: &[(String, HashMap<String, f64>)]) -> Self {
        let values = entries
            .iter()
            .map(|(_, a)| {
                entries
                    .iter()
                    .map(|(_, b)| cosine_from_weights(a, b))
                    .collect()
            })
            .collect();
        Self {
            labels: entries.iter().map(|(label, _)| label.clone()).collect(),
            values,
        }
    }

    pub fn from_fingerprints(fingerprints: &[CountryFingerprint]) -> Self {
        let entries: Vec<(String, HashMap<String, f64>)> = fingerprints
            .iter()
            .map(|fp| (fp.country.clone(), fp.keyword_weights()))
            .collect();
        Self::from_weights(&entries)
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        Some(self.values[i][j])
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
