// Merging the two ranked candidate lists into one keyword list.
//
// Order of preference:
//   1. terms both rankers proposed, in centrality order
//   2. terms only the centrality ranker proposed, in its order
//   3. terms only the frequency ranker proposed, in its order
// then truncated to the target size. No padding when there are fewer terms.

use std::collections::HashSet;

/// Which ranker proposed a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// TF-IDF (list A)
    Frequency,
    /// TextRank (list B)
    Centrality,
}

/// A term with the list it was taken from and its position there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCandidate {
    pub term: String,
    pub source: Algorithm,
    pub rank: usize,
    /// Both rankers proposed this term.
    pub agreed: bool,
}

/// Merge and truncate, keeping provenance for each chosen term.
pub fn merge_candidates(
    frequency: &[String],
    centrality: &[String],
    top_k: usize,
) -> Vec<KeywordCandidate> {
    let in_frequency: HashSet<&str> = frequency.iter().map(String::as_str).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut agreed = Vec::new();
    let mut centrality_only = Vec::new();
    for (rank, term) in centrality.iter().enumerate() {
        if !seen.insert(term.as_str()) {
            continue;
        }
        let candidate = KeywordCandidate {
            term: term.clone(),
            source: Algorithm::Centrality,
            rank,
            agreed: in_frequency.contains(term.as_str()),
        };
        if candidate.agreed {
            agreed.push(candidate);
        } else {
            centrality_only.push(candidate);
        }
    }

    let mut frequency_only = Vec::new();
    for (rank, term) in frequency.iter().enumerate() {
        if seen.insert(term.as_str()) {
            frequency_only.push(KeywordCandidate {
                term: term.clone(),
                source: Algorithm::Frequency,
                rank,
                agreed: false,
            });
        }
    }

    agreed
        .into_iter()
        .chain(centrality_only)
        .chain(frequency_only)
        .take(top_k)
        .collect()
}

/// Merge and truncate, returning the bare terms.
pub fn merge_keywords(frequency: &[String], centrality: &[String], top_k: usize) -> Vec<String> {
    merge_candidates(frequency, centrality, top_k)
        .into_iter()
        .map(|c| c.term)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn intersection_then_centrality_then_frequency() {
        let a = words(&["能源", "气候", "合作", "投资"]);
        let b = words(&["合作", "发展", "能源", "市场"]);
        let merged = merge_keywords(&a, &b, 10);
        assert_eq!(
            merged,
            words(&["合作", "能源", "发展", "市场", "气候", "投资"])
        );
    }

    #[test]
    fn truncates_to_top_k() {
        let a = words(&["a", "b", "c"]);
        let b = words(&["c", "d", "e"]);
        assert_eq!(merge_keywords(&a, &b, 2), words(&["c", "d"]));
    }

    #[test]
    fn short_lists_are_not_padded() {
        let merged = merge_keywords(&words(&["a"]), &words(&["a"]), 5);
        assert_eq!(merged, words(&["a"]));
    }

    #[test]
    fn empty_inputs_give_empty_output() {
        assert!(merge_keywords(&[], &[], 3).is_empty());
    }

    #[test]
    fn duplicates_within_a_list_appear_once() {
        let a = words(&["x", "x", "y"]);
        let b = words(&["z", "z"]);
        assert_eq!(merge_keywords(&a, &b, 10), words(&["z", "x", "y"]));
    }

    #[test]
    fn provenance_is_recorded() {
        let a = words(&["a", "b"]);
        let b = words(&["b", "c"]);
        let merged = merge_candidates(&a, &b, 3);
        assert!(merged[0].agreed);
        assert_eq!(merged[1].source, Algorithm::Centrality);
        assert_eq!(merged[1].rank, 1);
        assert_eq!(merged[2].source, Algorithm::Frequency);
        assert_eq!(merged[2].rank, 0);
    }
}
