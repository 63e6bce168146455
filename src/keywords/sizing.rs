// Adaptive top-k: how many keywords a document gets, by length.
//
// The bucket thresholds are fixed; downstream consumers expect exactly this
// sizing.

/// Documents shorter than this (in characters) get `SHORT_TOP_K` keywords.
pub const SHORT_DOCUMENT_CHARS: usize = 100;
/// Documents shorter than this (and not short) get `MEDIUM_TOP_K` keywords.
pub const MEDIUM_DOCUMENT_CHARS: usize = 300;

pub const SHORT_TOP_K: usize = 3;
pub const MEDIUM_TOP_K: usize = 5;
pub const LONG_TOP_K: usize = 10;

/// Each ranker proposes this many candidates per final keyword slot.
pub const CANDIDATE_POOL_FACTOR: usize = 2;

/// Target keyword count for a document of `length` characters.
pub fn target_top_k(length: usize) -> usize {
    if length < SHORT_DOCUMENT_CHARS {
        SHORT_TOP_K
    } else if length < MEDIUM_DOCUMENT_CHARS {
        MEDIUM_TOP_K
    } else {
        LONG_TOP_K
    }
}

/// Candidate pool size per ranker for a given target.
pub fn candidate_pool_size(target_top_k: usize) -> usize {
    target_top_k * CANDIDATE_POOL_FACTOR
}
