// Country profiles: document-frequency aggregation, tiered selection, the
// resulting fingerprint, and similarity between fingerprints.

pub mod aggregate;
pub mod fingerprint;
pub mod overlap;
pub mod selection;
