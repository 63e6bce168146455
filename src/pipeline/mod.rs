// Batch pipeline: corpus -> per-document keywords -> country fingerprints.

pub mod extract;
