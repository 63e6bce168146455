// Salient: keyword salience ranking for country policy corpora
//
// This is the library root. Each module corresponds to a stage of the
// pipeline: corpus loading, per-document keyword extraction, country
// profile selection, and the CSV / terminal output around them.

pub mod config;
pub mod corpus;
pub mod keywords;
pub mod output;
pub mod pipeline;
pub mod profile;
