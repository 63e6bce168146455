// Keyword extraction: segmentation, stopwords, the two salience rankers and
// the merge that turns them into one ranked list per document.

pub mod extractor;
pub mod fixed;
pub mod merge;
pub mod segment;
pub mod sizing;
pub mod stopwords;
pub mod textrank;
pub mod tfidf;
pub mod traits;
