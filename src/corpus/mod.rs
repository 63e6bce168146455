// Corpus model and loading: countries, their documents, and text decoding.

pub mod country;
pub mod document;
pub mod loader;
