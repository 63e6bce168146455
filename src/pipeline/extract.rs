// Extraction pipeline: every document of every country through the dual
// extractor, folded into per-country vocabularies.
//
// Documents within a country are extracted in parallel (rayon); the results
// come back in document order and are folded sequentially, so vocabulary
// tie-breaks never depend on thread scheduling. A failing document is
// logged and counted, and the rest of the country carries on.

use std::panic::{self, AssertUnwindSafe};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::corpus::country::{Country, CountryName};
use crate::corpus::document::Document;
use crate::corpus::loader::Corpus;
use crate::keywords::extractor::{DocumentKeywords, DualExtractor};
use crate::keywords::stopwords::{effective_stopwords, StopwordSet};
use crate::profile::aggregate::CountryVocabulary;
use crate::profile::fingerprint::CountryFingerprint;
use crate::profile::selection::SelectionPolicy;

/// What happened to a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Extracted(DocumentKeywords),
    /// Nothing left after normalization
    Empty,
    /// Extraction ran but produced no candidates
    NoKeywords(DocumentKeywords),
    Failed { document_id: String, error: String },
}

/// Document counts for a run, surfaced to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub countries: usize,
    pub documents: usize,
    pub extracted: usize,
    pub skipped_empty: usize,
    pub no_keywords: usize,
    pub failed: usize,
}

impl RunStats {
    pub fn record(&mut self, outcome: &DocumentOutcome) {
        self.documents += 1;
        match outcome {
            DocumentOutcome::Extracted(_) => self.extracted += 1,
            DocumentOutcome::Empty => self.skipped_empty += 1,
            DocumentOutcome::NoKeywords(_) => self.no_keywords += 1,
            DocumentOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn absorb(&mut self, other: &RunStats) {
        self.countries += other.countries;
        self.documents += other.documents;
        self.extracted += other.extracted;
        self.skipped_empty += other.skipped_empty;
        self.no_keywords += other.no_keywords;
        self.failed += other.failed;
    }
}

/// Per-document keyword lists and the folded vocabulary of one country.
#[derive(Debug, Clone)]
pub struct CountryExtraction {
    pub name: CountryName,
    /// Documents that were extracted, including those with no keywords
    pub documents: Vec<DocumentKeywords>,
    pub vocabulary: CountryVocabulary,
    pub stats: RunStats,
}

impl CountryExtraction {
    pub fn fingerprint(&self, policy: &SelectionPolicy) -> CountryFingerprint {
        CountryFingerprint::build(self.name.full.clone(), &self.vocabulary, policy)
    }
}

/// Extract one document, containing both errors and panics.
pub fn extract_one(
    extractor: &DualExtractor,
    document: &Document,
    stopwords: &StopwordSet,
) -> DocumentOutcome {
    if document.is_empty() {
        return DocumentOutcome::Empty;
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        extractor.extract_document(document, stopwords)
    }));

    match result {
        Ok(Ok(keywords)) if keywords.keywords.is_empty() => DocumentOutcome::NoKeywords(keywords),
        Ok(Ok(keywords)) => DocumentOutcome::Extracted(keywords),
        Ok(Err(e)) => DocumentOutcome::Failed {
            document_id: document.id.clone(),
            error: format!("{e:#}"),
        },
        Err(_) => DocumentOutcome::Failed {
            document_id: document.id.clone(),
            error: "extraction panicked".to_string(),
        },
    }
}

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Extracting [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

/// Extract every document of `country` with the country's own stopwords.
pub fn extract_country(
    extractor: &DualExtractor,
    base_stopwords: &StopwordSet,
    country: &Country,
    show_progress: bool,
) -> CountryExtraction {
    let stopwords = effective_stopwords(base_stopwords, &country.name);
    info!(
        country = %country.name.full,
        short_name = %country.name.short,
        documents = country.documents.len(),
        stopwords = stopwords.len(),
        "Extracting country keywords"
    );

    let pb = progress_bar(country.documents.len(), show_progress);
    let outcomes: Vec<DocumentOutcome> = country
        .documents
        .par_iter()
        .map(|document| {
            let outcome = extract_one(extractor, document, &stopwords);
            pb.inc(1);
            outcome
        })
        .collect();
    pb.finish_and_clear();

    let mut stats = RunStats {
        countries: 1,
        ..RunStats::default()
    };
    let mut vocabulary = CountryVocabulary::new();
    let mut documents = Vec::new();

    for outcome in outcomes {
        stats.record(&outcome);
        match outcome {
            DocumentOutcome::Extracted(keywords) => {
                vocabulary.add_document(&keywords.keywords);
                documents.push(keywords);
            }
            DocumentOutcome::NoKeywords(keywords) => {
                debug!(document = %keywords.document_id, "No keyword candidates");
                documents.push(keywords);
            }
            DocumentOutcome::Empty => {}
            DocumentOutcome::Failed { document_id, error } => {
                warn!(
                    country = %country.name.full,
                    document = %document_id,
                    error = %error,
                    "Extraction failed, skipping document"
                );
            }
        }
    }

    info!(
        country = %country.name.full,
        extracted = stats.extracted,
        skipped_empty = stats.skipped_empty,
        no_keywords = stats.no_keywords,
        failed = stats.failed,
        vocabulary = vocabulary.len(),
        "Country extraction complete"
    );

    CountryExtraction {
        name: country.name.clone(),
        documents,
        vocabulary,
        stats,
    }
}

/// Extract all countries of a corpus, one after another.
pub fn extract_corpus(
    extractor: &DualExtractor,
    base_stopwords: &StopwordSet,
    corpus: &Corpus,
    show_progress: bool,
) -> (Vec<CountryExtraction>, RunStats) {
    let mut totals = RunStats::default();
    let extractions: Vec<CountryExtraction> = corpus
        .countries
        .iter()
        .map(|country| {
            if show_progress {
                println!("Processing {} ...", country.name.full);
            }
            let extraction = extract_country(extractor, base_stopwords, country, show_progress);
            totals.absorb(&extraction.stats);
            extraction
        })
        .collect();
    (extractions, totals)
}

/// Aggregate stored per-document keyword lists into a fingerprint.
pub fn fingerprint_from_keywords(
    country: &str,
    documents: &[DocumentKeywords],
    policy: &SelectionPolicy,
) -> CountryFingerprint {
    let mut vocabulary = CountryVocabulary::new();
    for document in documents {
        vocabulary.add_document(&document.keywords);
    }
    let fingerprint = CountryFingerprint::build(country, &vocabulary, policy);
    info!(
        country,
        vocabulary = fingerprint.vocabulary_size,
        target = fingerprint.target_size,
        high = fingerprint.high_count(),
        fill = fingerprint.fill_count(),
        "Selected weighted keywords"
    );
    fingerprint
}
