// Composition tests: verifying that the stages chain together correctly.
//
// These tests exercise the data flow between modules:
//   corpus loader -> dual extractor -> aggregation -> selection -> CSV -> similarity
// on small corpora written to temporary directories.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use salient::corpus::country::ShortNames;
use salient::corpus::loader::load_corpus;
use salient::keywords::extractor::DualExtractor;
use salient::keywords::fixed::FixedTerms;
use salient::keywords::segment::{PosFilter, Segmenter};
use salient::keywords::stopwords::{load_base, StopwordSet};
use salient::keywords::traits::SalienceRanker;
use salient::output::files::{
    load_weight_vectors, read_document_keywords, write_document_keywords, write_similarity,
    write_weights, SIMILARITY_FILE,
};
use salient::pipeline::extract::{extract_corpus, fingerprint_from_keywords};
use salient::profile::overlap::SimilarityMatrix;
use salient::profile::selection::{SelectionPolicy, Tier};

/// Ranks space-separated words in document order.
struct SpaceRanker;

impl SalienceRanker for SpaceRanker {
    fn name(&self) -> &'static str {
        "space"
    }

    fn rank(
        &self,
        text: &str,
        stopwords: &StopwordSet,
        _pos_filter: &PosFilter,
        pool_size: usize,
    ) -> Result<Vec<String>> {
        let mut out: Vec<String> = Vec::new();
        for word in text.split_whitespace() {
            if !stopwords.contains(word) && !out.iter().any(|w| w == word) {
                out.push(word.to_string());
            }
        }
        out.truncate(pool_size);
        Ok(out)
    }
}

fn space_extractor() -> DualExtractor {
    DualExtractor::new(
        Box::new(SpaceRanker),
        Box::new(SpaceRanker),
        PosFilter::default(),
    )
}

fn write_country(root: &Path, country: &str, documents: &[(&str, &str)]) {
    let dir = root.join(country);
    fs::create_dir_all(&dir).unwrap();
    for (name, text) in documents {
        fs::write(dir.join(name), text).unwrap();
    }
}

fn policy() -> SelectionPolicy {
    SelectionPolicy {
        priority_min_df: 2,
        zipf_ratio: 0.15,
        min_display: 3,
    }
}

// ============================================================
// Chain: loader -> extractor -> selection
// ============================================================

#[test]
fn corpus_to_fingerprints() {
    let source = tempfile::tempdir().unwrap();
    write_country(
        source.path(),
        "德国",
        &[
            ("1.txt", "能源 气候 德方"),
            ("2.txt", "能源 汽车"),
            ("3.txt", "气候 能源"),
            ("4.txt", "\n  \n"),
        ],
    );
    write_country(
        source.path(),
        "法国",
        &[("1.txt", "核能 能源"), ("2.txt", "核能 农业")],
    );

    let corpus = load_corpus(source.path(), &ShortNames::default()).unwrap();
    let (extractions, totals) =
        extract_corpus(&space_extractor(), &StopwordSet::new(), &corpus, false);

    assert_eq!(totals.countries, 2);
    assert_eq!(totals.documents, 6);
    assert_eq!(totals.extracted, 5);
    assert_eq!(totals.skipped_empty, 1);

    let germany = &extractions[0];
    assert_eq!(germany.name.full, "德国");
    assert_eq!(germany.vocabulary.document_frequency("德方"), 0);

    let fp = germany.fingerprint(&policy());
    let terms: Vec<&str> = fp.keywords.iter().map(|k| k.term.as_str()).collect();
    assert_eq!(terms, vec!["能源", "气候", "汽车"]);
    assert_eq!(fp.keywords[0].weight, 3);
    assert_eq!(fp.keywords[2].tier, Tier::LowDfFill);
}

// ============================================================
// Chain: extraction -> CSV -> weights -> similarity
// ============================================================

#[test]
fn artifacts_round_trip_through_disk() {
    let source = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_country(
        source.path(),
        "日本",
        &[("a.txt", "半导体 能源"), ("b.txt", "半导体 机器人")],
    );
    write_country(
        source.path(),
        "韩国",
        &[("a.txt", "半导体 造船"), ("b.txt", "造船 能源")],
    );

    let corpus = load_corpus(source.path(), &ShortNames::default()).unwrap();
    let (extractions, _) =
        extract_corpus(&space_extractor(), &StopwordSet::new(), &corpus, false);

    let keywords_dir = out.path().join("keywords");
    let weights_dir = out.path().join("weights");
    for extraction in &extractions {
        let path =
            write_document_keywords(&keywords_dir, &extraction.name.full, &extraction.documents)
                .unwrap()
                .unwrap();
        let stored = read_document_keywords(&path).unwrap();
        assert_eq!(stored, extraction.documents);

        let fp = fingerprint_from_keywords(&extraction.name.full, &stored, &policy());
        assert_eq!(fp, extraction.fingerprint(&policy()));
        write_weights(&weights_dir, &fp).unwrap().unwrap();
    }

    let vectors = load_weight_vectors(&weights_dir).unwrap();
    let matrix = SimilarityMatrix::from_weights(&vectors);
    assert_eq!(matrix.labels, vec!["日本", "韩国"]);
    let cross = matrix.get("日本", "韩国").unwrap();
    assert!(cross > 0.0 && cross < 1.0);

    let path = weights_dir.join(SIMILARITY_FILE);
    write_similarity(&path, &matrix).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("日本"));
    assert_eq!(content.lines().count(), 3);
}

// ============================================================
// Chain: real segmenter end to end
// ============================================================

#[test]
fn real_extractor_builds_a_profile() {
    let source = tempfile::tempdir().unwrap();
    write_country(
        source.path(),
        "德国",
        &[
            ("1.txt", "德国政府推进能源转型，扩大可再生能源投资。"),
            ("2.txt", "能源安全是德国经济政策的核心议题。"),
            ("3.txt", "双方在气候变化和能源领域加强合作。"),
        ],
    );
    fs::write(source.path().join("cn_stopwords.txt"), "的\n是\n和\n").unwrap();

    let segmenter = Arc::new(Segmenter::new(FixedTerms::with_defaults()));
    let extractor = DualExtractor::with_segmenter(segmenter, None, PosFilter::default()).unwrap();
    let base = load_base(&source.path().join("cn_stopwords.txt"), false);
    assert_eq!(base.len(), 3);

    let corpus = load_corpus(source.path(), &ShortNames::default()).unwrap();
    let (extractions, totals) = extract_corpus(&extractor, &base, &corpus, false);
    assert_eq!(totals.failed, 0);

    let germany = &extractions[0];
    assert_eq!(germany.vocabulary.document_frequency("德国政府"), 0);
    for document in &germany.documents {
        assert!(document.keywords.len() <= 3);
        assert!(!document.keywords.iter().any(|k| k == "的"));
    }

    let fp = germany.fingerprint(&SelectionPolicy::default());
    assert_eq!(fp.keywords.len(), fp.vocabulary_size.min(fp.target_size));
    // No HighDF entry after a fill entry
    assert!(fp
        .keywords
        .windows(2)
        .all(|w| w[0].tier == w[1].tier || w[0].tier == Tier::HighDf));
}
