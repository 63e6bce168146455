// CSV artifacts: per-document keywords, per-country weights, and the
// similarity matrix.
//
// Files are written UTF-8 with a BOM so spreadsheet tools detect the
// encoding of the Chinese text; readers accept files with or without it.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::corpus::loader::decode_text;
use crate::keywords::extractor::DocumentKeywords;
use crate::profile::fingerprint::CountryFingerprint;
use crate::profile::overlap::SimilarityMatrix;
use crate::profile::selection::{Tier, WeightedKeyword};

pub const KEYWORDS_SUFFIX: &str = "_keywords.csv";
pub const WEIGHTS_SUFFIX: &str = "_Weights.csv";
pub const SIMILARITY_FILE: &str = "Weighted_Cosine_Similarity.csv";

const BOM: &[u8] = "\u{feff}".as_bytes();

#[derive(Debug, Serialize, Deserialize)]
struct KeywordRow {
    file_name: String,
    keywords: String,
    count: usize,
    text_length: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct WeightRow {
    #[serde(rename = "Keyword")]
    keyword: String,
    #[serde(rename = "Weight")]
    weight: u32,
    #[serde(rename = "Type")]
    tier: Tier,
}

fn create_with_bom(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(BOM)?;
    Ok(file)
}

fn csv_reader(path: &Path) -> Result<csv::Reader<std::io::Cursor<Vec<u8>>>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = decode_text(&bytes);
    Ok(csv::Reader::from_reader(std::io::Cursor::new(
        text.into_bytes(),
    )))
}

/// Write `<dir>/<country>_keywords.csv`. Returns `None` (and writes nothing)
/// when there are no documents.
pub fn write_document_keywords(
    dir: &Path,
    country: &str,
    documents: &[DocumentKeywords],
) -> Result<Option<PathBuf>> {
    if documents.is_empty() {
        return Ok(None);
    }
    let path = dir.join(format!("{country}{KEYWORDS_SUFFIX}"));
    let mut writer = csv::Writer::from_writer(create_with_bom(&path)?);
    for document in documents {
        writer.serialize(KeywordRow {
            file_name: document.document_id.clone(),
            keywords: document.keywords.join(","),
            count: document.keywords.len(),
            text_length: document.length,
        })?;
    }
    writer.flush()?;
    info!(path = %path.display(), documents = documents.len(), "Wrote document keywords");
    Ok(Some(path))
}

/// Read a `_keywords.csv` file. Keywords are split on commas, trimmed and
/// deduplicated per row.
pub fn read_document_keywords(path: &Path) -> Result<Vec<DocumentKeywords>> {
    let mut reader = csv_reader(path)?;
    let mut documents = Vec::new();
    for row in reader.deserialize::<KeywordRow>() {
        let row = row.with_context(|| format!("Malformed row in {}", path.display()))?;
        let mut keywords: Vec<String> = Vec::new();
        for keyword in row.keywords.split(',').map(str::trim) {
            if !keyword.is_empty() && !keywords.iter().any(|k| k == keyword) {
                keywords.push(keyword.to_string());
            }
        }
        documents.push(DocumentKeywords {
            document_id: row.file_name,
            length: row.text_length,
            keywords,
        });
    }
    Ok(documents)
}

/// Write `<dir>/<country>_Weights.csv`. Empty fingerprints produce no file.
pub fn write_weights(dir: &Path, fingerprint: &CountryFingerprint) -> Result<Option<PathBuf>> {
    if fingerprint.is_empty() {
        return Ok(None);
    }
    let path = dir.join(format!("{}{WEIGHTS_SUFFIX}", fingerprint.country));
    let mut writer = csv::Writer::from_writer(create_with_bom(&path)?);
    for keyword in &fingerprint.keywords {
        writer.serialize(WeightRow {
            keyword: keyword.term.clone(),
            weight: keyword.weight,
            tier: keyword.tier,
        })?;
    }
    writer.flush()?;
    info!(path = %path.display(), keywords = fingerprint.keywords.len(), "Wrote weights");
    Ok(Some(path))
}

/// Read a `_Weights.csv` file back into weighted keywords.
pub fn read_weights(path: &Path) -> Result<Vec<WeightedKeyword>> {
    let mut reader = csv_reader(path)?;
    let mut keywords = Vec::new();
    for row in reader.deserialize::<WeightRow>() {
        let row = row.with_context(|| format!("Malformed row in {}", path.display()))?;
        keywords.push(WeightedKeyword::new(row.keyword, row.weight, row.tier));
    }
    Ok(keywords)
}

/// `(country, path)` for every file in `dir` named `<country><suffix>`,
/// sorted by country.
pub fn country_files(dir: &Path, suffix: &str) -> Result<Vec<(String, PathBuf)>> {
    let mut files: Vec<(String, PathBuf)> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            let country = name.strip_suffix(suffix)?.to_string();
            (!country.is_empty()).then_some((country, path))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Load every `_Weights.csv` in `dir` as `(country, keyword -> weight)`.
/// Unreadable files are logged and skipped.
pub fn load_weight_vectors(dir: &Path) -> Result<Vec<(String, HashMap<String, f64>)>> {
    let mut vectors = Vec::new();
    for (country, path) in country_files(dir, WEIGHTS_SUFFIX)? {
        match read_weights(&path) {
            Ok(keywords) => {
                let weights = keywords
                    .into_iter()
                    .map(|k| (k.term, k.weight as f64))
                    .collect();
                vectors.push((country, weights));
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable weights file"),
        }
    }
    Ok(vectors)
}

/// Write the similarity matrix with country labels on both axes.
pub fn write_similarity(path: &Path, matrix: &SimilarityMatrix) -> Result<()> {
    let mut writer = csv::Writer::from_writer(create_with_bom(path)?);
    let mut header = vec![String::new()];
    header.extend(matrix.labels.iter().cloned());
    writer.write_record(&header)?;
    for (label, row) in matrix.labels.iter().zip(&matrix.values) {
        let mut record = vec![label.clone()];
        record.extend(row.iter().map(|v| format!("{v:.4}")));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    info!(path = %path.display(), countries = matrix.len(), "Wrote similarity matrix");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, length: usize, keywords: &[&str]) -> DocumentKeywords {
        DocumentKeywords {
            document_id: id.to_string(),
            length,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn keywords_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let docs = vec![doc("a.txt", 120, &["能源", "气候"]), doc("b.txt", 40, &[])];
        let path = write_document_keywords(dir.path(), "德国", &docs)
            .unwrap()
            .unwrap();
        assert!(path.ends_with("德国_keywords.csv"));
        assert!(fs::read(&path).unwrap().starts_with(BOM));
        assert_eq!(read_document_keywords(&path).unwrap(), docs);
    }

    #[test]
    fn reading_keywords_dedupes_and_trims() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("法国_keywords.csv");
        fs::write(
            &path,
            "file_name,keywords,count,text_length\nx.txt,\"核能, 核能,农业,\",3,50\n",
        )
        .unwrap();
        let docs = read_document_keywords(&path).unwrap();
        assert_eq!(docs[0].keywords, vec!["核能", "农业"]);
    }

    #[test]
    fn empty_outputs_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_document_keywords(dir.path(), "空", &[]).unwrap().is_none());
        let fp = CountryFingerprint {
            country: "空".to_string(),
            documents: 0,
            vocabulary_size: 0,
            target_size: 0,
            keywords: vec![],
        };
        assert!(write_weights(dir.path(), &fp).unwrap().is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn weights_file_uses_tier_labels() {
        let dir = tempfile::tempdir().unwrap();
        let fp = CountryFingerprint {
            country: "日本".to_string(),
            documents: 4,
            vocabulary_size: 2,
            target_size: 2,
            keywords: vec![
                WeightedKeyword::new("半导体", 3, Tier::HighDf),
                WeightedKeyword::new("能源", 1, Tier::LowDfFill),
            ],
        };
        let path = write_weights(dir.path(), &fp).unwrap().unwrap();
        let content = decode_text(&fs::read(&path).unwrap());
        assert!(content.starts_with("Keyword,Weight,Type"));
        assert!(content.contains("半导体,3,High_DF"));
        assert!(content.contains("能源,1,Low_DF_Fill"));
        assert_eq!(read_weights(&path).unwrap(), fp.keywords);

        let vectors = load_weight_vectors(dir.path()).unwrap();
        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors[0].0, "日本");
        assert_eq!(vectors[0].1["半导体"], 3.0);
    }
}
