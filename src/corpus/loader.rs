// Corpus loading from the source directory.
//
// Layout: one sub-directory per country, named with the country's full
// name, holding `.txt` documents. Files are decoded as UTF-8 and fall back
// to GB18030, which most Chinese-language exports use.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use encoding_rs::GB18030;
use tracing::{info, warn};

use super::country::{Country, ShortNames};
use super::document::Document;

/// Countries found under the source directory.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub countries: Vec<Country>,
    /// Files that could not be read at all
    pub unreadable: usize,
    /// Country directories that could not be listed
    pub unreadable_countries: usize,
}

impl Corpus {
    pub fn document_count(&self) -> usize {
        self.countries.iter().map(|c| c.documents.len()).sum()
    }
}

/// Decode bytes as UTF-8, falling back to GB18030. A leading BOM is dropped.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.trim_start_matches('\u{feff}').to_string(),
        Err(_) => {
            let (text, _, _) = GB18030.decode(bytes);
            text.into_owned()
        }
    }
}

fn is_txt(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

/// Sorted `.txt` files directly inside `dir`.
fn text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_txt(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Load every country directory under `source_dir`.
///
/// Country directories without `.txt` files are skipped. Unreadable files
/// and country directories are logged and counted, never fatal.
pub fn load_corpus(source_dir: &Path, short_names: &ShortNames) -> Result<Corpus> {
    let mut country_dirs: Vec<PathBuf> = fs::read_dir(source_dir)
        .with_context(|| format!("Failed to read source directory {}", source_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    country_dirs.sort();

    let mut corpus = Corpus::default();
    for dir in country_dirs {
        load_country(&mut corpus, &dir, short_names);
    }

    Ok(corpus)
}

/// Add the country stored in `dir` to `corpus`. A directory that cannot be
/// listed is logged and counted, and the rest of the corpus still loads.
fn load_country(corpus: &mut Corpus, dir: &Path, short_names: &ShortNames) {
    let Some(full_name) = dir.file_name().and_then(|n| n.to_str()) else {
        warn!(path = %dir.display(), "Skipping directory with a non-UTF-8 name");
        return;
    };

    let files = match text_files(dir) {
        Ok(files) => files,
        Err(e) => {
            warn!(country = full_name, error = %e, "Unreadable country directory, skipping");
            corpus.unreadable_countries += 1;
            return;
        }
    };
    if files.is_empty() {
        info!(country = full_name, "No .txt documents, skipping country");
        return;
    }

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match fs::read(&path) {
            Ok(bytes) => documents.push(Document::new(id, &decode_text(&bytes))),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable document, skipping");
                corpus.unreadable += 1;
            }
        }
    }

    let name = short_names.resolve(full_name);
    info!(
        country = %name.full,
        short_name = %name.short,
        documents = documents.len(),
        "Loaded country corpus"
    );
    corpus.countries.push(Country::new(name, documents));
}
