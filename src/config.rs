use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::corpus::country::ShortNames;
use crate::keywords::fixed::FixedTerms;
use crate::keywords::segment::{PosFilter, DEFAULT_ALLOWED_POS};
use crate::profile::selection::{
    SelectionPolicy, DEFAULT_MIN_DISPLAY, DEFAULT_PRIORITY_MIN_DF, DEFAULT_ZIPF_RATIO,
};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Every option has a
/// default; CLI flags override the directory and selection options.
#[derive(Debug, Clone)]
pub struct Config {
    /// One sub-directory of `.txt` documents per country
    pub source_dir: PathBuf,
    /// Where `<country>_keywords.csv` files go
    pub output_dir: PathBuf,
    /// Where `<country>_Weights.csv` and the similarity matrix go
    pub weights_dir: PathBuf,
    /// Base stopword list; `<source_dir>/cn_stopwords.txt` when unset
    pub stopwords_path: Option<PathBuf>,
    /// Merge the stop-words crate's Chinese list into the base set
    pub builtin_stopwords: bool,
    /// Part-of-speech tags a keyword may carry
    pub allowed_pos: Vec<String>,
    /// Multi-character terms the segmenter must keep whole
    pub fixed_words: Vec<String>,
    /// Extra fixed terms, one per line
    pub fixed_words_path: Option<PathBuf>,
    /// `term idf` table for frequency salience
    pub idf_path: Option<PathBuf>,
    /// `full=short` pairs merged over the built-in table
    pub short_name_overrides: Vec<(String, String)>,
    /// PRIORITY_MIN_DF, ZIPF_RATIO, MIN_DISPLAY
    pub selection: SelectionPolicy,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source_dir =
            PathBuf::from(var("SALIENT_SOURCE_DIR").unwrap_or_else(|| "country".into()));

        let allowed_pos = var("SALIENT_ALLOWED_POS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|| DEFAULT_ALLOWED_POS.iter().map(|s| s.to_string()).collect());

        let fixed_words = var("SALIENT_FIXED_WORDS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|| FixedTerms::with_defaults().iter().map(String::from).collect());

        let short_name_overrides = match var("SALIENT_COUNTRY_SHORT_NAMES") {
            Some(v) => parse_short_names(&v)?,
            None => Vec::new(),
        };

        let selection = SelectionPolicy {
            priority_min_df: parse_or(
                var("PRIORITY_MIN_DF"),
                "PRIORITY_MIN_DF",
                DEFAULT_PRIORITY_MIN_DF,
            )?,
            zipf_ratio: parse_or(var("ZIPF_RATIO"), "ZIPF_RATIO", DEFAULT_ZIPF_RATIO)?,
            min_display: parse_or(var("MIN_DISPLAY"), "MIN_DISPLAY", DEFAULT_MIN_DISPLAY)?,
        };
        if !(0.0..=1.0).contains(&selection.zipf_ratio) {
            anyhow::bail!(
                "ZIPF_RATIO must be between 0 and 1, got {}",
                selection.zipf_ratio
            );
        }

        Ok(Self {
            output_dir: PathBuf::from(
                var("SALIENT_OUTPUT_DIR").unwrap_or_else(|| "TOP-K keyword".into()),
            ),
            weights_dir: PathBuf::from(
                var("SALIENT_WEIGHTS_DIR").unwrap_or_else(|| "Result_Visualization".into()),
            ),
            source_dir,
            stopwords_path: var("SALIENT_STOPWORDS_PATH").map(PathBuf::from),
            builtin_stopwords: var("SALIENT_BUILTIN_STOPWORDS")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            allowed_pos,
            fixed_words,
            fixed_words_path: var("SALIENT_FIXED_WORDS_PATH").map(PathBuf::from),
            idf_path: var("SALIENT_IDF_PATH").map(PathBuf::from),
            short_name_overrides,
            selection,
        })
    }

    pub fn stopwords_path(&self) -> PathBuf {
        self.stopwords_path
            .clone()
            .unwrap_or_else(|| self.source_dir.join("cn_stopwords.txt"))
    }

    pub fn pos_filter(&self) -> PosFilter {
        PosFilter::new(&self.allowed_pos)
    }

    pub fn short_names(&self) -> ShortNames {
        ShortNames::default().with_overrides(self.short_name_overrides.iter().cloned())
    }

    /// The fixed-term registry: configured words plus the optional file.
    pub fn fixed_terms(&self) -> Result<FixedTerms> {
        let mut terms: FixedTerms = self.fixed_words.iter().collect();
        if let Some(path) = &self.fixed_words_path {
            terms.register_file(path)?;
        }
        Ok(terms)
    }

    /// Check that the source directory exists.
    /// Call this before any operation that reads the corpus.
    pub fn require_source_dir(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            anyhow::bail!(
                "Source directory {} not found.\n\
                 Set SALIENT_SOURCE_DIR or pass --source.",
                self.source_dir.display()
            );
        }
        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_short_names(value: &str) -> Result<Vec<(String, String)>> {
    split_list(value)
        .into_iter()
        .map(|pair| {
            let (full, short) = pair.split_once('=').with_context(|| {
                format!("Expected full=short in SALIENT_COUNTRY_SHORT_NAMES, got {pair:?}")
            })?;
            Ok((full.trim().to_string(), short.trim().to_string()))
        })
        .collect()
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {key} value {v:?}: {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let c = config(&[]).unwrap();
        assert_eq!(c.source_dir, PathBuf::from("country"));
        assert_eq!(c.stopwords_path(), PathBuf::from("country/cn_stopwords.txt"));
        assert_eq!(c.selection, SelectionPolicy::default());
        assert_eq!(c.allowed_pos, vec!["vn", "n", "nr", "ns", "nt", "nz"]);
        assert!(c.fixed_words.contains(&"一带一路".to_string()));
        assert!(!c.builtin_stopwords);
    }

    #[test]
    fn selection_options_are_injected() {
        let c = config(&[("PRIORITY_MIN_DF", "5"), ("ZIPF_RATIO", "0.3"), ("MIN_DISPLAY", "10")])
            .unwrap();
        assert_eq!(c.selection.priority_min_df, 5);
        assert_eq!(c.selection.zipf_ratio, 0.3);
        assert_eq!(c.selection.min_display, 10);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(config(&[("MIN_DISPLAY", "many")]).is_err());
        assert!(config(&[("ZIPF_RATIO", "1.5")]).is_err());
    }

    #[test]
    fn lists_and_short_names_are_parsed() {
        let c = config(&[
            ("SALIENT_ALLOWED_POS", "n, ns ,"),
            ("SALIENT_FIXED_WORDS", "碳达峰,碳中和"),
            ("SALIENT_COUNTRY_SHORT_NAMES", "巴西=巴西, 越南=越"),
        ])
        .unwrap();
        assert_eq!(c.allowed_pos, vec!["n", "ns"]);
        assert_eq!(c.fixed_terms().unwrap().len(), 2);
        assert_eq!(c.short_names().short_name("越南"), "越");
        assert_eq!(c.short_names().short_name("德国"), "德");
    }

    #[test]
    fn malformed_short_names_are_rejected() {
        assert!(config(&[("SALIENT_COUNTRY_SHORT_NAMES", "巴西")]).is_err());
    }
}
