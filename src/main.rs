use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use salient::config::Config;
use salient::corpus::loader::load_corpus;
use salient::keywords::extractor::DualExtractor;
use salient::keywords::segment::Segmenter;
use salient::keywords::stopwords::{self, StopwordSet};
use salient::output::files::{self, KEYWORDS_SUFFIX, SIMILARITY_FILE};
use salient::output::terminal;
use salient::pipeline::extract::{self as pipeline, RunStats};
use salient::profile::fingerprint::CountryFingerprint;
use salient::profile::overlap::SimilarityMatrix;

/// Salient: keyword salience ranking for country policy corpora.
///
/// Extracts keywords from each document with two ranking algorithms, then
/// builds a tiered, document-frequency weighted keyword profile per country.
#[derive(Parser)]
#[command(name = "salient", version, about)]
struct Cli {
    #[command(flatten)]
    dirs: DirArgs,

    #[command(flatten)]
    selection: SelectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DirArgs {
    /// Corpus directory, one sub-directory per country (SALIENT_SOURCE_DIR)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Where per-document keyword CSVs go (SALIENT_OUTPUT_DIR)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Where weight CSVs and the similarity matrix go (SALIENT_WEIGHTS_DIR)
    #[arg(long, global = true)]
    weights: Option<PathBuf>,
}

#[derive(Args)]
struct SelectionArgs {
    /// Minimum document frequency for the High_DF tier (PRIORITY_MIN_DF)
    #[arg(long, global = true)]
    min_df: Option<u32>,

    /// Share of the vocabulary to keep (ZIPF_RATIO)
    #[arg(long, global = true)]
    zipf_ratio: Option<f64>,

    /// Lower bound on the number of keywords kept (MIN_DISPLAY)
    #[arg(long, global = true)]
    min_display: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract per-document keywords and write <country>_keywords.csv
    Extract {
        /// Hide the per-country progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Build weighted country profiles from existing keyword CSVs
    Weights {
        /// Print profiles as JSON instead of bar charts
        #[arg(long)]
        json: bool,

        /// Keywords shown per country (default: 20)
        #[arg(long, default_value = "20")]
        show: usize,
    },

    /// Extract and weight in a single pass
    Run {
        /// Hide the per-country progress bar
        #[arg(long)]
        no_progress: bool,

        /// Print profiles as JSON instead of bar charts
        #[arg(long)]
        json: bool,

        /// Keywords shown per country (default: 20)
        #[arg(long, default_value = "20")]
        show: usize,
    },

    /// Compare countries by weighted cosine similarity of their profiles
    Similarity,

    /// Show the stopwords generated for a country's own name
    Stopwords {
        /// Full country name, e.g. 德国
        country: String,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("salient=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = apply_overrides(Config::load()?, &cli.dirs, &cli.selection)?;

    match cli.command {
        Commands::Extract { no_progress } => {
            let (extractions, stats) = extract_all(&config, !no_progress)?;
            for extraction in &extractions {
                if let Some(path) = files::write_document_keywords(
                    &config.output_dir,
                    &extraction.name.full,
                    &extraction.documents,
                )? {
                    println!("  {} {}", "wrote".green(), path.display());
                }
            }
            terminal::display_run_summary(&stats);
        }

        Commands::Weights { json, show } => {
            let keyword_files = files::country_files(&config.output_dir, KEYWORDS_SUFFIX)
                .with_context(|| {
                    format!(
                        "No keyword files in {}. Run `salient extract` first.",
                        config.output_dir.display()
                    )
                })?;

            let mut stats = RunStats::default();
            let mut fingerprints = Vec::new();
            for (country, path) in keyword_files {
                let documents = match files::read_document_keywords(&path) {
                    Ok(documents) => documents,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable keyword file");
                        continue;
                    }
                };
                stats.countries += 1;
                stats.documents += documents.len();
                let empty = documents.iter().filter(|d| d.keywords.is_empty()).count();
                stats.no_keywords += empty;
                stats.extracted += documents.len() - empty;

                fingerprints.push(pipeline::fingerprint_from_keywords(
                    &country,
                    &documents,
                    &config.selection,
                ));
            }

            write_fingerprints(&config, &fingerprints)?;
            show_fingerprints(&fingerprints, json, show)?;
            terminal::display_run_summary(&stats);
        }

        Commands::Run {
            no_progress,
            json,
            show,
        } => {
            let (extractions, stats) = extract_all(&config, !no_progress)?;
            let mut fingerprints = Vec::with_capacity(extractions.len());
            for extraction in &extractions {
                files::write_document_keywords(
                    &config.output_dir,
                    &extraction.name.full,
                    &extraction.documents,
                )?;
                let fingerprint = extraction.fingerprint(&config.selection);
                info!(
                    country = %fingerprint.country,
                    vocabulary = fingerprint.vocabulary_size,
                    target = fingerprint.target_size,
                    high = fingerprint.high_count(),
                    fill = fingerprint.fill_count(),
                    "Selected weighted keywords"
                );
                fingerprints.push(fingerprint);
            }

            write_fingerprints(&config, &fingerprints)?;
            show_fingerprints(&fingerprints, json, show)?;
            terminal::display_run_summary(&stats);
        }

        Commands::Similarity => {
            let vectors = files::load_weight_vectors(&config.weights_dir)?;
            let matrix = SimilarityMatrix::from_weights(&vectors);
            terminal::display_similarity(&matrix);
            if !matrix.is_empty() {
                let path = config.weights_dir.join(SIMILARITY_FILE);
                files::write_similarity(&path, &matrix)?;
                println!("\n  {} {}", "wrote".green(), path.display());
            }
        }

        Commands::Stopwords { country } => {
            let name = config.short_names().resolve(country.trim());
            let base = stopwords::load_base(&config.stopwords_path(), config.builtin_stopwords);
            let generated_set = stopwords::generated_stopwords(&name);
            let mut generated: Vec<&str> = generated_set.iter().collect();
            generated.sort_unstable();

            println!(
                "\n{}",
                format!("=== Stopwords for {} (short: {}) ===", name.full, name.short).bold()
            );
            println!("  Base list:  {} entries", base.len());
            println!("  Generated:  {}", generated.join(", "));
            println!(
                "  Effective:  {} entries",
                stopwords::effective_stopwords(&base, &name).len()
            );
        }
    }

    Ok(())
}

/// Merge CLI flags over the environment configuration.
fn apply_overrides(
    mut config: Config,
    dirs: &DirArgs,
    selection: &SelectionArgs,
) -> Result<Config> {
    if let Some(source) = &dirs.source {
        config.source_dir = source.clone();
    }
    if let Some(output) = &dirs.output {
        config.output_dir = output.clone();
    }
    if let Some(weights) = &dirs.weights {
        config.weights_dir = weights.clone();
    }

    if let Some(min_df) = selection.min_df {
        config.selection.priority_min_df = min_df;
    }
    if let Some(ratio) = selection.zipf_ratio {
        if !(0.0..=1.0).contains(&ratio) {
            anyhow::bail!("--zipf-ratio must be between 0 and 1, got {ratio}");
        }
        config.selection.zipf_ratio = ratio;
    }
    if let Some(min_display) = selection.min_display {
        config.selection.min_display = min_display;
    }
    Ok(config)
}

/// Build the extractor and base stopwords, then extract the whole corpus.
fn extract_all(
    config: &Config,
    show_progress: bool,
) -> Result<(Vec<pipeline::CountryExtraction>, RunStats)> {
    config.require_source_dir()?;

    let (extractor, base) = build_extractor(config)?;
    let corpus = load_corpus(&config.source_dir, &config.short_names())?;
    if corpus.countries.is_empty() {
        warn!(source = %config.source_dir.display(), "No country directories with .txt files");
    }
    if corpus.unreadable > 0 {
        warn!(unreadable = corpus.unreadable, "Some documents could not be read");
    }
    if corpus.unreadable_countries > 0 {
        warn!(
            countries = corpus.unreadable_countries,
            "Some country directories could not be read"
        );
    }
    println!(
        "Loaded {} documents across {} countries",
        corpus.document_count(),
        corpus.countries.len()
    );

    Ok(pipeline::extract_corpus(
        &extractor,
        &base,
        &corpus,
        show_progress,
    ))
}

fn build_extractor(config: &Config) -> Result<(DualExtractor, StopwordSet)> {
    let segmenter = Arc::new(Segmenter::new(config.fixed_terms()?));
    let extractor = DualExtractor::with_segmenter(
        segmenter,
        config.idf_path.as_deref(),
        config.pos_filter(),
    )?;
    let base = stopwords::load_base(&config.stopwords_path(), config.builtin_stopwords);
    Ok((extractor, base))
}

fn write_fingerprints(config: &Config, fingerprints: &[CountryFingerprint]) -> Result<()> {
    for fingerprint in fingerprints {
        if files::write_weights(&config.weights_dir, fingerprint)?.is_none() {
            warn!(country = %fingerprint.country, "No keywords selected, weights file not written");
        }
    }
    Ok(())
}

fn show_fingerprints(fingerprints: &[CountryFingerprint], json: bool, limit: usize) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(fingerprints)?);
    } else {
        for fingerprint in fingerprints {
            fingerprint.display(limit);
        }
    }
    Ok(())
}
