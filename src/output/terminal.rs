// Colored terminal output for run summaries and similarity matrices.
//
// Fingerprint bar charts live on `CountryFingerprint::display`; this module
// covers everything that spans several countries.

use colored::Colorize;

use crate::pipeline::extract::RunStats;
use crate::profile::overlap::SimilarityMatrix;

/// Print the document counts of a run.
pub fn display_run_summary(stats: &RunStats) {
    println!("\n{}", "=== Run Summary ===".bold());
    println!("  Countries:        {}", stats.countries);
    println!("  Documents:        {}", stats.documents);
    println!("  Extracted:        {}", stats.extracted.to_string().green());
    if stats.no_keywords > 0 {
        println!("  No keywords:      {}", stats.no_keywords.to_string().yellow());
    }
    if stats.skipped_empty > 0 {
        println!("  Empty (skipped):  {}", stats.skipped_empty.to_string().yellow());
    }
    if stats.failed > 0 {
        println!("  Failed:           {}", stats.failed.to_string().red().bold());
    }
}

/// Print the similarity matrix as a table.
pub fn display_similarity(matrix: &SimilarityMatrix) {
    if matrix.is_empty() {
        println!("No weight files found. Run `salient weights` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Weighted Cosine Similarity ({} countries) ===", matrix.len()).bold()
    );
    println!();

    let width = matrix
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    print!("  {}", " ".repeat(width));
    for label in &matrix.labels {
        print!("  {}", pad(label, width).dimmed());
    }
    println!();

    for (label, row) in matrix.labels.iter().zip(&matrix.values) {
        print!("  {}", pad(label, width).bold());
        for value in row {
            let cell = pad(&format!("{value:.2}"), width);
            let colored_cell = if *value >= 0.5 {
                cell.bright_red()
            } else if *value >= 0.2 {
                cell.bright_yellow()
            } else {
                cell.bright_blue()
            };
            print!("  {colored_cell}");
        }
        println!();
    }
}

/// Left-pad to `width` characters.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
}
