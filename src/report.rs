//! Rendering of the final summary.

use crate::config::JobConfig;
use crate::runner::Summary;
use anyhow::Result;
use std::fmt::Write as _;

/// Output shape for the final report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable ranked listing.
    Text,
    /// The [`Summary`] as pretty-printed JSON.
    Json,
}

/// Render the summary in the requested format.
///
/// # Errors
/// Only JSON serialization can fail.
pub fn render(summary: &Summary, cfg: &JobConfig, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(summary, cfg)),
        ReportFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(summary)?)),
    }
}

fn render_text(summary: &Summary, cfg: &JobConfig) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Films with language '{}' ===", cfg.language);
    let _ = writeln!(out, "Matching films: {}", summary.films);
    match summary.mean_popularity {
        Some(mean) => {
            let _ = writeln!(out, "Mean popularity: {mean:.4}");
        }
        None => {
            let _ = writeln!(out, "Mean popularity: undefined (no matching films)");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "=== Top {} films by rating ===", cfg.top_k);
    for (rank, film) in summary.top.iter().enumerate() {
        if cfg.track_release_date {
            let _ = writeln!(
                out,
                "{:2}) rating = {:.2} | popularity = {:.2} | language = {} | date = {} | title = {}",
                rank + 1,
                film.rating,
                film.popularity,
                film.language,
                film.release_date,
                film.title
            );
        } else {
            let _ = writeln!(
                out,
                "{:2}) rating = {:.2} | popularity = {:.2} | language = {} | title = {}",
                rank + 1,
                film.rating,
                film.popularity,
                film.language,
                film.title
            );
        }
    }

    out
}
