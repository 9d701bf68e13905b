//! Job configuration.

use crate::record::FieldWidths;
use std::path::PathBuf;

/// Which films are offered to the top-K ranking.
///
/// Deployments run both shapes: a general chart over every language and a
/// restricted chart over the target language only, so the scope is
/// configuration rather than a constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopScope {
    /// Rank every decoded film regardless of language.
    AllLanguages,
    /// Rank only films whose language matches the target language.
    TargetLanguage,
}

/// Everything one aggregation run needs to know.
#[derive(Clone, Debug)]
pub struct JobConfig {
    /// Input CSV path. The first line must be a header row.
    pub input: PathBuf,
    /// Target language code, compared exactly against `original_language`.
    pub language: String,
    /// Top-K capacity. Zero is valid and yields an empty chart.
    pub top_k: usize,
    /// Number of scan workers. Each owns the shard of data rows whose index
    /// is congruent to its own, modulo this count.
    pub workers: usize,
    /// Which films feed the top-K chart.
    pub scope: TopScope,
    /// Whether `release_date` is resolved, carried, and reported.
    pub track_release_date: bool,
    /// Second-level fan-out inside each worker: the number of row batches a
    /// worker folds in parallel. `1` streams the shard without buffering.
    pub parallelism: usize,
    /// Display truncation widths for the string fields.
    pub widths: FieldWidths,
}

impl JobConfig {
    /// A single-worker, general-profile configuration: top 30 over all
    /// languages, release dates tracked.
    pub fn new(input: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            language: language.into(),
            top_k: 30,
            workers: 1,
            scope: TopScope::AllLanguages,
            track_release_date: true,
            parallelism: 1,
            widths: FieldWidths::default(),
        }
    }
}
