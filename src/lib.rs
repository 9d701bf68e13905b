//! # Filmrank
//!
//! Shard-and-merge aggregation over large film CSV datasets.
//!
//! Filmrank answers two questions about a film dataset in a single parallel
//! pass: how many films carry a given original language (and their mean
//! popularity), and which K films rate highest overall, tie-broken by
//! popularity. The input is split across a fixed number of workers by row
//! index (`row mod workers`); each worker folds its disjoint shard into
//! private accumulators, and the coordinator merges the per-worker results
//! after all workers finish. The full dataset is never materialized in one
//! place -- each worker's bounded top-K list provably contains every film
//! from its shard that could reach the global top-K.
//!
//! ## Quick Start
//!
//! ```no_run
//! use filmrank::{JobConfig, run};
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let mut cfg = JobConfig::new("data/films.csv", "pt");
//! cfg.workers = 8;
//! cfg.top_k = 30;
//!
//! let summary = run(&cfg)?;
//! println!("{} matching films", summary.films);
//! for film in &summary.top {
//!     println!("{:.2}  {}", film.rating, film.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`record`] - `Film` rows, header/column resolution, permissive decoding
//! - [`combiners`] - two-phase accumulators (scalar tally, bounded top-K)
//! - [`scanner`] - per-shard worker scan, optional row-batch fan-out
//! - [`runner`] - shard fan-out, barrier, and the final reductions
//! - [`report`] - text and JSON rendering of the summary
//! - [`config`] - job configuration

pub mod combiners;
pub mod config;
pub mod record;
pub mod report;
pub mod runner;
pub mod scanner;

// General re-exports
pub use combiners::{CombineFn, LangTally, PopularityAverage, TopList, TopRated};
pub use config::{JobConfig, TopScope};
pub use record::{ColumnLayout, FieldWidths, Film};
pub use report::{ReportFormat, render};
pub use runner::{Summary, run};
pub use scanner::{ShardSpec, WorkerOutput, scan_shard};
