//! Per-shard scanning: one worker's pass over its slice of the input.
//!
//! Each worker owns a disjoint shard of the data rows -- row `i` belongs to
//! the worker whose index is `i mod worker_count` -- and folds its rows into
//! a private [`LangTally`] and [`TopList`]. Workers share nothing mutable;
//! their outputs meet again only at the coordinator's merge.

use crate::combiners::{LangTally, TopList};
use crate::config::{JobConfig, TopScope};
use crate::record::{self, ColumnLayout};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One worker's slice of the row space: every `count`-th data row starting
/// at `index`. Together the `count` shards cover every data row exactly once.
#[derive(Clone, Copy, Debug)]
pub struct ShardSpec {
    pub index: usize,
    pub count: usize,
}

impl ShardSpec {
    #[must_use]
    pub fn owns(&self, row: usize) -> bool {
        row % self.count == self.index
    }
}

/// The pair of accumulators a worker hands back at the barrier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkerOutput {
    pub tally: LangTally,
    pub top: TopList,
}

impl WorkerOutput {
    fn empty(top_k: usize) -> Self {
        Self {
            tally: LangTally::default(),
            top: TopList::new(top_k),
        }
    }

    /// Associative combine of two partial outputs.
    fn absorb(mut self, other: WorkerOutput) -> Self {
        self.tally.absorb(other.tally);
        self.top.merge(other.top);
        self
    }
}

/// Scan one shard of the input file.
///
/// Streams the file, keeps only rows owned by `shard`, and folds them into
/// fresh accumulators. With `parallelism > 1` the worker instead buffers its
/// shard and folds row batches concurrently, each batch into a private
/// partial output, combined associatively at the end -- same result as the
/// streaming path up to floating-point summation order.
///
/// # Errors
/// Returns an error if the shard's file cannot be opened or a raw record
/// cannot be read (I/O or encoding failure). Malformed rows are skipped, not
/// errors.
pub fn scan_shard(cfg: &JobConfig, layout: &ColumnLayout, shard: ShardSpec) -> Result<WorkerOutput> {
    let mut rdr = record::open_reader(&cfg.input)?;

    if cfg.parallelism > 1 {
        let rows = collect_shard_rows(&mut rdr, shard)?;
        let out = scan_batches(cfg, layout, &rows);
        debug!(
            worker = shard.index,
            rows = rows.len(),
            matches = out.tally.films,
            "shard scanned (batched)"
        );
        return Ok(out);
    }

    let mut out = WorkerOutput::empty(cfg.top_k);
    let mut rows = 0usize;

    for (row, rec) in rdr.records().enumerate() {
        if !shard.owns(row) {
            continue;
        }
        let rec =
            rec.with_context(|| format!("read record #{} of {}", row + 1, cfg.input.display()))?;
        rows += 1;
        accumulate(cfg, layout, &rec, &mut out);
    }

    debug!(
        worker = shard.index,
        rows,
        matches = out.tally.films,
        "shard scanned"
    );
    Ok(out)
}

/// Fold one raw record into the worker's accumulators.
///
/// Skips the row when it is missing a required column or its language field
/// is empty after trimming; such rows count as neither a match nor a
/// candidate. Otherwise the tally sees the row iff its language matches the
/// target, and the top-K chart sees it according to the configured scope.
fn accumulate(cfg: &JobConfig, layout: &ColumnLayout, rec: &csv::StringRecord, out: &mut WorkerOutput) {
    let Some(film) = record::decode(rec, layout, cfg.widths) else {
        return;
    };
    if film.language.is_empty() {
        return;
    }

    let matches = film.language == cfg.language;
    if matches {
        out.tally.record(film.popularity);
    }
    if matches || cfg.scope == TopScope::AllLanguages {
        out.top.insert(film);
    }
}

fn collect_shard_rows(
    rdr: &mut csv::Reader<std::fs::File>,
    shard: ShardSpec,
) -> Result<Vec<csv::StringRecord>> {
    let mut rows = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        if !shard.owns(row) {
            continue;
        }
        rows.push(rec.with_context(|| format!("read record #{}", row + 1))?);
    }
    Ok(rows)
}

/// Second-level fan-out: fold contiguous row batches in parallel, each batch
/// into a private partial output, then combine. The combine is associative
/// and order-independent, so no batch ever writes another batch's
/// accumulator.
fn scan_batches(cfg: &JobConfig, layout: &ColumnLayout, rows: &[csv::StringRecord]) -> WorkerOutput {
    if rows.is_empty() {
        return WorkerOutput::empty(cfg.top_k);
    }
    let batch = rows.len().div_ceil(cfg.parallelism).max(1);
    rows.par_chunks(batch)
        .map(|chunk| {
            let mut out = WorkerOutput::empty(cfg.top_k);
            for rec in chunk {
                accumulate(cfg, layout, rec, &mut out);
            }
            out
        })
        .reduce(|| WorkerOutput::empty(cfg.top_k), WorkerOutput::absorb)
}
