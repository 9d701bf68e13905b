//! Shard fan-out, the barrier, and the two reductions.
//!
//! The coordinator resolves the column layout once, hands each worker its
//! shard on a dedicated thread pool sized to the worker count, waits for all
//! of them (any worker error aborts the run), and only then folds the
//! per-worker outputs: scalar tallies by addition, top-K lists by
//! concatenate-sort-truncate. Barrier-then-merge, never a streaming merge.

use crate::combiners::{CombineFn, PopularityAverage, TopRated};
use crate::config::JobConfig;
use crate::record::{ColumnLayout, Film};
use crate::scanner::{ShardSpec, WorkerOutput, scan_shard};
use anyhow::{Context, Result, ensure};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// The final immutable snapshot of one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of films whose language matched the target.
    pub films: u64,
    /// Mean popularity of the matching films; `None` when nothing matched.
    pub mean_popularity: Option<f64>,
    /// The global top-K, best first.
    pub top: Vec<Film>,
}

/// Run the whole aggregation: resolve columns, scan all shards, merge.
///
/// The match count is exact and identical for any worker count; the mean is
/// numerically close across worker counts (floating-point sums associate
/// differently) but not guaranteed bit-identical.
///
/// # Errors
/// Fatal before any scan work: unopenable or empty input, missing required
/// columns, zero workers. During the scan: any worker I/O error aborts the
/// run. There are no retries.
pub fn run(cfg: &JobConfig) -> Result<Summary> {
    ensure!(cfg.workers > 0, "worker count must be at least 1");
    ensure!(cfg.parallelism > 0, "worker parallelism must be at least 1");

    let layout = ColumnLayout::from_path(&cfg.input, cfg.track_release_date)?;
    info!(?layout, input = %cfg.input.display(), "resolved required columns");
    info!(
        workers = cfg.workers,
        top_k = cfg.top_k,
        language = %cfg.language,
        scope = ?cfg.scope,
        "starting scan"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cfg.workers)
        .build()
        .context("build worker pool")?;

    let outputs: Vec<WorkerOutput> = pool.install(|| {
        (0..cfg.workers)
            .into_par_iter()
            .map(|index| {
                scan_shard(
                    cfg,
                    &layout,
                    ShardSpec {
                        index,
                        count: cfg.workers,
                    },
                )
            })
            .collect::<Result<Vec<_>>>()
    })?;

    // Every worker is done; fold their outputs at the single collection point.
    let average = PopularityAverage;
    let ranker = TopRated::new(cfg.top_k);
    let mut tally = average.create();
    let mut top = ranker.create();
    for out in outputs {
        average.merge(&mut tally, out.tally);
        ranker.merge(&mut top, out.top);
    }

    let (films, mean_popularity) = average.finish(tally);
    let top = ranker.finish(top);
    info!(films, ranked = top.len(), "scan complete");

    Ok(Summary {
        films,
        mean_popularity,
        top,
    })
}
