//! Aggregation combiners for the scan and merge phases.
//!
//! Every aggregate in the pipeline follows the same two-phase shape: each
//! worker folds its shard into a private accumulator (`create` +
//! `add_input`), and the coordinator combines the per-worker accumulators
//! after the barrier (`merge`) before extracting the final value (`finish`).
//! `merge` must be associative and commutative so the result does not depend
//! on worker completion order.
//!
//! - [`PopularityAverage`] -- count and mean popularity of matching films.
//! - [`TopRated`] -- the K highest-rated films, tie-broken by popularity.

mod stats;
mod topk;

pub use stats::{LangTally, PopularityAverage};
pub use topk::{TopList, TopRated};

/// A two-phase aggregation over values of type `V`, with accumulator `A` and
/// output `O`.
pub trait CombineFn<V, A, O>: Send + Sync + 'static {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn merge(&self, acc: &mut A, other: A);
    fn finish(&self, acc: A) -> O;
}
