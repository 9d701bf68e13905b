//! Scalar statistics over the language-matched subset.

use super::CombineFn;
use serde::{Deserialize, Serialize};

/* ===================== LangTally ===================== */

/// Per-worker tally of films matching the target language.
///
/// `popularity_sum` is the sum of `popularity` over exactly the matching
/// films this tally has seen. Merging tallies is plain addition, so the
/// global result is independent of worker completion order (up to
/// floating-point association).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LangTally {
    pub films: u64,
    pub popularity_sum: f64,
}

impl LangTally {
    /// Fold one matching film into the tally.
    pub fn record(&mut self, popularity: f64) {
        self.films += 1;
        self.popularity_sum += popularity;
    }

    /// Combine another worker's tally into this one.
    pub fn absorb(&mut self, other: LangTally) {
        self.films += other.films;
        self.popularity_sum += other.popularity_sum;
    }

    /// Mean popularity, or `None` when no film matched. Never divides by zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_popularity(&self) -> Option<f64> {
        (self.films > 0).then(|| self.popularity_sum / self.films as f64)
    }
}

/* ===================== PopularityAverage ===================== */

/// Count and mean popularity of matching films.
///
/// - Accumulator: [`LangTally`]
/// - Output: `(count, mean)` where the mean is `None` for an empty tally.
#[derive(Clone, Copy, Debug, Default)]
pub struct PopularityAverage;

impl CombineFn<f64, LangTally, (u64, Option<f64>)> for PopularityAverage {
    fn create(&self) -> LangTally {
        LangTally::default()
    }

    fn add_input(&self, acc: &mut LangTally, popularity: f64) {
        acc.record(popularity);
    }

    fn merge(&self, acc: &mut LangTally, other: LangTally) {
        acc.absorb(other);
    }

    fn finish(&self, acc: LangTally) -> (u64, Option<f64>) {
        (acc.films, acc.mean_popularity())
    }
}
