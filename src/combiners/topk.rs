//! Bounded top-K accumulation over film candidates.

use super::CombineFn;
use crate::record::Film;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Total-order rank key: rating first, popularity second, both descending
/// when compared with `>`. There is no tertiary tie-break; equal-key films
/// are interchangeable.
type RankKey = (OrderedFloat<f64>, OrderedFloat<f64>);

fn rank_key(film: &Film) -> RankKey {
    (OrderedFloat(film.rating), OrderedFloat(film.popularity))
}

/* ===================== TopList ===================== */

/// Fixed-capacity candidate list, kept sorted best-to-worst by rating and
/// then popularity.
///
/// The list never holds placeholder entries: fewer than `cap` entries simply
/// means the remaining slots are empty, and any valid candidate wins an empty
/// slot. Candidates with a negative rating encode "no observed rating" and
/// are rejected at the door.
///
/// Insertion is an O(cap) sorted insert; acceptable because `cap` is small
/// and fixed, independent of input size.
///
/// Invariant: no film seen so far with a strictly greater rank key is absent
/// from the list unless the list already holds `cap` entries at least as
/// good. That is what makes the concatenate-sort-truncate merge exact rather
/// than approximate: anything a worker dropped was dominated by `cap` films
/// from that same shard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopList {
    cap: usize,
    entries: Vec<Film>,
}

impl TopList {
    /// Create an empty list with a fixed capacity. `cap == 0` is a valid
    /// degenerate list that drops everything.
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            entries: Vec::with_capacity(cap),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in rank order, best first.
    #[must_use]
    pub fn as_slice(&self) -> &[Film] {
        &self.entries
    }

    /// Consume the list, yielding entries in rank order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Film> {
        self.entries
    }

    /// Offer a candidate to the list.
    ///
    /// A negative rating marks a film with no observed rating and is
    /// silently rejected. Otherwise the first slot (scanning best to worst)
    /// whose occupant ranks below the candidate becomes the insertion point;
    /// everything from there shifts one slot down and the worst entry falls
    /// off a full list. A candidate that beats no current entry fills an
    /// empty tail slot if one exists, and is otherwise dropped.
    pub fn insert(&mut self, candidate: Film) {
        if candidate.rating < 0.0 || self.cap == 0 {
            return;
        }
        let key = rank_key(&candidate);
        match self.entries.iter().position(|entry| key > rank_key(entry)) {
            Some(pos) => {
                if self.entries.len() == self.cap {
                    self.entries.pop();
                }
                self.entries.insert(pos, candidate);
            }
            None if self.entries.len() < self.cap => self.entries.push(candidate),
            None => {}
        }
    }

    /// Merge another list into this one: concatenate, re-sort under the same
    /// rank key, truncate to this list's capacity.
    pub fn merge(&mut self, other: TopList) {
        self.entries.extend(other.entries);
        self.entries
            .sort_unstable_by(|a, b| rank_key(b).cmp(&rank_key(a)));
        self.entries.truncate(self.cap);
    }

    /// Merge any number of per-worker lists into one list of capacity `cap`.
    #[must_use]
    pub fn merge_all(lists: impl IntoIterator<Item = TopList>, cap: usize) -> TopList {
        let mut merged = TopList::new(cap);
        for list in lists {
            merged.merge(list);
        }
        merged
    }
}

/* ===================== TopRated ===================== */

/// The K highest-rated films, tie-broken by popularity.
///
/// - Accumulator: [`TopList`]
/// - Output: `Vec<Film>` in rank order, at most `k` long.
#[derive(Clone, Copy, Debug)]
pub struct TopRated {
    /// Number of films to keep.
    pub k: usize,
}

impl TopRated {
    #[must_use]
    pub const fn new(k: usize) -> Self {
        Self { k }
    }
}

impl CombineFn<Film, TopList, Vec<Film>> for TopRated {
    fn create(&self) -> TopList {
        TopList::new(self.k)
    }

    fn add_input(&self, acc: &mut TopList, film: Film) {
        acc.insert(film);
    }

    fn merge(&self, acc: &mut TopList, other: TopList) {
        acc.merge(other);
    }

    fn finish(&self, acc: TopList) -> Vec<Film> {
        acc.into_vec()
    }
}
