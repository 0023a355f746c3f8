//! The ranking pass applied to a generated candidate batch.
//!
//! Ranked order is separate from the candidates' natural alphabetic order:
//! natural order drives prefix matching in the popup, ranked order decides
//! what is shown first.

use std::cmp::Ordering;

use crate::candidate::Candidate;

/// Sort key for ranked presentation: grouping bucket first, then priority
/// within the bucket.
#[derive(Debug, Clone, Copy)]
pub struct RankKey {
    grouping: i32,
    priority: f64,
}

impl RankKey {
    pub fn new(grouping: i32, priority: f64) -> Self {
        Self { grouping, priority }
    }

    pub fn grouping(self) -> i32 {
        self.grouping
    }

    pub fn priority(self) -> f64 {
        self.priority
    }
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // total_cmp keeps this a total order even for NaN priorities.
        self.grouping
            .cmp(&other.grouping)
            .then_with(|| self.priority.total_cmp(&other.priority))
    }
}

/// Sorts by `(grouping, priority)` descending; equal keys fall back to the
/// natural text order so the result is deterministic.
pub fn rank_candidates<T>(items: &mut [Candidate<T>]) {
    items.sort_by(|a, b| {
        b.rank_key()
            .cmp(&a.rank_key())
            .then_with(|| a.compare_by_text(b))
    });
}

/// Natural alphabetic order used for prefix matching.
pub fn sort_by_text<T>(items: &mut [Candidate<T>]) {
    items.sort_by(|a, b| a.compare_by_text(b));
}
