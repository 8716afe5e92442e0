mod http;

pub use http::HttpStore;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::stats::FandomCount;

/// Storage collaborator for counters and dedup/threshold markers.
///
/// The increment and mark operations must be atomic on the storage side;
/// independently triggered invocations can race, and correct counting
/// plus at-most-once notification depend on the store, not on any
/// in-process locking.
#[async_trait]
pub trait Store: Send + Sync {
    /// All per-fandom counters recorded for one day.
    async fn counters_for_day(&self, day: i64) -> Result<Vec<FandomCount>, String>;

    /// Atomically add one to `(fandom, day)` and return the new total.
    async fn increment_counter(&self, fandom: &str, day: i64) -> Result<u64, String>;

    /// Check-and-set a work id; returns true when it was already present.
    async fn mark_seen_if_absent(&self, work_id: u64) -> Result<bool, String>;

    /// Check-and-set the threshold marker for `(fandom, day)`; returns
    /// true when it was already present.
    async fn mark_threshold_if_absent(&self, fandom: &str, day: i64) -> Result<bool, String>;

    /// Administrative reset; returns how many markers were removed.
    async fn clear_threshold_markers(&self) -> Result<u64, String>;
}

/// In-memory store backing tests and offline experiments.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    counters: HashMap<(String, i64), u64>,
    seen_works: HashSet<u64>,
    thresholds: HashSet<(String, i64)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn counters_for_day(&self, day: i64) -> Result<Vec<FandomCount>, String> {
        let state = self.inner.lock().await;
        let mut counts: Vec<FandomCount> = state
            .counters
            .iter()
            .filter(|((_, counter_day), _)| *counter_day == day)
            .map(|((fandom, _), works_seen)| FandomCount {
                fandom: fandom.clone(),
                works_seen: *works_seen,
            })
            .collect();
        counts.sort_by(|a, b| a.fandom.cmp(&b.fandom));
        Ok(counts)
    }

    async fn increment_counter(&self, fandom: &str, day: i64) -> Result<u64, String> {
        let mut state = self.inner.lock().await;
        let total = state
            .counters
            .entry((fandom.to_string(), day))
            .or_insert(0);
        *total += 1;
        Ok(*total)
    }

    async fn mark_seen_if_absent(&self, work_id: u64) -> Result<bool, String> {
        let mut state = self.inner.lock().await;
        Ok(!state.seen_works.insert(work_id))
    }

    async fn mark_threshold_if_absent(&self, fandom: &str, day: i64) -> Result<bool, String> {
        let mut state = self.inner.lock().await;
        Ok(!state.thresholds.insert((fandom.to_string(), day)))
    }

    async fn clear_threshold_markers(&self) -> Result<u64, String> {
        let mut state = self.inner.lock().await;
        let removed = state.thresholds.len() as u64;
        state.thresholds.clear();
        Ok(removed)
    }
}
