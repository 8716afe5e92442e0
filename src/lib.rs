pub mod compose;
pub mod config;
pub mod digest;
pub mod ingest;
pub mod publish;
pub mod scrape;
pub mod stats;
pub mod store;

use chrono::{Datelike, NaiveDate};

/// One work observed in the archive listing. Works are transient: only
/// their per-fandom counter effects are ever persisted.
#[derive(Debug, Clone)]
pub struct Work {
    pub id: u64,
    pub fandoms: Vec<String>,
    pub posted: NaiveDate,
}

impl Work {
    pub fn day_number(&self) -> i64 {
        day_number(self.posted)
    }
}

/// Strictly increasing integer per calendar date. Stored stats are keyed
/// by this, so "yesterday" and "8 days ago" are integer subtraction.
pub fn day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

/// How an invocation talks to the outside world. Local dry runs log
/// intended posts instead of sending them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Production,
    LocalDryRun,
}
