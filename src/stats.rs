use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One day's recorded count for one fandom, as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FandomCount {
    pub fandom: String,
    pub works_seen: u64,
}

/// Ratio of a fandom's count in a later period to its count in an
/// earlier one. Infinite means the fandom was absent from the earlier
/// period: a new entrant above the inclusion threshold.
#[derive(Debug, Clone)]
pub struct Gain {
    pub fandom: String,
    pub gain_ratio: f64,
}

/// One period's per-fandom counts with rank and lookup queries. Ordering
/// is descending by count; the sort is stable, so ties keep input order.
#[derive(Debug, Clone)]
pub struct DailyStats {
    sorted: Vec<FandomCount>,
    by_fandom: HashMap<String, u64>,
}

impl DailyStats {
    pub fn new(counts: Vec<FandomCount>) -> Self {
        let by_fandom = counts
            .iter()
            .map(|count| (count.fandom.clone(), count.works_seen))
            .collect();
        let mut sorted = counts;
        sorted.sort_by(|a, b| b.works_seen.cmp(&a.works_seen));
        Self { sorted, by_fandom }
    }

    /// The top `n` fandoms by count, descending.
    pub fn top(&self, n: usize) -> &[FandomCount] {
        &self.sorted[..self.sorted.len().min(n)]
    }

    /// Zero-based rank of `fandom` in the full descending order.
    pub fn position_of(&self, fandom: &str) -> Option<usize> {
        self.sorted.iter().position(|count| count.fandom == fandom)
    }

    pub fn works_seen(&self, fandom: &str) -> Option<u64> {
        self.by_fandom.get(fandom).copied()
    }

    /// One gain per fandom whose current count is at least `min_count`,
    /// unordered. Absence from `previous` yields an infinite ratio.
    pub fn compute_gains(&self, previous: &DailyStats, min_count: u64) -> Vec<Gain> {
        self.sorted
            .iter()
            .filter(|count| count.works_seen >= min_count)
            .map(|count| {
                let gain_ratio = match previous.works_seen(&count.fandom) {
                    Some(prev_seen) => count.works_seen as f64 / prev_seen as f64,
                    None => f64::INFINITY,
                };
                Gain {
                    fandom: count.fandom.clone(),
                    gain_ratio,
                }
            })
            .collect()
    }

    /// Gains sorted by ratio descending, top 10.
    pub fn compute_biggest_gains(&self, previous: &DailyStats, min_count: u64) -> Vec<Gain> {
        let mut gains = self.compute_gains(previous, min_count);
        gains.sort_by(|a, b| {
            b.gain_ratio
                .partial_cmp(&a.gain_ratio)
                .unwrap_or(Ordering::Equal)
        });
        gains.truncate(10);
        gains
    }
}

/// Rank-movement annotation comparing a fandom's previous and new
/// leaderboard positions (zero-based). Rising ranks show "+", falling
/// ranks show the negative delta, holding steady shows nothing.
pub fn delta_string(previous: Option<usize>, new: usize) -> String {
    match previous {
        None => " (new)".to_string(),
        Some(prev) => {
            let delta = prev as i64 - new as i64;
            match delta.cmp(&0) {
                Ordering::Greater => format!(" (+{})", delta),
                Ordering::Less => format!(" ({})", delta),
                Ordering::Equal => String::new(),
            }
        }
    }
}

/// Percent annotation for a gain line; an infinite ratio reads "new".
pub fn gain_delta(ratio: f64) -> String {
    if ratio.is_infinite() {
        "new".to_string()
    } else {
        format!("+{}%", ((ratio - 1.0) * 100.0).round() as i64)
    }
}
