use std::collections::HashMap;
use std::ops::RangeInclusive;

use chrono::NaiveDate;

use crate::config::DigestConfig;
use crate::day_number;
use crate::stats::{delta_string, gain_delta, DailyStats, FandomCount};
use crate::store::Store;

/// Line sequences for one leaderboard thread and its companion gains
/// thread, ready for chunking.
#[derive(Debug, Clone)]
pub struct Digest {
    pub top: Vec<String>,
    pub gains: Vec<String>,
}

/// Leaderboard and gains for one day, compared against the day before.
pub async fn daily_digest<S: Store>(
    store: &S,
    date: NaiveDate,
    config: &DigestConfig,
) -> Result<Digest, String> {
    let current = stats_for_day(store, date).await?;
    let previous = stats_for_day(store, date - chrono::Days::new(1)).await?;

    let top = leaderboard_lines(
        format!("Top fandoms for {}:", date.format("%F")),
        &current,
        &previous,
        config.top_n,
    );
    let gains = gains_lines(
        format!("Biggest-gaining fandoms for {}:", date.format("%F")),
        &current,
        &previous,
        config.daily_gain_min,
    );
    Ok(Digest { top, gains })
}

/// Leaderboard and gains for the week ending yesterday, over counts
/// summed across days 1-7 back, compared to days 8-14 back.
pub async fn weekly_digest<S: Store>(
    store: &S,
    today: NaiveDate,
    config: &DigestConfig,
) -> Result<Digest, String> {
    let current = stats_for_days_back(store, today, 1..=7).await?;
    let previous = stats_for_days_back(store, today, 8..=14).await?;
    let ending = today - chrono::Days::new(1);

    let top = leaderboard_lines(
        format!("Top fandoms for the week ending {}:", ending.format("%F")),
        &current,
        &previous,
        config.top_n,
    );
    let gains = gains_lines(
        format!(
            "Biggest-gaining fandoms for the week ending {}:",
            ending.format("%F")
        ),
        &current,
        &previous,
        config.weekly_gain_min,
    );
    Ok(Digest { top, gains })
}

async fn stats_for_day<S: Store>(store: &S, date: NaiveDate) -> Result<DailyStats, String> {
    tracing::info!("getting stats for {}", date.format("%F"));
    let counts = store.counters_for_day(day_number(date)).await?;
    Ok(DailyStats::new(counts))
}

/// Counts summed per fandom over a window of days back from `today`,
/// inclusive on both ends. Summed entries are put in name order before
/// the stable count sort so tie order is deterministic.
async fn stats_for_days_back<S: Store>(
    store: &S,
    today: NaiveDate,
    days_back: RangeInclusive<i64>,
) -> Result<DailyStats, String> {
    let today_number = day_number(today);
    let mut totals: HashMap<String, u64> = HashMap::new();

    for back in days_back {
        let counts = store.counters_for_day(today_number - back).await?;
        for count in counts {
            *totals.entry(count.fandom).or_insert(0) += count.works_seen;
        }
    }

    let mut counts: Vec<FandomCount> = totals
        .into_iter()
        .map(|(fandom, works_seen)| FandomCount { fandom, works_seen })
        .collect();
    counts.sort_by(|a, b| a.fandom.cmp(&b.fandom));
    Ok(DailyStats::new(counts))
}

fn leaderboard_lines(
    header: String,
    current: &DailyStats,
    previous: &DailyStats,
    top_n: usize,
) -> Vec<String> {
    let mut lines = vec![header];
    for (index, entry) in current.top(top_n).iter().enumerate() {
        let delta = delta_string(previous.position_of(&entry.fandom), index);
        lines.push(format!(
            "{}: {}{}: {} works",
            index + 1,
            entry.fandom,
            delta,
            entry.works_seen
        ));
    }
    lines
}

fn gains_lines(
    header: String,
    current: &DailyStats,
    previous: &DailyStats,
    min_count: u64,
) -> Vec<String> {
    let mut lines = vec![header];
    for gain in current.compute_biggest_gains(previous, min_count) {
        if gain.gain_ratio > 1.0 {
            lines.push(format!("-{}: {}", gain.fandom, gain_delta(gain.gain_ratio)));
        }
    }
    lines
}
