use crate::store::Store;
use crate::Work;

/// Feed freshly scraped works through the dedup and counting pipeline.
///
/// A work already marked seen is skipped entirely, so re-listing the
/// same page is idempotent. Returns the fandoms that crossed
/// `daily_threshold` for the first time on their posting day, in
/// observation order; the caller decides how to announce them.
pub async fn ingest_works<S: Store>(
    store: &S,
    works: &[Work],
    daily_threshold: u64,
) -> Result<Vec<String>, String> {
    let mut crossed = Vec::new();

    for work in works {
        if store.mark_seen_if_absent(work.id).await? {
            continue;
        }
        tracing::info!(work_id = work.id, "new work, recording stats");

        let day = work.day_number();
        for fandom in &work.fandoms {
            let total = store.increment_counter(fandom, day).await?;
            tracing::info!("{} at {} today", fandom, total);

            if total < daily_threshold {
                continue;
            }
            if store.mark_threshold_if_absent(fandom, day).await? {
                tracing::info!("{} already crossed {} today", fandom, daily_threshold);
            } else {
                crossed.push(fandom.clone());
            }
        }
    }

    Ok(crossed)
}
