use chrono::NaiveDate;
use fandom_pulse::day_number;
use fandom_pulse::ingest::ingest_works;
use fandom_pulse::store::{MemoryStore, Store};
use fandom_pulse::Work;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
}

fn work(id: u64, fandoms: &[&str]) -> Work {
    Work {
        id,
        fandoms: fandoms.iter().map(|fandom| fandom.to_string()).collect(),
        posted: date(),
    }
}

async fn count_for(store: &MemoryStore, fandom: &str) -> Option<u64> {
    store
        .counters_for_day(day_number(date()))
        .await
        .unwrap()
        .into_iter()
        .find(|count| count.fandom == fandom)
        .map(|count| count.works_seen)
}

#[tokio::test]
async fn reingesting_a_seen_work_is_a_no_op() {
    let store = MemoryStore::new();
    let observed = [work(7, &["Alpha"])];

    ingest_works(&store, &observed, 30).await.unwrap();
    ingest_works(&store, &observed, 30).await.unwrap();

    assert_eq!(count_for(&store, "Alpha").await, Some(1));
}

#[tokio::test]
async fn duplicate_within_one_batch_counts_once() {
    let store = MemoryStore::new();
    let observed = [work(7, &["Alpha"]), work(7, &["Alpha"])];

    ingest_works(&store, &observed, 30).await.unwrap();

    assert_eq!(count_for(&store, "Alpha").await, Some(1));
}

#[tokio::test]
async fn every_fandom_of_a_work_is_counted() {
    let store = MemoryStore::new();
    let observed = [work(1, &["Alpha", "Beta"]), work(2, &["Beta"])];

    ingest_works(&store, &observed, 30).await.unwrap();

    assert_eq!(count_for(&store, "Alpha").await, Some(1));
    assert_eq!(count_for(&store, "Beta").await, Some(2));
}

#[tokio::test]
async fn threshold_crossing_fires_exactly_once() {
    let store = MemoryStore::new();
    let first_thirty: Vec<Work> = (1..=30).map(|id| work(id, &["Alpha"])).collect();

    let crossed = ingest_works(&store, &first_thirty, 30).await.unwrap();
    assert_eq!(crossed, vec!["Alpha".to_string()]);

    let crossed = ingest_works(&store, &[work(31, &["Alpha"])], 30).await.unwrap();
    assert!(crossed.is_empty());
    assert_eq!(count_for(&store, "Alpha").await, Some(31));
}

#[tokio::test]
async fn below_threshold_fires_nothing() {
    let store = MemoryStore::new();
    let observed: Vec<Work> = (1..=29).map(|id| work(id, &["Alpha"])).collect();

    let crossed = ingest_works(&store, &observed, 30).await.unwrap();
    assert!(crossed.is_empty());
}

#[tokio::test]
async fn crossings_come_back_in_observation_order() {
    let store = MemoryStore::new();
    let mut observed = Vec::new();
    for id in 1..=3 {
        observed.push(work(id, &["Beta"]));
    }
    for id in 4..=6 {
        observed.push(work(id, &["Alpha"]));
    }

    let crossed = ingest_works(&store, &observed, 3).await.unwrap();
    assert_eq!(crossed, vec!["Beta".to_string(), "Alpha".to_string()]);
}
