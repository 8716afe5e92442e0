use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use clap::Parser;

use fandom_pulse::config::PulseConfig;
use fandom_pulse::digest::{daily_digest, weekly_digest};
use fandom_pulse::ingest::ingest_works;
use fandom_pulse::publish::{send_thread, Publisher, XPublisher};
use fandom_pulse::scrape::ArchiveClient;
use fandom_pulse::store::{HttpStore, Store};
use fandom_pulse::RunMode;

const LOCAL_STORE_ENDPOINT: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(
    name = "fandom-pulse",
    about = "Fan-fiction archive trend tracker and poster"
)]
struct Cli {
    /// Action to run: scrape, stats, daily_stats, weekly_stats or clear_thresholds
    action: String,

    /// Point the store client at the local development endpoint
    #[arg(long)]
    local: bool,

    /// Log intended posts instead of sending them
    #[arg(long)]
    dry_run: bool,

    /// Override the reference date for digests (defaults to today, UTC)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (mut config, _config_path) = PulseConfig::load(cli.config.clone())?;

    if cli.local {
        config.store.endpoint = LOCAL_STORE_ENDPOINT.to_string();
    }
    let mode = if cli.local || cli.dry_run {
        RunMode::LocalDryRun
    } else {
        RunMode::Production
    };

    let store = HttpStore::from_config(&config.store)?;
    let publisher = XPublisher::from_env(mode, &config.publish)?;
    let today = cli.date.unwrap_or_else(|| Utc::now().date_naive());

    match cli.action.as_str() {
        "stats" | "daily_stats" => run_daily(&store, &publisher, &config, today).await,
        "weekly_stats" => run_weekly(&store, &publisher, &config, today).await,
        "scrape" => run_scrape(&store, &publisher, &config).await,
        "clear_thresholds" => run_clear_thresholds(&store).await,
        other => Err(format!("unrecognized action: {}", other)),
    }
}

/// Leaderboard and gains threads for yesterday.
async fn run_daily<S: Store, P: Publisher>(
    store: &S,
    publisher: &P,
    config: &PulseConfig,
    today: NaiveDate,
) -> Result<(), String> {
    let yesterday = today - chrono::Days::new(1);
    let digest = daily_digest(store, yesterday, &config.digest).await?;
    send_thread(publisher, &digest.top, config.publish.post_limit).await;
    send_thread(publisher, &digest.gains, config.publish.post_limit).await;
    Ok(())
}

async fn run_weekly<S: Store, P: Publisher>(
    store: &S,
    publisher: &P,
    config: &PulseConfig,
    today: NaiveDate,
) -> Result<(), String> {
    let digest = weekly_digest(store, today, &config.digest).await?;
    send_thread(publisher, &digest.top, config.publish.post_limit).await;
    send_thread(publisher, &digest.gains, config.publish.post_limit).await;
    Ok(())
}

/// Fetch the newest-works listing, record counters, and announce
/// first-time threshold crossings.
async fn run_scrape<S: Store, P: Publisher>(
    store: &S,
    publisher: &P,
    config: &PulseConfig,
) -> Result<(), String> {
    let archive = ArchiveClient::new(config.ingest.listing_url.clone())?;
    let works = archive.fetch_latest_works().await?;
    let crossed = ingest_works(store, &works, config.ingest.daily_threshold).await?;

    for fandom in crossed {
        let message = format!(
            "{} just crossed the threshold of {} works in a day!",
            fandom, config.ingest.daily_threshold
        );
        publisher.publish(&message, None).await?;
    }
    Ok(())
}

async fn run_clear_thresholds<S: Store>(store: &S) -> Result<(), String> {
    let removed = store.clear_threshold_markers().await?;
    tracing::info!("cleared {} threshold markers", removed);
    Ok(())
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
