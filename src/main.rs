use account_client::{AccountDataProvider, MetaApiClient};
use alerter::{notify, TelegramAlerter};
use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use configuration::{load_config, Config};
use core_types::AggregationStrategy;
use roi::{compose_report, RoiEngine};
use state_store::BaselineStore;
use tracing_subscriber::EnvFilter;

/// Samples a trading account's equity and balance, rolls the per-period
/// baselines, and reports day/week/month/all-time ROI to Telegram.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Compose and log the report but skip the Telegram delivery.
    #[arg(long)]
    dry_run: bool,
}

/// The main entry point for the Meridian ROI tracker.
#[tokio::main]
async fn main() {
    // Load environment variables from an optional .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Configuration problems are unrecoverable: there is nothing sensible to
    // track without provider credentials and a valid timezone.
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    // `RUST_LOG` wins over the configured default verbosity.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let alerter = if cli.dry_run {
        tracing::info!("Dry run: the report will be logged but not delivered.");
        None
    } else {
        TelegramAlerter::new(&config.telegram)
    };

    if let Err(e) = run(&config, &alerter).await {
        tracing::error!(error = ?e, "Run aborted.");
        // Every fatal path tries to tell the channel what went wrong before
        // exiting non-zero.
        let failure = format!("{}\n❌ ROI run failed: {e:#}", config.report.header);
        notify(&alerter, &failure).await;
        std::process::exit(1);
    }
}

/// One complete tracking run, strictly sequential: authenticate, snapshot,
/// roll baselines, persist, compute, compose, notify.
async fn run(config: &Config, alerter: &Option<TelegramAlerter>) -> anyhow::Result<()> {
    let now = Utc::now();
    let tz = config.report.timezone()?;

    let provider = MetaApiClient::new(&config.provider);
    let session = provider
        .authenticate()
        .await
        .context("failed to establish a session with the account data service")?;
    let snapshot = provider
        .fetch_snapshot(&session)
        .await
        .context("failed to fetch the account snapshot")?;
    tracing::info!(
        login = %snapshot.identity.login,
        server = %snapshot.identity.server,
        equity = %snapshot.equity,
        balance = %snapshot.balance,
        "Fetched account snapshot."
    );

    // Baselines are rolled and persisted before any ROI is computed, so a
    // later failure cannot lose a rollover that already happened.
    let mut store =
        BaselineStore::open(&config.state.path).context("failed to open the baseline store")?;
    let engine = RoiEngine::new(tz);
    engine.roll_baselines(now, &snapshot, &mut store);
    store
        .persist()
        .context("failed to persist the baseline store")?;

    let results = match config.report.strategy {
        AggregationStrategy::Snapshot => engine.snapshot_delta(&snapshot, &store),
        AggregationStrategy::DailyGain => {
            engine
                .compounded_daily_gain(now, &provider, &session, &store)
                .await
        }
    };

    let report = compose_report(&snapshot, &results, tz);
    tracing::info!("{}", report.replace('\n', " | "));
    notify(alerter, &format!("{}\n{}", config.report.header, report)).await;

    Ok(())
}
