use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use scout_core::{config::Settings, source::HttpFeedSource, ChannelScanner, Dispatcher};
use sqlx::postgres::PgPoolOptions;
use tokio::time::MissedTickBehavior;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "scout-worker")]
#[command(about = "Scans every active channel feed on a schedule", version)]
struct Args {
    /// Run a single scan across all active channels and exit.
    #[arg(long)]
    once: bool,
    /// Seconds between scans; overrides SCOUT_SCAN_INTERVAL_SECS.
    #[arg(long)]
    interval_secs: Option<u64>,
}

impl Args {
    fn interval(&self, settings: &Settings) -> Duration {
        self.interval_secs
            .map(Duration::from_secs)
            .unwrap_or(settings.scan_interval)
            .max(Duration::from_secs(1))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let args = Args::parse();
    let settings = Settings::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;

    let source = HttpFeedSource::new(settings.fetch_timeout)?;
    let scanner = ChannelScanner::new(
        Arc::new(source),
        Arc::new(db::PgStore::new(db)),
        settings.scanner.clone(),
    );
    let dispatcher = Dispatcher::new(Arc::new(scanner), settings.scan_concurrency);

    if args.once {
        let summary = dispatcher.run_scheduled_scan().await;
        info!(?summary, "single scan complete");
        return Ok(());
    }

    let interval = args.interval(&settings);
    info!(
        interval_secs = interval.as_secs(),
        concurrency = settings.scan_concurrency,
        "worker starting"
    );

    run_schedule(&dispatcher, interval).await;

    info!("worker stopped");
    Ok(())
}

/// Ticks until ctrl-c. A tick in progress always runs to completion.
async fn run_schedule(dispatcher: &Dispatcher, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                dispatcher.run_scheduled_scan().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            database_url: "postgres://localhost/scout".to_string(),
            scout_env: "test".to_string(),
            api_bind: "127.0.0.1:0".to_string(),
            admin_secret: None,
            scanner: Default::default(),
            fetch_timeout: Duration::from_secs(10),
            scan_concurrency: 8,
            scan_interval: Duration::from_secs(900),
        }
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["scout-worker"]).unwrap();

        assert!(!args.once);
        assert_eq!(args.interval(&settings()), Duration::from_secs(900));
    }

    #[test]
    fn test_args_once() {
        let args = Args::try_parse_from(["scout-worker", "--once"]).unwrap();
        assert!(args.once);
    }

    #[test]
    fn test_args_interval_override() {
        let args = Args::try_parse_from(["scout-worker", "--interval-secs", "60"]).unwrap();
        assert_eq!(args.interval(&settings()), Duration::from_secs(60));

        let args = Args::try_parse_from(["scout-worker", "--interval-secs", "0"]).unwrap();
        assert_eq!(args.interval(&settings()), Duration::from_secs(1));
    }

    #[test]
    fn test_args_rejects_unknown_flag() {
        assert!(Args::try_parse_from(["scout-worker", "--forever"]).is_err());
    }
}
