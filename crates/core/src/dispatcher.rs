use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::scanner::ChannelScanner;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    pub channels: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Fans one tick out across every active channel.
///
/// Each channel gets its own task so a slow feed or a panic stays contained;
/// the semaphore caps how many fetches are in flight at once. The call returns
/// only after every started scan has finished.
#[derive(Clone)]
pub struct Dispatcher {
    scanner: Arc<ChannelScanner>,
    permits: Arc<Semaphore>,
}

impl Dispatcher {
    pub fn new(scanner: Arc<ChannelScanner>, concurrency: usize) -> Self {
        Self {
            scanner,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    pub async fn run_scheduled_scan(&self) -> TickSummary {
        let channels = match self.scanner.store().active_channels().await {
            Ok(channels) => channels,
            Err(err) => {
                error!(error = %err, "failed to load active channels");
                return TickSummary::default();
            }
        };

        if channels.is_empty() {
            info!("no active channels to scan");
            return TickSummary::default();
        }

        let mut summary = TickSummary {
            channels: channels.len(),
            ..TickSummary::default()
        };

        let mut tasks = JoinSet::new();
        for channel in channels {
            let scanner = self.scanner.clone();
            let permits = self.permits.clone();
            tasks.spawn(async move {
                // The semaphore is never closed.
                let _permit = permits.acquire_owned().await.ok();
                scanner.scan_channel(&channel).await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) if outcome.success => summary.succeeded += 1,
                Ok(_) => summary.failed += 1,
                Err(err) => {
                    warn!(error = %err, "scan task aborted");
                    summary.failed += 1;
                }
            }
        }

        info!(
            channels = summary.channels,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "scheduled scan finished"
        );

        summary
    }
}
