use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::error::ScanError;
use crate::feed;
use crate::source::FeedSource;
use crate::store::ScoutStore;
use crate::types::{ChannelTarget, ItemStatus, NewItem, SampleItem, ScanOutcome};

/// Fetches one channel's feed and records any unseen items as `pending`.
///
/// `scan_channel` is a boundary: fetch, parse and store failures all come back
/// as a `ScanOutcome` with `success == false`, never as an error.
#[derive(Clone)]
pub struct ChannelScanner {
    source: Arc<dyn FeedSource>,
    store: Arc<dyn ScoutStore>,
    config: ScannerConfig,
}

#[derive(Debug)]
struct ScanReport {
    count: usize,
    inserted: u64,
    sample: Option<SampleItem>,
}

impl ChannelScanner {
    pub fn new(
        source: Arc<dyn FeedSource>,
        store: Arc<dyn ScoutStore>,
        config: ScannerConfig,
    ) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    pub fn store(&self) -> &Arc<dyn ScoutStore> {
        &self.store
    }

    pub async fn scan_channel(&self, channel: &ChannelTarget) -> ScanOutcome {
        match self.try_scan(channel).await {
            Ok(report) => {
                info!(
                    channel_id = %channel.channel_id,
                    count = report.count,
                    inserted = report.inserted,
                    "channel scanned"
                );
                let message = match &report.sample {
                    Some(sample) => format!(
                        "Scouted {} ({} items, {} new): {}",
                        channel.name, report.count, report.inserted, sample.title
                    ),
                    None => format!("No entries found for {}", channel.name),
                };
                ScanOutcome {
                    success: true,
                    message,
                    count: report.count,
                    sample: report.sample,
                }
            }
            Err(err) => {
                warn!(channel_id = %channel.channel_id, error = %err, "channel scan failed");
                ScanOutcome::failure(format!("Error scanning {}: {}", channel.name, err))
            }
        }
    }

    async fn try_scan(&self, channel: &ChannelTarget) -> Result<ScanReport, ScanError> {
        let url = feed::feed_url(&self.config.feed_url_template, &channel.channel_id);
        let body = self.source.fetch(&url).await?;

        let entries = match feed::parse_entries(&body) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    channel_id = %channel.channel_id,
                    error = %err,
                    "unparseable feed treated as empty"
                );
                Vec::new()
            }
        };

        let ingested_at = Utc::now();
        let items: Vec<NewItem> = entries
            .into_iter()
            .filter(|entry| {
                if entry.id.is_empty() {
                    debug!(channel_id = %channel.channel_id, "skipping entry without id");
                    return false;
                }
                true
            })
            .map(|entry| NewItem {
                url: feed::item_url(&self.config.item_url_template, &entry.id),
                video_id: entry.id,
                title: entry.title,
                channel_id: channel.channel_id.clone(),
                status: ItemStatus::Pending,
                created_at: entry.published.unwrap_or(ingested_at),
            })
            .collect();

        let inserted = if items.is_empty() {
            0
        } else {
            self.store.upsert_items(&items).await?
        };

        self.store
            .mark_scanned(&channel.channel_id, Utc::now())
            .await?;

        // Entries without an id cannot be keyed in the store, so `count` covers
        // only storable entries, not everything the feed listed.
        Ok(ScanReport {
            count: items.len(),
            inserted,
            sample: items.first().map(|item| SampleItem {
                id: item.video_id.clone(),
                title: item.title.clone(),
            }),
        })
    }
}
