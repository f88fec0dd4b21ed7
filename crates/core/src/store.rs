use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::types::{ChannelTarget, NewItem};

/// What the scouting pipeline needs from the persistent store.
#[async_trait]
pub trait ScoutStore: Send + Sync {
    async fn active_channels(&self) -> Result<Vec<ChannelTarget>, StoreError>;

    /// Inserts every item whose `video_id` is not yet recorded; existing rows
    /// are left untouched. Returns the number of rows inserted.
    async fn upsert_items(&self, items: &[NewItem]) -> Result<u64, StoreError>;

    async fn mark_scanned(&self, channel_id: &str, at: DateTime<Utc>) -> Result<(), StoreError>;
}

#[cfg(any(test, feature = "testing"))]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone)]
    pub struct StoredChannel {
        pub target: ChannelTarget,
        pub is_active: bool,
        pub last_scanned_at: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Default)]
    struct Inner {
        channels: Vec<StoredChannel>,
        items: Vec<NewItem>,
        upsert_calls: usize,
        fail_list: bool,
        fail_upsert: bool,
        fail_mark: bool,
    }

    /// In-process store with the same conflict-ignoring upsert semantics as
    /// the Postgres store, plus switches to simulate rejected writes.
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        inner: Mutex<Inner>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_channel(&self, channel_id: &str, name: &str, is_active: bool) {
            self.inner.lock().unwrap().channels.push(StoredChannel {
                target: ChannelTarget::new(channel_id, name),
                is_active,
                last_scanned_at: None,
            });
        }

        pub fn set_last_scanned(&self, channel_id: &str, at: DateTime<Utc>) {
            let mut inner = self.inner.lock().unwrap();
            if let Some(channel) = inner
                .channels
                .iter_mut()
                .find(|c| c.target.channel_id == channel_id)
            {
                channel.last_scanned_at = Some(at);
            }
        }

        pub fn fail_list(&self, fail: bool) {
            self.inner.lock().unwrap().fail_list = fail;
        }

        pub fn fail_upsert(&self, fail: bool) {
            self.inner.lock().unwrap().fail_upsert = fail;
        }

        pub fn fail_mark(&self, fail: bool) {
            self.inner.lock().unwrap().fail_mark = fail;
        }

        pub fn items(&self) -> Vec<NewItem> {
            self.inner.lock().unwrap().items.clone()
        }

        pub fn upsert_calls(&self) -> usize {
            self.inner.lock().unwrap().upsert_calls
        }

        pub fn last_scanned(&self, channel_id: &str) -> Option<DateTime<Utc>> {
            self.inner
                .lock()
                .unwrap()
                .channels
                .iter()
                .find(|c| c.target.channel_id == channel_id)
                .and_then(|c| c.last_scanned_at)
        }

        pub fn item_counts(&self) -> HashMap<String, usize> {
            let mut counts = HashMap::new();
            for item in self.inner.lock().unwrap().items.iter() {
                *counts.entry(item.video_id.clone()).or_insert(0) += 1;
            }
            counts
        }
    }

    #[async_trait]
    impl ScoutStore for MemoryStore {
        async fn active_channels(&self) -> Result<Vec<ChannelTarget>, StoreError> {
            let inner = self.inner.lock().unwrap();
            if inner.fail_list {
                return Err(StoreError::new("list active channels", "connection refused"));
            }
            Ok(inner
                .channels
                .iter()
                .filter(|c| c.is_active)
                .map(|c| c.target.clone())
                .collect())
        }

        async fn upsert_items(&self, items: &[NewItem]) -> Result<u64, StoreError> {
            let mut inner = self.inner.lock().unwrap();
            inner.upsert_calls += 1;
            if inner.fail_upsert {
                return Err(StoreError::new("upsert items", "permission denied"));
            }

            let mut inserted = 0;
            for item in items {
                if inner.items.iter().any(|i| i.video_id == item.video_id) {
                    continue;
                }
                inner.items.push(item.clone());
                inserted += 1;
            }
            Ok(inserted)
        }

        async fn mark_scanned(
            &self,
            channel_id: &str,
            at: DateTime<Utc>,
        ) -> Result<(), StoreError> {
            let mut inner = self.inner.lock().unwrap();
            if inner.fail_mark {
                return Err(StoreError::new("mark channel scanned", "permission denied"));
            }
            if let Some(channel) = inner
                .channels
                .iter_mut()
                .find(|c| c.target.channel_id == channel_id)
            {
                channel.last_scanned_at = Some(at);
            }
            Ok(())
        }
    }
}
