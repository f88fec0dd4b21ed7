use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scout_core::error::StoreError;
use scout_core::store::ScoutStore;
use scout_core::types::{ChannelTarget, NewItem};
use sqlx::PgPool;

use crate::queries;

/// Postgres-backed store for the scouting pipeline.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoutStore for PgStore {
    async fn active_channels(&self) -> Result<Vec<ChannelTarget>, StoreError> {
        let channels = queries::channels::list_active(&self.pool)
            .await
            .map_err(|err| StoreError::new("list active channels", err))?;
        Ok(channels.into_iter().map(ChannelTarget::from).collect())
    }

    async fn upsert_items(&self, items: &[NewItem]) -> Result<u64, StoreError> {
        queries::videos::upsert_batch(&self.pool, items)
            .await
            .map_err(|err| StoreError::new("upsert items", err))
    }

    async fn mark_scanned(&self, channel_id: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        queries::channels::mark_scanned(&self.pool, channel_id, at)
            .await
            .map_err(|err| StoreError::new("mark channel scanned", err))
    }
}
