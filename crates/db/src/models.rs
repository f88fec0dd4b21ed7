use chrono::{DateTime, Utc};
use scout_core::types::ChannelTarget;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Channel {
    pub id: String,
    pub channel_id: String,
    pub name: String,
    pub is_active: bool,
    pub last_scanned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Channel> for ChannelTarget {
    fn from(channel: Channel) -> Self {
        ChannelTarget::new(channel.channel_id, channel.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub channel_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_into_target() {
        let channel = Channel {
            id: "ch_1".to_string(),
            channel_id: "UC1".to_string(),
            name: "One".to_string(),
            is_active: true,
            last_scanned_at: None,
            created_at: Utc::now(),
        };
        let target: ChannelTarget = channel.into();
        assert_eq!(target, ChannelTarget::new("UC1", "One"));
    }
}
