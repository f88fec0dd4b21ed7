use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Processing,
    Done,
    Failed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Processing => "processing",
            ItemStatus::Done => "done",
            ItemStatus::Failed => "failed",
        }
    }
}

/// The channel view a scan runs against: external id plus display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTarget {
    pub channel_id: String,
    pub name: String,
}

impl ChannelTarget {
    pub fn new(channel_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            name: name.into(),
        }
    }
}

/// One entry of a parsed feed, in feed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: String,
    pub title: String,
    pub published: Option<DateTime<Utc>>,
}

/// A row ready for the conflict-ignoring upsert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewItem {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub channel_id: String,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleItem {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub success: bool,
    pub message: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<SampleItem>,
}

impl ScanOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            count: 0,
            sample: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_status_serialization() {
        let json = serde_json::to_string(&ItemStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        assert_eq!(ItemStatus::Pending.as_str(), "pending");
        assert_eq!(ItemStatus::Processing.as_str(), "processing");
    }

    #[test]
    fn test_scan_outcome_serialization() {
        let outcome = ScanOutcome {
            success: true,
            message: "ok".to_string(),
            count: 1,
            sample: Some(SampleItem {
                id: "abc123".to_string(),
                title: "Hello".to_string(),
            }),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 1);
        assert_eq!(json["sample"]["id"], "abc123");
    }

    #[test]
    fn test_failure_outcome_omits_sample() {
        let json = serde_json::to_string(&ScanOutcome::failure("HTTP 500")).unwrap();
        assert!(!json.contains("sample"));
        assert!(json.contains("\"success\":false"));
    }
}
