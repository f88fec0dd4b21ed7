use thiserror::Error;

use crate::scanner::ChannelScanner;
use crate::types::{ChannelTarget, ScanOutcome};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TriggerError {
    #[error("channel id is required")]
    MissingChannelId,
}

/// Runs one scan outside the schedule against an ad-hoc, unpersisted channel.
pub async fn trigger_scan(
    scanner: &ChannelScanner,
    channel_id: Option<&str>,
    name: Option<&str>,
) -> Result<ScanOutcome, TriggerError> {
    let channel_id = channel_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(TriggerError::MissingChannelId)?;

    let name = name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(channel_id);

    let target = ChannelTarget::new(channel_id, name);
    Ok(scanner.scan_channel(&target).await)
}
