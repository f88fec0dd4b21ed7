//! Feed URL building and body normalization.
//!
//! Feeds arrive either as Atom XML or as a JSON rendering of that XML where
//! `entry` is an object when the feed holds exactly one item and an array
//! otherwise. Both shapes are normalized here into one `Vec<FeedEntry>` so the
//! scanner never has to look at the wire format.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{CHANNEL_PLACEHOLDER, ITEM_PLACEHOLDER};
use crate::error::FeedParseError;
use crate::types::FeedEntry;

const YOUTUBE_ID_PREFIX: &str = "yt:video:";

/// Everything except the RFC 3986 unreserved characters, so a substituted
/// value is safe in a path segment and in a query value alike.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn feed_url(template: &str, channel_id: &str) -> String {
    template.replace(CHANNEL_PLACEHOLDER, &encode(channel_id))
}

pub fn item_url(template: &str, item_id: &str) -> String {
    template.replace(ITEM_PLACEHOLDER, &encode(item_id))
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

pub fn parse_entries(body: &[u8]) -> Result<Vec<FeedEntry>, FeedParseError> {
    let first = body.iter().find(|b| !b.is_ascii_whitespace());
    match first {
        None => Ok(Vec::new()),
        Some(b'{') => parse_json(body),
        Some(_) => parse_xml(body),
    }
}

fn parse_xml(body: &[u8]) -> Result<Vec<FeedEntry>, FeedParseError> {
    let feed = feed_rs::parser::parse(body)?;

    Ok(feed
        .entries
        .into_iter()
        .map(|entry| FeedEntry {
            id: strip_id_prefix(&entry.id).to_string(),
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            published: entry.published,
        })
        .collect())
}

fn parse_json(body: &[u8]) -> Result<Vec<FeedEntry>, FeedParseError> {
    let document: JsonDocument = serde_json::from_slice(body)?;

    let collection = document.feed.and_then(|feed| feed.entry).or(document.entry);

    Ok(collection
        .map(EntryCollection::into_vec)
        .unwrap_or_default()
        .into_iter()
        .filter_map(decode_entry)
        .collect())
}

/// Entries are decoded one at a time so a single malformed entry is dropped
/// instead of failing the whole feed.
fn decode_entry(value: Value) -> Option<FeedEntry> {
    match serde_json::from_value::<JsonEntry>(value) {
        Ok(entry) => Some(entry.into_feed_entry()),
        Err(err) => {
            debug!(error = %err, "skipping malformed feed entry");
            None
        }
    }
}

fn strip_id_prefix(id: &str) -> &str {
    id.strip_prefix(YOUTUBE_ID_PREFIX).unwrap_or(id)
}

#[derive(Debug, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    feed: Option<JsonFeed>,
    #[serde(default)]
    entry: Option<EntryCollection>,
}

#[derive(Debug, Deserialize)]
struct JsonFeed {
    #[serde(default)]
    entry: Option<EntryCollection>,
}

/// The `entry` field as it appears on the wire: one object or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntryCollection {
    Many(Vec<Value>),
    One(Value),
}

impl EntryCollection {
    fn into_vec(self) -> Vec<Value> {
        match self {
            EntryCollection::Many(entries) => entries,
            EntryCollection::One(entry) => vec![entry],
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonEntry {
    #[serde(rename = "yt:videoId", default)]
    yt_video_id: Option<String>,
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    published: Option<String>,
}

impl JsonEntry {
    fn into_feed_entry(self) -> FeedEntry {
        let id = self
            .yt_video_id
            .or(self.video_id)
            .or_else(|| self.id.map(|id| strip_id_prefix(&id).to_string()))
            .unwrap_or_default();

        let published = self
            .published
            .as_deref()
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|value| value.with_timezone(&Utc));

        FeedEntry {
            id: id.trim().to_string(),
            title: self.title.unwrap_or_default(),
            published,
        }
    }
}
