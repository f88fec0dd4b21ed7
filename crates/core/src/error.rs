use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("feed responded with HTTP {0}")]
    Status(u16),
    #[error("feed request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum FeedParseError {
    #[error("invalid json feed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid xml feed: {0}")]
    Xml(#[from] feed_rs::parser::ParseFeedError),
}

#[derive(Debug, Error)]
#[error("store rejected {operation}: {message}")]
pub struct StoreError {
    pub operation: &'static str,
    pub message: String,
}

impl StoreError {
    pub fn new(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self {
            operation,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("{name} must contain the {placeholder} placeholder")]
    MissingPlaceholder {
        name: &'static str,
        placeholder: &'static str,
    },
}

#[derive(Debug, Error)]
pub(crate) enum ScanError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
