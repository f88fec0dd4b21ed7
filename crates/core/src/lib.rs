//! Scouting pipeline: feed fetching, normalization, deduplicating upserts and
//! the per-tick fan-out across subscribed channels.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod feed;
pub mod scanner;
pub mod source;
pub mod store;
pub mod trigger;
pub mod types;

pub use dispatcher::{Dispatcher, TickSummary};
pub use scanner::ChannelScanner;
pub use trigger::trigger_scan;
