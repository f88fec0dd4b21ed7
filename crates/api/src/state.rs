use std::sync::Arc;

use scout_core::ChannelScanner;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub scanner: Arc<ChannelScanner>,
    pub admin_secret: Arc<str>,
    pub scout_env: String,
}

#[derive(Debug, Clone)]
pub struct RequestId(pub String);
