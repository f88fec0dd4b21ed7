use std::net::SocketAddr;
use std::sync::Arc;

use scout_core::{config::Settings, source::HttpFeedSource, ChannelScanner};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;

mod error;
mod extract;
mod middleware;
mod routes;
mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let settings = Settings::from_env()?;
    let admin_secret = settings.require_admin_secret()?.to_string();

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&settings.database_url)
        .await?;

    db::migrate(&db).await?;

    let source = HttpFeedSource::new(settings.fetch_timeout)?;
    let store = db::PgStore::new(db.clone());
    let scanner = ChannelScanner::new(
        Arc::new(source),
        Arc::new(store),
        settings.scanner.clone(),
    );

    let state = AppState {
        db,
        scanner: Arc::new(scanner),
        admin_secret: Arc::from(admin_secret),
        scout_env: settings.scout_env.clone(),
    };

    let app = routes::app(state);

    let addr: SocketAddr = settings.api_bind.parse()?;

    info!(%addr, env = %settings.scout_env, "starting api");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
