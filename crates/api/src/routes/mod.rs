pub mod channels;
pub mod health;
pub mod items;
pub mod scan;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{auth::admin_auth, request_id::request_id};
use crate::state::AppState;

pub fn v1_router(state: AppState) -> Router {
    Router::new()
        .merge(channels::router(state.clone()))
        .merge(items::router(state.clone()))
        .merge(scan::router(state))
}

pub fn health_router(state: AppState) -> Router {
    health::router(state)
}

pub fn app(state: AppState) -> Router {
    let v1 = v1_router(state.clone()).layer(from_fn_with_state(state.clone(), admin_auth));

    Router::new()
        .merge(health_router(state))
        .merge(v1)
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
