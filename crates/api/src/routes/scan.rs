use axum::{
    extract::{Query, State},
    routing::post,
    Extension, Json, Router,
};
use scout_core::{trigger::TriggerError, types::ScanOutcome};
use serde::Deserialize;

use crate::{
    error::{ApiResult, AppError},
    extract::JsonBody,
    state::{AppState, RequestId},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/scan", post(trigger_post).get(trigger_get))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriggerRequest {
    channel_id: Option<String>,
    name: Option<String>,
}

async fn trigger_post(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(payload): JsonBody<TriggerRequest>,
) -> ApiResult<Json<ScanOutcome>> {
    run_trigger(&state, &request_id, payload).await
}

async fn trigger_get(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<TriggerRequest>,
) -> ApiResult<Json<ScanOutcome>> {
    run_trigger(&state, &request_id, query).await
}

async fn run_trigger(
    state: &AppState,
    request_id: &RequestId,
    payload: TriggerRequest,
) -> ApiResult<Json<ScanOutcome>> {
    let outcome = scout_core::trigger_scan(
        &state.scanner,
        payload.channel_id.as_deref(),
        payload.name.as_deref(),
    )
    .await
    .map_err(|err| match err {
        TriggerError::MissingChannelId => AppError::MissingChannelId.with_request_id(&request_id.0),
    })?;

    tracing::info!(
        request_id = %request_id.0,
        success = outcome.success,
        count = outcome.count,
        "manual scan finished"
    );

    Ok(Json(outcome))
}
