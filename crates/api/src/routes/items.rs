use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiResult, AppError},
    state::{AppState, RequestId},
};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/items", get(list_items))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemsQuery {
    channel_id: Option<String>,
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemListResponse {
    items: Vec<ItemResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemResponse {
    video_id: String,
    title: String,
    url: String,
    status: String,
    created_at: DateTime<Utc>,
}

async fn list_items(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<ItemsQuery>,
) -> ApiResult<Json<ItemListResponse>> {
    let channel_id = query
        .channel_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::MissingChannelId.with_request_id(&request_id.0))?;

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let videos = db::queries::videos::list_by_channel(&state.db, channel_id, limit)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to list items");
            AppError::Internal.with_request_id(&request_id.0)
        })?;

    Ok(Json(ItemListResponse {
        items: videos
            .into_iter()
            .map(|video| ItemResponse {
                video_id: video.video_id,
                title: video.title,
                url: video.url,
                status: video.status,
                created_at: video.created_at,
            })
            .collect(),
    }))
}
