use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiResult, AppError},
    extract::JsonBody,
    state::{AppState, RequestId},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/channels", get(list_channels).post(create_channel))
        .route("/v1/channels/{id}", patch(update_channel))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateChannelRequest {
    #[serde(default)]
    channel_id: String,
    #[serde(default)]
    name: String,
    is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateChannelRequest {
    is_active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChannelResponse {
    id: String,
    channel_id: String,
    name: String,
    is_active: bool,
    last_scanned_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<db::models::Channel> for ChannelResponse {
    fn from(channel: db::models::Channel) -> Self {
        Self {
            id: channel.id,
            channel_id: channel.channel_id,
            name: channel.name,
            is_active: channel.is_active,
            last_scanned_at: channel.last_scanned_at,
            created_at: channel.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChannelListResponse {
    items: Vec<ChannelResponse>,
}

async fn list_channels(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> ApiResult<Json<ChannelListResponse>> {
    let channels = db::queries::channels::list(&state.db)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to list channels");
            AppError::Internal.with_request_id(&request_id.0)
        })?;

    Ok(Json(ChannelListResponse {
        items: channels.into_iter().map(ChannelResponse::from).collect(),
    }))
}

async fn create_channel(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(payload): JsonBody<CreateChannelRequest>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = payload.channel_id.trim();
    let name = payload.name.trim();

    if channel_id.is_empty() || name.is_empty() {
        return Err(
            AppError::BadRequest("channelId and name required".to_string())
                .with_request_id(&request_id.0),
        );
    }

    let id = format!("ch_{}", nanoid::nanoid!(12));

    let channel = db::queries::channels::create(
        &state.db,
        &id,
        channel_id,
        name,
        payload.is_active.unwrap_or(true),
    )
    .await
    .map_err(|err| {
        let duplicate = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());
        if duplicate {
            AppError::Conflict("channel already subscribed".to_string())
                .with_request_id(&request_id.0)
        } else {
            tracing::error!(error = %err, "failed to create channel");
            AppError::Internal.with_request_id(&request_id.0)
        }
    })?;

    tracing::info!(id = %channel.id, channel_id = %channel.channel_id, "channel subscribed");

    Ok(Json(channel.into()))
}

async fn update_channel(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateChannelRequest>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel = db::queries::channels::set_active(&state.db, &id, payload.is_active)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to update channel");
            AppError::Internal.with_request_id(&request_id.0)
        })?
        .ok_or_else(|| {
            AppError::NotFound("channel not found".to_string()).with_request_id(&request_id.0)
        })?;

    tracing::info!(id = %channel.id, is_active = channel.is_active, "channel toggled");

    Ok(Json(channel.into()))
}

#[cfg(test)]
mod tests {
    use crate::routes::testing::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_requires_channel_id_and_name() {
        let app = test_app();

        for body in [
            json!({ "name": "Only name" }),
            json!({ "channelId": "UC1", "name": "  " }),
            json!({}),
        ] {
            let (status, json) =
                send(&app.app, authed("POST", "/v1/channels", Some(body))).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"]["code"], "invalid_request");
        }
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_structured_errors() {
        let app = test_app();

        for req in [
            authed_raw("POST", "/v1/channels", "not json"),
            authed("POST", "/v1/channels", None),
            authed_raw("PATCH", "/v1/channels/ch_1", r#"{"isActive": "yes"}"#),
            authed("PATCH", "/v1/channels/ch_1", None),
        ] {
            let (status, json) = send(&app.app, req).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"]["code"], "invalid_request");
            assert!(json["error"]["request_id"].as_str().unwrap().starts_with("req_"));
        }
    }
}
