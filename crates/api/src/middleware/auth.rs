use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::{
    error::{ApiError, AppError},
    middleware::request_id,
    state::AppState,
};

pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

pub async fn admin_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let request_id = request_id::current(&req);

    let provided = req
        .headers()
        .get(ADMIN_SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized.with_request_id(&request_id))?;

    if !secret_matches(&state.admin_secret, provided) {
        tracing::warn!(%request_id, "rejected admin request");
        return Err(AppError::Unauthorized.with_request_id(&request_id));
    }

    Ok(next.run(req).await)
}

fn secret_matches(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
