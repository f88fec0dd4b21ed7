use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::{
    error::{ApiError, AppError},
    middleware::request_id,
};

/// JSON body extractor that rejects with the API's error shape.
///
/// The content type is not checked and an empty body reads as `{}`, so a bare
/// `POST` reaches the handler's own validation instead of failing early.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = request_id::current(&req);

        let bytes = Bytes::from_request(req, state).await.map_err(|err| {
            AppError::BadRequest(format!("unreadable body: {}", err.body_text()))
                .with_request_id(&request_id)
        })?;

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(body).map(JsonBody).map_err(|err| {
            AppError::BadRequest(format!("invalid JSON body: {err}")).with_request_id(&request_id)
        })
    }
}
