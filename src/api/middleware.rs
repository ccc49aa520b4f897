use crate::error::AppError;
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;

/// A request body sent either as JSON or as an url-encoded form.
///
/// A body that cannot be decoded is rejected with a fixed message. The decoder's
/// own text is only logged.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| invalid_body(&e.body_text()))?;
            Ok(Self(value))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| invalid_body(&e.body_text()))?;
            Ok(Self(value))
        } else {
            Err(AppError::validation("expected a JSON or form-encoded body"))
        }
    }
}

fn invalid_body(detail: &str) -> AppError {
    tracing::debug!(detail, "Rejected request body");
    AppError::validation("invalid request body")
}
