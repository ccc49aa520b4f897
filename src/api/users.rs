use crate::api::AppState;
use crate::api::middleware::Payload;
use crate::api::schemas::users::{NewUserRequest, NewUserResponse};
use crate::error::{AppError, Result};
use axum::{Json, extract::State, response::IntoResponse};

pub async fn create_user(
    State(state): State<AppState>,
    Payload(payload): Payload<NewUserRequest>,
) -> Result<impl IntoResponse> {
    let username = payload.validate().map_err(AppError::Validation)?;
    let user = state.user_service.create_user(&username).await?;

    Ok(Json(NewUserResponse { id: user.id, username: user.username }))
}
