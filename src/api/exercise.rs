use crate::api::AppState;
use crate::api::middleware::Payload;
use crate::api::schemas::exercise::{AddExerciseRequest, ExerciseResponse, LogParams, LogResponse};
use crate::api::schemas::parse_user_id;
use crate::domain::date::today;
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};

pub async fn add_exercise(
    State(state): State<AppState>,
    Payload(payload): Payload<AddExerciseRequest>,
) -> Result<impl IntoResponse> {
    let (user_id, exercise) = payload.validate(today()).map_err(AppError::Validation)?;
    let user_id = parse_user_id(&user_id)?;

    let exercise = state.exercise_service.add_exercise(user_id, exercise).await?;

    Ok(Json(ExerciseResponse::new(user_id, exercise)?))
}

pub async fn get_log(
    State(state): State<AppState>,
    params: std::result::Result<Query<LogParams>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(params) = params.map_err(|e| {
        tracing::debug!(detail = %e.body_text(), "Rejected query string");
        AppError::validation("invalid query")
    })?;
    let (user_id, query) = params.into_query()?;
    let user_id = parse_user_id(&user_id)?;

    let log = state.exercise_service.fetch_log(user_id, query).await?;

    Ok(Json(LogResponse::try_from(log)?))
}
