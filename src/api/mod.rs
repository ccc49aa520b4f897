use crate::config::Config;
use crate::error::AppError;
use crate::services::exercise_service::ExerciseService;
use crate::services::health_service::HealthService;
use crate::services::user_service::UserService;
use crate::storage::DbPool;
use crate::storage::exercise_repo::ExerciseRepository;
use crate::storage::user_repo::UserRepository;
use axum::body::Body;
use axum::handler::HandlerWithoutStateExt;
use axum::http::Request;
use axum::{
    Router,
    routing::{get, get_service, post},
};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub mod exercise;
pub mod health;
pub mod middleware;
pub mod schemas;
pub mod users;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Debug)]
pub struct AppState {
    pub user_service: UserService,
    pub exercise_service: ExerciseService,
}

#[derive(Clone, Debug)]
pub struct MgmtState {
    pub health_service: HealthService,
}

/// Every service the routers need, built once from the pool at startup.
#[derive(Debug)]
pub struct ServiceContainer {
    pub user_service: UserService,
    pub exercise_service: ExerciseService,
    pub health_service: HealthService,
}

impl ServiceContainer {
    #[must_use]
    pub fn new(pool: DbPool, config: &Config) -> Self {
        let user_repo = UserRepository::new();
        let exercise_repo = ExerciseRepository::new();

        Self {
            user_service: UserService::new(pool.clone(), user_repo.clone()),
            exercise_service: ExerciseService::new(pool.clone(), user_repo, exercise_repo),
            health_service: HealthService::new(pool, config.health.clone()),
        }
    }
}

/// Unknown routes, unmatched methods and missing static files all end here.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Configures and returns the primary application router.
pub fn app_router(config: &Config, services: ServiceContainer) -> Router {
    let state = AppState { user_service: services.user_service, exercise_service: services.exercise_service };

    let index = ServeFile::new(Path::new(&config.assets.views_dir).join("index.html"));
    let assets = ServeDir::new(&config.assets.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .route("/", get_service(index).fallback(not_found))
        .route("/api/exercise/new-user", post(users::create_user).fallback(not_found))
        .route("/api/exercise/add", post(exercise::add_exercise).fallback(not_found))
        .route("/api/exercise/log", get(exercise::get_log).fallback(not_found))
        .fallback_service(assets)
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static(REQUEST_ID_HEADER)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "otel.kind" = "server",
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        let status = response.status();
                        tracing::Span::current().record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(axum::http::HeaderName::from_static(REQUEST_ID_HEADER), MakeRequestUuid))
        .with_state(state)
}

pub fn mgmt_router(state: MgmtState) -> Router {
    Router::new().route("/livez", get(health::livez)).route("/readyz", get(health::readyz)).with_state(state)
}
