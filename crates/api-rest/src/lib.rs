//! # API REST
//!
//! REST API implementation for the symptom triage engine.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON rejection mapping, CORS)
//!
//! Uses `api-shared` for wire types and validation. The engine is built once by the caller and
//! injected through [`router`]; handlers never load rules themselves.

#![warn(rust_2018_idioms)]

use api_shared::{AssessReq, AssessRes, ErrorRes, HealthRes, HealthService, LikelyConditionRes};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use triage_core::SymptomEngine;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers.
///
/// Holds the engine constructed at startup. Cloning shares the underlying rule set.
#[derive(Clone)]
struct AppState {
    engine: SymptomEngine,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, assess),
    components(schemas(HealthRes, AssessReq, AssessRes, LikelyConditionRes, ErrorRes))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Build the REST router around an already-loaded engine.
///
/// Routes:
/// - `GET /health`
/// - `POST /api/assess`
/// - Swagger UI at `/swagger-ui`, OpenAPI document at `/api-docs/openapi.json`
pub fn router(engine: SymptomEngine) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/assess", post(assess))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { engine })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/assess",
    request_body = AssessReq,
    responses(
        (status = 200, description = "Triage assessment", body = AssessRes),
        (status = 400, description = "Malformed JSON", body = ErrorRes),
        (status = 422, description = "Request failed validation", body = ErrorRes)
    )
)]
/// Assess a list of symptoms
///
/// Validates the request, runs the engine and returns the triage level, reasons,
/// ranked likely conditions and fixed advice.
///
/// # Errors
/// Returns `422 Unprocessable Entity` if the age is outside 0-120 or a field has the wrong
/// type, and the JSON extractor's status (400/415) for malformed bodies.
#[axum::debug_handler]
async fn assess(
    State(state): State<AppState>,
    payload: Result<Json<AssessReq>, JsonRejection>,
) -> Result<Json<AssessRes>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Rejected assessment request: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorRes {
                detail: rejection.body_text(),
            }),
        )
    })?;

    let input = req.validate().map_err(|e| {
        tracing::warn!("Invalid assessment request: {}", e);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorRes {
                detail: e.to_string(),
            }),
        )
    })?;

    let result = state.engine.assess(&input);
    Ok(Json(AssessRes::from(result)))
}
