use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app::AppState;
use crate::errors::AppResult;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub roles: usize,
    pub authz_mode: String,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Health check", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let roles = state.engine.snapshot().iter().count();

    Ok(Json(HealthResponse {
        status: "ok",
        roles,
        authz_mode: format!("{:?}", state.config.authz_mode).to_lowercase(),
    }))
}
