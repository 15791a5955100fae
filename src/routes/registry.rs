use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::role::ReloadResponse;

/// Re-read the configured policy file and swap it in as a whole.
#[utoipa::path(
    post,
    path = "/registry/reload",
    tag = "Registry",
    responses(
        (status = 200, description = "Registry replaced", body = ReloadResponse),
        (status = 400, description = "No policy file configured"),
        (status = 403, description = "Caller lacks OVERRIDE_SYSTEM in the ADMIN portal"),
        (status = 422, description = "Policy file rejected, live registry unchanged"),
    ),
    security(("roleHeader" = []))
)]
pub async fn reload_registry(State(state): State<AppState>) -> AppResult<Json<ReloadResponse>> {
    let path = state
        .config
        .policy_file
        .as_ref()
        .ok_or_else(|| AppError::bad_request("POLICY_FILE is not configured"))?;

    state.engine.reload_from_path(path)?;

    Ok(Json(ReloadResponse {
        source: path.display().to_string(),
        roles: state.engine.snapshot().iter().count(),
    }))
}
