use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::app::AppState;
use crate::authz::{Permission, Role, RoleChangeDecision, RoleChangeRequest};
use crate::errors::{AppError, AppResult};
use crate::events::RequestContext;
use crate::extract::{AppJson, AppQuery};
use crate::models::role::{NormalizeRequest, NormalizeResponse, RoleFilter, RoleSummary};

fn parse_role(raw: &str) -> AppResult<Role> {
    raw.parse::<Role>().map_err(AppError::from)
}

#[utoipa::path(
    get,
    path = "/roles",
    tag = "Roles",
    params(RoleFilter),
    responses(
        (status = 200, description = "Registry rows", body = [RoleSummary]),
        (status = 400, description = "Unknown portal or category filter"),
    )
)]
pub async fn list_roles(State(state): State<AppState>, AppQuery(filter): AppQuery<RoleFilter>) -> Json<Vec<RoleSummary>> {
    let registry = state.engine.snapshot();
    let roles = Role::ALL
        .iter()
        .copied()
        .filter(|role| filter.matches(&registry, *role))
        .map(|role| RoleSummary::new(&registry, role))
        .collect();

    Json(roles)
}

#[utoipa::path(
    get,
    path = "/roles/{role}",
    tag = "Roles",
    params(("role" = String, Path, description = "Role identifier")),
    responses(
        (status = 200, description = "Registry row", body = RoleSummary),
        (status = 404, description = "Unknown role"),
    )
)]
pub async fn get_role(State(state): State<AppState>, Path(role): Path<String>) -> AppResult<Json<RoleSummary>> {
    let role = parse_role(&role)?;
    Ok(Json(RoleSummary::new(&state.engine.snapshot(), role)))
}

#[utoipa::path(
    get,
    path = "/roles/{role}/permissions",
    tag = "Roles",
    params(("role" = String, Path, description = "Role identifier")),
    responses(
        (status = 200, description = "Permissions held by the role", body = [Permission]),
        (status = 404, description = "Unknown role"),
    )
)]
pub async fn get_role_permissions(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> AppResult<Json<Vec<Permission>>> {
    let registry = state.engine.snapshot();
    let config = registry.lookup(&role)?;
    Ok(Json(config.permissions.to_vec()))
}

#[utoipa::path(
    get,
    path = "/roles/{role}/escalation-targets",
    tag = "Roles",
    params(("role" = String, Path, description = "Role identifier")),
    responses(
        (status = 200, description = "Roles receiving escalated work, in order", body = [Role]),
        (status = 404, description = "Unknown role"),
    )
)]
pub async fn get_escalation_targets(State(state): State<AppState>, Path(role): Path<String>) -> AppResult<Json<Vec<Role>>> {
    let role = parse_role(&role)?;
    Ok(Json(state.engine.escalation_targets(role).to_vec()))
}

#[utoipa::path(
    post,
    path = "/roles/validate-change",
    tag = "Roles",
    request_body = RoleChangeRequest,
    responses((status = 200, description = "Role change decision", body = RoleChangeDecision))
)]
pub async fn validate_role_change(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(request): AppJson<RoleChangeRequest>,
) -> Json<RoleChangeDecision> {
    let decision = state
        .engine
        .validate_change(&request, Some(RequestContext::from_headers(&headers)));
    Json(decision)
}

#[utoipa::path(
    post,
    path = "/roles/normalize",
    tag = "Roles",
    request_body = NormalizeRequest,
    responses((status = 200, description = "Normalization outcome", body = NormalizeResponse))
)]
pub async fn normalize_role(State(state): State<AppState>, AppJson(request): AppJson<NormalizeRequest>) -> Json<NormalizeResponse> {
    let outcome = state.engine.normalize(&request.raw_role);
    Json(NormalizeResponse {
        role: outcome.role(),
        fallback_used: outcome.is_fallback(),
        raw_role: request.raw_role,
        outcome,
    })
}
