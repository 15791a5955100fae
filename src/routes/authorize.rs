use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::app::AppState;
use crate::authz::{AuthorizationDecision, Identity, ResolvedAccess};
use crate::events::RequestContext;
use crate::extract::AppJson;
use crate::models::role::AuthorizeRequest;

#[utoipa::path(
    post,
    path = "/authorize",
    tag = "Authorization",
    request_body = AuthorizeRequest,
    responses(
        (status = 200, description = "Allow or typed deny", body = AuthorizationDecision),
        (status = 422, description = "Body is missing rawRole or names an unknown permission"),
    )
)]
pub async fn authorize(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(request): AppJson<AuthorizeRequest>,
) -> Json<AuthorizationDecision> {
    let identity = Identity::new(request.raw_role);
    let decision = state.engine.evaluate(
        &identity,
        &request.requirement,
        Some(RequestContext::from_headers(&headers)),
    );
    Json(decision)
}

#[utoipa::path(
    get,
    path = "/me/access",
    tag = "Authorization",
    responses(
        (status = 200, description = "Caller's resolved role, portal and permissions", body = ResolvedAccess),
        (status = 401, description = "Identity header missing"),
    ),
    security(("roleHeader" = []))
)]
pub async fn my_access(State(state): State<AppState>, identity: Identity) -> Json<ResolvedAccess> {
    let outcome = state.engine.normalize(&identity.raw_role);
    let access = ResolvedAccess::from_normalized(&state.engine.snapshot(), outcome);
    Json(access)
}
