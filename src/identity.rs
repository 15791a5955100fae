use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName};
use axum::middleware::Next;
use axum::response::Response;

use crate::app::AppState;
use crate::authz::{AuthzMode, Identity, Requirement};
use crate::errors::AppError;
use crate::events::RequestContext;

/// Raw role string from the identity header, if present and readable.
pub fn identity_from_headers(headers: &HeaderMap, header: &HeaderName) -> Option<Identity> {
    headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(Identity::new)
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = &state.config.identity_header;
        identity_from_headers(&parts.headers, header)
            .ok_or_else(|| AppError::unauthorized(format!("{header} header missing")))
    }
}

/// Route middleware applying a [`Requirement`] according to the configured [`AuthzMode`].
///
/// Attach with `middleware::from_fn_with_state((state, Arc::new(requirement)), enforce)`.
pub async fn enforce(
    State((state, requirement)): State<(AppState, Arc<Requirement>)>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let mode = state.config.authz_mode;
    if mode == AuthzMode::Off {
        return Ok(next.run(request).await);
    }

    let headers = request.headers();
    let Some(identity) = identity_from_headers(headers, &state.config.identity_header) else {
        if mode == AuthzMode::Strict {
            return Err(AppError::unauthorized(format!(
                "{} header missing",
                state.config.identity_header
            )));
        }
        tracing::warn!(path = %request.uri().path(), "advisory: request without identity");
        return Ok(next.run(request).await);
    };

    let decision = state
        .engine
        .evaluate(&identity, &requirement, Some(RequestContext::from_headers(headers)));

    if !decision.allowed {
        if mode == AuthzMode::Strict {
            return Err(AppError::forbidden(decision.message()));
        }
        tracing::warn!(
            path = %request.uri().path(),
            reason = ?decision.reason,
            "advisory: request would be denied"
        );
    }

    Ok(next.run(request).await)
}
