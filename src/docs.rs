use std::sync::Arc;

use axum::http::HeaderName;
use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::openapi::server::Server;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::authz;
use crate::models;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
	paths(
		routes::health::health,
		routes::roles::list_roles,
		routes::roles::get_role,
		routes::roles::get_role_permissions,
		routes::roles::get_escalation_targets,
		routes::roles::validate_role_change,
		routes::roles::normalize_role,
		routes::authorize::authorize,
		routes::authorize::my_access,
		routes::registry::reload_registry
	),
	components(
		schemas(
			routes::health::HealthResponse,
			models::role::RoleSummary,
			models::role::AuthorizeRequest,
			models::role::NormalizeRequest,
			models::role::NormalizeResponse,
			models::role::ReloadResponse,
			authz::Role,
			authz::Portal,
			authz::RoleCategory,
			authz::SupportTier,
			authz::Permission,
			authz::Identity,
			authz::Normalized,
			authz::Requirement,
			authz::DenyReason,
			authz::ResolvedAccess,
			authz::AuthorizationDecision,
			authz::RoleChangeRequest,
			authz::RoleChangeRejection,
			authz::RoleChangeDecision
		)
	),
	tags(
		(name = "Health", description = "Liveness"),
		(name = "Roles", description = "Role registry, normalization and role-change validation"),
		(name = "Authorization", description = "Request-time authorization decisions"),
		(name = "Registry", description = "Live registry management")
	)
)]
pub struct ApiDoc;

/// OpenAPI document for a server on `port` reading identities from `identity_header`.
pub fn build_openapi(port: u16, identity_header: &HeaderName) -> anyhow::Result<utoipa::openapi::OpenApi> {
	let mut doc = ApiDoc::openapi();
	doc.servers = Some(vec![Server::new(format!("http://localhost:{port}"))]);
	doc.components
		.get_or_insert_with(Default::default)
		.add_security_scheme(
			"roleHeader",
			SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(identity_header.as_str()))),
		);
	Ok(doc)
}

pub fn swagger_routes(doc: utoipa::openapi::OpenApi) -> anyhow::Result<Router> {
	let swagger_config = utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"])
		.try_it_out_enabled(true)
		.persist_authorization(true);

	let doc_json = Arc::new(serde_json::to_value(&doc)?);

	let json_route = {
		let doc_json = Arc::clone(&doc_json);
		get(move || {
			let doc_json = Arc::clone(&doc_json);
			async move { Json((*doc_json).clone()) }
		})
	};

	Ok(Router::new()
		.route("/api-docs/openapi.json", json_route)
		.merge(SwaggerUi::new("/docs").config(swagger_config)))
}
