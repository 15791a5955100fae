use std::sync::Arc;

use axum::http::Method;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::authz::{Permission, PolicyEngine, Portal, Requirement};
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::events::{self, EventBus};
use crate::identity;
use crate::routes::{authorize, health, registry, roles};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PolicyEngine>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(engine: PolicyEngine, config: AppConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            config: Arc::new(config),
        }
    }
}

/// Requirement guarding live registry replacement.
pub fn reload_requirement() -> Requirement {
    Requirement::new()
        .require([Permission::OverrideSystem])
        .in_portals([Portal::Admin])
}

pub async fn create_app(config: AppConfig) -> Result<Router, AppError> {
    let (event_bus, rx) = events::init_event_bus();
    tokio::spawn(events::start_event_listener(rx));
    create_app_with_events(config, event_bus)
}

pub fn create_app_with_events(config: AppConfig, event_bus: EventBus) -> Result<Router, AppError> {
    let registry = config.load_registry()?;
    let state = AppState::new(PolicyEngine::new(registry, event_bus), config);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    let role_routes = Router::new()
        .route("/", get(roles::list_roles))
        .route("/validate-change", post(roles::validate_role_change))
        .route("/normalize", post(roles::normalize_role))
        .route("/:role", get(roles::get_role))
        .route("/:role/permissions", get(roles::get_role_permissions))
        .route("/:role/escalation-targets", get(roles::get_escalation_targets));

    let registry_routes = Router::new()
        .route("/reload", post(registry::reload_registry))
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), Arc::new(reload_requirement())),
            identity::enforce,
        ));

    let router = Router::new()
        .route("/api/health", get(health::health))
        .route("/authorize", post(authorize::authorize))
        .route("/me/access", get(authorize::my_access))
        .nest("/roles", role_routes)
        .nest("/registry", registry_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
