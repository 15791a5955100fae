use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

pub mod loggable;
pub use loggable::{Loggable, Severity};

use crate::authz::{AuthorizationDecision, Role, RoleChangeDecision};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent<T> {
    pub id: Uuid,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
    pub subject: String,
    pub severity: Severity,
    pub payload: T,
}

impl<T> DomainEvent<T> {
    pub fn new(name: &str, subject: String, severity: Severity, payload: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            occurred_at: Utc::now(),
            subject,
            severity,
            payload,
        }
    }
}

pub type EventBus = broadcast::Sender<Value>;

pub fn init_event_bus() -> (EventBus, broadcast::Receiver<Value>) {
    broadcast::channel(1024)
}

/// Request context attached to events raised from HTTP handlers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Extract context from Axum request headers
    pub fn from_headers(headers: &axum::http::HeaderMap) -> Self {
        let ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.split(',').next().unwrap_or(s).trim().to_string())
            .or_else(|| {
                headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
            });

        let user_agent = headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Self { ip, user_agent }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPayload {
    pub details: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<RequestContext>,
}

/// A raw role string matched nothing and was downgraded.
#[derive(Debug, Clone, Serialize)]
pub struct FallbackNormalization {
    pub original: String,
    pub role: Role,
}

impl Loggable for FallbackNormalization {
    fn event_name(&self) -> &'static str {
        "identity.fallback_used"
    }

    fn subject(&self) -> String {
        self.original.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }
}

/// The live registry snapshot was replaced.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryReloaded {
    pub source: String,
    pub roles: usize,
}

impl Loggable for RegistryReloaded {
    fn event_name(&self) -> &'static str {
        "registry.reloaded"
    }

    fn subject(&self) -> String {
        self.source.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }
}

impl Loggable for AuthorizationDecision {
    fn event_name(&self) -> &'static str {
        if self.allowed {
            "authorization.allowed"
        } else {
            "authorization.denied"
        }
    }

    fn subject(&self) -> String {
        self.access.role.to_string()
    }

    fn severity(&self) -> Severity {
        if self.allowed {
            Severity::Noise
        } else {
            Severity::Important
        }
    }
}

impl Loggable for RoleChangeDecision {
    fn event_name(&self) -> &'static str {
        if self.valid {
            "role_change.validated"
        } else {
            "role_change.rejected"
        }
    }

    fn subject(&self) -> String {
        self.target_role.to_string()
    }

    fn severity(&self) -> Severity {
        if self.valid {
            Severity::Important
        } else {
            Severity::Critical
        }
    }
}

/// Publish an event for any `Loggable`. Fire and forget: nothing is
/// serialized when the bus has no subscribers.
pub fn publish<T: Loggable>(event_bus: &EventBus, entity: &T, context: Option<RequestContext>) {
    if event_bus.receiver_count() == 0 {
        return;
    }

    let payload = EventPayload {
        details: serde_json::to_value(entity).unwrap_or_default(),
        context,
    };
    let event = DomainEvent::new(entity.event_name(), entity.subject(), entity.severity(), payload);

    let _ = event_bus.send(serde_json::to_value(event).unwrap_or_default());
}

/// Render bus events into the tracing log until every sender is gone.
pub async fn start_event_listener(mut rx: broadcast::Receiver<Value>) {
    tracing::info!("Policy event listener started");
    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "policy event listener lagged");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        let name = event.get("name").and_then(|v| v.as_str()).unwrap_or("unknown");
        let subject = event.get("subject").and_then(|v| v.as_str()).unwrap_or("");
        let severity = event.get("severity").and_then(|v| v.as_str()).unwrap_or("important");

        match severity {
            "critical" => tracing::warn!(event = %name, subject = %subject, payload = %event["payload"], "policy event"),
            "noise" => tracing::debug!(event = %name, subject = %subject, "policy event"),
            _ => tracing::info!(event = %name, subject = %subject, payload = %event["payload"], "policy event"),
        }
    }
    tracing::info!("Policy event listener stopped");
}
