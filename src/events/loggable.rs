use serde::{Deserialize, Serialize};

/// Severity levels for policy events.
/// Controls the log level the listener renders an event at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Security-relevant: fallback identities, registry swaps
    Critical,
    /// Denials and rejected role changes
    #[default]
    Important,
    /// Routine allows
    Noise,
}

/// Anything the policy engine publishes on the event bus.
pub trait Loggable: Serialize + Send + Sync {
    /// Event name, e.g. "authorization.denied"
    fn event_name(&self) -> &'static str;

    /// Role identifier the event is about
    fn subject(&self) -> String;

    fn severity(&self) -> Severity {
        Severity::Important
    }
}
