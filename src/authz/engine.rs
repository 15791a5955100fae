use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use super::error::PolicyResult;
use super::escalation::escalation_targets;
use super::guard::{evaluate, AuthorizationDecision, Requirement};
use super::normalizer::{normalize, Normalized};
use super::principal::Identity;
use super::registry::RoleRegistry;
use super::role::Role;
use super::role_change::{validate_change, RoleChangeDecision, RoleChangeRequest};
use crate::events::{publish, EventBus, FallbackNormalization, RegistryReloaded, RequestContext};

/// Live policy engine: the current registry snapshot plus decision logging.
///
/// Readers take a snapshot per call; [`PolicyEngine::reload`] swaps in a fully
/// built replacement so no reader ever sees a partial table.
pub struct PolicyEngine {
    registry: ArcSwap<RoleRegistry>,
    events: EventBus,
}

impl PolicyEngine {
    pub fn new(registry: RoleRegistry, events: EventBus) -> Self {
        Self {
            registry: ArcSwap::from_pointee(registry),
            events,
        }
    }

    pub fn snapshot(&self) -> Arc<RoleRegistry> {
        self.registry.load_full()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn reload(&self, registry: RoleRegistry, source: &str) {
        let roles = registry.iter().count();
        self.registry.store(Arc::new(registry));
        tracing::warn!(source = %source, roles, "role registry replaced");
        publish(
            &self.events,
            &RegistryReloaded {
                source: source.to_string(),
                roles,
            },
            None,
        );
    }

    /// Load and validate a policy file, then swap it in. The live registry is
    /// untouched when loading fails.
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> PolicyResult<()> {
        let path = path.as_ref();
        let registry = RoleRegistry::from_policy_file(path)?;
        self.reload(registry, &path.display().to_string());
        Ok(())
    }

    pub fn normalize(&self, raw: &str) -> Normalized {
        let outcome = normalize(raw);
        if let Normalized::Fallback { role, original } = &outcome {
            tracing::warn!(raw = %original, fallback = %role, "unrecognized role string, using fallback");
            publish(
                &self.events,
                &FallbackNormalization {
                    original: original.clone(),
                    role: *role,
                },
                None,
            );
        }
        outcome
    }

    pub fn evaluate(
        &self,
        identity: &Identity,
        requirement: &Requirement,
        context: Option<RequestContext>,
    ) -> AuthorizationDecision {
        let registry = self.registry.load();
        let decision = evaluate(&registry, identity, requirement);

        if decision.fallback_used() {
            self.normalize(&identity.raw_role);
        }

        // Allows stay off the bus; only denials carry an event.
        if decision.allowed {
            tracing::debug!(role = %decision.access.role, "authorization allowed");
        } else {
            tracing::info!(
                raw_role = %identity.raw_role,
                role = %decision.access.role,
                reason = ?decision.reason,
                "authorization denied: {}",
                decision.message()
            );
            publish(&self.events, &decision, context);
        }

        decision
    }

    pub fn validate_change(&self, request: &RoleChangeRequest, context: Option<RequestContext>) -> RoleChangeDecision {
        let registry = self.registry.load();
        let decision = validate_change(&registry, request);

        if decision.target_fallback {
            tracing::warn!(target_role = %request.target_role, "role change target is not a known role");
        }

        if decision.valid {
            tracing::info!(
                current = %decision.current_role,
                target_role = %decision.target_role,
                assigner = %decision.assigner_role,
                "role change allowed"
            );
        } else {
            tracing::info!(
                current = %decision.current_role,
                target_role = %decision.target_role,
                assigner = %decision.assigner_role,
                reason = decision.reason.as_deref().unwrap_or_default(),
                "role change rejected"
            );
        }

        publish(&self.events, &decision, context);
        decision
    }

    pub fn escalation_targets(&self, role: Role) -> &'static [Role] {
        escalation_targets(role)
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        let (events, _) = crate::events::init_event_bus();
        Self::new(RoleRegistry::builtin(), events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::permission::{Permission, PermissionSet};
    use crate::authz::policy::PolicyDocument;
    use crate::events::init_event_bus;

    #[test]
    fn reload_swaps_whole_snapshot() {
        let engine = PolicyEngine::default();
        let before = engine.snapshot();

        let mut doc = PolicyDocument::export(&before);
        doc.roles.get_mut("brand_viewer").unwrap().permissions = PermissionSet::EMPTY;
        engine.reload(doc.into_registry().unwrap(), "test");

        let after = engine.snapshot();
        assert!(before.has_permission(Role::BrandViewer, Permission::ReadCampaign));
        assert!(!after.has_permission(Role::BrandViewer, Permission::ReadCampaign));
    }

    #[test]
    fn failed_reload_keeps_current_registry() {
        let engine = PolicyEngine::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        std::fs::write(&path, r#"{"roles": {}}"#).unwrap();

        assert!(engine.reload_from_path(&path).is_err());
        assert_eq!(*engine.snapshot(), RoleRegistry::builtin());
    }

    #[test]
    fn fallback_identity_is_published() {
        let (bus, mut rx) = init_event_bus();
        let engine = PolicyEngine::new(RoleRegistry::builtin(), bus);

        let decision = engine.evaluate(&Identity::new("ghost"), &Requirement::new(), None);
        assert!(decision.allowed);

        let first = rx.try_recv().unwrap();
        assert_eq!(first["name"], "identity.fallback_used");
        assert!(rx.try_recv().is_err(), "allowed decisions are not published");
    }

    #[test]
    fn only_denials_reach_the_bus() {
        let (bus, mut rx) = init_event_bus();
        let engine = PolicyEngine::new(RoleRegistry::builtin(), bus);
        let requirement = Requirement::new().require([Permission::ApproveCampaign]);

        let allowed = engine.evaluate(&Identity::new("validator_approver"), &requirement, None);
        assert!(allowed.allowed);
        assert!(rx.try_recv().is_err());

        let denied = engine.evaluate(&Identity::new("campaign_manager"), &requirement, None);
        assert!(!denied.allowed);
        let event = rx.try_recv().unwrap();
        assert_eq!(event["name"], "authorization.denied");
        assert_eq!(event["subject"], "campaign_manager");
    }

    #[test]
    fn rejected_change_is_published() {
        let (bus, mut rx) = init_event_bus();
        let engine = PolicyEngine::new(RoleRegistry::builtin(), bus);

        let decision = engine.validate_change(&RoleChangeRequest::new("brand_viewer", "super_admin", "admin_brand"), None);
        assert!(!decision.valid);

        let event = rx.try_recv().unwrap();
        assert_eq!(event["name"], "role_change.rejected");
        assert_eq!(event["severity"], "critical");
    }
}
