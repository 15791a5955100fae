//! Request-time authorization.
//!
//! A [`Requirement`] is plain data attached to a protected operation. The guard
//! resolves the caller's role once and checks the requirement in a fixed order:
//!
//! 1. required permissions (all of)
//! 2. any-of permissions
//! 3. portal
//! 4. role allow-list (raw or normalized)
//!
//! The first failing check decides the denial reason.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::permission::Permission;
use super::principal::{Identity, ResolvedAccess};
use super::registry::RoleRegistry;
use super::role::Portal;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Requirement {
    /// Every listed permission must be held.
    pub required: Vec<Permission>,
    /// At least one listed permission must be held.
    pub any_of: Vec<Permission>,
    /// The caller's portal must be one of these.
    #[serde(alias = "requiredPortals")]
    pub required_portal: Vec<Portal>,
    /// Raw or canonical role strings allowed through.
    pub allowed_roles: Vec<String>,
}

impl Requirement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.required.extend(permissions);
        self
    }

    pub fn any_of(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.any_of.extend(permissions);
        self
    }

    pub fn in_portals(mut self, portals: impl IntoIterator<Item = Portal>) -> Self {
        self.required_portal.extend(portals);
        self
    }

    pub fn allow_roles<S: Into<String>>(mut self, roles: impl IntoIterator<Item = S>) -> Self {
        self.allowed_roles.extend(roles.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DenyReason {
    MissingPermissions,
    MissingAnyOf,
    PortalMismatch,
    RoleMismatch,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::MissingPermissions => "missing-permissions",
            DenyReason::MissingAnyOf => "missing-any-of",
            DenyReason::PortalMismatch => "portal-mismatch",
            DenyReason::RoleMismatch => "role-mismatch",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,
    /// Required permissions the caller lacks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<Permission>,
    /// Any-of set none of which the caller holds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Permission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_portal: Option<Portal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_portal: Vec<Portal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_roles: Vec<String>,
    pub access: ResolvedAccess,
}

impl AuthorizationDecision {
    fn allow(access: ResolvedAccess) -> Self {
        Self {
            allowed: true,
            reason: None,
            missing: Vec::new(),
            any_of: Vec::new(),
            actual_portal: None,
            required_portal: Vec::new(),
            allowed_roles: Vec::new(),
            access,
        }
    }

    fn deny(access: ResolvedAccess, reason: DenyReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            ..Self::allow(access)
        }
    }

    pub fn fallback_used(&self) -> bool {
        self.access.fallback_used()
    }

    /// One-line description suitable for logs and error bodies.
    pub fn message(&self) -> String {
        let Some(reason) = self.reason else {
            return format!("allowed as {}", self.access.role);
        };

        match reason {
            DenyReason::MissingPermissions => format!("{} lacks {}", self.access.role, join(&self.missing)),
            DenyReason::MissingAnyOf => format!("{} holds none of {}", self.access.role, join(&self.any_of)),
            DenyReason::PortalMismatch => format!(
                "{} belongs to portal {}, required {}",
                self.access.role,
                self.access.portal,
                join(&self.required_portal)
            ),
            DenyReason::RoleMismatch => format!(
                "{} is not one of {}",
                self.access.role,
                self.allowed_roles.join(", ")
            ),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Render a single allow/deny decision for `identity` against `requirement`.
pub fn evaluate(registry: &RoleRegistry, identity: &Identity, requirement: &Requirement) -> AuthorizationDecision {
    let access = identity.resolve(registry);
    let role = access.role;

    if !requirement.required.is_empty() && !registry.has_all(role, &requirement.required) {
        let missing = registry.missing(role, &requirement.required);
        return AuthorizationDecision {
            missing,
            ..AuthorizationDecision::deny(access, DenyReason::MissingPermissions)
        };
    }

    if !requirement.any_of.is_empty() && !registry.has_any(role, &requirement.any_of) {
        return AuthorizationDecision {
            any_of: requirement.any_of.clone(),
            ..AuthorizationDecision::deny(access, DenyReason::MissingAnyOf)
        };
    }

    if !requirement.required_portal.is_empty() && !requirement.required_portal.contains(&access.portal) {
        return AuthorizationDecision {
            actual_portal: Some(access.portal),
            required_portal: requirement.required_portal.clone(),
            ..AuthorizationDecision::deny(access, DenyReason::PortalMismatch)
        };
    }

    if !requirement.allowed_roles.is_empty() {
        let raw = identity.raw_role.trim();
        let listed = requirement
            .allowed_roles
            .iter()
            .map(|allowed| allowed.trim())
            .any(|allowed| allowed.eq_ignore_ascii_case(raw) || allowed.eq_ignore_ascii_case(role.as_str()));
        if !listed {
            return AuthorizationDecision {
                allowed_roles: requirement.allowed_roles.clone(),
                ..AuthorizationDecision::deny(access, DenyReason::RoleMismatch)
            };
        }
    }

    AuthorizationDecision::allow(access)
}
