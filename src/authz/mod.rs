//! Authorization module - role registry, policy engine and request guard
//!
//! This module implements the marketplace's role policy:
//! - A frozen registry mapping every role to portal, category and permissions
//! - Legacy role normalization with an explicit fallback outcome
//! - Permission checks, hierarchy levels and escalation routing
//! - Role-change validation for administrative assignments
//! - A request-time guard with configurable enforcement (off/advisory/strict)

mod builtin;
mod engine;
mod error;
mod escalation;
mod evaluator;
mod guard;
mod hierarchy;
mod normalizer;
mod permission;
mod policy;
mod principal;
mod registry;
mod role;
mod role_change;

pub use engine::PolicyEngine;
pub use error::{PolicyError, PolicyResult};
pub use escalation::escalation_targets;
pub use guard::{evaluate, AuthorizationDecision, DenyReason, Requirement};
pub use hierarchy::{
    LEVEL_END_USER, LEVEL_FINANCE, LEVEL_MANAGEMENT, LEVEL_OPERATIONS, LEVEL_SUPER_ADMIN, LEVEL_SUPPORT_TIER1,
    LEVEL_SUPPORT_TIER2, LEVEL_UNMAPPED,
};
pub use normalizer::{normalize, normalize_role, Normalized};
pub use permission::{Permission, PermissionSet};
pub use policy::PolicyDocument;
pub use principal::{Identity, ResolvedAccess};
pub use registry::{RoleConfig, RoleRegistry};
pub use role::{Portal, Role, RoleCategory, SupportTier};
pub use role_change::{validate_change, RoleChangeDecision, RoleChangeRejection, RoleChangeRequest};

use std::str::FromStr;

/// Authorization enforcement mode for guarded routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthzMode {
    /// No permission checks (development mode)
    #[default]
    Off,
    /// Log denials but allow requests (testing mode)
    Advisory,
    /// Enforce 403 on denied requests (production mode)
    Strict,
}

impl FromStr for AuthzMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "off" => Ok(AuthzMode::Off),
            "advisory" => Ok(AuthzMode::Advisory),
            "strict" => Ok(AuthzMode::Strict),
            other => Err(format!("unknown authorization mode '{other}'")),
        }
    }
}
