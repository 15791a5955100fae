use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::{PolicyError, PolicyResult};
use super::normalizer::normalize;
use super::permission::Permission;
use super::registry::RoleRegistry;
use super::role::{Role, RoleCategory};

/// Administrative request to move a user from one role to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleChangeRequest {
    #[schema(example = "support_1_brand")]
    pub current_role: String,
    #[schema(example = "support_2_brand")]
    pub target_role: String,
    #[schema(example = "admin_brand")]
    pub assigner_role: String,
}

impl RoleChangeRequest {
    pub fn new(current: impl Into<String>, target: impl Into<String>, assigner: impl Into<String>) -> Self {
        Self {
            current_role: current.into(),
            target_role: target.into(),
            assigner_role: assigner.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoleChangeRejection {
    InsufficientPermissions,
    ManagementRestricted,
    SuperAdminRestricted,
}

impl RoleChangeRejection {
    pub fn reason(&self) -> &'static str {
        match self {
            RoleChangeRejection::InsufficientPermissions => "insufficient permissions to assign roles",
            RoleChangeRejection::ManagementRestricted => "cannot assign management roles",
            RoleChangeRejection::SuperAdminRestricted => "cannot assign super admin role",
        }
    }
}

impl fmt::Display for RoleChangeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleChangeDecision {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RoleChangeRejection>,
    pub current_role: Role,
    pub target_role: Role,
    pub assigner_role: Role,
    /// The target string matched no role and was resolved by fallback.
    pub target_fallback: bool,
    /// The assigner string matched no role and was resolved by fallback.
    pub assigner_fallback: bool,
}

impl RoleChangeDecision {
    pub fn into_result(self) -> PolicyResult<Self> {
        match &self.reason {
            Some(reason) if !self.valid => Err(PolicyError::invalid_role_change(reason.clone())),
            _ => Ok(self),
        }
    }
}

/// Decide whether `assigner` may move a user from `current` to `target`.
///
/// Rules, first match wins:
/// 1. a super admin assigner may assign anything
/// 2. the assigner must hold ASSIGN_ROLES
/// 3. support staff may not assign MANAGEMENT roles
/// 4. only a super admin may assign SUPER_ADMIN
///
/// `current` is normalized and reported but no rule depends on it.
pub fn validate_change(registry: &RoleRegistry, request: &RoleChangeRequest) -> RoleChangeDecision {
    let current = normalize(&request.current_role);
    let target = normalize(&request.target_role);
    let assigner = normalize(&request.assigner_role);

    let rejection = rejection_for(registry, target.role(), assigner.role());

    RoleChangeDecision {
        valid: rejection.is_none(),
        reason: rejection.map(|r| r.reason().to_string()),
        rejection,
        current_role: current.role(),
        target_role: target.role(),
        assigner_role: assigner.role(),
        target_fallback: target.is_fallback(),
        assigner_fallback: assigner.is_fallback(),
    }
}

fn rejection_for(registry: &RoleRegistry, target: Role, assigner: Role) -> Option<RoleChangeRejection> {
    if assigner == Role::SuperAdmin {
        return None;
    }

    if !registry.has_permission(assigner, Permission::AssignRoles) {
        return Some(RoleChangeRejection::InsufficientPermissions);
    }

    let assigner_category = registry.category_of(assigner);
    let target_category = registry.category_of(target);

    if assigner_category == RoleCategory::Support && target_category == RoleCategory::Management {
        return Some(RoleChangeRejection::ManagementRestricted);
    }

    if target_category == RoleCategory::SuperAdmin {
        return Some(RoleChangeRejection::SuperAdminRestricted);
    }

    None
}
