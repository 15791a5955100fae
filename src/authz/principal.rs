use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::normalizer::{normalize, Normalized};
use super::permission::PermissionSet;
use super::registry::RoleRegistry;
use super::role::{Portal, Role};

/// Already-authenticated caller as seen by the engine: just the raw role string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[schema(example = "campaign_manager")]
    pub raw_role: String,
}

impl Identity {
    pub fn new(raw_role: impl Into<String>) -> Self {
        Self {
            raw_role: raw_role.into(),
        }
    }

    pub fn resolve(&self, registry: &RoleRegistry) -> ResolvedAccess {
        ResolvedAccess::from_normalized(registry, normalize(&self.raw_role))
    }
}

/// Role, portal and permission set an identity resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAccess {
    pub role: Role,
    pub portal: Portal,
    #[schema(value_type = Vec<super::permission::Permission>)]
    pub permissions: PermissionSet,
    pub normalization: Normalized,
}

impl ResolvedAccess {
    pub fn from_normalized(registry: &RoleRegistry, normalization: Normalized) -> Self {
        let role = normalization.role();
        Self {
            role,
            portal: registry.portal_of(role),
            permissions: registry.permissions_of(role),
            normalization,
        }
    }

    pub fn fallback_used(&self) -> bool {
        self.normalization.is_fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::permission::Permission;

    #[test]
    fn resolves_legacy_identity() {
        let access = Identity::new("brand").resolve(RoleRegistry::global());
        assert_eq!(access.role, Role::CampaignManager);
        assert_eq!(access.portal, Portal::Brand);
        assert!(access.permissions.contains(Permission::CreateCampaign));
        assert!(!access.fallback_used());
    }

    #[test]
    fn unknown_identity_reports_fallback() {
        let access = Identity::new("hacker").resolve(RoleRegistry::global());
        assert_eq!(access.role, Role::StreamerIndividual);
        assert_eq!(access.portal, Portal::Publisher);
        assert!(access.fallback_used());
    }
}
