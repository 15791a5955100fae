use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::authz::{
    Normalized, Permission, Portal, Requirement, Role, RoleCategory, RoleConfig, RoleRegistry, SupportTier,
};

/// One registry row as exposed to admin UIs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    pub role: Role,
    pub portal: Portal,
    pub category: RoleCategory,
    pub permissions: Vec<Permission>,
    pub description: String,
    pub can_delete: bool,
    pub can_suspend: bool,
    pub requires_agreement: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_tier: Option<SupportTier>,
    pub level: u8,
    pub legacy: bool,
}

impl RoleSummary {
    pub fn new(registry: &RoleRegistry, role: Role) -> Self {
        let RoleConfig {
            portal,
            category,
            permissions,
            description,
            can_delete,
            can_suspend,
            requires_agreement,
            support_tier,
        } = registry.config(role).clone();

        Self {
            role,
            portal,
            category,
            permissions: permissions.to_vec(),
            description,
            can_delete,
            can_suspend,
            requires_agreement,
            support_tier,
            level: registry.level_of(role),
            legacy: role.is_legacy(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoleFilter {
    /// Only roles in this portal
    pub portal: Option<Portal>,
    /// Only roles in this category
    pub category: Option<RoleCategory>,
    /// Include the legacy aliases
    #[serde(default)]
    pub include_legacy: bool,
}

impl RoleFilter {
    pub fn matches(&self, registry: &RoleRegistry, role: Role) -> bool {
        (self.include_legacy || !role.is_legacy())
            && self.portal.map_or(true, |portal| registry.portal_of(role) == portal)
            && self.category.map_or(true, |category| registry.category_of(role) == category)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeRequest {
    #[schema(example = "campaign_manager")]
    pub raw_role: String,
    #[serde(default)]
    pub requirement: Requirement,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeRequest {
    #[schema(example = "streamer")]
    pub raw_role: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeResponse {
    pub raw_role: String,
    pub role: Role,
    pub fallback_used: bool,
    pub outcome: Normalized,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    pub source: String,
    pub roles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_carries_level_and_tier() {
        let summary = RoleSummary::new(RoleRegistry::global(), Role::Support2Brand);
        assert_eq!(summary.level, 30);
        assert_eq!(summary.support_tier, Some(SupportTier::Tier2));
        assert!(!summary.legacy);
    }

    #[test]
    fn filter_excludes_legacy_by_default() {
        let registry = RoleRegistry::global();
        let filter = RoleFilter {
            portal: Some(Portal::Admin),
            ..RoleFilter::default()
        };
        assert!(filter.matches(registry, Role::SuperAdmin));
        assert!(!filter.matches(registry, Role::LegacyAdmin));
        assert!(!filter.matches(registry, Role::BrandOwner));
    }
}
