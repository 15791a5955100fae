use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::builtin;
use super::error::{PolicyError, PolicyResult};
use super::permission::{Permission, PermissionSet};
use super::role::{Portal, Role, RoleCategory, SupportTier};

/// Static facts attached to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleConfig {
    pub portal: Portal,
    pub category: RoleCategory,
    pub permissions: PermissionSet,
    pub description: String,
    #[serde(default)]
    pub can_delete: bool,
    #[serde(default)]
    pub can_suspend: bool,
    #[serde(default)]
    pub requires_agreement: bool,
    /// Present on SUPPORT roles only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_tier: Option<SupportTier>,
}

impl RoleConfig {
    pub fn new(portal: Portal, category: RoleCategory, permissions: PermissionSet, description: &str) -> Self {
        Self {
            portal,
            category,
            permissions,
            description: description.to_string(),
            can_delete: false,
            can_suspend: false,
            requires_agreement: false,
            support_tier: None,
        }
    }

    pub fn deletable(mut self) -> Self {
        self.can_delete = true;
        self
    }

    pub fn suspendable(mut self) -> Self {
        self.can_suspend = true;
        self
    }

    pub fn agreement_required(mut self) -> Self {
        self.requires_agreement = true;
        self
    }

    pub fn with_support_tier(mut self, tier: SupportTier) -> Self {
        self.support_tier = Some(tier);
        self
    }

    /// Copy of a replacement role's config, relabelled for a legacy alias.
    pub(crate) fn as_legacy_alias(mut self, alias: Role) -> Self {
        self.description = format!("Legacy alias '{}' for {}", alias, alias.replacement());
        self
    }

    fn check(&self, role: Role) -> PolicyResult<()> {
        match (self.category, self.support_tier) {
            (RoleCategory::Support, None) => Err(PolicyError::invalid_policy(format!(
                "support role {role} must declare a support_tier"
            ))),
            (category, Some(_)) if category != RoleCategory::Support => Err(PolicyError::invalid_policy(format!(
                "role {role} is {category}, only SUPPORT roles may declare a support_tier"
            ))),
            _ => Ok(()),
        }
    }
}

/// Frozen role table. One [`RoleConfig`] per [`Role`], never edited after
/// construction. Replacing policy means building a new registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRegistry {
    configs: Box<[RoleConfig]>,
}

impl RoleRegistry {
    /// Registry built from the compiled-in table.
    pub fn builtin() -> Self {
        Self {
            configs: Role::ALL.iter().map(|role| builtin::config_for(*role)).collect(),
        }
    }

    /// Shared process-wide copy of [`RoleRegistry::builtin`].
    pub fn global() -> &'static RoleRegistry {
        static REGISTRY: OnceLock<RoleRegistry> = OnceLock::new();
        REGISTRY.get_or_init(RoleRegistry::builtin)
    }

    /// Assemble a registry from per-role configs.
    ///
    /// Every canonical role must be present; legacy aliases must be absent and
    /// are derived from their replacement.
    pub fn from_configs(mut configs: HashMap<Role, RoleConfig>) -> PolicyResult<Self> {
        if let Some(alias) = configs.keys().find(|role| role.is_legacy()) {
            return Err(PolicyError::invalid_policy(format!(
                "legacy alias '{alias}' cannot be configured, configure {} instead",
                alias.replacement()
            )));
        }

        // Legacy aliases are declared after every canonical role, so their
        // replacement is already assembled by the time they are reached.
        let mut assembled: Vec<RoleConfig> = Vec::with_capacity(Role::ALL.len());
        for role in Role::ALL {
            let config = if role.is_legacy() {
                let replacement = assembled
                    .get(role.replacement().index())
                    .ok_or(PolicyError::IncompleteRegistry(role.replacement()))?;
                replacement.clone().as_legacy_alias(*role)
            } else {
                configs.remove(role).ok_or(PolicyError::IncompleteRegistry(*role))?
            };
            config.check(*role)?;
            assembled.push(config);
        }

        Ok(Self {
            configs: assembled.into_boxed_slice(),
        })
    }

    /// Checked lookup by identifier. Fails with `UnknownRole` for anything
    /// that is not a role identifier; no legacy fallback is applied here.
    pub fn lookup(&self, raw: &str) -> PolicyResult<&RoleConfig> {
        Role::parse(raw)
            .map(|role| self.config(role))
            .ok_or_else(|| PolicyError::unknown_role(raw))
    }

    pub fn config(&self, role: Role) -> &RoleConfig {
        &self.configs[role.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &RoleConfig)> + '_ {
        Role::ALL.iter().map(move |role| (*role, self.config(*role)))
    }

    pub fn permissions_of(&self, role: Role) -> PermissionSet {
        self.config(role).permissions
    }

    pub fn portal_of(&self, role: Role) -> Portal {
        self.config(role).portal
    }

    pub fn category_of(&self, role: Role) -> RoleCategory {
        self.config(role).category
    }

    pub fn support_tier_of(&self, role: Role) -> Option<SupportTier> {
        self.config(role).support_tier
    }

    pub fn can_delete(&self, role: Role) -> bool {
        self.config(role).can_delete
    }

    pub fn can_suspend(&self, role: Role) -> bool {
        self.config(role).can_suspend
    }

    pub fn requires_agreement(&self, role: Role) -> bool {
        self.config(role).requires_agreement
    }

    /// Canonical roles in a portal, in declaration order.
    pub fn roles_by_portal(&self, portal: Portal) -> Vec<Role> {
        Role::canonical().filter(|role| self.portal_of(*role) == portal).collect()
    }

    /// Canonical roles in a category, in declaration order.
    pub fn roles_by_category(&self, category: RoleCategory) -> Vec<Role> {
        Role::canonical().filter(|role| self.category_of(*role) == category).collect()
    }

    /// Canonical roles holding `permission`.
    pub fn roles_with(&self, permission: Permission) -> Vec<Role> {
        Role::canonical()
            .filter(|role| self.permissions_of(*role).contains(permission))
            .collect()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
