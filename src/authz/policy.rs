//! JSON policy documents: an alternative source for the role table.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{PolicyError, PolicyResult};
use super::registry::{RoleConfig, RoleRegistry};
use super::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDocument {
    pub roles: BTreeMap<String, RoleConfig>,
}

impl PolicyDocument {
    /// Canonical roles of `registry`; legacy aliases are implied.
    pub fn export(registry: &RoleRegistry) -> Self {
        let roles = registry
            .iter()
            .filter(|(role, _)| !role.is_legacy())
            .map(|(role, config)| (role.to_string(), config.clone()))
            .collect();
        Self { roles }
    }

    pub fn from_json(json: &str) -> PolicyResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> PolicyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the whole document and build a registry from it.
    pub fn into_registry(self) -> PolicyResult<RoleRegistry> {
        let mut configs = HashMap::with_capacity(self.roles.len());
        for (name, config) in self.roles {
            let role = Role::parse(&name).ok_or_else(|| PolicyError::unknown_role(name.as_str()))?;
            if configs.insert(role, config).is_some() {
                return Err(PolicyError::invalid_policy(format!("role {role} is configured twice")));
            }
        }
        RoleRegistry::from_configs(configs)
    }
}

impl RoleRegistry {
    pub fn from_policy_json(json: &str) -> PolicyResult<Self> {
        PolicyDocument::from_json(json)?.into_registry()
    }

    pub fn from_policy_file(path: impl AsRef<Path>) -> PolicyResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_policy_json(&json)
    }
}
