use serde::Serialize;
use utoipa::ToSchema;

use super::role::Role;

/// Outcome of resolving a raw role string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Normalized {
    /// Input already named a canonical role.
    Recognized { role: Role },
    /// Input was a historic alias with a known replacement.
    Legacy { alias: Role, role: Role },
    /// Input matched nothing and was downgraded to [`Role::FALLBACK`].
    Fallback { role: Role, original: String },
}

impl Normalized {
    pub fn role(&self) -> Role {
        match self {
            Normalized::Recognized { role } | Normalized::Legacy { role, .. } | Normalized::Fallback { role, .. } => {
                *role
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Fallback { .. })
    }
}

/// Resolve a raw role string onto a canonical role.
///
/// Canonical identifiers pass through, legacy aliases map to their
/// replacement, and anything else falls back to the lowest-privilege
/// publisher role. Never fails.
pub fn normalize(raw: &str) -> Normalized {
    match Role::parse(raw) {
        Some(alias) if alias.is_legacy() => Normalized::Legacy {
            alias,
            role: alias.replacement(),
        },
        Some(role) => Normalized::Recognized { role },
        None => Normalized::Fallback {
            role: Role::FALLBACK,
            original: raw.to_string(),
        },
    }
}

pub fn normalize_role(raw: &str) -> Role {
    normalize(raw).role()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_table() {
        assert_eq!(normalize_role("streamer"), Role::StreamerIndividual);
        assert_eq!(normalize_role("brand"), Role::CampaignManager);
        assert_eq!(normalize_role("admin"), Role::AdminExchange);
        assert_eq!(
            normalize("Brand"),
            Normalized::Legacy {
                alias: Role::LegacyBrand,
                role: Role::CampaignManager
            }
        );
    }

    #[test]
    fn canonical_passes_through() {
        assert_eq!(
            normalize("support_2_brand"),
            Normalized::Recognized {
                role: Role::Support2Brand
            }
        );
    }

    #[test]
    fn unknown_input_is_tagged_as_fallback() {
        let outcome = normalize("totally-unknown-role");
        assert!(outcome.is_fallback());
        assert_eq!(outcome.role(), Role::StreamerIndividual);

        let legit = normalize("streamer_individual");
        assert!(!legit.is_fallback());
        assert_eq!(legit.role(), outcome.role());
    }

    #[test]
    fn empty_input_falls_back() {
        assert!(normalize("").is_fallback());
        assert!(normalize("   ").is_fallback());
    }

    #[test]
    fn idempotent_over_every_identifier() {
        let mut inputs: Vec<String> = Role::ALL.iter().map(|role| role.to_string()).collect();
        inputs.extend(["", "root", "Admin", "SUPER_ADMIN", "streamer "].map(String::from));

        for raw in inputs {
            let once = normalize_role(&raw);
            assert_eq!(normalize_role(once.as_str()), once, "not idempotent for {raw:?}");
            assert!(!once.is_legacy());
        }
    }
}
