use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::PolicyError;

/// Top-level user experience a role belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Portal {
    Brand,
    Admin,
    Publisher,
}

impl Portal {
    pub const ALL: [Portal; 3] = [Portal::Brand, Portal::Admin, Portal::Publisher];

    pub fn as_str(&self) -> &'static str {
        match self {
            Portal::Brand => "BRAND",
            Portal::Admin => "ADMIN",
            Portal::Publisher => "PUBLISHER",
        }
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Portal {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRAND" => Ok(Portal::Brand),
            "ADMIN" => Ok(Portal::Admin),
            "PUBLISHER" => Ok(Portal::Publisher),
            other => Err(PolicyError::invalid_policy(format!("unknown portal '{other}'"))),
        }
    }
}

/// Coarse privilege tier. Declaration order runs from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleCategory {
    SuperAdmin,
    Management,
    Operations,
    Finance,
    Support,
    EndUser,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 6] = [
        RoleCategory::SuperAdmin,
        RoleCategory::Management,
        RoleCategory::Operations,
        RoleCategory::Finance,
        RoleCategory::Support,
        RoleCategory::EndUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::SuperAdmin => "SUPER_ADMIN",
            RoleCategory::Management => "MANAGEMENT",
            RoleCategory::Operations => "OPERATIONS",
            RoleCategory::Finance => "FINANCE",
            RoleCategory::Support => "SUPPORT",
            RoleCategory::EndUser => "END_USER",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleCategory {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        RoleCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| PolicyError::invalid_policy(format!("unknown role category '{wanted}'")))
    }
}

/// Seniority inside the SUPPORT category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SupportTier {
    Tier1,
    Tier2,
}

macro_rules! roles {
    ($( $variant:ident => $name:literal ),+ $(,)?) => {
        /// Canonical role identifier.
        ///
        /// The three `Legacy*` variants are historic aliases. They carry a registry
        /// entry so the table stays total, but normalization never produces them.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
        pub enum Role {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl Role {
            pub const ALL: &'static [Role] = &[$(Role::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Role::$variant => $name,)+
                }
            }

            /// Exact (trimmed, case-insensitive) match against the role identifiers.
            pub fn parse(raw: &str) -> Option<Role> {
                let wanted = raw.trim().to_ascii_lowercase();
                match wanted.as_str() {
                    $($name => Some(Role::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

roles! {
    SuperAdmin => "super_admin",
    AdminExchange => "admin_exchange",
    AdminBrand => "admin_brand",
    AdminPublisher => "admin_publisher",
    AdminFinance => "admin_finance",
    OperationsManager => "operations_manager",
    ValidatorApprover => "validator_approver",
    ComplianceOfficer => "compliance_officer",
    FinanceManager => "finance_manager",
    BillingSpecialist => "billing_specialist",
    Support1Brand => "support_1_brand",
    Support2Brand => "support_2_brand",
    Support1Publisher => "support_1_publisher",
    Support2Publisher => "support_2_publisher",
    BrandOwner => "brand_owner",
    CampaignManager => "campaign_manager",
    BrandAnalyst => "brand_analyst",
    BrandFinance => "brand_finance",
    BrandViewer => "brand_viewer",
    AgencyManager => "agency_manager",
    StreamerIndividual => "streamer_individual",
    StreamerAgency => "streamer_agency",
    PublisherOwner => "publisher_owner",
    PublisherManager => "publisher_manager",
    PublisherAnalyst => "publisher_analyst",
    ContentModerator => "content_moderator",
    LegacyStreamer => "streamer",
    LegacyBrand => "brand",
    LegacyAdmin => "admin",
}

impl Role {
    /// Role used whenever an identity cannot be resolved.
    pub const FALLBACK: Role = Role::StreamerIndividual;

    pub fn is_legacy(&self) -> bool {
        matches!(self, Role::LegacyStreamer | Role::LegacyBrand | Role::LegacyAdmin)
    }

    /// The modern role a legacy alias stands for; identity for everything else.
    pub fn replacement(&self) -> Role {
        match self {
            Role::LegacyStreamer => Role::StreamerIndividual,
            Role::LegacyBrand => Role::CampaignManager,
            Role::LegacyAdmin => Role::AdminExchange,
            other => *other,
        }
    }

    /// Every role that is not a legacy alias.
    pub fn canonical() -> impl Iterator<Item = Role> {
        Role::ALL.iter().copied().filter(|role| !role.is_legacy())
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| PolicyError::unknown_role(s))
    }
}
