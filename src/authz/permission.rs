use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::error::PolicyError;

macro_rules! permissions {
    ($( $variant:ident => $name:literal ),+ $(,)?) => {
        /// Atomic capability token checked by the guard.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
        pub enum Permission {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl Permission {
            pub const ALL: &'static [Permission] = &[$(Permission::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Permission::$variant => $name,)+
                }
            }

            pub fn parse(raw: &str) -> Option<Permission> {
                let wanted = raw.trim().to_ascii_uppercase();
                match wanted.as_str() {
                    $($name => Some(Permission::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

permissions! {
    // Campaigns
    CreateCampaign => "CREATE_CAMPAIGN",
    ReadCampaign => "READ_CAMPAIGN",
    UpdateCampaign => "UPDATE_CAMPAIGN",
    DeleteCampaign => "DELETE_CAMPAIGN",
    ApproveCampaign => "APPROVE_CAMPAIGN",
    RejectCampaign => "REJECT_CAMPAIGN",
    PauseCampaign => "PAUSE_CAMPAIGN",
    BidOnCampaigns => "BID_ON_CAMPAIGNS",
    ViewCampaignAnalytics => "VIEW_CAMPAIGN_ANALYTICS",

    // Creatives
    UploadCreative => "UPLOAD_CREATIVE",
    ReviewCreative => "REVIEW_CREATIVE",

    // Users and roles
    ReadUser => "READ_USER",
    CreateUser => "CREATE_USER",
    UpdateUser => "UPDATE_USER",
    DeleteUser => "DELETE_USER",
    SuspendUser => "SUSPEND_USER",
    AssignRoles => "ASSIGN_ROLES",
    ViewRoles => "VIEW_ROLES",

    // Money
    ViewBilling => "VIEW_BILLING",
    ManageBilling => "MANAGE_BILLING",
    ProcessPayouts => "PROCESS_PAYOUTS",
    IssueRefunds => "ISSUE_REFUNDS",
    ViewFinancialReports => "VIEW_FINANCIAL_REPORTS",
    ManageWallet => "MANAGE_WALLET",
    RequestPayout => "REQUEST_PAYOUT",
    ViewEarnings => "VIEW_EARNINGS",

    // Support
    ViewTickets => "VIEW_TICKETS",
    RespondTickets => "RESPOND_TICKETS",
    EscalateTickets => "ESCALATE_TICKETS",
    ResolveTickets => "RESOLVE_TICKETS",

    // Analytics
    ViewAnalytics => "VIEW_ANALYTICS",
    ExportReports => "EXPORT_REPORTS",

    // Publisher
    ManageChannel => "MANAGE_CHANNEL",
    ConnectStream => "CONNECT_STREAM",

    // Brand
    ManageBrandProfile => "MANAGE_BRAND_PROFILE",
    ManageTeam => "MANAGE_TEAM",

    // Platform
    ConfigurePlatform => "CONFIGURE_PLATFORM",
    ManageIntegrations => "MANAGE_INTEGRATIONS",
    ViewAuditLog => "VIEW_AUDIT_LOG",
    OverrideSystem => "OVERRIDE_SYSTEM",
    ManageAgreements => "MANAGE_AGREEMENTS",
    ModerateContent => "MODERATE_CONTENT",
    ManageDisputes => "MANAGE_DISPUTES",
}

impl Permission {
    fn bit(&self) -> u64 {
        1u64 << (*self as u32)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::parse(s).ok_or_else(|| PolicyError::invalid_policy(format!("unknown permission '{}'", s.trim())))
    }
}

/// Immutable set of permissions stored as a bitset, one bit per [`Permission`].
///
/// Membership, subset and difference are single word operations, so guard
/// checks cost O(k) in the size of the requirement regardless of table size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet(u64);

const _: () = assert!(Permission::ALL.len() <= u64::BITS as usize);

impl PermissionSet {
    pub const EMPTY: PermissionSet = PermissionSet(0);

    pub fn all() -> Self {
        Permission::ALL.iter().copied().collect()
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0 & permission.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_superset(&self, other: &PermissionSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(&self, other: &PermissionSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Permissions in `self` that `other` does not hold.
    pub fn difference(&self, other: &PermissionSet) -> PermissionSet {
        PermissionSet(self.0 & !other.0)
    }

    pub fn with(self, permission: Permission) -> PermissionSet {
        PermissionSet(self.0 | permission.bit())
    }

    pub fn without(self, permission: Permission) -> PermissionSet {
        PermissionSet(self.0 & !permission.bit())
    }

    /// Iterates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.iter().copied().filter(move |p| self.contains(*p))
    }

    pub fn to_vec(&self) -> Vec<Permission> {
        self.iter().collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter().fold(PermissionSet::EMPTY, PermissionSet::with)
    }
}

impl<'a> FromIterator<&'a Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = &'a Permission>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let permissions = Vec::<Permission>::deserialize(deserializer)?;
        Ok(permissions.into_iter().collect())
    }
}
