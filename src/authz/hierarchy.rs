use super::registry::RoleRegistry;
use super::role::{Role, RoleCategory, SupportTier};

pub const LEVEL_SUPER_ADMIN: u8 = 100;
pub const LEVEL_MANAGEMENT: u8 = 80;
pub const LEVEL_OPERATIONS: u8 = 60;
pub const LEVEL_FINANCE: u8 = 50;
pub const LEVEL_SUPPORT_TIER2: u8 = 30;
pub const LEVEL_SUPPORT_TIER1: u8 = 20;
pub const LEVEL_END_USER: u8 = 10;
pub const LEVEL_UNMAPPED: u8 = 0;

impl RoleRegistry {
    /// Ordinal privilege level used for comparisons only.
    pub fn level_of(&self, role: Role) -> u8 {
        match self.category_of(role) {
            RoleCategory::SuperAdmin => LEVEL_SUPER_ADMIN,
            RoleCategory::Management => LEVEL_MANAGEMENT,
            RoleCategory::Operations => LEVEL_OPERATIONS,
            RoleCategory::Finance => LEVEL_FINANCE,
            RoleCategory::Support => match self.support_tier_of(role) {
                Some(SupportTier::Tier2) => LEVEL_SUPPORT_TIER2,
                _ => LEVEL_SUPPORT_TIER1,
            },
            RoleCategory::EndUser => LEVEL_END_USER,
        }
    }

    /// Level for an unnormalized identifier; [`LEVEL_UNMAPPED`] when it names no role.
    pub fn level_of_raw(&self, raw: &str) -> u8 {
        Role::parse(raw).map_or(LEVEL_UNMAPPED, |role| self.level_of(role))
    }

    pub fn outranks(&self, role: Role, other: Role) -> bool {
        self.level_of(role) > self.level_of(other)
    }
}
