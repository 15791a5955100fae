use super::permission::{Permission, PermissionSet};
use super::registry::RoleRegistry;
use super::role::Role;

/// Boolean permission checks against the registry.
///
/// All lookups are a single bitset test per requested permission.
impl RoleRegistry {
    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.permissions_of(role).contains(permission)
    }

    /// AND semantics. Vacuously true for an empty list.
    pub fn has_all(&self, role: Role, permissions: &[Permission]) -> bool {
        let held = self.permissions_of(role);
        permissions.iter().all(|p| held.contains(*p))
    }

    /// OR semantics. False for an empty list.
    pub fn has_any(&self, role: Role, permissions: &[Permission]) -> bool {
        let held = self.permissions_of(role);
        permissions.iter().any(|p| held.contains(*p))
    }

    /// Requested permissions the role does not hold, in request order, without duplicates.
    pub fn missing(&self, role: Role, permissions: &[Permission]) -> Vec<Permission> {
        let held = self.permissions_of(role);
        let mut seen = PermissionSet::EMPTY;
        permissions
            .iter()
            .copied()
            .filter(|p| {
                let fresh = !seen.contains(*p);
                seen = seen.with(*p);
                fresh && !held.contains(*p)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_permission_checks() {
        let registry = RoleRegistry::global();
        assert!(registry.has_permission(Role::StreamerIndividual, Permission::BidOnCampaigns));
        assert!(!registry.has_permission(Role::StreamerIndividual, Permission::ConfigurePlatform));
        assert!(registry.has_permission(Role::CampaignManager, Permission::CreateCampaign));
        assert!(!registry.has_permission(Role::CampaignManager, Permission::DeleteUser));
    }

    #[test]
    fn empty_lists() {
        let registry = RoleRegistry::global();
        for role in Role::ALL {
            assert!(registry.has_all(*role, &[]));
            assert!(!registry.has_any(*role, &[]));
        }
    }

    #[test]
    fn all_versus_any() {
        let registry = RoleRegistry::global();
        let wanted = [Permission::ApproveCampaign, Permission::ReadCampaign];
        assert!(!registry.has_all(Role::CampaignManager, &wanted));
        assert!(registry.has_any(Role::CampaignManager, &wanted));
        assert!(registry.has_all(Role::ValidatorApprover, &wanted));
    }

    #[test]
    fn missing_keeps_order_and_drops_duplicates() {
        let registry = RoleRegistry::global();
        let wanted = [
            Permission::DeleteUser,
            Permission::ReadCampaign,
            Permission::ApproveCampaign,
            Permission::DeleteUser,
        ];
        assert_eq!(
            registry.missing(Role::CampaignManager, &wanted),
            vec![Permission::DeleteUser, Permission::ApproveCampaign]
        );
        assert!(registry.missing(Role::SuperAdmin, &wanted).is_empty());
    }
}
