use eureka_roles::authz::{
    normalize_role, Permission, PolicyError, Portal, Role, RoleCategory, RoleRegistry, LEVEL_UNMAPPED,
};

#[test]
fn every_role_has_exactly_one_stable_config() {
    let registry = RoleRegistry::global();
    for role in Role::ALL {
        let first = registry.lookup(role.as_str()).expect("canonical role must resolve");
        let second = registry.lookup(role.as_str()).expect("canonical role must resolve");
        assert_eq!(first, second, "lookup drifted for {role}");
        assert_eq!(first, registry.config(*role));
    }
    assert_eq!(registry.iter().count(), Role::ALL.len());
}

#[test]
fn lookup_never_falls_back() {
    let registry = RoleRegistry::global();
    for raw in ["", "root", "streamer-individual", "superadmin"] {
        assert!(
            matches!(registry.lookup(raw), Err(PolicyError::UnknownRole(_))),
            "{raw:?} should be unknown"
        );
    }
}

#[test]
fn has_permission_matches_permission_set_exhaustively() {
    let registry = RoleRegistry::global();
    for role in Role::ALL {
        let held = registry.permissions_of(*role);
        for permission in Permission::ALL {
            assert_eq!(
                registry.has_permission(*role, *permission),
                held.iter().any(|p| p == *permission),
                "{role} / {permission}"
            );
        }
    }
}

#[test]
fn empty_permission_lists() {
    let registry = RoleRegistry::global();
    for role in Role::ALL {
        assert!(registry.has_all(*role, &[]));
        assert!(!registry.has_any(*role, &[]));
    }
}

#[test]
fn normalize_is_idempotent() {
    let mut inputs: Vec<String> = Role::ALL.iter().map(|r| r.as_str().to_string()).collect();
    inputs.extend(
        ["streamer", "brand", "admin", "totally-unknown-role", "", "ADMIN_BRAND"]
            .iter()
            .map(|s| s.to_string()),
    );

    for raw in &inputs {
        let once = normalize_role(raw);
        assert_eq!(normalize_role(once.as_str()), once, "{raw:?}");
    }
}

#[test]
fn hierarchy_orders_categories() {
    let registry = RoleRegistry::global();
    let order = [
        RoleCategory::SuperAdmin,
        RoleCategory::Management,
        RoleCategory::Operations,
        RoleCategory::Finance,
        RoleCategory::Support,
        RoleCategory::EndUser,
    ];

    for pair in order.windows(2) {
        let (higher, lower) = (pair[0], pair[1]);
        for senior in registry.roles_by_category(higher) {
            for junior in registry.roles_by_category(lower) {
                assert!(
                    registry.level_of(senior) > registry.level_of(junior),
                    "{senior} ({higher}) should outrank {junior} ({lower})"
                );
            }
        }
    }

    assert!(Role::ALL.iter().all(|role| registry.level_of(*role) > LEVEL_UNMAPPED));
}

#[test]
fn every_canonical_role_is_in_exactly_one_portal_and_category() {
    let registry = RoleRegistry::global();
    let by_portal: usize = Portal::ALL.iter().map(|p| registry.roles_by_portal(*p).len()).sum();
    let by_category: usize = RoleCategory::ALL
        .iter()
        .map(|c| registry.roles_by_category(*c).len())
        .sum();

    assert_eq!(by_portal, Role::canonical().count());
    assert_eq!(by_category, Role::canonical().count());
}

#[test]
fn only_expected_roles_may_assign() {
    let registry = RoleRegistry::global();
    let assigners = registry.roles_with(Permission::AssignRoles);
    assert_eq!(
        assigners,
        vec![
            Role::SuperAdmin,
            Role::AdminExchange,
            Role::AdminBrand,
            Role::AdminPublisher,
            Role::AdminFinance,
            Role::OperationsManager,
            Role::Support2Brand,
            Role::Support2Publisher,
        ]
    );
    assert!(registry
        .roles_by_category(RoleCategory::EndUser)
        .iter()
        .all(|role| !assigners.contains(role)));
}

#[test]
fn flags_follow_the_table() {
    let registry = RoleRegistry::global();
    assert!(registry.can_delete(Role::SuperAdmin));
    assert!(registry.can_suspend(Role::OperationsManager));
    assert!(!registry.can_delete(Role::OperationsManager));
    assert!(registry.requires_agreement(Role::StreamerIndividual));
    assert!(registry.requires_agreement(Role::CampaignManager));
    assert!(!registry.requires_agreement(Role::BrandViewer));
    assert!(Role::ALL
        .iter()
        .filter(|role| registry.can_delete(**role))
        .all(|role| registry.portal_of(*role) == Portal::Admin));
}
