use eureka_roles::authz::{
    evaluate, normalize, normalize_role, DenyReason, Identity, Permission, Portal, Requirement, Role, RoleRegistry,
};

#[test]
fn scenario_legacy_streamer() {
    let registry = RoleRegistry::global();
    let role = normalize_role("streamer");
    assert_eq!(role, Role::StreamerIndividual);
    assert_eq!(registry.portal_of(role), Portal::Publisher);
    assert!(registry.has_permission(role, Permission::BidOnCampaigns));
    assert!(!registry.has_permission(role, Permission::ConfigurePlatform));
}

#[test]
fn scenario_legacy_brand() {
    let registry = RoleRegistry::global();
    let role = normalize_role("brand");
    assert_eq!(role, Role::CampaignManager);
    assert!(registry.has_permission(role, Permission::CreateCampaign));
    assert!(!registry.has_permission(role, Permission::DeleteUser));
}

#[test]
fn scenario_unknown_role_falls_back() {
    let outcome = normalize("totally-unknown-role");
    assert_eq!(outcome.role(), Role::StreamerIndividual);
    assert!(outcome.is_fallback());
}

#[test]
fn scenario_campaign_manager_cannot_approve() {
    let decision = evaluate(
        RoleRegistry::global(),
        &Identity::new("campaign_manager"),
        &Requirement::new().require([Permission::ApproveCampaign, Permission::ReadCampaign]),
    );
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Some(DenyReason::MissingPermissions));
    assert_eq!(decision.missing, vec![Permission::ApproveCampaign]);
}

#[test]
fn scenario_validator_approver_can_approve() {
    let decision = evaluate(
        RoleRegistry::global(),
        &Identity::new("validator_approver"),
        &Requirement::new().require([Permission::ApproveCampaign, Permission::ReadCampaign]),
    );
    assert!(decision.allowed);
    assert_eq!(decision.access.role, Role::ValidatorApprover);
    assert_eq!(decision.access.portal, Portal::Admin);
}

#[test]
fn scenario_streamer_blocked_from_admin_portal() {
    let decision = evaluate(
        RoleRegistry::global(),
        &Identity::new("streamer_individual"),
        &Requirement::new().in_portals([Portal::Admin]),
    );
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Some(DenyReason::PortalMismatch));
    assert_eq!(decision.actual_portal, Some(Portal::Publisher));
    assert_eq!(decision.required_portal, vec![Portal::Admin]);
}
