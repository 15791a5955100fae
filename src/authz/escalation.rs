use super::role::Role;

const DEFAULT_TARGETS: &[Role] = &[Role::SuperAdmin];

/// Ordered roles that receive work escalated from `role`.
pub fn escalation_targets(role: Role) -> &'static [Role] {
    match role.replacement() {
        Role::Support1Brand => &[Role::Support2Brand, Role::AdminBrand],
        Role::Support2Brand => &[Role::AdminBrand, Role::SuperAdmin],
        Role::Support1Publisher => &[Role::Support2Publisher, Role::AdminPublisher],
        Role::Support2Publisher => &[Role::AdminPublisher, Role::SuperAdmin],
        Role::ValidatorApprover => &[Role::OperationsManager, Role::AdminExchange],
        Role::ComplianceOfficer => &[Role::OperationsManager, Role::SuperAdmin],
        Role::BillingSpecialist => &[Role::FinanceManager, Role::AdminFinance],
        Role::FinanceManager => &[Role::AdminFinance, Role::SuperAdmin],
        _ => DEFAULT_TARGETS,
    }
}
