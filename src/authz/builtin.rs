//! The built-in role table shipped with the service.
//!
//! `config_for` is an exhaustive match, so adding a [`Role`] without a table
//! entry fails to compile.

use super::permission::{Permission, Permission::*, PermissionSet};
use super::registry::RoleConfig;
use super::role::{Portal, Role, RoleCategory, SupportTier};

fn set(permissions: &[Permission]) -> PermissionSet {
    permissions.iter().collect()
}

fn admin(category: RoleCategory, permissions: &[Permission], description: &str) -> RoleConfig {
    RoleConfig::new(Portal::Admin, category, set(permissions), description)
}

fn support(tier: SupportTier, permissions: &[Permission], description: &str) -> RoleConfig {
    RoleConfig::new(Portal::Admin, RoleCategory::Support, set(permissions), description).with_support_tier(tier)
}

fn brand(permissions: &[Permission], description: &str) -> RoleConfig {
    RoleConfig::new(Portal::Brand, RoleCategory::EndUser, set(permissions), description)
}

fn publisher(permissions: &[Permission], description: &str) -> RoleConfig {
    RoleConfig::new(Portal::Publisher, RoleCategory::EndUser, set(permissions), description)
}

pub(crate) fn config_for(role: Role) -> RoleConfig {
    match role {
        Role::SuperAdmin => RoleConfig::new(
            Portal::Admin,
            RoleCategory::SuperAdmin,
            PermissionSet::all(),
            "Unrestricted platform owner",
        )
        .deletable()
        .suspendable(),

        Role::AdminExchange => admin(
            RoleCategory::Management,
            &[
                ReadCampaign, UpdateCampaign, DeleteCampaign, ApproveCampaign, RejectCampaign, PauseCampaign,
                ViewCampaignAnalytics, ReviewCreative, ReadUser, CreateUser, UpdateUser, DeleteUser, SuspendUser,
                AssignRoles, ViewRoles, ViewBilling, ViewFinancialReports, ViewTickets, RespondTickets,
                EscalateTickets, ResolveTickets, ViewAnalytics, ExportReports, ManageIntegrations, ViewAuditLog,
                ManageAgreements, ModerateContent, ManageDisputes,
            ],
            "Administers the whole ad exchange",
        )
        .deletable()
        .suspendable(),

        Role::AdminBrand => admin(
            RoleCategory::Management,
            &[
                ReadCampaign, UpdateCampaign, DeleteCampaign, ApproveCampaign, RejectCampaign, PauseCampaign,
                ViewCampaignAnalytics, ReviewCreative, ReadUser, CreateUser, UpdateUser, DeleteUser, SuspendUser,
                AssignRoles, ViewRoles, ViewBilling, ViewTickets, RespondTickets, ResolveTickets, ViewAnalytics,
                ExportReports, ManageDisputes,
            ],
            "Administers brand accounts and their campaigns",
        )
        .deletable()
        .suspendable(),

        Role::AdminPublisher => admin(
            RoleCategory::Management,
            &[
                ReadCampaign, ViewCampaignAnalytics, ReadUser, CreateUser, UpdateUser, DeleteUser, SuspendUser,
                AssignRoles, ViewRoles, ViewEarnings, ViewTickets, RespondTickets, ResolveTickets, ViewAnalytics,
                ExportReports, ModerateContent, ManageDisputes,
            ],
            "Administers streamer and publisher accounts",
        )
        .deletable()
        .suspendable(),

        Role::AdminFinance => admin(
            RoleCategory::Management,
            &[
                ReadUser, SuspendUser, AssignRoles, ViewRoles, ViewBilling, ManageBilling, ProcessPayouts,
                IssueRefunds, ViewFinancialReports, ViewEarnings, ViewAnalytics, ExportReports, ViewAuditLog,
                ManageDisputes,
            ],
            "Heads the finance team",
        )
        .suspendable(),

        Role::OperationsManager => admin(
            RoleCategory::Operations,
            &[
                ReadCampaign, UpdateCampaign, ApproveCampaign, RejectCampaign, PauseCampaign, ViewCampaignAnalytics,
                ReviewCreative, ReadUser, UpdateUser, SuspendUser, AssignRoles, ViewRoles, ViewTickets,
                RespondTickets, EscalateTickets, ResolveTickets, ViewAnalytics, ExportReports, ModerateContent,
                ManageDisputes,
            ],
            "Runs day-to-day marketplace operations",
        )
        .suspendable(),

        Role::ValidatorApprover => admin(
            RoleCategory::Operations,
            &[
                ReadCampaign, ApproveCampaign, RejectCampaign, PauseCampaign, ReviewCreative, ViewCampaignAnalytics,
                ReadUser, ViewTickets, EscalateTickets,
            ],
            "Reviews and approves campaigns before they go live",
        ),

        Role::ComplianceOfficer => admin(
            RoleCategory::Operations,
            &[
                ReadCampaign, RejectCampaign, PauseCampaign, ReviewCreative, ReadUser, SuspendUser, ViewRoles,
                ViewAuditLog, ManageAgreements, ModerateContent, ViewTickets, EscalateTickets, ExportReports,
            ],
            "Audits content and agreements for policy compliance",
        )
        .suspendable(),

        Role::FinanceManager => admin(
            RoleCategory::Finance,
            &[
                ViewBilling, ManageBilling, ProcessPayouts, IssueRefunds, ViewFinancialReports, ViewEarnings,
                ReadUser, ViewAnalytics, ExportReports, ViewTickets, EscalateTickets, ManageDisputes,
            ],
            "Approves payouts and refunds",
        ),

        Role::BillingSpecialist => admin(
            RoleCategory::Finance,
            &[
                ViewBilling, ManageBilling, IssueRefunds, ViewFinancialReports, ReadUser, ViewTickets,
                RespondTickets, EscalateTickets,
            ],
            "Handles invoices and billing questions",
        ),

        Role::Support1Brand => support(
            SupportTier::Tier1,
            &[ReadCampaign, ReadUser, ViewTickets, RespondTickets, EscalateTickets, ViewBilling],
            "First-line support for brands",
        ),

        Role::Support2Brand => support(
            SupportTier::Tier2,
            &[
                ReadCampaign, PauseCampaign, ReadUser, UpdateUser, AssignRoles, ViewRoles, ViewTickets,
                RespondTickets, EscalateTickets, ResolveTickets, ViewBilling, ManageDisputes,
            ],
            "Second-line support for brands",
        ),

        Role::Support1Publisher => support(
            SupportTier::Tier1,
            &[ReadCampaign, ReadUser, ViewTickets, RespondTickets, EscalateTickets, ViewEarnings],
            "First-line support for streamers and publishers",
        ),

        Role::Support2Publisher => support(
            SupportTier::Tier2,
            &[
                ReadCampaign, ReadUser, UpdateUser, AssignRoles, ViewRoles, ViewTickets, RespondTickets,
                EscalateTickets, ResolveTickets, ViewEarnings, ModerateContent, ManageDisputes,
            ],
            "Second-line support for streamers and publishers",
        ),

        Role::BrandOwner => brand(
            &[
                CreateCampaign, ReadCampaign, UpdateCampaign, DeleteCampaign, PauseCampaign, ViewCampaignAnalytics,
                UploadCreative, ViewBilling, ManageBilling, ManageWallet, ViewAnalytics, ExportReports,
                ManageBrandProfile, ManageTeam, ViewTickets,
            ],
            "Owns a brand account",
        )
        .agreement_required(),

        Role::CampaignManager => brand(
            &[
                CreateCampaign, ReadCampaign, UpdateCampaign, PauseCampaign, ViewCampaignAnalytics, UploadCreative,
                ViewAnalytics,
            ],
            "Creates and runs campaigns for a brand",
        )
        .agreement_required(),

        Role::BrandAnalyst => brand(
            &[ReadCampaign, ViewCampaignAnalytics, ViewAnalytics, ExportReports],
            "Reads campaign performance for a brand",
        ),

        Role::BrandFinance => brand(
            &[ReadCampaign, ViewBilling, ManageBilling, ManageWallet, ViewFinancialReports, ExportReports],
            "Manages a brand's budget and invoices",
        ),

        Role::BrandViewer => brand(&[ReadCampaign, ViewCampaignAnalytics], "Read-only brand team member"),

        Role::AgencyManager => brand(
            &[
                CreateCampaign, ReadCampaign, UpdateCampaign, PauseCampaign, ViewCampaignAnalytics, UploadCreative,
                ViewBilling, ViewAnalytics, ExportReports, ManageTeam,
            ],
            "Runs campaigns on behalf of several brands",
        )
        .agreement_required(),

        Role::StreamerIndividual => publisher(
            &[ReadCampaign, BidOnCampaigns, ManageChannel, ConnectStream, ViewEarnings, RequestPayout, ManageWallet],
            "Independent streamer",
        )
        .agreement_required(),

        Role::StreamerAgency => publisher(
            &[
                ReadCampaign, BidOnCampaigns, ManageChannel, ConnectStream, ViewEarnings, RequestPayout,
                ManageWallet, ManageTeam, ViewAnalytics,
            ],
            "Agency representing a roster of streamers",
        )
        .agreement_required(),

        Role::PublisherOwner => publisher(
            &[
                ReadCampaign, BidOnCampaigns, ManageChannel, ConnectStream, ViewEarnings, RequestPayout,
                ManageWallet, ManageTeam, ViewAnalytics, ExportReports,
            ],
            "Owns a publisher network",
        )
        .agreement_required(),

        Role::PublisherManager => publisher(
            &[ReadCampaign, BidOnCampaigns, ManageChannel, ConnectStream, ViewEarnings, ViewAnalytics],
            "Manages channels for a publisher",
        ),

        Role::PublisherAnalyst => publisher(
            &[ReadCampaign, ViewEarnings, ViewAnalytics, ExportReports],
            "Reads earnings and audience analytics",
        ),

        Role::ContentModerator => publisher(
            &[ReadCampaign, ReviewCreative, ModerateContent, ViewTickets],
            "Moderates chat and overlays for a publisher",
        ),

        Role::LegacyStreamer | Role::LegacyBrand | Role::LegacyAdmin => {
            config_for(role.replacement()).as_legacy_alias(role)
        }
    }
}
