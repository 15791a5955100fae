use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use eureka_roles::authz::{
    escalation_targets, normalize, validate_change, Normalized, Permission, PolicyDocument, Portal, Role,
    RoleCategory, RoleChangeRequest, RoleRegistry,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "eureka role policy tool", long_about = None)]
struct Cli {
    /// JSON policy document to use instead of the built-in table (defaults to $POLICY_FILE)
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registry rows, optionally filtered
    Roles {
        #[arg(long)]
        portal: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Show how a raw role string resolves
    Normalize { raw: String },
    /// Check whether a raw role holds every listed permission
    Check {
        raw: String,
        #[arg(required = true)]
        permissions: Vec<String>,
    },
    /// Validate an administrative role change
    ValidateChange {
        #[arg(long)]
        current: String,
        #[arg(long)]
        target: String,
        #[arg(long)]
        assigner: String,
    },
    /// Show who receives work escalated from a role
    Escalation { role: String },
    /// Print the active registry as a JSON policy document
    ExportPolicy,
    /// Validate a JSON policy document without using it
    ValidatePolicy { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let _ = dotenv();

    let cli = Cli::parse();
    let registry = load_registry(cli.policy)?;

    match cli.command {
        Commands::Roles { portal, category } => {
            let portal = portal.map(|p| p.parse::<Portal>()).transpose()?;
            let category = category.map(|c| c.parse::<RoleCategory>()).transpose()?;
            print_roles(&registry, portal, category);
        }
        Commands::Normalize { raw } => match normalize(&raw) {
            Normalized::Recognized { role } => println!("{raw} -> {role} (recognized)"),
            Normalized::Legacy { alias, role } => println!("{raw} -> {role} (legacy alias '{alias}')"),
            Normalized::Fallback { role, .. } => println!("{raw} -> {role} (FALLBACK: not a known role)"),
        },
        Commands::Check { raw, permissions } => {
            let wanted = permissions
                .iter()
                .map(|p| p.parse::<Permission>())
                .collect::<Result<Vec<_>, _>>()?;
            let role = normalize(&raw).role();
            let missing = registry.missing(role, &wanted);
            if missing.is_empty() {
                println!("{raw} ({role}) holds all {} permission(s)", wanted.len());
            } else {
                let missing: Vec<_> = missing.iter().map(Permission::as_str).collect();
                println!("{raw} ({role}) is missing: {}", missing.join(", "));
                std::process::exit(1);
            }
        }
        Commands::ValidateChange {
            current,
            target,
            assigner,
        } => {
            let decision = validate_change(&registry, &RoleChangeRequest::new(current, target, assigner));
            println!("{}", serde_json::to_string_pretty(&decision)?);
            if !decision.valid {
                std::process::exit(1);
            }
        }
        Commands::Escalation { role } => {
            let role: Role = role.parse()?;
            for (position, target) in escalation_targets(role).iter().enumerate() {
                println!("{}. {}", position + 1, target);
            }
        }
        Commands::ExportPolicy => {
            println!("{}", PolicyDocument::export(&registry).to_json_pretty()?);
        }
        Commands::ValidatePolicy { path } => {
            let candidate = RoleRegistry::from_policy_file(&path)
                .with_context(|| format!("policy {} rejected", path.display()))?;
            let changed = Role::canonical()
                .filter(|role| candidate.config(*role) != RoleRegistry::global().config(*role))
                .count();
            println!("{} is valid ({changed} role(s) differ from the built-in table)", path.display());
        }
    }

    Ok(())
}

fn load_registry(policy: Option<PathBuf>) -> anyhow::Result<RoleRegistry> {
    let policy = policy.or_else(|| std::env::var("POLICY_FILE").ok().filter(|p| !p.is_empty()).map(PathBuf::from));
    match policy {
        Some(path) => RoleRegistry::from_policy_file(&path)
            .with_context(|| format!("failed to load policy {}", path.display())),
        None => Ok(RoleRegistry::builtin()),
    }
}

fn print_roles(registry: &RoleRegistry, portal: Option<Portal>, category: Option<RoleCategory>) {
    println!("{:<22} {:<10} {:<12} {:>5} {:>5}  {}", "Role", "Portal", "Category", "Level", "Perms", "Description");
    for role in Role::canonical() {
        let config = registry.config(role);
        if portal.is_some_and(|p| p != config.portal) || category.is_some_and(|c| c != config.category) {
            continue;
        }
        println!(
            "{:<22} {:<10} {:<12} {:>5} {:>5}  {}",
            role.as_str(),
            config.portal.as_str(),
            config.category.as_str(),
            registry.level_of(role),
            config.permissions.len(),
            config.description
        );
    }
}
