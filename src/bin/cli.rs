use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use permission_engine::authz::{resolve_traced, GuardRequest};
use permission_engine::config::load_env;
use permission_engine::models::{Action, EntityType};
use permission_engine::PermissionSnapshot;

#[derive(Parser, Debug)]
#[command(author, version, about = "permission snapshot inspection tool", long_about = None)]
struct Cli {
    /// Snapshot file; defaults to SNAPSHOT_PATH
    #[arg(long, short)]
    snapshot: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Effective permissions of a user on one resource kind
    Resolve {
        user: Uuid,
        entity_type: EntityType,
        /// Instance id, activates scope=specific overrides
        entity_id: Option<String>,
    },
    /// Role defaults plus "all" overrides for every resource kind
    Summary { user: Uuid },
    /// Run the ownership guard and resolver for one action
    Check {
        user: Uuid,
        entity_type: EntityType,
        action: Action,
        #[arg(long)]
        resource: Option<String>,
        #[arg(long)]
        creator: Option<Uuid>,
    },
    /// Report membership and override inconsistencies
    Validate,
}

fn main() -> anyhow::Result<()> {
    load_env();

    let cli = Cli::parse();
    let path = match cli.snapshot {
        Some(path) => path,
        None => PathBuf::from(std::env::var("SNAPSHOT_PATH").context("SNAPSHOT_PATH not set and --snapshot missing")?),
    };
    let snapshot = PermissionSnapshot::load(&path)
        .with_context(|| format!("failed to load snapshot from {}", path.display()))?;

    match cli.command {
        Commands::Resolve { user, entity_type, entity_id } => {
            let record = snapshot
                .user(user)
                .with_context(|| format!("user {user} not found in snapshot"))?;
            let resolution = resolve_traced(
                record,
                entity_type,
                entity_id.as_deref(),
                &snapshot.overrides,
                &snapshot.roles,
            );
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        Commands::Summary { user } => {
            if snapshot.user(user).is_none() {
                anyhow::bail!("user {user} not found in snapshot");
            }
            println!("{:<16} {:<6} {:<6} {:<6} {}", "Entity", "Create", "Read", "Update", "Delete");
            for (kind, set) in snapshot.summary_for_user(user) {
                println!(
                    "{:<16} {:<6} {:<6} {:<6} {}",
                    kind.as_str(),
                    mark(set.create),
                    mark(set.read),
                    mark(set.update),
                    mark(set.delete)
                );
            }
        }
        Commands::Check { user, entity_type, action, resource, creator } => {
            let mut request = GuardRequest::new(entity_type, action).created_by(creator);
            request.resource_id = resource.as_deref();
            let decision = snapshot.authorize_user(user, request);
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }
        Commands::Validate => {
            let issues = snapshot.membership_issues();
            for issue in &issues {
                println!("{issue}");
            }
            if !issues.is_empty() {
                anyhow::bail!("{} inconsistencies found", issues.len());
            }
            println!("snapshot is consistent");
        }
    }

    Ok(())
}

fn mark(granted: bool) -> &'static str {
    if granted {
        "yes"
    } else {
        "-"
    }
}
