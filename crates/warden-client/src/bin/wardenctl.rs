// Command-line access to the Warden policy server.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::time::Duration;
use warden_authz::{EnforceRequest, GroupingRule, PolicyRule};
use warden_client::{ClientConfig, WardenClient};

#[derive(Parser, Debug)]
#[command(name = "wardenctl")]
#[command(about = "Query and edit policies on a Warden policy server")]
struct Args {
    /// API root, including the /api prefix
    #[arg(long, env = "WARDEN_URL")]
    url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, env = "WARDEN_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up
    Health,
    /// Ask whether a user may perform an action on an object
    Can {
        #[arg(long)]
        user: String,
        #[arg(long)]
        object: String,
        #[arg(long)]
        action: String,
    },
    /// Show roles and permissions for a user
    Permissions {
        #[arg(long)]
        user: String,
    },
    /// List every policy and grouping rule
    Policies,
    /// Grant a permission to a subject
    AddPolicy {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        object: String,
        #[arg(long)]
        action: String,
    },
    /// Revoke a permission from a subject
    RemovePolicy {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        object: String,
        #[arg(long)]
        action: String,
    },
    /// Make a user (or role) inherit a role
    AddGrouping {
        #[arg(long)]
        user: String,
        #[arg(long)]
        role: String,
    },
    /// Remove a role from a user (or role)
    RemoveGrouping {
        #[arg(long)]
        user: String,
        #[arg(long)]
        role: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = ClientConfig::default();
    if let Some(url) = args.url {
        config.base_url = url;
    }
    if let Some(timeout_ms) = args.timeout_ms.filter(|value| *value > 0) {
        config.timeout = Duration::from_millis(timeout_ms);
    }
    let client = WardenClient::new(&config).context("build policy server client")?;
    tracing::debug!(base_url = %client.base_url(), "using policy server");

    match args.command {
        Command::Health => print_json(&client.health().await?),
        Command::Can {
            user,
            object,
            action,
        } => {
            let response = client
                .enforce(&EnforceRequest::new(user, object, action))
                .await
                .context("enforce request")?;
            print_json(&response)
        }
        Command::Permissions { user } => {
            let permissions = client
                .user_permissions(&user)
                .await
                .with_context(|| format!("fetch permissions for {user}"))?;
            print_json(&permissions)
        }
        Command::Policies => print_json(&client.policies().await?),
        Command::AddPolicy {
            subject,
            object,
            action,
        } => {
            let change = client
                .add_policy(&PolicyRule::new(subject, object, action))
                .await
                .context("add policy")?;
            print_json(&change)
        }
        Command::RemovePolicy {
            subject,
            object,
            action,
        } => {
            let change = client
                .remove_policy(&PolicyRule::new(subject, object, action))
                .await
                .context("remove policy")?;
            print_json(&change)
        }
        Command::AddGrouping { user, role } => {
            let change = client
                .add_grouping(&GroupingRule::new(user, role))
                .await
                .context("add grouping")?;
            print_json(&change)
        }
        Command::RemoveGrouping { user, role } => {
            let change = client
                .remove_grouping(&GroupingRule::new(user, role))
                .await
                .context("remove grouping")?;
            print_json(&change)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render response")?;
    println!("{rendered}");
    Ok(())
}
