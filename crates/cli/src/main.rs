use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use soter_api::{EnvironmentInfo, SoterClient, fetch_aid_packages};
use soter_health::{HealthMonitor, HealthStatus};
use tracing::Level;

#[derive(Parser)]
#[command(name = "soter", about = "Soter aid-package tracking client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check backend health
    Health {
        /// Keep polling and print every status change until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// List tracked aid packages
    Packages {
        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
    },
    /// Show the deployment environment this client targets
    Env,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let client = SoterClient::from_env()?;

    match cli.command {
        Command::Health { watch } => run_health(client, watch).await,
        Command::Packages { json } => run_packages(&client, json).await,
        Command::Env => run_env(&client),
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .try_init();
}

async fn run_health(client: SoterClient, watch: bool) -> Result<()> {
    let handle = HealthMonitor::new(Arc::new(client)).spawn();
    let mut updates = handle.subscribe();

    // First completed cycle.
    updates.changed().await?;
    print_status(&handle.status());

    if watch {
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                changed = updates.changed() => {
                    changed?;
                    print_status(&handle.status());
                }
            }
        }
    }

    handle.stop().await
}

fn print_status(status: &HealthStatus) {
    let version = status
        .data
        .as_ref()
        .and_then(|s| s.version.as_deref())
        .unwrap_or("-");
    let service = status
        .data
        .as_ref()
        .and_then(|s| s.service.as_deref())
        .unwrap_or("-");
    let checked = status
        .last_checked
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());

    match &status.error {
        Some(error) => println!("{}  {service} {version}  checked {checked}  ({error})", status.state),
        None => println!("{}  {service} {version}  checked {checked}", status.state),
    }
}

async fn run_packages(client: &SoterClient, json: bool) -> Result<()> {
    let packages = fetch_aid_packages(client).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
    } else {
        for package in &packages {
            println!("{} ({}) — {}", package.name, package.id, package.status);
        }
    }
    Ok(())
}

fn run_env(client: &SoterClient) -> Result<()> {
    let info = EnvironmentInfo::from_env();
    let config = client.config();
    println!("network:  {}", info.network);
    if let Some(env_name) = &info.env_name {
        println!("env:      {env_name}");
    }
    println!("api:      {}", config.api_url());
    println!("mocks:    {}", if config.use_mocks() { "enabled" } else { "disabled" });
    Ok(())
}
