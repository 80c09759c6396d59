mod app;
mod cli;
mod core;
mod keys;
mod screens;
mod theme;
mod utils;
mod widgets;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use app::App;
use cli::{Cli, Commands};
use crate::core::client::LndRestClient;
use crate::core::source::NodeSource;
use utils::group_thousands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config = cli.client_config();
    let client = LndRestClient::new(&config).context("cannot set up the lnd connection")?;

    match cli.command {
        None => {
            // No command - run the interactive dashboard
            let mut app = App::new(Arc::new(client), cli.refresh)?;
            app.run().await?;
        }
        Some(Commands::Status) => {
            handle_status(&client).await?;
        }
        Some(Commands::NewAddress { kind }) => {
            handle_newaddress(&client, &kind).await?;
        }
    }

    Ok(())
}

/// Without a log file tracing stays uninitialized: stdout belongs to the
/// dashboard, and events are dropped at no cost.
fn init_tracing(cli: &Cli) -> Result<()> {
    if let Some(ref path) = cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .init();
    }
    Ok(())
}

async fn handle_status(client: &LndRestClient) -> Result<()> {
    let info = client.get_node_info().await?;
    let balance = client.get_wallet_balance().await?;

    println!("{} ({})\n", info.alias, info.identity_pubkey);
    println!("{:<22} {}", "Version", info.version);
    println!(
        "{:<22} {}",
        "Block height",
        group_thousands(info.block_height as i64)
    );
    println!(
        "{:<22} {}",
        "Synced to chain",
        if info.synced_to_chain { "yes" } else { "no" }
    );
    println!("{:<22} {}", "Peers", info.num_peers);
    println!(
        "{:<22} {} active, {} pending",
        "Channels", info.num_active_channels, info.num_pending_channels
    );
    println!(
        "{:<22} {} sat",
        "Confirmed balance",
        group_thousands(balance.confirmed_balance)
    );
    println!(
        "{:<22} {} sat",
        "Unconfirmed balance",
        group_thousands(balance.unconfirmed_balance)
    );

    Ok(())
}

async fn handle_newaddress(client: &LndRestClient, kind: &str) -> Result<()> {
    let address = client.new_wallet_address(kind).await?;
    println!("{}", address);
    Ok(())
}
