/// CLI argument parsing and command handling

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::client::ClientConfig;

#[derive(Parser)]
#[command(name = "lndash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// host:port of the lnd REST endpoint
    #[arg(long, default_value = "localhost:8080")]
    pub rpcserver: String,

    /// Path to lnd's base directory (resolves cert and macaroon defaults)
    #[arg(long)]
    pub lnddir: Option<PathBuf>,

    /// Path to the daemon's TLS certificate
    #[arg(long)]
    pub tlscertpath: Option<PathBuf>,

    /// Path to the admin macaroon
    #[arg(long)]
    pub macaroonpath: Option<PathBuf>,

    /// Connect without macaroon authentication
    #[arg(long)]
    pub no_macaroons: bool,

    /// Seconds between background data refreshes
    #[arg(short = 'r', long, default_value_t = 60)]
    pub refresh: u64,

    /// Append diagnostic output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show node status
    Status,

    /// Generate a new wallet address
    NewAddress {
        /// Address type (p2wkh, np2wkh or p2tr)
        #[arg(short, long, default_value = "np2wkh")]
        kind: String,
    },
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            rpcserver: self.rpcserver.clone(),
            lnddir: self.lnddir.clone(),
            tlscertpath: self.tlscertpath.clone(),
            macaroonpath: self.macaroonpath.clone(),
            no_macaroons: self.no_macaroons,
        }
    }
}
