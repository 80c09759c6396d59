/// Node data source seam: everything the dashboard knows how to ask a
/// remote daemon for, behind one trait so refresh logic is testable.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::records::{
    Channel, Invoice, NodeInfo, Payment, Peer, PendingChannel, WalletBalance, WalletTx,
};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("daemon returned {status}: {message}")]
    Daemon { status: u16, message: String },
    #[error("credentials: {0}")]
    Credentials(String),
    #[error("unsupported address type: {0}")]
    AddressType(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NodeSource: Send + Sync {
    async fn get_node_info(&self) -> Result<NodeInfo, SourceError>;
    async fn get_wallet_balance(&self) -> Result<WalletBalance, SourceError>;
    async fn list_channels(&self) -> Result<Vec<Channel>, SourceError>;
    async fn list_peers(&self) -> Result<Vec<Peer>, SourceError>;
    async fn list_pending_channels(&self) -> Result<Vec<PendingChannel>, SourceError>;
    async fn list_invoices(&self) -> Result<Vec<Invoice>, SourceError>;
    async fn list_payments(&self) -> Result<Vec<Payment>, SourceError>;
    async fn list_wallet_transactions(&self) -> Result<Vec<WalletTx>, SourceError>;
    async fn new_wallet_address(&self, kind: &str) -> Result<String, SourceError>;
}
