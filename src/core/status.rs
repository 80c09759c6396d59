/// Shared node-data cache and the periodic refresh unit of work

use std::sync::Mutex;

use crate::core::logbuf::LogBuffer;
use crate::core::records::{
    Channel, Invoice, NodeInfo, Payment, Peer, PendingChannel, WalletBalance, WalletTx,
};
use crate::core::source::{NodeSource, SourceError};
use crate::screens::ViewId;

/// Everything the views render from, plus the active-view identifier.
/// Shared between the render loop and the refresh task behind one mutex;
/// the guard is only ever held to merge or snapshot, never across I/O.
#[derive(Debug, Clone)]
pub struct NodeStatus {
    pub active: ViewId,
    pub node_info: Option<NodeInfo>,
    pub balance: Option<WalletBalance>,
    pub channels: Vec<Channel>,
    pub peers: Vec<Peer>,
    pub pending_channels: Vec<PendingChannel>,
    pub payments: Vec<Payment>,
    pub invoices: Vec<Invoice>,
    pub transactions: Vec<WalletTx>,
}

impl NodeStatus {
    pub fn new(active: ViewId) -> Self {
        Self {
            active,
            node_info: None,
            balance: None,
            channels: Vec::new(),
            peers: Vec::new(),
            pending_channels: Vec::new(),
            payments: Vec::new(),
            invoices: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

fn ok_or_log<T>(result: Result<T, SourceError>, logs: &LogBuffer, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            logs.error(format!("{}: {}", what, e));
            None
        }
    }
}

/// One refresh cycle: node identity and balance always, plus exactly the
/// dataset the active view needs. All network calls complete before the
/// lock is taken; a failed call is logged and leaves the previous data
/// stale until the next tick.
pub async fn refresh_once(source: &dyn NodeSource, shared: &Mutex<NodeStatus>, logs: &LogBuffer) {
    let active = shared.lock().expect("status lock poisoned").active;

    let node_info = ok_or_log(source.get_node_info().await, logs, "getinfo");
    let balance = ok_or_log(source.get_wallet_balance().await, logs, "walletbalance");

    let mut channels = None;
    let mut peers = None;
    let mut pending = None;
    let mut payments = None;
    let mut invoices = None;
    let mut transactions = None;
    match active {
        ViewId::Channels => {
            channels = ok_or_log(source.list_channels().await, logs, "listchannels");
        }
        ViewId::Peers => {
            peers = ok_or_log(source.list_peers().await, logs, "listpeers");
        }
        ViewId::PendingChannels => {
            pending = ok_or_log(source.list_pending_channels().await, logs, "pendingchannels");
        }
        ViewId::Payments => {
            payments = ok_or_log(source.list_payments().await, logs, "listpayments");
        }
        ViewId::Invoices => {
            invoices = ok_or_log(source.list_invoices().await, logs, "listinvoices");
        }
        ViewId::WalletTxs => {
            transactions = ok_or_log(
                source.list_wallet_transactions().await,
                logs,
                "listchaintxns",
            );
        }
        // The logs view renders the sink itself; nothing to fetch.
        ViewId::Logs => {}
    }

    let mut status = shared.lock().expect("status lock poisoned");
    if let Some(v) = node_info {
        status.node_info = Some(v);
    }
    if let Some(v) = balance {
        status.balance = Some(v);
    }
    if let Some(v) = channels {
        status.channels = v;
    }
    if let Some(v) = peers {
        status.peers = v;
    }
    if let Some(v) = pending {
        status.pending_channels = v;
    }
    if let Some(v) = payments {
        status.payments = v;
    }
    if let Some(v) = invoices {
        status.invoices = v;
    }
    if let Some(v) = transactions {
        status.transactions = v;
    }
}
