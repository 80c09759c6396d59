/// Data records returned by the lnd REST API.
///
/// lnd serializes proto3 64-bit integers as JSON strings, so the wider
/// numeric fields deserialize through `de_i64`/`de_u64` which accept both.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumOrString<T> {
    Num(T),
    Str(String),
}

pub fn de_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    match NumOrString::<i64>::deserialize(d)? {
        NumOrString::Num(n) => Ok(n),
        NumOrString::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

pub fn de_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    match NumOrString::<u64>::deserialize(d)? {
        NumOrString::Num(n) => Ok(n),
        NumOrString::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeInfo {
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub identity_pubkey: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub block_height: u32,
    #[serde(default)]
    pub num_peers: u32,
    #[serde(default)]
    pub num_active_channels: u32,
    #[serde(default)]
    pub num_pending_channels: u32,
    #[serde(default)]
    pub synced_to_chain: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletBalance {
    #[serde(default, deserialize_with = "de_i64")]
    pub total_balance: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub confirmed_balance: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub unconfirmed_balance: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub remote_pubkey: String,
    #[serde(default, deserialize_with = "de_i64")]
    pub capacity: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub local_balance: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub remote_balance: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub total_satoshis_sent: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub total_satoshis_received: i64,
    #[serde(default, deserialize_with = "de_u64")]
    pub num_updates: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Peer {
    #[serde(default)]
    pub pub_key: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "de_u64")]
    pub bytes_sent: u64,
    #[serde(default, deserialize_with = "de_u64")]
    pub bytes_recv: u64,
    #[serde(default, deserialize_with = "de_i64")]
    pub sat_sent: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub sat_recv: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub ping_time: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingChannel {
    #[serde(default)]
    pub remote_node_pub: String,
    #[serde(default)]
    pub channel_point: String,
    #[serde(default, deserialize_with = "de_i64")]
    pub capacity: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub local_balance: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub remote_balance: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub memo: String,
    #[serde(default, deserialize_with = "de_i64")]
    pub value: i64,
    #[serde(default)]
    pub settled: bool,
    #[serde(default, deserialize_with = "de_i64")]
    pub creation_date: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub settle_date: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub payment_hash: String,
    #[serde(default, deserialize_with = "de_i64")]
    pub value_sat: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub fee_sat: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub creation_date: i64,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletTx {
    #[serde(default, deserialize_with = "de_i64")]
    pub amount: i64,
    #[serde(default)]
    pub num_confirmations: i32,
    #[serde(default)]
    pub block_height: i32,
    #[serde(default, deserialize_with = "de_i64")]
    pub total_fees: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub time_stamp: i64,
    #[serde(default)]
    pub tx_hash: String,
    #[serde(default)]
    pub block_hash: String,
    #[serde(default)]
    pub dest_addresses: Vec<String>,
}

// REST list responses wrap their payloads in a single field.

#[derive(Debug, Default, Deserialize)]
pub struct ChannelsResponse {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PeersResponse {
    #[serde(default)]
    pub peers: Vec<Peer>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PendingChannelsResponse {
    #[serde(default)]
    pub pending_open_channels: Vec<PendingWrapper>,
    #[serde(default)]
    pub pending_force_closing_channels: Vec<PendingWrapper>,
    #[serde(default)]
    pub waiting_close_channels: Vec<PendingWrapper>,
}

impl PendingChannelsResponse {
    /// Flatten the per-state buckets into one display list, open first.
    pub fn into_channels(self) -> Vec<PendingChannel> {
        self.pending_open_channels
            .into_iter()
            .chain(self.pending_force_closing_channels)
            .chain(self.waiting_close_channels)
            .map(|w| w.channel)
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PendingWrapper {
    #[serde(default)]
    pub channel: PendingChannel,
}

#[derive(Debug, Default, Deserialize)]
pub struct InvoicesResponse {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentsResponse {
    #[serde(default)]
    pub payments: Vec<Payment>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default)]
    pub transactions: Vec<WalletTx>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewAddressResponse {
    #[serde(default)]
    pub address: String,
}
