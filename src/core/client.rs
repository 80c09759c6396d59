/// REST client for the lnd daemon

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Certificate, Client};
use serde::de::DeserializeOwned;

use crate::core::records::*;
use crate::core::source::{NodeSource, SourceError};
use crate::utils::encode_hex;

const MACAROON_HEADER: &str = "Grpc-Metadata-macaroon";
const DEFAULT_MACAROON: &str = "data/chain/bitcoin/mainnet/admin.macaroon";
const DEFAULT_TLS_CERT: &str = "tls.cert";

/// Connection parameters resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// host:port of the daemon's REST endpoint
    pub rpcserver: String,
    pub lnddir: Option<PathBuf>,
    pub tlscertpath: Option<PathBuf>,
    pub macaroonpath: Option<PathBuf>,
    pub no_macaroons: bool,
}

impl ClientConfig {
    fn macaroon_path(&self) -> Option<PathBuf> {
        self.macaroonpath.clone().or_else(|| {
            self.lnddir
                .as_ref()
                .map(|dir| dir.join(DEFAULT_MACAROON))
        })
    }

    fn tls_cert_path(&self) -> Option<PathBuf> {
        self.tlscertpath
            .clone()
            .or_else(|| self.lnddir.as_ref().map(|dir| dir.join(DEFAULT_TLS_CERT)))
    }
}

pub struct LndRestClient {
    http: Client,
    base: String,
    macaroon: Option<String>,
}

/// Read a macaroon file and hex-encode it for the auth header.
pub fn load_macaroon(path: &Path) -> Result<String, SourceError> {
    let bytes = std::fs::read(path)
        .map_err(|e| SourceError::Credentials(format!("{}: {}", path.display(), e)))?;
    Ok(encode_hex(&bytes))
}

/// Map a user-facing address type to the lnd REST enum value.
pub fn address_type_param(kind: &str) -> Result<u32, SourceError> {
    match kind {
        "p2wkh" => Ok(0),
        "np2wkh" => Ok(1),
        "p2tr" => Ok(4),
        other => Err(SourceError::AddressType(other.to_string())),
    }
}

impl LndRestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, SourceError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(10));

        // Trust the daemon's own certificate when available; fall back to
        // accepting the self-signed cert the way a local tls.cert implies.
        match config.tls_cert_path() {
            Some(path) if path.exists() => {
                let pem = std::fs::read(&path)
                    .map_err(|e| SourceError::Credentials(format!("{}: {}", path.display(), e)))?;
                let cert = Certificate::from_pem(&pem)?;
                builder = builder.add_root_certificate(cert);
            }
            _ => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        let macaroon = if config.no_macaroons {
            None
        } else {
            match config.macaroon_path() {
                Some(path) => Some(load_macaroon(&path)?),
                None => None,
            }
        };

        Ok(Self {
            http: builder.build()?,
            base: format!("https://{}", config.rpcserver),
            macaroon,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let mut req = self.http.get(self.endpoint(path));
        if let Some(ref mac) = self.macaroon {
            req = req.header(MACAROON_HEADER, mac);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Daemon {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl NodeSource for LndRestClient {
    async fn get_node_info(&self) -> Result<NodeInfo, SourceError> {
        self.get("/v1/getinfo").await
    }

    async fn get_wallet_balance(&self) -> Result<WalletBalance, SourceError> {
        self.get("/v1/balance/blockchain").await
    }

    async fn list_channels(&self) -> Result<Vec<Channel>, SourceError> {
        Ok(self.get::<ChannelsResponse>("/v1/channels").await?.channels)
    }

    async fn list_peers(&self) -> Result<Vec<Peer>, SourceError> {
        Ok(self.get::<PeersResponse>("/v1/peers").await?.peers)
    }

    async fn list_pending_channels(&self) -> Result<Vec<PendingChannel>, SourceError> {
        Ok(self
            .get::<PendingChannelsResponse>("/v1/channels/pending")
            .await?
            .into_channels())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, SourceError> {
        Ok(self.get::<InvoicesResponse>("/v1/invoices").await?.invoices)
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, SourceError> {
        Ok(self.get::<PaymentsResponse>("/v1/payments").await?.payments)
    }

    async fn list_wallet_transactions(&self) -> Result<Vec<WalletTx>, SourceError> {
        Ok(self
            .get::<TransactionsResponse>("/v1/transactions")
            .await?
            .transactions)
    }

    async fn new_wallet_address(&self, kind: &str) -> Result<String, SourceError> {
        let param = address_type_param(kind)?;
        Ok(self
            .get::<NewAddressResponse>(&format!("/v1/newaddress?type={}", param))
            .await?
            .address)
    }
}
