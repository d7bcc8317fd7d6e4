//! Ledger contract read surface.
//!
//! # Responsibilities
//! - Encode read calls and decode their returns
//! - Bound every RPC call with the configured timeout
//! - Construct disposable read-only bindings for wallet-less lookups

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::ledger::bindings::CertiChain;
use crate::ledger::types::VerificationResult;

/// Read-only calls against the ledger contract.
#[allow(async_fn_in_trait)]
pub trait LedgerReads {
    /// Whether `account` is registered in the admin registry.
    async fn is_admin(&self, account: Address) -> ClientResult<bool>;

    /// Look up a certificate by identifier.
    async fn verify_certificate(&self, certificate_id: &str) -> ClientResult<VerificationResult>;

    /// Total number of certificates issued.
    async fn certificate_count(&self) -> ClientResult<u64>;

    /// Current fee for issuing a certificate, in the smallest currency unit.
    async fn issue_fee(&self) -> ClientResult<U256>;

    /// Current fee for requesting a certificate.
    async fn request_fee(&self) -> ClientResult<U256>;

    /// Contract address; the target of write submissions.
    fn address(&self) -> Address;
}

/// Ledger contract binding over a JSON-RPC provider.
#[derive(Clone)]
pub struct LedgerContract {
    provider: Arc<dyn Provider + Send + Sync>,
    address: Address,
    timeout_duration: Duration,
}

impl LedgerContract {
    /// Bind the contract through an existing provider.
    pub fn new(
        provider: Arc<dyn Provider + Send + Sync>,
        address: Address,
        rpc_timeout_secs: u64,
    ) -> Self {
        Self {
            provider,
            address,
            timeout_duration: Duration::from_secs(rpc_timeout_secs),
        }
    }

    /// Bind the contract through a fresh provider against the configured RPC
    /// endpoint. Requires no wallet; used for read paths and as the
    /// disposable fallback of the verification reader.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let rpc_url: url::Url = config.chain.rpc_url.parse().map_err(|e| {
            ClientError::ReadFailed(format!("Invalid RPC URL '{}': {}", config.chain.rpc_url, e))
        })?;

        let provider =
            Arc::new(ProviderBuilder::new().connect_http(rpc_url)) as Arc<dyn Provider + Send + Sync>;

        Ok(Self::new(provider, config.ledger_address()?, config.rpc_timeout_secs))
    }

    /// Issue one read call and decode its return, bounded by the timeout.
    async fn read<C: SolCall>(&self, call: C) -> ClientResult<C::Return> {
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(call.abi_encode());

        let bytes = match timeout(self.timeout_duration, self.provider.call(tx)).await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => return Err(ClientError::ReadFailed(e.to_string())),
            Err(_) => {
                return Err(ClientError::ReadFailed(format!(
                    "RPC timeout after {} seconds",
                    self.timeout_duration.as_secs()
                )))
            }
        };

        C::abi_decode_returns(&bytes)
            .map_err(|e| ClientError::ReadFailed(format!("malformed response: {}", e)))
    }
}

impl LedgerReads for LedgerContract {
    async fn is_admin(&self, account: Address) -> ClientResult<bool> {
        self.read(CertiChain::adminsCall { account }).await
    }

    async fn verify_certificate(&self, certificate_id: &str) -> ClientResult<VerificationResult> {
        let ret = self
            .read(CertiChain::verifyCertificateCall {
                certificateHash: certificate_id.to_string(),
            })
            .await?;

        Ok(VerificationResult {
            exists: ret.exists,
            student: ret.student,
            institution: ret.institution,
            issued_at: u64::try_from(ret.issuedAt).map_err(|_| {
                ClientError::ReadFailed("issuance timestamp out of range".to_string())
            })?,
        })
    }

    async fn certificate_count(&self) -> ClientResult<u64> {
        let count = self.read(CertiChain::certificateCountCall {}).await?;
        u64::try_from(count)
            .map_err(|_| ClientError::ReadFailed("certificate count out of range".to_string()))
    }

    async fn issue_fee(&self) -> ClientResult<U256> {
        self.read(CertiChain::issueFeeCall {}).await
    }

    async fn request_fee(&self) -> ClientResult<U256> {
        self.read(CertiChain::requestFeeCall {}).await
    }

    fn address(&self) -> Address {
        self.address
    }
}

impl std::fmt::Debug for LedgerContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerContract")
            .field("address", &self.address)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
