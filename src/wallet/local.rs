//! Local signer wallet provider.
//!
//! The CLI's stand-in for a browser wallet: a private key loaded from an
//! environment variable plus an HTTP provider pinned to the configured RPC
//! endpoint.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::config::{ChainRequirement, ClientConfig, TransactionConfig};
use crate::wallet::provider::{CallRequest, TxStatus, WalletError, WalletProvider};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "CERTICHAIN_PRIVATE_KEY";

/// Wallet provider backed by a local private key.
#[derive(Clone)]
pub struct LocalWallet {
    address: Address,
    provider: Arc<dyn Provider + Send + Sync>,
    chain: ChainRequirement,
    limits: TransactionConfig,
    timeout_duration: Duration,
}

impl LocalWallet {
    /// Create a local wallet from a hex-encoded private key string.
    ///
    /// The key is parsed and held by the signing provider; it is never
    /// logged.
    pub fn from_private_key(private_key_hex: &str, config: &ClientConfig) -> Result<Self, WalletError> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| WalletError::Rejected(format!("Invalid private key format: {}", e)))?;
        let address = signer.address();

        let rpc_url: url::Url = config.chain.rpc_url.parse().map_err(|e| {
            WalletError::Rpc(format!("Invalid RPC URL '{}': {}", config.chain.rpc_url, e))
        })?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url);

        tracing::info!(
            address = %address,
            chain_id = config.chain.chain_id,
            "Local wallet initialized"
        );

        Ok(Self {
            address,
            provider: Arc::new(provider),
            chain: config.chain.clone(),
            limits: config.transaction.clone(),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        })
    }

    /// Load the wallet key from `CERTICHAIN_PRIVATE_KEY`.
    pub fn from_env(config: &ClientConfig) -> Result<Self, WalletError> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            WalletError::Rejected(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key, config)
    }

    /// The signer's address.
    pub fn address(&self) -> Address {
        self.address
    }
}

impl WalletProvider for LocalWallet {
    async fn get_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(vec![self.address])
    }

    // A local key needs no consent prompt; the account is always available.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(vec![self.address])
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        match timeout(self.timeout_duration, self.provider.get_chain_id()).await {
            Ok(Ok(id)) => Ok(id),
            Ok(Err(e)) => Err(WalletError::Rpc(e.to_string())),
            Err(_) => Err(WalletError::Rpc(format!(
                "RPC timeout after {} seconds",
                self.timeout_duration.as_secs()
            ))),
        }
    }

    // The signer is pinned to one RPC endpoint; a switch succeeds only when
    // the endpoint already serves the requested chain.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        let current = self.chain_id().await?;
        if current == chain_id {
            Ok(())
        } else {
            Err(WalletError::Rpc(format!(
                "endpoint {} serves chain {:#x}, cannot switch to {:#x}",
                self.chain.rpc_url, current, chain_id
            )))
        }
    }

    async fn add_chain(&self, chain: &ChainRequirement) -> Result<(), WalletError> {
        Err(WalletError::Rejected(format!(
            "local signer cannot register chain '{}'",
            chain.chain_name
        )))
    }

    async fn sign_and_send(&self, call: CallRequest) -> Result<TxHash, WalletError> {
        let gas_price = match timeout(self.timeout_duration, self.provider.get_gas_price()).await {
            Ok(Ok(price)) => price,
            Ok(Err(e)) => return Err(WalletError::Rpc(e.to_string())),
            Err(_) => return Err(WalletError::Rpc("gas price query timed out".to_string())),
        };

        let gas_price_gwei = gas_price / 1_000_000_000;
        if gas_price_gwei > self.limits.max_gas_price_gwei as u128 {
            return Err(WalletError::Rejected(format!(
                "gas price {} gwei exceeds maximum {} gwei",
                gas_price_gwei, self.limits.max_gas_price_gwei
            )));
        }

        // Safety margin; nonce and gas limit are filled from the node.
        let adjusted_gas_price = (gas_price as f64 * self.limits.gas_price_multiplier) as u128;

        let tx = TransactionRequest::default()
            .with_from(self.address)
            .with_to(call.to)
            .with_value(call.value)
            .with_input(call.input)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(self.chain.chain_id);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| WalletError::Rpc(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        tracing::debug!(tx_hash = %tx_hash, "Transaction broadcast");
        Ok(tx_hash)
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<TxStatus, WalletError> {
        let required = self.limits.confirmation_blocks;
        let deadline = Duration::from_secs(self.limits.confirmation_timeout_secs);
        let poll_interval = Duration::from_secs(2);

        let result = timeout(deadline, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self
                    .provider
                    .get_transaction_receipt(tx_hash)
                    .await
                    .map_err(|e| WalletError::Rpc(e.to_string()))?
                {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Ok(TxStatus::Reverted("transaction reverted".to_string()));
                }

                let current_block = self
                    .provider
                    .get_block_number()
                    .await
                    .map_err(|e| WalletError::Rpc(e.to_string()))?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations >= required {
                    return Ok(TxStatus::Confirmed { block_number: tx_block });
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(WalletError::Rpc(format!(
                "transaction not confirmed after {} seconds",
                self.limits.confirmation_timeout_secs
            ))),
        }
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .field("rpc_url", &self.chain.rpc_url)
            .field("chain_id", &self.chain.chain_id)
            .finish()
    }
}
