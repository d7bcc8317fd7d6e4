//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files. Every
//! field has a default so a minimal (or absent) config file works against a
//! local Hardhat deployment.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Ledger contract address (hex).
    pub contract_address: String,

    /// Required chain identity. Consumed by the network guard; never mutated
    /// at runtime.
    pub chain: ChainRequirement,

    /// Transaction submission limits and confirmation policy.
    pub transaction: TransactionConfig,

    /// Path of the persisted reconnect-intent record.
    pub persist_path: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            chain: ChainRequirement::default(),
            transaction: TransactionConfig::default(),
            persist_path: "certichain-session.json".to_string(),
            rpc_timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Parsed ledger contract address.
    pub fn ledger_address(&self) -> ClientResult<Address> {
        self.contract_address.parse().map_err(|_| {
            ClientError::InvalidInput(format!(
                "invalid contract address '{}'",
                self.contract_address
            ))
        })
    }
}

/// Identity of the chain the client must be talking to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainRequirement {
    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Hardhat).
    pub chain_id: u64,

    /// Display name presented when registering the chain with a wallet.
    pub chain_name: String,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Native currency descriptor.
    pub native_currency: NativeCurrency,
}

impl Default for ChainRequirement {
    fn default() -> Self {
        Self {
            chain_id: 31337,
            chain_name: "Hardhat Local".to_string(),
            rpc_url: "http://127.0.0.1:8545".to_string(),
            native_currency: NativeCurrency::default(),
        }
    }
}

/// Native currency of the required chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCurrency {
    fn default() -> Self {
        Self {
            name: "Ether".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        }
    }
}

/// Transaction submission limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Number of block confirmations required for finality.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for confirmation, in seconds.
    pub confirmation_timeout_secs: u64,

    /// Gas price multiplier (1.0 = estimated, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            confirmation_blocks: 1,
            confirmation_timeout_secs: 120,
            gas_price_multiplier: 1.0,
            max_gas_price_gwei: 500,
        }
    }
}
