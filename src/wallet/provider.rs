//! Wallet provider interface.
//!
//! The wallet holds key custody and performs chain switching and transaction
//! signing on the user's behalf. The session layer only ever talks to this
//! trait; production code plugs in the local signer, tests plug in a
//! programmable mock.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use thiserror::Error;

use crate::config::ChainRequirement;

/// Errors produced by a wallet provider.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The provider does not recognize the requested chain (EIP-3085 signal,
    /// MetaMask error code 4902). Recoverable once via chain addition.
    #[error("Unrecognized chain {0:#x}")]
    UnrecognizedChain(u64),

    /// The user or provider rejected the request.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Transport or RPC failure.
    #[error("Provider error: {0}")]
    Rpc(String),
}

/// One fee-bearing contract call, ready to sign.
#[derive(Debug, Clone)]
pub struct CallRequest {
    /// Target contract.
    pub to: Address,

    /// Native value transferred with the call (the required fee).
    pub value: U256,

    /// ABI-encoded calldata.
    pub input: Bytes,
}

/// Settled state of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    /// Included with the required confirmation depth and succeeded.
    Confirmed { block_number: u64 },

    /// Included but reverted, with the provider's reason text.
    Reverted(String),
}

/// External account/chain changes reported by the provider.
///
/// These are inbound messages for [`crate::session::SessionManager`], not
/// callbacks; the host forwards them so every state mutation path stays
/// enumerable.
#[derive(Debug, Clone)]
pub enum WalletEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged,
}

/// Interface to the external wallet.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Accounts already exposed to this client. Never prompts.
    async fn get_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Interactive account request; may raise the provider's own UI.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Identity of the chain the provider is currently on.
    async fn chain_id(&self) -> Result<u64, WalletError>;

    /// Switch the provider to the given chain.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError>;

    /// Register a chain the provider does not know yet.
    async fn add_chain(&self, chain: &ChainRequirement) -> Result<(), WalletError>;

    /// Sign and broadcast a call; returns the submission handle.
    async fn sign_and_send(&self, call: CallRequest) -> Result<TxHash, WalletError>;

    /// Block the logical operation until the transaction settles.
    async fn confirm(&self, tx_hash: TxHash) -> Result<TxStatus, WalletError>;
}
