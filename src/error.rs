//! Client error taxonomy.
//!
//! Every public operation converts provider and network failures into one of
//! these variants at its own boundary; raw transport errors never reach the
//! presentation layer.

use thiserror::Error;

/// Errors surfaced by the session and transaction layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No wallet capability detected; connection attempts fail immediately.
    #[error("No wallet provider available")]
    NoWalletProvider,

    /// The account request returned zero accounts.
    #[error("Wallet returned no accounts")]
    NoAccount,

    /// The chain switch/add sequence exhausted without success.
    #[error("Failed to switch to the required chain: {0}")]
    ChainSwitchFailed(String),

    /// A session-requiring operation was invoked while disconnected.
    #[error("Wallet is not connected")]
    NotConnected,

    /// Required field missing or malformed; no network call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The ledger contract rejected a write for lack of privilege.
    #[error("Caller lacks the required privilege: {0}")]
    PrivilegeDenied(String),

    /// The ledger contract reverted or the network rejected the submission.
    /// Carries the provider's raw reason text for display.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// A read-only query could not complete.
    #[error("Read failed: {0}")]
    ReadFailed(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
