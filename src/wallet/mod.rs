//! Wallet provider abstraction and implementations.
//!
//! # Data Flow
//! ```text
//! session manager ──┬─> provider.rs (trait: accounts, chain, signing)
//!                   └─> local.rs (env-key signer for the CLI)
//! tests             ──> programmable mock in tests/common
//! ```

pub mod local;
pub mod provider;

pub use local::LocalWallet;
pub use provider::{CallRequest, TxStatus, WalletError, WalletEvent, WalletProvider};
