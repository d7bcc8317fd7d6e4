//! CertiChain client library: wallet session and transaction orchestration.

pub mod chain;
pub mod config;
pub mod error;
pub mod ledger;
pub mod notify;
pub mod session;
pub mod tx;
pub mod wallet;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::SessionManager;
pub use tx::TransactionOrchestrator;
