//! Transaction submission subsystem.

pub mod orchestrator;
pub mod types;

pub use orchestrator::TransactionOrchestrator;
pub use types::{Operation, PendingTransaction};
