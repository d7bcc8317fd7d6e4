//! Ledger contract integration.
//!
//! # Data Flow
//! ```text
//! bindings.rs (sol! call interface)
//!     → contract.rs (encode, timeout-bounded RPC, decode)
//!     → admin.rs (capability resolution, fail-safe to false)
//!     → dashboard.rs (all-or-nothing figures projection)
//!     → verify.rs (lookup with or without a session)
//! ```

pub mod admin;
pub mod bindings;
pub mod contract;
pub mod dashboard;
pub mod types;
pub mod verify;

pub use contract::{LedgerContract, LedgerReads};
pub use types::{Dashboard, VerificationResult};
pub use verify::VerificationReader;
