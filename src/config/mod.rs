//! Configuration management.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the chain requirement in particular is
//!   never mutated at runtime
//! - All fields have defaults matching the local Hardhat deployment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ChainRequirement;
pub use schema::ClientConfig;
pub use schema::NativeCurrency;
pub use schema::TransactionConfig;
