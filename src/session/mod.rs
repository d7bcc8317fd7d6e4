//! Wallet session subsystem.
//!
//! # Data Flow
//! ```text
//! persisted intent (persist.rs)
//!     → manager.rs (restore / connect / disconnect transitions)
//!     → state.rs (the Session record, single-writer)
//!     → notices out to the presentation layer
//! ```

pub mod manager;
pub mod persist;
pub mod state;

pub use manager::SessionManager;
pub use persist::{FileStore, MemoryStore, PersistStore};
pub use state::{ConnectionState, Session};
