//! Chain identity enforcement.

pub mod guard;

pub use guard::ensure_chain;
