//! Session state record.
//!
//! # States
//! - Disconnected: no account, no privilege
//! - Connecting: accounts obtained, chain not yet verified
//! - Connected: account bound, admin flag resolved
//!
//! # State Transitions
//! ```text
//! Disconnected → Connecting: accounts obtained from the provider
//! Connecting → Connected: chain verified and capability resolved
//! Connecting → Disconnected: chain guard failure aborts the attempt
//! Connected → Disconnected: explicit disconnect or empty account set
//! ```
//!
//! The account and admin flag are defined if and only if the state is
//! Connected; every transition updates them together with the state flag.

use alloy::primitives::Address;

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// The single mutable record of client identity.
///
/// Owned exclusively by the session manager; all transitions go through the
/// crate-private methods below, never raw field writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: ConnectionState,
    account: Option<Address>,
    is_admin: bool,
    persist_intent: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            account: None,
            is_admin: false,
            persist_intent: false,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Active account; present only while Connected.
    pub fn account(&self) -> Option<Address> {
        self.account
    }

    /// Admin flag; meaningful only while Connected.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Whether a silent reconnect should be attempted on next load.
    pub fn persist_intent(&self) -> bool {
        self.persist_intent
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub(crate) fn begin_connecting(&mut self) {
        self.state = ConnectionState::Connecting;
        self.account = None;
        self.is_admin = false;
    }

    pub(crate) fn complete_connect(&mut self, account: Address, is_admin: bool) {
        self.state = ConnectionState::Connected;
        self.account = Some(account);
        self.is_admin = is_admin;
        self.persist_intent = true;
    }

    /// Back to Disconnected, keeping the reconnect intent. Used by
    /// external-change invalidation, where the intent must survive the reset.
    pub(crate) fn reset(&mut self) {
        self.state = ConnectionState::Disconnected;
        self.account = None;
        self.is_admin = false;
    }

    /// Back to Disconnected with the reconnect intent cleared.
    pub(crate) fn clear(&mut self) {
        self.reset();
        self.persist_intent = false;
    }

    pub(crate) fn set_persist_intent(&mut self, intent: bool) {
        self.persist_intent = intent;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
