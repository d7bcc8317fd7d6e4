//! Durable reconnect-intent record.
//!
//! The only state that survives restarts is one boolean: "attempt a silent
//! reconnect on next load". Store failures are logged and otherwise ignored;
//! losing the flag degrades to an explicit reconnect, never to an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Store for the single persisted client value.
pub trait PersistStore {
    /// Whether the user asked to stay connected.
    fn load_intent(&self) -> bool;

    /// Record the reconnect intent.
    fn store_intent(&self, intent: bool);
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    wallet_connected: bool,
}

/// JSON file-backed store used by the CLI.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PersistStore for FileStore {
    fn load_intent(&self) -> bool {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return false;
        };
        serde_json::from_str::<PersistedState>(&content)
            .map(|state| state.wallet_connected)
            .unwrap_or(false)
    }

    fn store_intent(&self, intent: bool) {
        let state = PersistedState { wallet_connected: intent };
        let json = match serde_json::to_string(&state) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode session record");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write session record");
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    intent: AtomicBool,
}

impl PersistStore for MemoryStore {
    fn load_intent(&self) -> bool {
        self.intent.load(Ordering::SeqCst)
    }

    fn store_intent(&self, intent: bool) {
        self.intent.store(intent, Ordering::SeqCst);
    }
}
