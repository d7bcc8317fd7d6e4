//! Session lifecycle management.
//!
//! # Responsibilities
//! - Own the [`Session`] record; every mutation goes through here
//! - Drive the connect path: accounts → chain guard → capability → data
//! - Restore a prior session silently on load
//! - Handle external account/chain changes by invalidating wholesale
//!
//! Within one connect the ordering is strict: the chain guard runs before
//! capability resolution, which runs before the session is marked Connected.
//! No consumer ever observes a Connected session with an unresolved admin
//! flag.

use alloy::primitives::Address;

use crate::chain::guard;
use crate::config::ChainRequirement;
use crate::error::{ClientError, ClientResult};
use crate::ledger::admin::resolve_admin;
use crate::ledger::contract::LedgerReads;
use crate::ledger::dashboard::load_dashboard;
use crate::ledger::types::Dashboard;
use crate::notify::{Notice, NoticeSender};
use crate::session::persist::PersistStore;
use crate::session::state::Session;
use crate::wallet::{WalletEvent, WalletProvider};

/// Owner of the session record and its transitions.
pub struct SessionManager<P, L, S>
where
    P: WalletProvider,
    L: LedgerReads,
    S: PersistStore,
{
    /// `None` when no wallet capability was detected at startup.
    provider: Option<P>,
    ledger: L,
    store: S,
    chain: ChainRequirement,
    session: Session,
    dashboard: Option<Dashboard>,
    notices: NoticeSender,
}

impl<P, L, S> SessionManager<P, L, S>
where
    P: WalletProvider,
    L: LedgerReads,
    S: PersistStore,
{
    pub fn new(
        provider: Option<P>,
        ledger: L,
        store: S,
        chain: ChainRequirement,
        notices: NoticeSender,
    ) -> Self {
        let mut session = Session::new();
        session.set_persist_intent(store.load_intent());

        Self {
            provider,
            ledger,
            store,
            chain,
            session,
            dashboard: None,
            notices,
        }
    }

    /// Current session record.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Contract binding of this session, reused by the verification reader.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Last successfully loaded dashboard, if any.
    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    /// Attempt a silent reconnect when a prior session asked for one.
    ///
    /// Never prompts: uses the non-interactive account query and suppresses
    /// the success notice. On failure or an empty account list the intent is
    /// dropped and the session stays Disconnected.
    pub async fn restore_if_requested(&mut self) {
        if !self.session.persist_intent() {
            return;
        }

        let Some(provider) = self.provider.as_ref() else {
            self.drop_persist_intent();
            return;
        };

        let accounts = match provider.get_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::warn!(error = %e, "Silent account query failed");
                self.drop_persist_intent();
                return;
            }
        };

        if accounts.is_empty() {
            self.drop_persist_intent();
            return;
        }

        if let Err(e) = self.connect_with(accounts, true).await {
            tracing::warn!(error = %e, "Silent reconnect failed");
        }
    }

    /// Interactive connect; may raise the wallet provider's own UI.
    pub async fn connect(&mut self) -> ClientResult<()> {
        let Some(provider) = self.provider.as_ref() else {
            self.notify(Notice::error("No wallet provider available"));
            return Err(ClientError::NoWalletProvider);
        };

        // A rejected or failed prompt leaves us with no usable account.
        let accounts = match provider.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::warn!(error = %e, "Account request failed");
                self.notify(Notice::error(format!("Failed to connect wallet: {}", e)));
                return Err(ClientError::NoAccount);
            }
        };

        self.connect_with(accounts, false).await
    }

    /// Shared connect path for the interactive and silent flows.
    async fn connect_with(&mut self, accounts: Vec<Address>, silent: bool) -> ClientResult<()> {
        let Some(provider) = self.provider.as_ref() else {
            self.notify(Notice::error("No wallet provider available"));
            return Err(ClientError::NoWalletProvider);
        };

        let Some(&account) = accounts.first() else {
            self.notify(Notice::warning("Wallet returned no accounts"));
            return Err(ClientError::NoAccount);
        };

        self.session.begin_connecting();

        if let Err(e) = guard::ensure_chain(provider, &self.chain).await {
            self.session.clear();
            self.store.store_intent(false);
            self.dashboard = None;
            self.notify(Notice::error(format!("Failed to connect wallet: {}", e)));
            return Err(e);
        }

        // Resolution failures default to non-admin without aborting the
        // connection; a failed dashboard load is equally non-fatal.
        let is_admin = resolve_admin(&self.ledger, account).await;
        self.dashboard = match load_dashboard(&self.ledger).await {
            Ok(dashboard) => Some(dashboard),
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard refresh failed");
                None
            }
        };

        self.session.complete_connect(account, is_admin);
        self.store.store_intent(true);

        tracing::info!(account = %account, is_admin = is_admin, "Wallet connected");
        if !silent {
            self.notify(Notice::success("Wallet connected successfully"));
        }

        Ok(())
    }

    /// Reset to Disconnected. Idempotent.
    pub fn disconnect(&mut self, silent: bool) {
        self.session.clear();
        self.store.store_intent(false);
        self.dashboard = None;

        if !silent {
            self.notify(Notice::info("Wallet disconnected"));
        }
    }

    /// Inbound provider event dispatch.
    pub async fn handle_wallet_event(&mut self, event: WalletEvent) {
        match event {
            WalletEvent::AccountsChanged(accounts) => self.on_accounts_changed(accounts).await,
            WalletEvent::ChainChanged => self.on_chain_changed().await,
        }
    }

    /// The provider's account set changed outside our control.
    pub async fn on_accounts_changed(&mut self, accounts: Vec<Address>) {
        if accounts.is_empty() {
            self.disconnect(false);
            return;
        }

        // A different active account invalidates the session wholesale:
        // cached admin state and signing identity no longer apply.
        if self.session.account() != accounts.first().copied() {
            self.invalidate_and_restore().await;
        }
    }

    /// The provider's active chain changed outside our control. Admin status,
    /// contract bindings and cached fees may all be chain-specific, so the
    /// whole client state is rebuilt.
    pub async fn on_chain_changed(&mut self) {
        self.invalidate_and_restore().await;
    }

    /// Re-read the dashboard figures. All-or-nothing: on failure the cached
    /// dashboard is dropped rather than partially updated.
    pub async fn refresh_dashboard(&mut self) -> ClientResult<Dashboard> {
        match load_dashboard(&self.ledger).await {
            Ok(dashboard) => {
                self.dashboard = Some(dashboard.clone());
                Ok(dashboard)
            }
            Err(e) => {
                self.dashboard = None;
                Err(e)
            }
        }
    }

    /// In-process equivalent of the page reload a browser client performs on
    /// external changes: drop all derived state, then rerun the silent
    /// restore path.
    async fn invalidate_and_restore(&mut self) {
        tracing::info!("External wallet change, invalidating client state");
        self.session.reset();
        self.dashboard = None;
        self.restore_if_requested().await;
    }

    fn drop_persist_intent(&mut self) {
        self.session.set_persist_intent(false);
        self.store.store_intent(false);
    }

    fn notify(&self, notice: Notice) {
        // The receiver may already be gone during shutdown.
        let _ = self.notices.send(notice);
    }
}
