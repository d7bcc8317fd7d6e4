//! Admin capability resolution.

use alloy::primitives::Address;

use crate::ledger::contract::LedgerReads;

/// Resolve whether `account` holds admin privilege on the ledger.
///
/// Failures resolve to `false`: the flag only gates UI affordances, and the
/// contract re-checks privilege on every write. Callers must hold at least a
/// Connecting session; the resolver itself performs no session check.
pub async fn resolve_admin<L: LedgerReads>(ledger: &L, account: Address) -> bool {
    match ledger.is_admin(account).await {
        Ok(is_admin) => is_admin,
        Err(e) => {
            tracing::debug!(
                account = %account,
                error = %e,
                "Admin lookup failed, treating account as non-admin"
            );
            false
        }
    }
}
