//! Dashboard projection.

use crate::error::ClientResult;
use crate::ledger::contract::LedgerReads;
use crate::ledger::types::Dashboard;

/// Load the dashboard figures.
///
/// All-or-nothing: any failed read fails the whole record, so the caller
/// never renders a partial update.
pub async fn load_dashboard<L: LedgerReads>(ledger: &L) -> ClientResult<Dashboard> {
    let certificate_count = ledger.certificate_count().await?;
    let issue_fee = ledger.issue_fee().await?;
    let request_fee = ledger.request_fee().await?;

    Ok(Dashboard {
        certificate_count,
        issue_fee,
        request_fee,
    })
}
