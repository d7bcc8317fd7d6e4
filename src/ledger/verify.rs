//! Certificate verification reader.
//!
//! Usable with or without a session: a connected caller passes its own
//! contract binding, a wallet-less caller relies on a disposable read-only
//! binding constructed per call.

use crate::error::{ClientError, ClientResult};
use crate::ledger::contract::LedgerReads;
use crate::ledger::types::VerificationResult;

/// Read-only certificate lookups.
pub struct VerificationReader<L, F>
where
    F: Fn() -> ClientResult<L>,
{
    binding_factory: F,
}

impl<L, F> VerificationReader<L, F>
where
    L: LedgerReads,
    F: Fn() -> ClientResult<L>,
{
    /// `binding_factory` builds the disposable read-only binding used when no
    /// session binding is supplied.
    pub fn new(binding_factory: F) -> Self {
        Self { binding_factory }
    }

    /// Look up a certificate. Never requires a wallet, never mutates session
    /// state. An unknown identifier is a successful `exists: false` result.
    pub async fn verify(
        &self,
        session_binding: Option<&L>,
        certificate_id: &str,
    ) -> ClientResult<VerificationResult> {
        if certificate_id.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "certificate identifier is required".to_string(),
            ));
        }

        match session_binding {
            Some(ledger) => ledger.verify_certificate(certificate_id).await,
            None => {
                let ledger = (self.binding_factory)()?;
                ledger.verify_certificate(certificate_id).await
            }
        }
    }
}
