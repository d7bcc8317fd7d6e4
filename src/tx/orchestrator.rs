//! Transaction submission pipeline.
//!
//! # Pipeline
//! ```text
//! precondition (session Connected)
//!     → input validation (before any network call)
//!     → fee fetch (fresh per submission)
//!     → sign and send (exactly one attempt)
//!     → confirmation
//!     → classification into the error taxonomy
//! ```
//!
//! Concurrent submissions are independent; nothing here serializes them (the
//! wallet provider serializes its own signing prompts).

use alloy::primitives::Address;
use alloy::sol_types::SolCall;

use crate::error::{ClientError, ClientResult};
use crate::ledger::bindings::CertiChain;
use crate::ledger::contract::LedgerReads;
use crate::notify::{Notice, NoticeSender};
use crate::session::state::Session;
use crate::tx::types::{Operation, PendingTransaction};
use crate::wallet::{CallRequest, TxStatus, WalletError, WalletProvider};

/// Revert-reason marker for privilege failures (the ledger's own require
/// message).
pub const PRIVILEGE_MARKER: &str = "Only admin";

/// Submits fee-bearing operations and classifies their outcomes.
pub struct TransactionOrchestrator<P, L>
where
    P: WalletProvider,
    L: LedgerReads,
{
    provider: P,
    ledger: L,
    notices: NoticeSender,
}

impl<P, L> TransactionOrchestrator<P, L>
where
    P: WalletProvider,
    L: LedgerReads,
{
    pub fn new(provider: P, ledger: L, notices: NoticeSender) -> Self {
        Self {
            provider,
            ledger,
            notices,
        }
    }

    /// Submit one operation and block the logical call until it settles.
    ///
    /// Exactly one submission attempt; no implicit retry. Terminal outcomes
    /// emit exactly one notice, successes additionally emit one in-progress
    /// notice before any network activity.
    pub async fn submit(&self, session: &Session, operation: Operation) -> ClientResult<()> {
        if !session.is_connected() {
            self.notify(Notice::warning("Please connect your wallet first"));
            return Err(ClientError::NotConnected);
        }

        // Validation happens strictly before any network call.
        let input = match encode_operation(&operation) {
            Ok(input) => input,
            Err(e) => {
                self.notify(Notice::warning(e.to_string()));
                return Err(e);
            }
        };

        self.notify(Notice::info("Processing transaction..."));

        match self.execute(&operation, input).await {
            Ok(pending) => {
                tracing::info!(
                    operation = pending.operation,
                    tx_hash = %pending.tx_hash,
                    fee = %pending.fee,
                    "Transaction confirmed"
                );
                self.notify(Notice::success(operation.success_text()));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(operation = operation.name(), error = %e, "Submission failed");
                self.notify(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        operation: &Operation,
        input: Vec<u8>,
    ) -> ClientResult<PendingTransaction> {
        // Fees are contract-controlled and may change between UI load and
        // submission; always re-fetch here.
        let fee = match operation {
            Operation::IssueCertificate { .. } => self.ledger.issue_fee().await?,
            Operation::RequestCertificate { .. } => self.ledger.request_fee().await?,
        };

        let call = CallRequest {
            to: self.ledger.address(),
            value: fee,
            input: input.into(),
        };

        let tx_hash = self
            .provider
            .sign_and_send(call)
            .await
            .map_err(classify_wallet_error)?;

        let pending = PendingTransaction {
            operation: operation.name(),
            fee,
            tx_hash,
        };
        tracing::debug!(tx_hash = %tx_hash, "Submitted, awaiting confirmation");

        match self.provider.confirm(tx_hash).await.map_err(classify_wallet_error)? {
            TxStatus::Confirmed { .. } => Ok(pending),
            TxStatus::Reverted(reason) => Err(classify_failure(reason)),
        }
    }

    fn notify(&self, notice: Notice) {
        let _ = self.notices.send(notice);
    }
}

/// Validate an operation and encode its calldata. No side effects.
fn encode_operation(operation: &Operation) -> ClientResult<Vec<u8>> {
    match operation {
        Operation::IssueCertificate {
            student,
            certificate_id,
            institution,
        } => {
            if student.trim().is_empty()
                || certificate_id.trim().is_empty()
                || institution.trim().is_empty()
            {
                return Err(ClientError::InvalidInput(
                    "please complete all fields".to_string(),
                ));
            }
            let student: Address = student.parse().map_err(|_| {
                ClientError::InvalidInput(format!("invalid student address '{}'", student))
            })?;

            Ok(CertiChain::issueCertificateCall {
                student,
                certificateHash: certificate_id.clone(),
                institution: institution.clone(),
            }
            .abi_encode())
        }
        Operation::RequestCertificate { certificate_id } => {
            if certificate_id.trim().is_empty() {
                return Err(ClientError::InvalidInput(
                    "certificate identifier is required".to_string(),
                ));
            }
            Ok(CertiChain::requestCertificateCall {
                certificateHash: certificate_id.clone(),
            }
            .abi_encode())
        }
    }
}

fn classify_wallet_error(e: WalletError) -> ClientError {
    classify_failure(e.to_string())
}

/// Map a failure reason onto the taxonomy. Privilege rejections are detected
/// by the ledger's known revert marker; everything else stays a generic
/// transaction failure carrying the raw reason.
fn classify_failure(reason: String) -> ClientError {
    if reason.contains(PRIVILEGE_MARKER) {
        ClientError::PrivilegeDenied(reason)
    } else {
        ClientError::TransactionFailed(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_requires_all_issue_fields() {
        let op = Operation::IssueCertificate {
            student: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            certificate_id: "cert-1".to_string(),
            institution: "  ".to_string(),
        };
        assert!(matches!(encode_operation(&op), Err(ClientError::InvalidInput(_))));
    }

    #[test]
    fn test_validation_rejects_malformed_address() {
        let op = Operation::IssueCertificate {
            student: "0xabc".to_string(),
            certificate_id: "cert-1".to_string(),
            institution: "Acme U".to_string(),
        };
        let err = encode_operation(&op).unwrap_err();
        assert!(err.to_string().contains("invalid student address"));
    }

    #[test]
    fn test_encode_request() {
        let op = Operation::RequestCertificate { certificate_id: "cert-1".to_string() };
        let input = encode_operation(&op).unwrap();
        // 4-byte selector plus ABI-encoded string
        assert_eq!(&input[..4], CertiChain::requestCertificateCall::SELECTOR);
    }

    #[test]
    fn test_classification_marker() {
        let err = classify_failure("execution reverted: Only admin can issue certificates".to_string());
        assert!(matches!(err, ClientError::PrivilegeDenied(_)));

        let err = classify_failure("execution reverted: Incorrect fee".to_string());
        assert!(matches!(err, ClientError::TransactionFailed(_)));
    }
}
