//! Submission types.

use alloy::primitives::{TxHash, U256};

/// A fee-bearing ledger operation requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Record a new certificate for a student. The ledger accepts this only
    /// from admin accounts.
    IssueCertificate {
        student: String,
        certificate_id: String,
        institution: String,
    },

    /// Request issuance of a certificate.
    RequestCertificate { certificate_id: String },
}

impl Operation {
    /// Operation name used in logs and notices.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::IssueCertificate { .. } => "issueCertificate",
            Operation::RequestCertificate { .. } => "requestCertificate",
        }
    }

    /// Completion notice for a confirmed submission.
    pub(crate) fn success_text(&self) -> &'static str {
        match self {
            Operation::IssueCertificate { .. } => "Certificate issued successfully",
            Operation::RequestCertificate { .. } => "Certificate request submitted successfully",
        }
    }
}

/// One in-flight submission, owned by the orchestrator for its short
/// lifetime and discarded once classified. Never retried.
#[derive(Debug)]
pub struct PendingTransaction {
    pub operation: &'static str,
    /// Fee fetched fresh for this submission.
    pub fee: U256,
    pub tx_hash: TxHash,
}
