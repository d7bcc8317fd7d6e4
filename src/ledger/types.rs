//! Ledger read projections.

use alloy::primitives::{Address, U256};

/// Projection of one certificate lookup.
///
/// A lookup for an unknown identifier is not an error: it yields
/// `exists: false` with zeroed subject fields, exactly as the contract
/// returns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub exists: bool,
    pub student: Address,
    pub institution: String,
    /// Issuance time in unix seconds.
    pub issued_at: u64,
}

impl VerificationResult {
    /// The result returned for identifiers the ledger has never seen.
    pub fn not_found() -> Self {
        Self {
            exists: false,
            student: Address::ZERO,
            institution: String::new(),
            issued_at: 0,
        }
    }
}

/// Dashboard figures, fetched as one all-or-nothing projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub certificate_count: u64,
    /// Fee for issuing a certificate, in the smallest currency unit.
    pub issue_fee: U256,
    /// Fee for requesting a certificate, in the smallest currency unit.
    pub request_fee: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_zeroed() {
        let result = VerificationResult::not_found();
        assert!(!result.exists);
        assert_eq!(result.student, Address::ZERO);
        assert!(result.institution.is_empty());
        assert_eq!(result.issued_at, 0);
    }
}
