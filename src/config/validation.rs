//! Semantic configuration checks.
//!
//! Serde handles syntactic validation; this module checks value ranges and
//! address/URL well-formedness before a config is accepted into the system.
//! All errors are collected, not just the first.

use crate::config::schema::ClientConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.ledger_address().is_err() {
        errors.push(ValidationError(format!(
            "contract_address '{}' is not a valid address",
            config.contract_address
        )));
    }

    if config.chain.chain_id == 0 {
        errors.push(ValidationError("chain.chain_id must be non-zero".to_string()));
    }

    if config.chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError(format!(
            "chain.rpc_url '{}' is not a valid URL",
            config.chain.rpc_url
        )));
    }

    if config.rpc_timeout_secs == 0 {
        errors.push(ValidationError("rpc_timeout_secs must be greater than zero".to_string()));
    }

    if config.transaction.gas_price_multiplier < 1.0 {
        errors.push(ValidationError(
            "transaction.gas_price_multiplier must be at least 1.0".to_string(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
