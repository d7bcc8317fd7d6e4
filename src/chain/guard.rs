//! Chain identity enforcement.
//!
//! The switch → add → retry-switch fallback is the one designed
//! failure-recovery path in the client; every other failure is terminal for
//! the calling operation.

use crate::config::ChainRequirement;
use crate::error::{ClientError, ClientResult};
use crate::wallet::{WalletError, WalletProvider};

/// Ensure the provider is on the required chain.
///
/// Matching chain: returns immediately. Otherwise requests a switch; if the
/// provider does not recognize the chain, registers it with the full
/// requirement descriptor and retries the switch once.
pub async fn ensure_chain<P: WalletProvider>(
    provider: &P,
    required: &ChainRequirement,
) -> ClientResult<()> {
    let current = provider
        .chain_id()
        .await
        .map_err(|e| ClientError::ChainSwitchFailed(e.to_string()))?;

    if current == required.chain_id {
        return Ok(());
    }

    tracing::info!(
        current_chain = current,
        required_chain = required.chain_id,
        "Active chain differs from requirement, requesting switch"
    );

    match provider.switch_chain(required.chain_id).await {
        Ok(()) => Ok(()),
        Err(WalletError::UnrecognizedChain(_)) => {
            tracing::info!(
                chain_name = %required.chain_name,
                chain_id = required.chain_id,
                "Provider does not know the chain, registering it"
            );
            provider
                .add_chain(required)
                .await
                .map_err(|e| ClientError::ChainSwitchFailed(e.to_string()))?;
            provider
                .switch_chain(required.chain_id)
                .await
                .map_err(|e| ClientError::ChainSwitchFailed(e.to_string()))
        }
        Err(e) => Err(ClientError::ChainSwitchFailed(e.to_string())),
    }
}
