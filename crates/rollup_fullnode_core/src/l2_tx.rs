use crate::error::FullnodeError;
use crate::evm_client::EvmClient;
use alloy::primitives::{Bytes, TxHash};
use rollup_types::StateHash;

/// Result of a plain L2 transaction submission.
#[derive(Debug, Clone)]
pub struct L2Outcome {
    pub success: bool,
    pub tx_hash: TxHash,
    pub return_data: Bytes,
    pub new_state_root: StateHash,
    pub gas_used: u64,
    pub error: Option<String>,
}

/// Submits a signed raw L2 transaction to `evm`, forces a commit, and reads
/// the resulting state hash. Takes `&EvmClient` directly rather than a
/// `FullnodeExecutorHandle`, so it can be driven either by the serialized
/// executor (`executor::FullnodeExecutor::execute_l2`) or by an independent
/// client that must not contend with it (`verify::verify_state_chain`).
pub async fn run(evm: &EvmClient, raw_tx: Bytes) -> Result<L2Outcome, FullnodeError> {
    let outcome = evm.send_raw_and_wait(&raw_tx).await;
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            return Ok(L2Outcome {
                success: false,
                tx_hash: TxHash::ZERO,
                return_data: Bytes::new(),
                new_state_root: StateHash(evm.state_root().await?),
                gas_used: 0,
                error: Some(err.to_string()),
            });
        }
    };
    evm.mine().await?;
    let new_state_root = StateHash(evm.state_root().await?);
    Ok(L2Outcome {
        success: outcome.success,
        tx_hash: outcome.tx_hash,
        return_data: outcome.return_data,
        new_state_root,
        gas_used: outcome.gas_used,
        error: outcome.revert_reason,
    })
}
