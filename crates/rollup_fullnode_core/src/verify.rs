use crate::error::FullnodeError;
use crate::evm_client::EvmClient;
use crate::l1_to_l2::{self, L1ToL2Params};
use crate::l2_tx;
use crate::proxy::ProxyRegistry;
use rollup_types::{AnchorEvent, StateHash};

/// Per-event comparison between the hash the caller's event claims and what
/// this Fullnode actually computes for it.
#[derive(Debug, Clone)]
pub struct EventVerification {
    pub pre_match: bool,
    pub post_match: bool,
    pub actual_pre: StateHash,
    pub actual_post: StateHash,
    pub return_data: alloy::primitives::Bytes,
}

#[derive(Debug, Clone)]
pub struct ChainVerification {
    pub results: Vec<EventVerification>,
    pub all_match: bool,
    pub first_divergence: Option<usize>,
}

/// Replays `events` against an ephemeral fork so canonical state is never
/// touched (spec.md §4.1: `verifyStateChain` "uses an ephemeral fork so
/// canonical state is unchanged") and so the replay does not contend with
/// the main executor queue (spec.md §5: "`verifyStateChain` runs on an
/// ephemeral fork and does not contend with the main queue").
///
/// `verify_evm` and `proxies` are deliberately **not** `FullnodeExecutorHandle`:
/// routing this through the shared executor would serialize a potentially
/// long replay behind (and in front of) every normal simulate/execute/
/// snapshot/revert call the Builder makes. `verify_evm` is a connection
/// independent of the one the executor owns — for true isolation an operator
/// should point it at a forked instance of the EVM rather than the live one,
/// but even sharing an endpoint this never takes the executor's single
/// command queue, so it cannot block Builder traffic.
pub async fn verify_state_chain(
    verify_evm: &EvmClient,
    proxies: &ProxyRegistry,
    events: &[AnchorEvent],
) -> Result<ChainVerification, FullnodeError> {
    let snapshot_id = verify_evm.snapshot().await?;
    let result = run_verification(verify_evm, proxies, events).await;
    verify_evm.revert(snapshot_id).await?;
    result
}

async fn run_verification(
    evm: &EvmClient,
    proxies: &ProxyRegistry,
    events: &[AnchorEvent],
) -> Result<ChainVerification, FullnodeError> {
    let mut results = Vec::with_capacity(events.len());
    let mut first_divergence = None;

    for (index, event) in events.iter().enumerate() {
        let actual_pre = StateHash(evm.state_root().await?);
        let pre_match = actual_pre == event.prev_hash();

        let (actual_post, return_data) = match event {
            AnchorEvent::L2BlockProcessed(e) => {
                let outcome = l2_tx::run(evm, e.rlp_encoded_tx.clone()).await?;
                (outcome.new_state_root, outcome.return_data)
            }
            AnchorEvent::IncomingCallHandled(e) => {
                let params = L1ToL2Params {
                    l1_caller: e.l1_caller,
                    l2_target: e.l2_address,
                    call_data: e.call_data.clone(),
                    value: e.value,
                    expected_pre_state_hash: actual_pre,
                };
                let outcome = l1_to_l2::run(evm, proxies, &params).await?;
                (outcome.new_state_root, outcome.return_data)
            }
        };

        let post_match = actual_post == event.post_hash();
        if !pre_match || !post_match {
            first_divergence.get_or_insert(index);
        }

        results.push(EventVerification {
            pre_match,
            post_match,
            actual_pre,
            actual_post,
            return_data,
        });
    }

    Ok(ChainVerification {
        all_match: first_divergence.is_none(),
        first_divergence,
        results,
    })
}
