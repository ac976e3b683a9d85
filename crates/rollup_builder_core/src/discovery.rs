use crate::error::BuilderError;
use crate::fullnode_client::{FullnodeClient, L1ToL2CallParams};
use crate::proxy_index::ProxyIndex;
use crate::tx::DecodedTx;
use alloy::primitives::{Address, Bytes, U256};
use rollup_anchor_client::AnchorClient;
use rollup_commitment::{response_key, AdminSigner, IncomingCallProof};
use rollup_types::{IncomingCallResponse, L2Address, ResponseKey, StateHash};

/// One cross-layer call the discovery loop found, in the order it was
/// threaded through the state-hash chain. Mirrors `/simulate`'s
/// `callDetails[]` entries (spec.md §6).
#[derive(Debug, Clone)]
pub struct DiscoveredCall {
    pub l2_address: L2Address,
    pub l1_caller: Address,
    pub pre_state_hash: StateHash,
    pub call_data: Bytes,
    pub response_key: ResponseKey,
    pub final_state_hash: StateHash,
    /// Whether this iteration registered a fresh response, or the call was
    /// already registered from a previous occurrence at the same pre-state
    /// (spec.md §4.2 invariant 4).
    pub newly_registered: bool,
}

#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    pub calls: Vec<DiscoveredCall>,
    pub final_state_hash: StateHash,
}

/// The Builder's iterative fixed-point discovery algorithm (spec.md §4.2).
///
/// Finds every cross-layer call `tx` will make once all its prerequisite
/// responses are registered, registering each as it's found. The caller is
/// responsible for bracketing this in both an anchor-chain snapshot and a
/// Fullnode snapshot (`/simulate`) or running it for real against a
/// Fullnode snapshot that is *not* reverted until after broadcast
/// (`/submit`) — this function only drives the loop.
#[allow(clippy::too_many_arguments)]
pub async fn discover_and_register(
    tx: &DecodedTx,
    candidate_l2_addresses: &[Address],
    anchor: &AnchorClient,
    fullnode: &FullnodeClient,
    signer: &AdminSigner,
    index: &ProxyIndex,
    iteration_cap: u32,
) -> Result<DiscoveryOutcome, BuilderError> {
    for l2 in candidate_l2_addresses {
        index.learn(anchor, *l2).await.map_err(BuilderError::DependencyUnavailable)?;
    }

    let mut state_hash = anchor.l2_block_hash().await?;
    let mut calls = Vec::new();

    for iteration in 0..iteration_cap {
        let span = tracing::info_span!("discovery_iteration", iteration, %state_hash);
        let _enter = span.enter();

        let trace = anchor.debug_trace_call(tx.as_call_request()).await?;
        let mut proxy_calls = Vec::new();
        trace.walk_depth_first(&mut |frame| {
            if let Some(l2_address) = index.l2_address_for_proxy(frame.to) {
                proxy_calls.push((l2_address, frame.from, frame.input.clone(), frame.value));
            }
        });

        if proxy_calls.is_empty() {
            tracing::debug!("no proxy calls in this trace; discovery complete");
            return Ok(DiscoveryOutcome {
                calls,
                final_state_hash: state_hash,
            });
        }

        let mut progressed = false;
        let mut s = state_hash;
        for (l2_address, l1_caller, call_data, value) in proxy_calls {
            let key = response_key(l2_address, s, &call_data);

            if anchor.incoming_call_registered(key).await? {
                let response = anchor.incoming_call_response(key, l2_address, s).await?;
                let final_state_hash = response.final_state_hash;
                calls.push(DiscoveredCall {
                    l2_address,
                    l1_caller,
                    pre_state_hash: s,
                    call_data,
                    response_key: key,
                    final_state_hash,
                    newly_registered: false,
                });
                s = final_state_hash;
                continue;
            }

            let (call_detail, next_s) = register_one(
                anchor, fullnode, signer, l2_address, l1_caller, s, call_data, value, key,
            )
            .await?;
            calls.push(call_detail);
            s = next_s;
            progressed = true;
            break;
        }

        state_hash = s;
        if !progressed {
            tracing::debug!("re-trace registered nothing new; discovery complete");
            return Ok(DiscoveryOutcome {
                calls,
                final_state_hash: state_hash,
            });
        }
    }

    Err(BuilderError::DiscoveryNonTermination(iteration_cap))
}

#[allow(clippy::too_many_arguments)]
async fn register_one(
    anchor: &AnchorClient,
    fullnode: &FullnodeClient,
    signer: &AdminSigner,
    l2_address: L2Address,
    l1_caller: Address,
    pre_state_hash: StateHash,
    call_data: Bytes,
    value: U256,
    key: ResponseKey,
) -> Result<(DiscoveredCall, StateHash), BuilderError> {
    let outcome = fullnode
        .execute_l1_to_l2_call(L1ToL2CallParams {
            l1_caller,
            l2_target: l2_address,
            call_data: call_data.clone(),
            value,
            expected_pre_state_hash: pre_state_hash,
        })
        .await?;

    // No outgoing calls are modeled for an incoming-call execution: the EVM
    // backend is an out-of-scope collaborator exposed only through the
    // documented `eth_*`/admin primitives (spec.md §1), which surface no way
    // to observe nested L2->L1 calls made mid-execution. With an empty
    // outgoing-call list, `preOutgoingCallsStateHash` coincides with
    // `finalStateHash` (see DESIGN.md).
    let response = IncomingCallResponse {
        l2_address,
        pre_state_hash,
        pre_outgoing_calls_state_hash: outcome.new_state_root,
        outgoing_calls: vec![],
        expected_results: vec![],
        return_value: outcome.return_data.clone(),
        final_state_hash: outcome.new_state_root,
    };

    let proof = IncomingCallProof::sign(
        signer,
        l2_address,
        pre_state_hash,
        &call_data,
        outcome.new_state_root,
        &response.outgoing_calls,
        &response.expected_results,
        &response.return_value,
        outcome.new_state_root,
    )
    .map_err(BuilderError::DependencyUnavailable)?;

    anchor
        .register_incoming_call(
            l2_address,
            pre_state_hash,
            &call_data,
            &response,
            proof.signature.as_bytes().as_ref(),
        )
        .await
        .map_err(|err| match err {
            rollup_anchor_client::AnchorClientError::BroadcastReverted { reason } => {
                BuilderError::RegistrationFailed { key, reason }
            }
            other => other.into(),
        })?;

    let call_detail = DiscoveredCall {
        l2_address,
        l1_caller,
        pre_state_hash,
        call_data,
        response_key: key,
        final_state_hash: outcome.new_state_root,
        newly_registered: true,
    };
    Ok((call_detail, outcome.new_state_root))
}
