use crate::abi::IL1SenderProxy;
use crate::error::FullnodeError;
use crate::evm_client::EvmClient;
use crate::genesis::SYSTEM_ACCOUNT;
use crate::proxy::ProxyRegistry;
use alloy::primitives::{Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use rollup_types::{L1Address, L2Address, StateHash};

/// Parameters common to `simulateL1ToL2Call` and `executeL1ToL2Call`
/// (spec.md §4.1).
#[derive(Debug, Clone)]
pub struct L1ToL2Params {
    pub l1_caller: L1Address,
    pub l2_target: L2Address,
    pub call_data: Bytes,
    pub value: U256,
    pub expected_pre_state_hash: StateHash,
}

/// Shared result shape for both the simulated and persistent variants.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub success: bool,
    pub return_data: Bytes,
    pub new_state_root: StateHash,
    pub gas_used: u64,
}

/// Runs the four-step L1→L2 call procedure against `evm` (spec.md §4.1):
/// assert pre-state, ensure the proxy is deployed, invoke the proxy, force a
/// commit and read the new hash. The caller is responsible for wrapping
/// this in a snapshot/revert pair when simulating.
pub async fn run(
    evm: &EvmClient,
    proxies: &ProxyRegistry,
    params: &L1ToL2Params,
) -> Result<CallOutcome, FullnodeError> {
    let current = StateHash(evm.state_root().await?);
    if current != params.expected_pre_state_hash {
        return Err(FullnodeError::StalePreState {
            expected: params.expected_pre_state_hash,
            actual: current,
        });
    }

    proxies.ensure_deployed(evm, params.l1_caller).await?;
    let proxy_address = proxies.derive(params.l1_caller);

    let calldata = IL1SenderProxy::forwardCall {
        target: params.l2_target,
        value: params.value,
        data: params.call_data.clone(),
    }
    .abi_encode();

    let tx = TransactionRequest::default()
        .from(SYSTEM_ACCOUNT)
        .to(proxy_address)
        .value(params.value)
        .input(Bytes::from(calldata).into());

    let outcome = evm.send_and_wait(tx).await?;
    evm.mine().await?;
    let new_state_root = StateHash(evm.state_root().await?);

    Ok(CallOutcome {
        success: outcome.success,
        return_data: outcome.return_data,
        new_state_root,
        gas_used: outcome.gas_used,
    })
}
