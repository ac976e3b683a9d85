use alloy::primitives::{Address, Bytes, B256, U256, U64};
use rollup_types::StateHash;
use serde::{Deserialize, Serialize};

/// `nativerollup_getStateRoot` response: the state hash plus the EVM block
/// number it was observed at, so operators can correlate the two without a
/// second round-trip (SPEC_FULL.md's Fullnode supplement).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRootResponse {
    pub state_root: B256,
    pub block_number: U64,
}

impl From<(StateHash, u64)> for StateRootResponse {
    fn from((state_root, block_number): (StateHash, u64)) -> Self {
        Self {
            state_root: state_root.0,
            block_number: U64::from(block_number),
        }
    }
}

/// `nativerollup_simulateL1ToL2Call` / `executeL1ToL2Call` request body
/// (spec.md §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L1ToL2CallRequest {
    pub l1_caller: Address,
    pub l2_target: Address,
    pub call_data: Bytes,
    pub value: U256,
    pub expected_pre_state_hash: StateHash,
}

impl From<L1ToL2CallRequest> for rollup_fullnode_core::L1ToL2Params {
    fn from(req: L1ToL2CallRequest) -> Self {
        Self {
            l1_caller: req.l1_caller,
            l2_target: req.l2_target,
            call_data: req.call_data,
            value: req.value,
            expected_pre_state_hash: req.expected_pre_state_hash,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L1ToL2CallResponse {
    pub success: bool,
    pub return_data: Bytes,
    pub new_state_root: StateHash,
    pub gas_used: u64,
}

impl From<rollup_fullnode_core::CallOutcome> for L1ToL2CallResponse {
    fn from(outcome: rollup_fullnode_core::CallOutcome) -> Self {
        Self {
            success: outcome.success,
            return_data: outcome.return_data,
            new_state_root: outcome.new_state_root,
            gas_used: outcome.gas_used,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L2TransactionResponse {
    pub success: bool,
    pub tx_hash: alloy::primitives::TxHash,
    pub return_data: Bytes,
    pub new_state_root: StateHash,
    pub gas_used: u64,
    pub error: Option<String>,
}

impl From<rollup_fullnode_core::L2Outcome> for L2TransactionResponse {
    fn from(outcome: rollup_fullnode_core::L2Outcome) -> Self {
        Self {
            success: outcome.success,
            tx_hash: outcome.tx_hash,
            return_data: outcome.return_data,
            new_state_root: outcome.new_state_root,
            gas_used: outcome.gas_used,
            error: outcome.error,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyStateChainRequest {
    pub events: Vec<rollup_types::AnchorEvent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventVerificationResponse {
    pub pre_match: bool,
    pub post_match: bool,
    pub actual_pre: StateHash,
    pub actual_post: StateHash,
    pub return_data: Bytes,
}

impl From<rollup_fullnode_core::EventVerification> for EventVerificationResponse {
    fn from(v: rollup_fullnode_core::EventVerification) -> Self {
        Self {
            pre_match: v.pre_match,
            post_match: v.post_match,
            actual_pre: v.actual_pre,
            actual_post: v.actual_post,
            return_data: v.return_data,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyStateChainResponse {
    pub results: Vec<EventVerificationResponse>,
    pub all_match: bool,
    pub first_divergence: Option<usize>,
}

impl From<rollup_fullnode_core::ChainVerification> for VerifyStateChainResponse {
    fn from(v: rollup_fullnode_core::ChainVerification) -> Self {
        Self {
            results: v.results.into_iter().map(Into::into).collect(),
            all_match: v.all_match,
            first_divergence: v.first_divergence,
        }
    }
}
