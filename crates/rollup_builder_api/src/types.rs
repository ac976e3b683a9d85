use alloy::primitives::{Address, Bytes, TxHash};
use rollup_types::{ResponseKey, SourceChain, StateHash, SubmitHints};
use serde::{Deserialize, Serialize};

/// `nativerollup_submit` / `nativerollup_simulate` request body (spec.md §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub source_chain: SourceChain,
    #[serde(default)]
    pub hints: SubmitHints,
    pub signed_tx: Bytes,
}

/// Mirrors `rollup_types::Classification`, serialized as a tagged union
/// rather than exposing the domain enum directly — the same split the
/// fullnode API keeps between its `rollup_fullnode_core` domain types and
/// its own wire DTOs.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClassificationDto {
    L2Transaction,
    DirectL1ToL2 { l2_target: Address },
    ContractCall { candidate_l2_addresses: Vec<Address> },
    PlainL1Broadcast,
}

impl From<rollup_types::Classification> for ClassificationDto {
    fn from(value: rollup_types::Classification) -> Self {
        use rollup_types::Classification as C;
        match value {
            C::L2Transaction => Self::L2Transaction,
            C::DirectL1ToL2 { l2_target } => Self::DirectL1ToL2 { l2_target },
            C::ContractCall { candidate_l2_addresses } => Self::ContractCall { candidate_l2_addresses },
            C::PlainL1Broadcast => Self::PlainL1Broadcast,
        }
    }
}

/// One entry of `/simulate`'s or `/submit`'s `discoveredCalls[]`, mirroring
/// `rollup_builder_core::DiscoveredCall`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredCallDto {
    pub l2_address: Address,
    pub l1_caller: Address,
    pub pre_state_hash: StateHash,
    pub call_data: Bytes,
    pub response_key: ResponseKey,
    pub final_state_hash: StateHash,
    pub newly_registered: bool,
}

impl From<rollup_builder_core::DiscoveredCall> for DiscoveredCallDto {
    fn from(call: rollup_builder_core::DiscoveredCall) -> Self {
        Self {
            l2_address: call.l2_address,
            l1_caller: call.l1_caller,
            pre_state_hash: call.pre_state_hash,
            call_data: call.call_data,
            response_key: call.response_key,
            final_state_hash: call.final_state_hash,
            newly_registered: call.newly_registered,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub anchor_tx_hash: TxHash,
    pub classification: ClassificationDto,
    pub discovered_calls: Vec<DiscoveredCallDto>,
}

impl From<rollup_builder_core::SubmitOutcome> for SubmitResponse {
    fn from(outcome: rollup_builder_core::SubmitOutcome) -> Self {
        Self {
            anchor_tx_hash: outcome.anchor_tx_hash,
            classification: outcome.classification.into(),
            discovered_calls: outcome.discovered_calls.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub classification: ClassificationDto,
    pub discovered_calls: Vec<DiscoveredCallDto>,
    pub would_succeed: bool,
}

impl From<rollup_builder_core::SimulateOutcome> for SimulateResponse {
    fn from(outcome: rollup_builder_core::SimulateOutcome) -> Self {
        Self {
            classification: outcome.classification.into(),
            discovered_calls: outcome.discovered_calls.into_iter().map(Into::into).collect(),
            would_succeed: outcome.would_succeed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub anchor_state_hash: StateHash,
    pub fullnode_state_hash: StateHash,
    pub synchronized: bool,
}

impl From<rollup_builder_core::StatusOutcome> for StatusResponse {
    fn from(outcome: rollup_builder_core::StatusOutcome) -> Self {
        Self {
            anchor_state_hash: outcome.anchor_state_hash,
            fullnode_state_hash: outcome.fullnode_state_hash,
            synchronized: outcome.synchronized,
        }
    }
}
