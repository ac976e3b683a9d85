use crate::{call::OutgoingCall, L2Address, StateHash};
use alloy::primitives::{Bytes, B256};
use serde::{Deserialize, Serialize};

/// `H(l2Address, preStateHash, H(callData))`. Indexes the registered
/// response that commits to a single cross-layer call.
///
/// At most one response may ever be registered per key; once registered it
/// is immutable and is consumed exactly once by the anchor contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseKey(pub B256);

impl std::fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The commitment that permits an L1 proxy to satisfy a call from an L1
/// contract into the L2 domain without on-the-fly execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingCallResponse {
    pub l2_address: L2Address,
    pub pre_state_hash: StateHash,
    pub pre_outgoing_calls_state_hash: StateHash,
    pub outgoing_calls: Vec<OutgoingCall>,
    pub expected_results: Vec<Bytes>,
    pub return_value: Bytes,
    pub final_state_hash: StateHash,
}
