use crate::{call::OutgoingCall, L1Address, L2Address, StateHash};
use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};

/// `(anchor_block_number, anchor_log_index)`. The event log's total order:
/// the chain invariant `e_{i+1}.prev == e_i.post` is only meaningful once
/// events are sorted by this key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventOrderKey {
    pub block_number: u64,
    pub log_index: u64,
}

/// An L2 transaction finalized on the anchor chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2BlockProcessed {
    pub order: EventOrderKey,
    pub prev_hash: StateHash,
    pub new_hash: StateHash,
    pub rlp_encoded_tx: Bytes,
    pub outgoing_calls: Vec<OutgoingCall>,
    pub outgoing_results: Vec<Bytes>,
}

/// A cross-layer call from L1 satisfied via a registered response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingCallHandled {
    pub order: EventOrderKey,
    pub l2_address: L2Address,
    pub l1_caller: L1Address,
    pub prev_hash: StateHash,
    pub call_data: Bytes,
    pub value: alloy::primitives::U256,
    pub outgoing_calls: Vec<OutgoingCall>,
    pub outgoing_results: Vec<Bytes>,
    pub final_state_hash: StateHash,
}

/// The authoritative record of an L2 state transition, as read from the
/// anchor chain's event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AnchorEvent {
    L2BlockProcessed(L2BlockProcessed),
    IncomingCallHandled(IncomingCallHandled),
}

impl AnchorEvent {
    pub fn order(&self) -> EventOrderKey {
        match self {
            AnchorEvent::L2BlockProcessed(e) => e.order,
            AnchorEvent::IncomingCallHandled(e) => e.order,
        }
    }

    pub fn prev_hash(&self) -> StateHash {
        match self {
            AnchorEvent::L2BlockProcessed(e) => e.prev_hash,
            AnchorEvent::IncomingCallHandled(e) => e.prev_hash,
        }
    }

    pub fn post_hash(&self) -> StateHash {
        match self {
            AnchorEvent::L2BlockProcessed(e) => e.new_hash,
            AnchorEvent::IncomingCallHandled(e) => e.final_state_hash,
        }
    }
}
