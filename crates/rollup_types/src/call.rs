use crate::{L2Address, StateHash};
use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// A structured record of an L2→L1 call emitted during a cross-layer
/// transaction. Position within its containing list is significant: it is
/// fed in order into [`crate::response::ResponseKey`]/proof hashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingCall {
    pub from: L2Address,
    pub target: Address,
    pub value: U256,
    pub gas: u64,
    pub data: Bytes,
    /// State hash immediately after this call was applied.
    pub post_call_state_hash: StateHash,
}
