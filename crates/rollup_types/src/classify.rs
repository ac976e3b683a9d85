use crate::L2Address;
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Which chain a user's signed transaction originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SourceChain {
    L1,
    L2,
}

/// Optional hints a caller may supply to `submit`/`simulate` to short-circuit
/// classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitHints {
    pub l2_target_address: Option<L2Address>,
    pub l2_addresses: Option<Vec<L2Address>>,
}

/// The Builder's classification of a submitted transaction (§4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// `sourceChain = L2`.
    L2Transaction,
    /// `sourceChain = L1` with a direct deposit/proxy-call hint.
    DirectL1ToL2 { l2_target: L2Address },
    /// `sourceChain = L1` with a hint list, or calls into known proxies
    /// discovered by tracing.
    ContractCall { candidate_l2_addresses: Vec<Address> },
    /// `sourceChain = L1`, nothing cross-layer detected.
    PlainL1Broadcast,
}
