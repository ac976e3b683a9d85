use rollup_types::ResponseKey;
use std::time::Duration;

/// Error taxonomy for the Builder's submit/simulate surface (spec.md §7).
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    #[error("anchor or fullnode RPC unreachable: {0}")]
    DependencyUnavailable(#[source] anyhow::Error),

    #[error("fullnode state hash {fullnode} does not match anchor state hash {anchor}; fullnode is unsynchronized")]
    FullnodeUnsynchronized {
        anchor: rollup_types::StateHash,
        fullnode: rollup_types::StateHash,
    },

    #[error("transaction nonce {tx_nonce} does not match account nonce {account_nonce} for {address}")]
    NonceMismatch {
        address: alloy::primitives::Address,
        tx_nonce: u64,
        account_nonce: u64,
    },

    #[error("failed to decode signed transaction: {0}")]
    InvalidTransaction(String),

    #[error("transaction recipient {recipient} does not match derived proxy {expected} for target {target}")]
    HintMismatch {
        recipient: alloy::primitives::Address,
        expected: alloy::primitives::Address,
        target: alloy::primitives::Address,
    },

    #[error("discovery did not terminate within {0} iterations")]
    DiscoveryNonTermination(u32),

    #[error("registerIncomingCall failed for response key {key}: {reason}")]
    RegistrationFailed { key: ResponseKey, reason: String },

    #[error("pre-broadcast check failed: {0}")]
    PreBroadcastCheckFailed(String),

    #[error("anchor transaction reverted: {0}")]
    BroadcastReverted(String),

    #[error("timed out waiting for broadcast receipt after {0:?}")]
    BroadcastTimeout(Duration),

    #[error("submission cancelled after the anchor transaction was already broadcast")]
    CancelledAfterBroadcast,
}

impl From<rollup_anchor_client::AnchorClientError> for BuilderError {
    fn from(err: rollup_anchor_client::AnchorClientError) -> Self {
        use rollup_anchor_client::AnchorClientError as E;
        match err {
            E::BroadcastReverted { reason } => BuilderError::BroadcastReverted(reason),
            E::BroadcastTimeout(d) => BuilderError::BroadcastTimeout(d),
            E::CancelledAfterBroadcast { .. } => BuilderError::CancelledAfterBroadcast,
            other => BuilderError::DependencyUnavailable(anyhow::anyhow!(other)),
        }
    }
}
