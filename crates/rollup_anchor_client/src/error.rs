/// Structural/transient error taxonomy for anchor-chain RPC calls (spec.md
/// §7). Transient variants are retried by the caller with bounded backoff;
/// structural variants propagate.
#[derive(Debug, thiserror::Error)]
pub enum AnchorClientError {
    #[error("anchor RPC unreachable: {0}")]
    DependencyUnavailable(#[source] anyhow::Error),

    #[error("anchor transaction reverted: {reason}")]
    BroadcastReverted { reason: String },

    #[error("timed out waiting for anchor receipt after {0:?}")]
    BroadcastTimeout(std::time::Duration),

    #[error("failed to decode anchor RPC response: {0}")]
    Decode(String),

    #[error("unknown anchor-chain snapshot id {0}")]
    UnknownSnapshot(u64),

    #[error("submission cancelled after transaction {tx_hash} was already broadcast")]
    CancelledAfterBroadcast { tx_hash: alloy::primitives::TxHash },
}
