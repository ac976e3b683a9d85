/// Error taxonomy for the fullnode's execution and replay surface (spec.md
/// §7). `Divergence` is the one variant that is never recovered from in
/// place: it is surfaced to the caller and also latches the node's internal
/// halted flag.
#[derive(Debug, thiserror::Error)]
pub enum FullnodeError {
    #[error("underlying EVM unreachable: {0}")]
    DependencyUnavailable(#[source] anyhow::Error),

    #[error("expected pre-state hash {expected} but current state is {actual}")]
    StalePreState {
        expected: rollup_types::StateHash,
        actual: rollup_types::StateHash,
    },

    #[error("transaction rejected by the EVM: {0}")]
    InvalidTransaction(String),

    #[error("unknown snapshot id {0}")]
    UnknownSnapshot(u64),

    #[error(
        "state-hash divergence at event {event_index}: expected post-hash {expected}, computed {actual}"
    )]
    Divergence {
        event_index: u64,
        expected: rollup_types::StateHash,
        actual: rollup_types::StateHash,
    },

    #[error("replayer is halted after a divergence at event {0}; restart requires operator intervention")]
    Halted(u64),

    #[error("no event suffix threads from the fullnode's current state hash; cannot resume replay")]
    NoResumableSuffix,

    #[error("failed to decode EVM response: {0}")]
    Decode(String),
}

impl From<rollup_anchor_client::AnchorClientError> for FullnodeError {
    fn from(err: rollup_anchor_client::AnchorClientError) -> Self {
        FullnodeError::DependencyUnavailable(anyhow::anyhow!(err))
    }
}
