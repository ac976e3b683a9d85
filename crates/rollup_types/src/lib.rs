//! Shared data model for the rollup coordinator: state hashes, cross-layer
//! call records, anchor-chain events, and the call-trace tree the Builder
//! walks during discovery.

mod call;
mod classify;
mod event;
mod response;
mod state_hash;
mod trace;

pub use call::OutgoingCall;
pub use classify::{Classification, SourceChain, SubmitHints};
pub use event::{AnchorEvent, EventOrderKey, IncomingCallHandled, L2BlockProcessed};
pub use response::{IncomingCallResponse, ResponseKey};
pub use state_hash::StateHash;
pub use trace::{CallKind, CallTrace};

/// L1 address: an address on the anchor chain.
pub type L1Address = alloy::primitives::Address;
/// L2 address: an address on the derived execution chain.
pub type L2Address = alloy::primitives::Address;
