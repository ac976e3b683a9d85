//! The Builder's sequencing logic: classify a submitted transaction, drive
//! the iterative cross-layer discovery loop, sign commitments, and broadcast
//! to the anchor chain. No JSON-RPC surface lives here — see
//! `rollup_builder_api` for that — this crate is the part a unit test can
//! exercise directly.

mod classify;
mod core;
mod discovery;
mod error;
mod fullnode_client;
mod proxy_index;
mod tx;

pub use classify::{classify, validate_direct_hint};
pub use core::{BuilderCore, SimulateOutcome, StatusOutcome, SubmitOutcome};
pub use discovery::{discover_and_register, DiscoveredCall, DiscoveryOutcome};
pub use error::BuilderError;
pub use fullnode_client::{FullnodeClient, L1ToL2CallOutcome, L1ToL2CallParams, L2ExecutionOutcome};
pub use proxy_index::ProxyIndex;
pub use tx::{decode, DecodedTx};
