//! The commitment protocol (spec §4.3): how response keys are computed, how
//! outgoing-call lists are hashed, what the admin signs, and the
//! deterministic proxy-address derivations that tie the two layers
//! together.
//!
//! Every function in this crate is pure and byte-exact: the anchor
//! contract's verifier reproduces the same definitions, so a deviation here
//! breaks verification rather than just failing a local assertion.

mod address;
mod hashing;
mod proof;
mod signer;

pub use address::{derive_l1_sender_proxy_l2, L1_SENDER_PROXY_SALT};
pub use hashing::{hash_bytes, hash_calls, hash_results, response_key};
pub use proof::{IncomingCallProof, L2BlockProof};
pub use signer::AdminSigner;
