mod abi;
mod client;
mod convert;
mod error;
mod trace;

pub use abi::{OutgoingCallAbi, ResponseAbi, INativeRollupCore};
pub use client::{local_response_key, AnchorClient};
pub use convert::{response_from_abi, response_to_abi};
pub use error::AnchorClientError;
pub use trace::parse_call_tracer_json;
