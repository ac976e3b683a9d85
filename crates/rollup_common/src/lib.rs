//! Ambient engineering surface shared by both binaries: observability
//! setup, the process exit-code mapping (spec.md §6), and the bounded-retry
//! helper used for every transient RPC call (spec.md §7's "transient RPC
//! errors are retried with bounded backoff at the callsite").

pub mod cancellation;
pub mod exit_code;
pub mod observability;
pub mod retry;

pub use cancellation::CancelToken;
