//! Operator-visible configuration (spec.md §9): CLI flags parsed with
//! `clap`, converted into validated config value objects the way the
//! teacher turns its `Cli` into a `TestNodeConfig`.

mod builder;
mod fullnode;

pub use builder::{BuilderCli, BuilderConfig};
pub use fullnode::{FullnodeCli, FullnodeConfig};

use clap::Args;
use std::time::Duration;
use url::Url;

/// Flags shared by both binaries.
#[derive(Clone, Args)]
pub struct CommonArgs {
    /// Anchor chain (L1) JSON-RPC endpoint.
    #[arg(long = "l1-rpc", env = "ROLLUP_L1_RPC")]
    pub l1_rpc: Url,

    /// `NativeRollupCore` contract address on the anchor chain.
    #[arg(long = "rollup", env = "ROLLUP_CONTRACT_ADDRESS")]
    pub rollup: alloy::primitives::Address,

    /// Hex-encoded admin private key used to sign response/L2-block
    /// commitments. Never logged.
    #[arg(long = "admin-key", env = "ROLLUP_ADMIN_KEY")]
    pub admin_key: String,

    /// Deadline for anchor-chain reads.
    #[arg(long = "read-timeout-secs", default_value_t = 10)]
    pub read_timeout_secs: u64,

    /// Deadline for awaiting a broadcast's confirmation receipt.
    #[arg(long = "broadcast-timeout-secs", default_value_t = 30)]
    pub broadcast_timeout_secs: u64,

    /// Emit structured JSON logs instead of human-readable ones.
    #[arg(long = "log-json", default_value_t = false)]
    pub log_json: bool,
}

impl CommonArgs {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn broadcast_timeout(&self) -> Duration {
        Duration::from_secs(self.broadcast_timeout_secs)
    }
}

impl std::fmt::Debug for CommonArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommonArgs")
            .field("l1_rpc", &self.l1_rpc)
            .field("rollup", &self.rollup)
            .field("admin_key", &"<redacted>")
            .field("read_timeout_secs", &self.read_timeout_secs)
            .field("broadcast_timeout_secs", &self.broadcast_timeout_secs)
            .field("log_json", &self.log_json)
            .finish()
    }
}
