use crate::CommonArgs;
use clap::Parser;

/// `builder` binary CLI flags.
#[derive(Debug, Parser)]
#[command(name = "builder", about = "Cross-layer transaction sequencer")]
pub struct BuilderCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// HTTP/JSON-RPC listen port for `/submit`, `/simulate`, `/status`.
    #[arg(long = "builder-port", default_value_t = 8021)]
    pub builder_port: u16,

    /// Where the Builder finds its Fullnode.
    #[arg(long = "fullnode-url", env = "ROLLUP_FULLNODE_URL")]
    pub fullnode_url: url::Url,

    /// Upper bound on discovery iterations (spec.md §4.2's `MAX_ITER`).
    #[arg(long = "discovery-iteration-cap", default_value_t = 20)]
    pub discovery_iteration_cap: u32,
}

#[derive(Debug, Clone)]
pub struct BuilderConfig {
    pub l1_rpc: url::Url,
    pub rollup: alloy::primitives::Address,
    pub admin_key: String,
    pub read_timeout: std::time::Duration,
    pub broadcast_timeout: std::time::Duration,
    pub log_json: bool,
    pub builder_port: u16,
    pub fullnode_url: url::Url,
    pub discovery_iteration_cap: u32,
}

impl From<BuilderCli> for BuilderConfig {
    fn from(cli: BuilderCli) -> Self {
        Self {
            l1_rpc: cli.common.l1_rpc,
            rollup: cli.common.rollup,
            admin_key: cli.common.admin_key,
            read_timeout: cli.common.read_timeout(),
            broadcast_timeout: cli.common.broadcast_timeout(),
            log_json: cli.common.log_json,
            builder_port: cli.builder_port,
            fullnode_url: cli.fullnode_url,
            discovery_iteration_cap: cli.discovery_iteration_cap,
        }
    }
}
