use crate::CommonArgs;
use clap::Parser;

/// `fullnode` binary CLI flags.
#[derive(Debug, Parser)]
#[command(name = "fullnode", about = "Deterministic L2 execution service")]
pub struct FullnodeCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// JSON-RPC listen port for `nativerollup_*`/`evm_*`/`eth_*` methods.
    #[arg(long = "rpc-port", default_value_t = 8011)]
    pub rpc_port: u16,

    /// Listen port for the raw L2 JSON-RPC passthrough (plain `eth_*`,
    /// used by L2-native clients that don't need the `nativerollup_*`
    /// extensions).
    #[arg(long = "l2-port", default_value_t = 8012)]
    pub l2_port: u16,

    /// L2 chain id encoded in the genesis. Part of the determinism
    /// constants: changing it changes the genesis hash.
    #[arg(long = "chain-id", default_value_t = 270)]
    pub chain_id: u64,

    /// JSON-RPC endpoint of the underlying EVM implementation the Fullnode
    /// drives (out of scope per spec.md §1 — any standard-compliant node).
    #[arg(long = "evm-rpc", env = "ROLLUP_EVM_RPC")]
    pub evm_rpc: url::Url,

    /// JSON-RPC endpoint `verifyStateChain` replays against (spec.md §4.1:
    /// "uses an ephemeral fork"; §5: "does not contend with the main
    /// queue"). Defaults to `--evm-rpc` if unset, but an independent
    /// connection never shares the executor's serialized command queue
    /// either way; for genuine state isolation point this at a forked
    /// instance of the EVM rather than the live one.
    #[arg(long = "verify-evm-rpc", env = "ROLLUP_VERIFY_EVM_RPC")]
    pub verify_evm_rpc: Option<url::Url>,

    /// Path to the hex-encoded init code of the L1-sender-proxy factory
    /// deployed by the system account at genesis. Part of the determinism
    /// constants (spec.md §4.1) — changing this file changes the genesis
    /// hash, so it belongs in the deployment manifest alongside this binary.
    #[arg(long = "proxy-factory-bytecode", env = "ROLLUP_PROXY_FACTORY_BYTECODE")]
    pub proxy_factory_bytecode_path: std::path::PathBuf,

    /// Path to the hex-encoded init code of the call-registry system
    /// contract deployed at genesis. Same determinism caveat as above.
    #[arg(long = "call-registry-bytecode", env = "ROLLUP_CALL_REGISTRY_BYTECODE")]
    pub call_registry_bytecode_path: std::path::PathBuf,
}

#[derive(Debug, Clone)]
pub struct FullnodeConfig {
    pub l1_rpc: url::Url,
    pub rollup: alloy::primitives::Address,
    pub admin_key: String,
    pub read_timeout: std::time::Duration,
    pub broadcast_timeout: std::time::Duration,
    pub log_json: bool,
    pub rpc_port: u16,
    pub l2_port: u16,
    pub chain_id: u64,
    pub evm_rpc: url::Url,
    pub verify_evm_rpc: url::Url,
    pub proxy_factory_bytecode_path: std::path::PathBuf,
    pub call_registry_bytecode_path: std::path::PathBuf,
}

impl From<FullnodeCli> for FullnodeConfig {
    fn from(cli: FullnodeCli) -> Self {
        let verify_evm_rpc = cli.verify_evm_rpc.unwrap_or_else(|| cli.evm_rpc.clone());
        Self {
            l1_rpc: cli.common.l1_rpc,
            rollup: cli.common.rollup,
            admin_key: cli.common.admin_key,
            read_timeout: cli.common.read_timeout(),
            broadcast_timeout: cli.common.broadcast_timeout(),
            log_json: cli.common.log_json,
            rpc_port: cli.rpc_port,
            l2_port: cli.l2_port,
            chain_id: cli.chain_id,
            evm_rpc: cli.evm_rpc,
            verify_evm_rpc,
            proxy_factory_bytecode_path: cli.proxy_factory_bytecode_path,
            call_registry_bytecode_path: cli.call_registry_bytecode_path,
        }
    }
}
