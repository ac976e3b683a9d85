use crate::types::{
    L1ToL2CallRequest, L1ToL2CallResponse, L2TransactionResponse, StateRootResponse,
    VerifyStateChainRequest, VerifyStateChainResponse,
};
use alloy::primitives::{Address, Bytes, U256, U64};
use jsonrpsee::core::RpcResult;
use jsonrpsee::proc_macros::rpc;

/// The rollup-specific extensions to the fullnode's JSON-RPC surface
/// (spec.md §6).
#[rpc(server, namespace = "nativerollup")]
pub trait NativeRollupNamespace {
    #[method(name = "getStateRoot")]
    async fn get_state_root(&self) -> RpcResult<StateRootResponse>;

    #[method(name = "simulateL1ToL2Call")]
    async fn simulate_l1_to_l2_call(&self, params: L1ToL2CallRequest) -> RpcResult<L1ToL2CallResponse>;

    #[method(name = "executeL1ToL2Call")]
    async fn execute_l1_to_l2_call(&self, params: L1ToL2CallRequest) -> RpcResult<L1ToL2CallResponse>;

    #[method(name = "executeL2Transaction")]
    async fn execute_l2_transaction(&self, raw_tx: Bytes) -> RpcResult<L2TransactionResponse>;

    #[method(name = "getL1SenderProxyL2")]
    async fn get_l1_sender_proxy_l2(&self, address: Address) -> RpcResult<Address>;

    #[method(name = "isL1SenderProxyL2Deployed")]
    async fn is_l1_sender_proxy_l2_deployed(&self, address: Address) -> RpcResult<bool>;

    #[method(name = "verifyStateChain")]
    async fn verify_state_chain(&self, req: VerifyStateChainRequest) -> RpcResult<VerifyStateChainResponse>;
}

/// Snapshot/revert, mirrored under the conventional `evm_*` namespace so
/// existing Anvil-flavored tooling can drive it unmodified.
#[rpc(server, namespace = "evm")]
pub trait EvmNamespace {
    #[method(name = "snapshot")]
    async fn snapshot(&self) -> RpcResult<U64>;

    #[method(name = "revert")]
    async fn revert(&self, id: U64) -> RpcResult<bool>;
}

/// The small slice of standard `eth_*` reads spec.md §6 requires the
/// fullnode to also expose directly (rather than forcing every client to
/// talk to the underlying EVM endpoint itself).
#[rpc(server, namespace = "eth")]
pub trait EthReadNamespace {
    #[method(name = "getBalance")]
    async fn get_balance(&self, address: Address) -> RpcResult<U256>;

    #[method(name = "getCode")]
    async fn get_code(&self, address: Address) -> RpcResult<Bytes>;

    #[method(name = "call")]
    async fn call(&self, tx: alloy::rpc::types::TransactionRequest) -> RpcResult<Bytes>;

    #[method(name = "blockNumber")]
    async fn block_number(&self) -> RpcResult<U64>;

    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;

    #[method(name = "getTransactionCount")]
    async fn get_transaction_count(&self, address: Address) -> RpcResult<U64>;
}
