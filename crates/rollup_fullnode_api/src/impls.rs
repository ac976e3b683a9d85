use crate::decl::{EthReadNamespaceServer, EvmNamespaceServer, NativeRollupNamespaceServer};
use crate::error::RpcErrorAdapter;
use crate::types::{
    L1ToL2CallRequest, L1ToL2CallResponse, L2TransactionResponse, StateRootResponse,
    VerifyStateChainRequest, VerifyStateChainResponse,
};
use alloy::primitives::{Address, Bytes, U256, U64};
use jsonrpsee::core::{async_trait, RpcResult};
use rollup_fullnode_core::FullnodeCore;

pub struct NativeRollupNamespace {
    node: FullnodeCore,
}

impl NativeRollupNamespace {
    pub fn new(node: FullnodeCore) -> Self {
        Self { node }
    }
}

#[async_trait]
impl NativeRollupNamespaceServer for NativeRollupNamespace {
    async fn get_state_root(&self) -> RpcResult<StateRootResponse> {
        self.node
            .get_state_root_with_block()
            .await
            .map(Into::into)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn simulate_l1_to_l2_call(&self, params: L1ToL2CallRequest) -> RpcResult<L1ToL2CallResponse> {
        self.node
            .simulate_l1_to_l2_call(params.into())
            .await
            .map(Into::into)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn execute_l1_to_l2_call(&self, params: L1ToL2CallRequest) -> RpcResult<L1ToL2CallResponse> {
        self.node
            .execute_l1_to_l2_call(params.into())
            .await
            .map(Into::into)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn execute_l2_transaction(&self, raw_tx: Bytes) -> RpcResult<L2TransactionResponse> {
        self.node
            .execute_l2_transaction(raw_tx)
            .await
            .map(Into::into)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn get_l1_sender_proxy_l2(&self, address: Address) -> RpcResult<Address> {
        Ok(self.node.get_l1_sender_proxy_l2(address))
    }

    async fn is_l1_sender_proxy_l2_deployed(&self, address: Address) -> RpcResult<bool> {
        self.node
            .is_l1_sender_proxy_l2_deployed(address)
            .await
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn verify_state_chain(&self, req: VerifyStateChainRequest) -> RpcResult<VerifyStateChainResponse> {
        self.node
            .verify_state_chain(&req.events)
            .await
            .map(Into::into)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }
}

pub struct EvmNamespace {
    node: FullnodeCore,
}

impl EvmNamespace {
    pub fn new(node: FullnodeCore) -> Self {
        Self { node }
    }
}

#[async_trait]
impl EvmNamespaceServer for EvmNamespace {
    async fn snapshot(&self) -> RpcResult<U64> {
        self.node
            .snapshot()
            .await
            .map(U64::from)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn revert(&self, id: U64) -> RpcResult<bool> {
        match self.node.revert(id.to()).await {
            Ok(()) => Ok(true),
            Err(rollup_fullnode_core::FullnodeError::UnknownSnapshot(_)) => Ok(false),
            Err(e) => Err(RpcErrorAdapter::from(e).into()),
        }
    }
}

pub struct EthReadNamespace {
    node: FullnodeCore,
}

impl EthReadNamespace {
    pub fn new(node: FullnodeCore) -> Self {
        Self { node }
    }
}

#[async_trait]
impl EthReadNamespaceServer for EthReadNamespace {
    async fn get_balance(&self, address: Address) -> RpcResult<U256> {
        self.node
            .eth_get_balance(address)
            .await
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn get_code(&self, address: Address) -> RpcResult<Bytes> {
        self.node
            .eth_get_code(address)
            .await
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn call(&self, tx: alloy::rpc::types::TransactionRequest) -> RpcResult<Bytes> {
        self.node
            .eth_call(&tx)
            .await
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn block_number(&self) -> RpcResult<U64> {
        self.node
            .eth_block_number()
            .await
            .map(U64::from)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn chain_id(&self) -> RpcResult<U64> {
        self.node
            .eth_chain_id()
            .await
            .map(U64::from)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn get_transaction_count(&self, address: Address) -> RpcResult<U64> {
        self.node
            .eth_get_transaction_count(address)
            .await
            .map(U64::from)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }
}
