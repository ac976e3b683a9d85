use crate::decl::NativeRollupBuilderNamespaceServer;
use crate::error::RpcErrorAdapter;
use crate::types::{SimulateResponse, StatusResponse, SubmitRequest, SubmitResponse};
use jsonrpsee::core::{async_trait, RpcResult};
use rollup_builder_core::BuilderCore;
use std::sync::Arc;

pub struct NativeRollupBuilderNamespace {
    builder: Arc<BuilderCore>,
}

impl NativeRollupBuilderNamespace {
    pub fn new(builder: Arc<BuilderCore>) -> Self {
        Self { builder }
    }
}

#[async_trait]
impl NativeRollupBuilderNamespaceServer for NativeRollupBuilderNamespace {
    async fn submit(&self, req: SubmitRequest) -> RpcResult<SubmitResponse> {
        self.builder
            .submit(req.source_chain, req.hints, &req.signed_tx)
            .await
            .map(Into::into)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn simulate(&self, req: SubmitRequest) -> RpcResult<SimulateResponse> {
        self.builder
            .simulate(req.source_chain, req.hints, &req.signed_tx)
            .await
            .map(Into::into)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }

    async fn status(&self) -> RpcResult<StatusResponse> {
        self.builder
            .status()
            .await
            .map(Into::into)
            .map_err(|e| RpcErrorAdapter::from(e).into())
    }
}
