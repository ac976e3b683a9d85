use crate::types::{SimulateResponse, StatusResponse, SubmitRequest, SubmitResponse};
use jsonrpsee::core::RpcResult;
use jsonrpsee::proc_macros::rpc;

/// The builder's JSON-RPC surface (spec.md §6): submit a transaction for
/// sequencing, dry-run it without committing, or read synchronization
/// status.
#[rpc(server, namespace = "nativerollup")]
pub trait NativeRollupBuilderNamespace {
    #[method(name = "submit")]
    async fn submit(&self, req: SubmitRequest) -> RpcResult<SubmitResponse>;

    #[method(name = "simulate")]
    async fn simulate(&self, req: SubmitRequest) -> RpcResult<SimulateResponse>;

    #[method(name = "status")]
    async fn status(&self) -> RpcResult<StatusResponse>;
}
