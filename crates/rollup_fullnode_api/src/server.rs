use crate::decl::{EthReadNamespaceServer, EvmNamespaceServer, NativeRollupNamespaceServer};
use crate::impls::{EthReadNamespace, EvmNamespace, NativeRollupNamespace};
use http::Method;
use jsonrpsee::server::middleware::http::ProxyGetRequestLayer;
use jsonrpsee::server::{AlreadyStoppedError, RpcServiceBuilder, ServerBuilder, ServerHandle};
use rollup_fullnode_core::FullnodeCore;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Builds and serves the fullnode's JSON-RPC surface. Mirrors the teacher's
/// `NodeServerBuilder`: merge every namespace into one `RpcModule`, wrap it
/// in CORS + a `/health` proxy route + request logging, and serve over
/// plain HTTP.
pub struct FullnodeServerBuilder {
    node: FullnodeCore,
}

impl FullnodeServerBuilder {
    pub fn new(node: FullnodeCore) -> Self {
        Self { node }
    }

    fn rpc_module(&self) -> jsonrpsee::RpcModule<()> {
        let mut rpc = jsonrpsee::RpcModule::new(());
        rpc.merge(NativeRollupNamespace::new(self.node.clone()).into_rpc())
            .expect("namespace method names must not collide");
        rpc.merge(EvmNamespace::new(self.node.clone()).into_rpc())
            .expect("namespace method names must not collide");
        rpc.merge(EthReadNamespace::new(self.node.clone()).into_rpc())
            .expect("namespace method names must not collide");
        rpc
    }

    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<FullnodeServerHandle> {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_headers([http::header::CONTENT_TYPE])
            .allow_methods([Method::GET, Method::POST]);
        let health = ProxyGetRequestLayer::new("/health", "eth_blockNumber")?;

        let server = ServerBuilder::default()
            .http_only()
            .set_http_middleware(tower::ServiceBuilder::new().layer(cors).layer(health))
            .set_rpc_middleware(RpcServiceBuilder::new().rpc_logger(100))
            .build(addr)
            .await?;

        let rpc = self.rpc_module();
        let handle = server.start(rpc);
        Ok(FullnodeServerHandle { handle })
    }
}

#[derive(Debug, Clone)]
pub struct FullnodeServerHandle {
    handle: ServerHandle,
}

impl FullnodeServerHandle {
    pub fn stop(&self) -> Result<(), AlreadyStoppedError> {
        self.handle.stop()
    }

    pub async fn stopped(self) {
        self.handle.stopped().await
    }
}
