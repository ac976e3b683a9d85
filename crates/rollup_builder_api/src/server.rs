use crate::decl::NativeRollupBuilderNamespaceServer;
use crate::impls::NativeRollupBuilderNamespace;
use http::Method;
use jsonrpsee::server::middleware::http::ProxyGetRequestLayer;
use jsonrpsee::server::{AlreadyStoppedError, RpcServiceBuilder, ServerBuilder, ServerHandle};
use rollup_builder_core::BuilderCore;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Builds and serves the builder's JSON-RPC surface. jsonrpsee serves one
/// POST endpoint, not arbitrary REST paths, so `/submit`/`/simulate` here
/// are JSON-RPC methods (`nativerollup_submit`/`nativerollup_simulate`)
/// rather than distinct HTTP routes; `/status` and `/health` are aliased in
/// as `GET` routes the same way the fullnode aliases `/health`.
pub struct BuilderServerBuilder {
    builder: Arc<BuilderCore>,
}

impl BuilderServerBuilder {
    pub fn new(builder: BuilderCore) -> Self {
        Self {
            builder: Arc::new(builder),
        }
    }

    fn rpc_module(&self) -> jsonrpsee::RpcModule<()> {
        let mut rpc = jsonrpsee::RpcModule::new(());
        rpc.merge(NativeRollupBuilderNamespace::new(self.builder.clone()).into_rpc())
            .expect("namespace method names must not collide");
        rpc
    }

    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<BuilderServerHandle> {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_headers([http::header::CONTENT_TYPE])
            .allow_methods([Method::GET, Method::POST]);
        let status = ProxyGetRequestLayer::new("/status", "nativerollup_status")?;
        let health = ProxyGetRequestLayer::new("/health", "nativerollup_status")?;

        let server = ServerBuilder::default()
            .http_only()
            .set_http_middleware(tower::ServiceBuilder::new().layer(cors).layer(status).layer(health))
            .set_rpc_middleware(RpcServiceBuilder::new().rpc_logger(100))
            .build(addr)
            .await?;

        let rpc = self.rpc_module();
        let handle = server.start(rpc);
        Ok(BuilderServerHandle { handle })
    }
}

#[derive(Debug, Clone)]
pub struct BuilderServerHandle {
    handle: ServerHandle,
}

impl BuilderServerHandle {
    pub fn stop(&self) -> Result<(), AlreadyStoppedError> {
        self.handle.stop()
    }

    pub async fn stopped(self) {
        self.handle.stopped().await
    }
}
