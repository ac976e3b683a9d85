use clap::Parser;
use rollup_builder_api::BuilderServerBuilder;
use rollup_builder_core::BuilderCore;
use rollup_commitment::AdminSigner;
use rollup_common::exit_code::ExitCode;
use rollup_common::CancelToken;
use rollup_config::{BuilderCli, BuilderConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[tokio::main]
async fn main() {
    let config = BuilderConfig::from(BuilderCli::parse());
    let log_json = config.log_json;
    if let Err(err) = rollup_common::observability::init("builder", log_json) {
        eprintln!("failed to initialize logging: {err}");
        std::process::exit(ExitCode::FatalError.code());
    }

    match run(config).await {
        Ok(()) => std::process::exit(ExitCode::Clean.code()),
        Err(err) => {
            tracing::error!(?err, "builder exiting");
            std::process::exit(classify_startup_error(&err).code());
        }
    }
}

fn classify_startup_error(err: &anyhow::Error) -> ExitCode {
    use rollup_anchor_client::AnchorClientError;
    if err.downcast_ref::<AnchorClientError>().is_some() {
        ExitCode::DependencyUnreachable
    } else {
        ExitCode::FatalError
    }
}

async fn run(config: BuilderConfig) -> anyhow::Result<()> {
    let anchor = rollup_anchor_client::AnchorClient::connect(
        config.l1_rpc.clone(),
        config.rollup,
        config.read_timeout,
    )?;
    let fullnode = rollup_builder_core::FullnodeClient::connect(config.fullnode_url.clone())?;
    let signer = AdminSigner::from_private_key(&config.admin_key)?;

    let cancellation = CancelToken::new();

    let builder = BuilderCore::new(
        anchor,
        fullnode,
        signer,
        config.discovery_iteration_cap,
        config.broadcast_timeout,
        cancellation.clone(),
    );

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), config.builder_port);
    let server = BuilderServerBuilder::new(builder).serve(addr).await?;
    tracing::info!(%addr, "builder RPC server listening");

    wait_for_shutdown_signal().await;
    tracing::info!("shutdown signal received, stopping builder");
    cancellation.cancel();

    server.stop().ok();
    server.stopped().await;
    Ok(())
}

async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}
