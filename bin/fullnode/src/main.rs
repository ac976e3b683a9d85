use clap::Parser;
use rollup_common::exit_code::ExitCode;
use rollup_config::{FullnodeCli, FullnodeConfig};
use rollup_fullnode_api::FullnodeServerBuilder;
use rollup_fullnode_core::FullnodeCore;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// How often the replayer checks the anchor chain for new events once it
/// has caught up to the tip.
const REPLAY_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    let config = FullnodeConfig::from(FullnodeCli::parse());
    let log_json = config.log_json;
    if let Err(err) = rollup_common::observability::init("fullnode", log_json) {
        eprintln!("failed to initialize logging: {err}");
        std::process::exit(ExitCode::FatalError.code());
    }

    match run(config).await {
        Ok(()) => std::process::exit(ExitCode::Clean.code()),
        Err(err) => {
            tracing::error!(?err, "fullnode exiting");
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

async fn run(config: FullnodeConfig) -> anyhow::Result<()> {
    let anchor = rollup_anchor_client::AnchorClient::connect(
        config.l1_rpc.clone(),
        config.rollup,
        config.read_timeout,
    )?;

    let (node, executor_task) = FullnodeCore::bootstrap(
        config.evm_rpc.clone(),
        config.verify_evm_rpc.clone(),
        anchor,
        &config.proxy_factory_bytecode_path,
        &config.call_registry_bytecode_path,
    )
    .await?;

    let (replayer_task, replayer_status) = node.spawn_replayer(REPLAY_POLL_INTERVAL);

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), config.rpc_port);
    let server = FullnodeServerBuilder::new(node.clone()).serve(addr).await?;
    tracing::info!(%addr, "fullnode RPC server listening");

    wait_for_shutdown_signal().await;
    tracing::info!(
        synced = replayer_status.is_synced(),
        "shutdown signal received, stopping fullnode"
    );

    server.stop().ok();
    server.stopped().await;
    replayer_task.abort();
    executor_task.abort();
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
