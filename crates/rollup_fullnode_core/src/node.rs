use crate::error::FullnodeError;
use crate::evm_client::EvmClient;
use crate::executor::{FullnodeExecutor, FullnodeExecutorHandle};
use crate::genesis::{self, GenesisManifest, GenesisOutcome};
use crate::l1_to_l2::{CallOutcome, L1ToL2Params};
use crate::l2_tx::L2Outcome;
use crate::proxy::ProxyRegistry;
use crate::replayer::Replayer;
use crate::verify::{verify_state_chain, ChainVerification};
use alloy::primitives::{Address, Bytes};
use rollup_anchor_client::AnchorClient;
use rollup_types::{AnchorEvent, L1Address, StateHash};
use std::time::Duration;

/// The fullnode's public operation surface (spec.md §4.1), independent of
/// transport. `rollup_fullnode_api` adapts this to jsonrpsee.
#[derive(Clone)]
pub struct FullnodeCore {
    executor: FullnodeExecutorHandle,
    anchor: AnchorClient,
    /// A second handle onto the same EVM endpoint used only for read-only
    /// queries (spec.md §5: reads may proceed concurrently with the
    /// serialized write queue).
    evm_reader: EvmClient,
    /// An independent connection `verifyStateChain` replays against, so a
    /// long verification never queues behind — or blocks — ordinary
    /// Builder-facing simulate/execute/snapshot/revert traffic (spec.md §4.1,
    /// §5). See `verify::verify_state_chain`.
    verify_evm: EvmClient,
    proxies: ProxyRegistry,
    genesis: GenesisOutcome,
}

impl FullnodeCore {
    /// Brings the EVM up to genesis, wires the executor actor, and returns
    /// the handle plus the background task that must be polled to drive it.
    pub async fn bootstrap(
        evm_rpc: url::Url,
        verify_evm_rpc: url::Url,
        anchor: AnchorClient,
        proxy_factory_path: &std::path::Path,
        call_registry_path: &std::path::Path,
    ) -> anyhow::Result<(Self, tokio::task::JoinHandle<()>)> {
        let evm = EvmClient::connect(evm_rpc)?;
        let verify_evm = EvmClient::connect(verify_evm_rpc)?;
        let manifest = GenesisManifest::load(proxy_factory_path, call_registry_path)?;
        let genesis = genesis::bootstrap(&evm, &manifest).await?;
        tracing::info!(
            genesis_hash = %genesis.genesis_hash,
            proxy_factory = %genesis.proxy_factory_address,
            call_registry = %genesis.call_registry_address,
            "fullnode genesis complete"
        );

        let proxies = ProxyRegistry::new(genesis.proxy_factory_address);
        let evm_reader = evm.clone();
        let (executor, handle) = FullnodeExecutor::new(evm, proxies.clone());
        let executor_task = tokio::spawn(executor.run());

        Ok((
            Self {
                executor: handle,
                anchor,
                evm_reader,
                verify_evm,
                proxies,
                genesis,
            },
            executor_task,
        ))
    }

    pub fn genesis_hash(&self) -> StateHash {
        self.genesis.genesis_hash
    }

    pub async fn get_state_root(&self) -> Result<StateHash, FullnodeError> {
        self.executor.get_state_root().await
    }

    /// Same as [`Self::get_state_root`] but additionally reports the
    /// backing EVM block number (spec.md's Fullnode supplement: correlating
    /// a state hash with a concrete L2 block in logs).
    pub async fn get_state_root_with_block(&self) -> Result<(StateHash, u64), FullnodeError> {
        self.executor.get_state_root_with_block().await
    }

    pub async fn simulate_l1_to_l2_call(&self, params: L1ToL2Params) -> Result<CallOutcome, FullnodeError> {
        self.executor.simulate(params).await
    }

    pub async fn execute_l1_to_l2_call(&self, params: L1ToL2Params) -> Result<CallOutcome, FullnodeError> {
        self.executor.execute(params).await
    }

    pub async fn execute_l2_transaction(&self, raw_tx: Bytes) -> Result<L2Outcome, FullnodeError> {
        self.executor.execute_l2(raw_tx).await
    }

    pub async fn snapshot(&self) -> Result<u64, FullnodeError> {
        self.executor.snapshot().await
    }

    pub async fn revert(&self, id: u64) -> Result<(), FullnodeError> {
        self.executor.revert(id).await
    }

    pub fn get_l1_sender_proxy_l2(&self, l1_address: L1Address) -> Address {
        self.proxies.derive(l1_address)
    }

    pub async fn is_l1_sender_proxy_l2_deployed(&self, l1_address: L1Address) -> Result<bool, FullnodeError> {
        self.proxies.is_deployed(&self.evm_reader, l1_address).await
    }

    pub async fn verify_state_chain(&self, events: &[AnchorEvent]) -> Result<ChainVerification, FullnodeError> {
        verify_state_chain(&self.verify_evm, &self.proxies, events).await
    }

    // Standard `eth_*` reads, served straight off the reader handle since
    // they never touch the serialized write queue (spec.md §5).

    pub async fn eth_get_balance(&self, address: Address) -> Result<alloy::primitives::U256, FullnodeError> {
        self.evm_reader.get_balance(address).await
    }

    pub async fn eth_get_code(&self, address: Address) -> Result<Bytes, FullnodeError> {
        self.evm_reader.get_code(address).await
    }

    pub async fn eth_call(&self, tx: &alloy::rpc::types::TransactionRequest) -> Result<Bytes, FullnodeError> {
        self.evm_reader.call(tx).await
    }

    pub async fn eth_block_number(&self) -> Result<u64, FullnodeError> {
        self.evm_reader.block_number().await
    }

    pub async fn eth_chain_id(&self) -> Result<u64, FullnodeError> {
        self.evm_reader.chain_id().await
    }

    pub async fn eth_get_transaction_count(&self, address: Address) -> Result<u64, FullnodeError> {
        self.evm_reader.get_transaction_count(address).await
    }

    /// Starts the event replayer as a background task. `poll_interval`
    /// governs how often it checks the anchor chain for new events once it
    /// has caught up.
    pub fn spawn_replayer(&self, poll_interval: Duration) -> (tokio::task::JoinHandle<()>, ReplayerStatus) {
        let status = ReplayerStatus::new();
        let status_for_task = status.clone();
        let mut replayer = Replayer::new(self.anchor.clone(), self.executor.clone());
        let task = tokio::spawn(async move {
            if let Err(err) = rollup_common::retry::with_backoff_when(|| replayer.resume(), is_transient).await {
                tracing::error!(?err, "fullnode replayer failed to resume at boot");
                status_for_task.mark_halted();
                return;
            }
            let mut index = 0u64;
            loop {
                let outcome = rollup_common::retry::with_backoff_when(|| replayer.poll_once(index), is_transient).await;
                match outcome {
                    Ok(new_index) => index = new_index,
                    Err(FullnodeError::Halted(_)) => break,
                    Err(err @ FullnodeError::DependencyUnavailable(_)) => {
                        // Bounded retries in `with_backoff_when` above are
                        // already exhausted by this point; the anchor chain
                        // has been unreachable for a sustained stretch
                        // rather than a single blip, so surface it the same
                        // as any other fatal replay error instead of
                        // spinning forever.
                        tracing::error!(?err, "fullnode replayer halted after exhausting retries");
                        status_for_task.mark_halted();
                        break;
                    }
                    Err(err) => {
                        tracing::error!(?err, "fullnode replayer halted");
                        status_for_task.mark_halted();
                        break;
                    }
                }
                tokio::time::sleep(poll_interval).await;
            }
        });
        (task, status)
    }
}

/// Classifies which `FullnodeError`s the replayer's polling loop may retry
/// (spec.md §7: "transient RPC errors are retried with bounded backoff at
/// the callsite"; `Divergence` is explicitly "never silently recovered").
/// Only an unreachable anchor RPC is transient; everything else — most
/// importantly a state-hash divergence — must surface on its first
/// occurrence instead of being retried into a delayed halt.
fn is_transient(err: &FullnodeError) -> bool {
    matches!(err, FullnodeError::DependencyUnavailable(_))
}

/// Shared, cheaply-clonable flag exposing whether the replayer has halted,
/// for `/status`-style reporting (`isSynced`).
#[derive(Clone)]
pub struct ReplayerStatus {
    halted: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

impl ReplayerStatus {
    fn new() -> Self {
        Self {
            halted: std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false)),
        }
    }

    fn mark_halted(&self) {
        self.halted.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn is_synced(&self) -> bool {
        !self.halted.load(std::sync::atomic::Ordering::SeqCst)
    }
}
