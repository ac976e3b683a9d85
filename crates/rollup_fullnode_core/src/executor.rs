use crate::error::FullnodeError;
use crate::evm_client::EvmClient;
use crate::l1_to_l2::{self, CallOutcome, L1ToL2Params};
use crate::l2_tx::{self, L2Outcome};
use crate::proxy::ProxyRegistry;
use alloy::primitives::Bytes;
use rollup_types::StateHash;
use std::collections::HashSet;
use tokio::sync::{mpsc, oneshot};

/// Serializes every state-mutating operation behind a single queue (spec.md
/// §5: "simulate, execute, snapshot, and revert are mutually exclusive").
/// Grounded in the teacher's `NodeExecutor`/`NodeExecutorHandle` split, but
/// collapsed from its `Future`/`pin_project` poll loop into a plain
/// sequential `tokio::spawn`ed task: every command here does its own
/// multi-step async work against a remote EVM (rather than a single
/// synchronous in-process VM call), and processing the channel one command
/// at a time already gives the required mutual exclusion.
pub struct FullnodeExecutor {
    evm: EvmClient,
    proxies: ProxyRegistry,
    snapshots: HashSet<u64>,
    receiver: mpsc::Receiver<Command>,
}

impl FullnodeExecutor {
    pub fn new(evm: EvmClient, proxies: ProxyRegistry) -> (Self, FullnodeExecutorHandle) {
        let (sender, receiver) = mpsc::channel(256);
        let this = Self {
            evm,
            proxies,
            snapshots: HashSet::new(),
            receiver,
        };
        (this, FullnodeExecutorHandle { sender })
    }

    pub async fn run(mut self) {
        while let Some(command) = self.receiver.recv().await {
            self.handle(command).await;
        }
        tracing::trace!("command channel closed; fullnode executor stopping");
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::GetStateRoot(reply) => {
                let result = self.evm.state_root().await.map(StateHash);
                let _ = reply.send(result);
            }
            Command::GetStateRootWithBlock(reply) => {
                let result = self.evm.state_root_and_block().await.map(|(root, number)| (StateHash(root), number));
                let _ = reply.send(result);
            }
            Command::Simulate(params, reply) => {
                let result = self.simulate(params).await;
                let _ = reply.send(result);
            }
            Command::Execute(params, reply) => {
                let result = l1_to_l2::run(&self.evm, &self.proxies, &params).await;
                let _ = reply.send(result);
            }
            Command::ExecuteL2(raw_tx, reply) => {
                let result = self.execute_l2(raw_tx).await;
                let _ = reply.send(result);
            }
            Command::Snapshot(reply) => {
                let result = self.snapshot().await;
                let _ = reply.send(result);
            }
            Command::Revert(id, reply) => {
                let result = self.revert(id).await;
                let _ = reply.send(result);
            }
        }
    }

    async fn simulate(&mut self, params: L1ToL2Params) -> Result<CallOutcome, FullnodeError> {
        let snapshot_id = self.evm.snapshot().await?;
        let result = l1_to_l2::run(&self.evm, &self.proxies, &params).await;
        // Simulation must leave no trace, including a proxy deployed mid-way
        // through step 2 (spec.md §4.1: "this is intentional").
        self.evm.revert(snapshot_id).await?;
        result
    }

    async fn execute_l2(&mut self, raw_tx: Bytes) -> Result<L2Outcome, FullnodeError> {
        l2_tx::run(&self.evm, raw_tx).await
    }

    async fn snapshot(&mut self) -> Result<u64, FullnodeError> {
        let id = self.evm.snapshot().await?;
        self.snapshots.insert(id);
        Ok(id)
    }

    async fn revert(&mut self, id: u64) -> Result<(), FullnodeError> {
        if !self.snapshots.remove(&id) {
            return Err(FullnodeError::UnknownSnapshot(id));
        }
        self.evm.revert(id).await
    }
}

#[derive(Clone)]
pub struct FullnodeExecutorHandle {
    sender: mpsc::Sender<Command>,
}

impl FullnodeExecutorHandle {
    pub async fn get_state_root(&self) -> Result<StateHash, FullnodeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::GetStateRoot(reply)).await?;
        rx.await.map_err(dropped)?
    }

    /// Same as [`Self::get_state_root`] but additionally reports the
    /// backing EVM block number, for operators correlating a state hash
    /// with a concrete L2 block.
    pub async fn get_state_root_with_block(&self) -> Result<(StateHash, u64), FullnodeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::GetStateRootWithBlock(reply)).await?;
        rx.await.map_err(dropped)?
    }

    pub async fn simulate(&self, params: L1ToL2Params) -> Result<CallOutcome, FullnodeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Simulate(params, reply)).await?;
        rx.await.map_err(dropped)?
    }

    pub async fn execute(&self, params: L1ToL2Params) -> Result<CallOutcome, FullnodeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Execute(params, reply)).await?;
        rx.await.map_err(dropped)?
    }

    pub async fn execute_l2(&self, raw_tx: Bytes) -> Result<L2Outcome, FullnodeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::ExecuteL2(raw_tx, reply)).await?;
        rx.await.map_err(dropped)?
    }

    pub async fn snapshot(&self) -> Result<u64, FullnodeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        rx.await.map_err(dropped)?
    }

    pub async fn revert(&self, id: u64) -> Result<(), FullnodeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Revert(id, reply)).await?;
        rx.await.map_err(dropped)?
    }

    async fn send(&self, command: Command) -> Result<(), FullnodeError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| FullnodeError::DependencyUnavailable(anyhow::anyhow!("fullnode executor has stopped")))
    }
}

fn dropped(_: oneshot::error::RecvError) -> FullnodeError {
    FullnodeError::DependencyUnavailable(anyhow::anyhow!("fullnode executor dropped the reply channel"))
}

enum Command {
    GetStateRoot(oneshot::Sender<Result<StateHash, FullnodeError>>),
    GetStateRootWithBlock(oneshot::Sender<Result<(StateHash, u64), FullnodeError>>),
    Simulate(L1ToL2Params, oneshot::Sender<Result<CallOutcome, FullnodeError>>),
    Execute(L1ToL2Params, oneshot::Sender<Result<CallOutcome, FullnodeError>>),
    ExecuteL2(Bytes, oneshot::Sender<Result<L2Outcome, FullnodeError>>),
    Snapshot(oneshot::Sender<Result<u64, FullnodeError>>),
    Revert(u64, oneshot::Sender<Result<(), FullnodeError>>),
}
