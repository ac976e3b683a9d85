use crate::classify::{classify, validate_direct_hint};
use crate::discovery::{discover_and_register, DiscoveredCall};
use crate::error::BuilderError;
use crate::fullnode_client::FullnodeClient;
use crate::proxy_index::ProxyIndex;
use crate::tx::{self, DecodedTx};
use rollup_anchor_client::AnchorClient;
use rollup_commitment::{AdminSigner, L2BlockProof};
use rollup_common::CancelToken;
use rollup_types::{Classification, SourceChain, StateHash, SubmitHints};
use std::time::Duration;

/// Outcome of a successful `/submit`.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub anchor_tx_hash: alloy::primitives::TxHash,
    pub classification: Classification,
    pub discovered_calls: Vec<DiscoveredCall>,
}

/// Outcome of a successful `/simulate`: identical accounting to a submit, but
/// nothing here was left in effect on either chain.
#[derive(Debug, Clone)]
pub struct SimulateOutcome {
    pub classification: Classification,
    pub discovered_calls: Vec<DiscoveredCall>,
    pub would_succeed: bool,
}

#[derive(Debug, Clone)]
pub struct StatusOutcome {
    pub anchor_state_hash: StateHash,
    pub fullnode_state_hash: StateHash,
    pub synchronized: bool,
}

/// Brackets a Fullnode `evm_snapshot`/`evm_revert` pair so the revert still
/// happens when the enclosing future is dropped mid-await (spec.md §5:
/// "release on all exit paths") — a client disconnect during discovery
/// otherwise sequential `.await`s can't observe and would leak the snapshot.
///
/// Grounded on the teacher's `InMemoryNode::fork_state`/restore-on-drop
/// guards around a held VM snapshot, generalized from sync to async by
/// deferring the actual revert to a best-effort spawned task, since `Drop`
/// cannot await.
struct FullnodeSnapshotGuard {
    fullnode: FullnodeClient,
    id: Option<u64>,
}

impl FullnodeSnapshotGuard {
    async fn acquire(fullnode: &FullnodeClient) -> Result<Self, BuilderError> {
        let id = fullnode.snapshot().await?;
        Ok(Self {
            fullnode: fullnode.clone(),
            id: Some(id),
        })
    }

    /// Reverts on the happy path, propagating any RPC failure to the caller.
    async fn release(&mut self) -> Result<(), BuilderError> {
        if let Some(id) = self.id.take() {
            self.fullnode.revert(id).await?;
        }
        Ok(())
    }
}

impl Drop for FullnodeSnapshotGuard {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            let fullnode = self.fullnode.clone();
            tokio::spawn(async move {
                if let Err(err) = fullnode.revert(id).await {
                    tracing::warn!(snapshot_id = id, %err, "failed to revert abandoned fullnode snapshot");
                }
            });
        }
    }
}

/// The Builder's sequencing surface (spec.md §4.2): classify, discover and
/// register prerequisite cross-layer calls, then broadcast.
///
/// Grounded in the teacher's `node::InMemoryNode`, which is likewise the one
/// place that owns both an execution backend and an upstream chain client and
/// coordinates side effects between them.
pub struct BuilderCore {
    anchor: AnchorClient,
    fullnode: FullnodeClient,
    signer: AdminSigner,
    proxy_index: ProxyIndex,
    discovery_iteration_cap: u32,
    broadcast_timeout: Duration,
    /// Fires on operator shutdown (spec.md §5's "cancellation and
    /// timeouts"). Raced against the post-broadcast receipt wait so a
    /// submit already past the point of no return surfaces
    /// `CancelledAfterBroadcast` instead of hanging until the server socket
    /// is torn out from under it.
    cancellation: CancelToken,
}

impl BuilderCore {
    pub fn new(
        anchor: AnchorClient,
        fullnode: FullnodeClient,
        signer: AdminSigner,
        discovery_iteration_cap: u32,
        broadcast_timeout: Duration,
        cancellation: CancelToken,
    ) -> Self {
        Self {
            anchor,
            fullnode,
            signer,
            proxy_index: ProxyIndex::new(),
            discovery_iteration_cap,
            broadcast_timeout,
            cancellation,
        }
    }

    pub async fn status(&self) -> Result<StatusOutcome, BuilderError> {
        let anchor_state_hash = self.anchor.l2_block_hash().await?;
        let fullnode_state_hash = self.fullnode.get_state_root().await?;
        Ok(StatusOutcome {
            anchor_state_hash,
            fullnode_state_hash,
            synchronized: anchor_state_hash == fullnode_state_hash,
        })
    }

    pub async fn submit(
        &self,
        source_chain: SourceChain,
        hints: SubmitHints,
        raw_tx: &[u8],
    ) -> Result<SubmitOutcome, BuilderError> {
        let decoded = tx::decode(raw_tx)?;
        let classification = classify(source_chain, &hints, &decoded, &self.anchor, &self.proxy_index)
            .await
            .map_err(BuilderError::DependencyUnavailable)?;

        match &classification {
            Classification::L2Transaction => {
                let outcome = self.l2_transaction_path(&decoded, raw_tx).await?;
                Ok(SubmitOutcome {
                    anchor_tx_hash: outcome,
                    classification,
                    discovered_calls: Vec::new(),
                })
            }
            Classification::DirectL1ToL2 { l2_target } => {
                validate_direct_hint(&decoded, *l2_target)?;
                let candidates = vec![*l2_target];
                let (anchor_tx_hash, discovered_calls) =
                    self.contract_call_path(&decoded, raw_tx, &candidates).await?;
                Ok(SubmitOutcome {
                    anchor_tx_hash,
                    classification,
                    discovered_calls,
                })
            }
            Classification::ContractCall { candidate_l2_addresses } => {
                let candidates = candidate_l2_addresses.clone();
                let (anchor_tx_hash, discovered_calls) =
                    self.contract_call_path(&decoded, raw_tx, &candidates).await?;
                Ok(SubmitOutcome {
                    anchor_tx_hash,
                    classification,
                    discovered_calls,
                })
            }
            Classification::PlainL1Broadcast => {
                let anchor_tx_hash = self
                    .anchor
                    .send_raw_transaction(raw_tx, self.broadcast_timeout, &self.cancellation)
                    .await?;
                Ok(SubmitOutcome {
                    anchor_tx_hash,
                    classification,
                    discovered_calls: Vec::new(),
                })
            }
        }
    }

    /// `/simulate`'s read-only counterpart to [`Self::submit`]: runs the same
    /// classify/discover/register dance inside both an anchor-chain snapshot
    /// and a Fullnode snapshot, always reverting both regardless of outcome
    /// (spec.md §4.2: "has no observable effect on either chain's state").
    pub async fn simulate(
        &self,
        source_chain: SourceChain,
        hints: SubmitHints,
        raw_tx: &[u8],
    ) -> Result<SimulateOutcome, BuilderError> {
        let decoded = tx::decode(raw_tx)?;
        let classification = classify(source_chain, &hints, &decoded, &self.anchor, &self.proxy_index)
            .await
            .map_err(BuilderError::DependencyUnavailable)?;

        if matches!(classification, Classification::L2Transaction | Classification::PlainL1Broadcast) {
            let would_succeed = self.dry_run_plain(&decoded).await;
            return Ok(SimulateOutcome {
                classification,
                discovered_calls: Vec::new(),
                would_succeed,
            });
        }

        let candidates = match &classification {
            Classification::DirectL1ToL2 { l2_target } => {
                validate_direct_hint(&decoded, *l2_target)?;
                vec![*l2_target]
            }
            Classification::ContractCall { candidate_l2_addresses } => candidate_l2_addresses.clone(),
            _ => unreachable!("handled above"),
        };

        let anchor_snapshot = self.anchor.snapshot().await?;
        let result = self.simulate_contract_call(&decoded, &candidates).await;
        self.anchor.revert(anchor_snapshot).await?;

        let (discovered_calls, would_succeed) = result?;
        tracing::debug!(
            would_succeed,
            call_details = ?discovered_calls,
            "simulate complete"
        );
        Ok(SimulateOutcome {
            classification,
            discovered_calls,
            would_succeed,
        })
    }

    async fn dry_run_plain(&self, decoded: &DecodedTx) -> bool {
        self.anchor.dry_run(decoded.as_call_request()).await.is_ok()
    }

    async fn simulate_contract_call(
        &self,
        decoded: &DecodedTx,
        candidates: &[alloy::primitives::Address],
    ) -> Result<(Vec<DiscoveredCall>, bool), BuilderError> {
        let mut snapshot = FullnodeSnapshotGuard::acquire(&self.fullnode).await?;
        let outcome = discover_and_register(
            decoded,
            candidates,
            &self.anchor,
            &self.fullnode,
            &self.signer,
            &self.proxy_index,
            self.discovery_iteration_cap,
        )
        .await;
        snapshot.release().await?;

        let outcome = outcome?;
        let would_succeed = self.anchor.dry_run(decoded.as_call_request()).await.is_ok();
        Ok((outcome.calls, would_succeed))
    }

    /// Discovers and registers every prerequisite cross-layer call, then
    /// checks preconditions and broadcasts. Fullnode state is reverted
    /// *before* the pre-broadcast checks run, per spec.md §2's flow diagram:
    /// discovery against a Fullnode snapshot is exploratory, and the
    /// snapshot must not outlive it even while the broadcast is still
    /// pending.
    async fn contract_call_path(
        &self,
        decoded: &DecodedTx,
        raw_tx: &[u8],
        candidates: &[alloy::primitives::Address],
    ) -> Result<(alloy::primitives::TxHash, Vec<DiscoveredCall>), BuilderError> {
        let mut snapshot = FullnodeSnapshotGuard::acquire(&self.fullnode).await?;
        let outcome = discover_and_register(
            decoded,
            candidates,
            &self.anchor,
            &self.fullnode,
            &self.signer,
            &self.proxy_index,
            self.discovery_iteration_cap,
        )
        .await;
        snapshot.release().await?;
        let outcome = outcome?;

        for l2_address in candidates {
            if !self.anchor.is_proxy_deployed(*l2_address).await? {
                self.anchor.deploy_proxy_and_wait(*l2_address).await?;
            }
        }

        self.anchor
            .dry_run(decoded.as_call_request())
            .await
            .map_err(|err| BuilderError::PreBroadcastCheckFailed(err.to_string()))?;

        let anchor_tx_hash = self
            .anchor
            .send_raw_transaction(raw_tx, self.broadcast_timeout, &self.cancellation)
            .await?;
        Ok((anchor_tx_hash, outcome.calls))
    }

    /// Executes an `L2` transaction against the Fullnode and commits the
    /// resulting block on the anchor chain (spec.md §4.2's "L2 transaction
    /// path"). No outgoing calls are modeled (see `register_one` in
    /// `discovery.rs` for the same reasoning), so `commit_l2_block` — never
    /// the with-outgoing-calls variant — is always the right anchor call.
    async fn l2_transaction_path(
        &self,
        decoded: &DecodedTx,
        raw_tx: &[u8],
    ) -> Result<alloy::primitives::TxHash, BuilderError> {
        let anchor_nonce = self.anchor.get_transaction_count(decoded.sender).await?;
        if decoded.nonce != anchor_nonce {
            return Err(BuilderError::NonceMismatch {
                address: decoded.sender,
                tx_nonce: decoded.nonce,
                account_nonce: anchor_nonce,
            });
        }

        let prev_hash = self.anchor.l2_block_hash().await?;
        let fullnode_hash = self.fullnode.get_state_root().await?;
        if prev_hash != fullnode_hash {
            return Err(BuilderError::FullnodeUnsynchronized {
                anchor: prev_hash,
                fullnode: fullnode_hash,
            });
        }

        let execution = self.fullnode.execute_l2_transaction(raw_tx).await?;
        if !execution.success {
            return Err(BuilderError::PreBroadcastCheckFailed(
                execution.error.unwrap_or_else(|| "L2 transaction reverted".to_string()),
            ));
        }

        let proof = L2BlockProof::sign(
            &self.signer,
            prev_hash,
            raw_tx,
            execution.new_state_root,
            &[],
            &[],
            execution.new_state_root,
        )
        .map_err(BuilderError::DependencyUnavailable)?;

        let anchor_tx_hash = self
            .anchor
            .commit_l2_block(
                prev_hash,
                raw_tx,
                execution.new_state_root,
                proof.signature.as_bytes().as_ref(),
            )
            .await?;
        Ok(anchor_tx_hash)
    }
}
