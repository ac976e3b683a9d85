use crate::error::FullnodeError;
use crate::executor::FullnodeExecutorHandle;
use crate::l1_to_l2::L1ToL2Params;
use rollup_anchor_client::AnchorClient;
use rollup_types::{AnchorEvent, StateHash};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Consumes anchor-chain events strictly in `(block, logIndex)` order and
/// drives the executor so canonical L2 state tracks the anchor log exactly
/// (spec.md §4.1's event replayer). A state-hash mismatch after any event is
/// fatal and latches `halted`; the replayer does not resume on its own.
pub struct Replayer {
    anchor: AnchorClient,
    executor: FullnodeExecutorHandle,
    halted: Arc<AtomicBool>,
    halted_at: Arc<std::sync::Mutex<Option<u64>>>,
    next_block: u64,
}

impl Replayer {
    pub fn new(anchor: AnchorClient, executor: FullnodeExecutorHandle) -> Self {
        Self {
            anchor,
            executor,
            halted: Arc::new(AtomicBool::new(false)),
            halted_at: Arc::new(std::sync::Mutex::new(None)),
            next_block: 0,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }

    pub fn halted_event_index(&self) -> Option<u64> {
        *self.halted_at.lock().expect("replayer halted_at mutex poisoned")
    }

    /// Determines the suffix of anchor events to (re)play on boot: reads
    /// the anchor's current hash, compares to the Fullnode's own hash, and
    /// selects the suffix whose first event's `prevHash` equals our hash.
    /// Idempotent across restarts (spec.md §4.1).
    pub async fn resume(&mut self) -> Result<(), FullnodeError> {
        let anchor_hash = self.anchor.l2_block_hash().await?;
        let fullnode_hash = self.executor.get_state_root().await?;

        if anchor_hash == fullnode_hash {
            tracing::info!(%fullnode_hash, "fullnode already in sync with anchor chain at boot");
            self.next_block = self.anchor.l2_block_number().await?.saturating_add(1);
            return Ok(());
        }

        let anchor_block = self.anchor.l2_block_number().await?;
        let events = self.anchor.get_events(0, anchor_block).await?;
        let suffix_start = events.iter().position(|e| e.prev_hash() == fullnode_hash);

        let Some(start) = suffix_start else {
            return Err(FullnodeError::NoResumableSuffix);
        };

        tracing::warn!(
            resuming_from_index = start,
            total_events = events.len(),
            "fullnode behind anchor chain at boot; replaying suffix"
        );
        self.apply_events(&events[start..], start as u64).await?;
        self.next_block = anchor_block.saturating_add(1);
        Ok(())
    }

    /// Polls for and applies any events since the last processed block.
    pub async fn poll_once(&mut self, base_index: u64) -> Result<u64, FullnodeError> {
        if self.is_halted() {
            return Err(FullnodeError::Halted(self.halted_event_index().unwrap_or(0)));
        }
        let tip = self.anchor.l2_block_number().await?;
        if tip < self.next_block {
            return Ok(base_index);
        }
        let events = self.anchor.get_events(self.next_block, tip).await?;
        let applied = events.len() as u64;
        self.apply_events(&events, base_index).await?;
        self.next_block = tip.saturating_add(1);
        Ok(base_index + applied)
    }

    async fn apply_events(&mut self, events: &[AnchorEvent], base_index: u64) -> Result<(), FullnodeError> {
        for (offset, event) in events.iter().enumerate() {
            let index = base_index + offset as u64;
            if let Err(err) = self.apply_one(event, index).await {
                if let FullnodeError::Divergence { event_index, .. } = &err {
                    self.halted.store(true, Ordering::SeqCst);
                    *self.halted_at.lock().expect("poisoned") = Some(*event_index);
                    tracing::error!(event_index, "fatal state-hash divergence; replayer halted");
                }
                return Err(err);
            }
            tracing::debug!(index, "replayed anchor event");
        }
        Ok(())
    }

    async fn apply_one(&mut self, event: &AnchorEvent, index: u64) -> Result<(), FullnodeError> {
        let expected_post = event.post_hash();
        let computed_post = match event {
            AnchorEvent::L2BlockProcessed(e) => {
                let outcome = self.executor.execute_l2(e.rlp_encoded_tx.clone()).await?;
                outcome.new_state_root
            }
            AnchorEvent::IncomingCallHandled(e) => {
                let params = L1ToL2Params {
                    l1_caller: e.l1_caller,
                    l2_target: e.l2_address,
                    call_data: e.call_data.clone(),
                    value: e.value,
                    expected_pre_state_hash: e.prev_hash,
                };
                let outcome = self.executor.execute(params).await?;
                outcome.new_state_root
            }
        };

        if computed_post != expected_post {
            return Err(FullnodeError::Divergence {
                event_index: index,
                expected: expected_post,
                actual: computed_post,
            });
        }
        Ok(())
    }
}
