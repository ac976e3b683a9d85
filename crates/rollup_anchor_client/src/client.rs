use crate::abi::{INativeRollupCore, OutgoingCallAbi, ResponseAbi};
use crate::convert::{response_from_abi, response_to_abi};
use crate::error::AnchorClientError;
use crate::trace::parse_call_tracer_json;
use alloy::primitives::{Address, Bytes, TxHash, B256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use rollup_types::{
    AnchorEvent, EventOrderKey, IncomingCallHandled, IncomingCallResponse, L2BlockProcessed,
    L2Address, OutgoingCall, ResponseKey, StateHash,
};
use std::sync::Arc;
use std::time::Duration;

type AnchorProvider = Arc<dyn Provider + Send + Sync>;

/// Thin wrapper over a JSON-RPC connection to the anchor (L1) chain: ABI
/// calls against `NativeRollupCore`, event-log reads, `debug_traceCall`, and
/// raw transaction broadcast with confirmation polling.
///
/// Grounded in the teacher's `l1_sidecar` crate (`anvil.rs`'s admin-RPC
/// wrapper, `l1_watcher.rs`'s event polling, `l1_sender.rs`'s send-and-wait
/// loop), generalized from "one specific L1 fork" to "any anchor chain the
/// operator points us at".
#[derive(Clone)]
pub struct AnchorClient {
    provider: AnchorProvider,
    rollup: Address,
    read_timeout: Duration,
}

impl AnchorClient {
    pub fn connect(rpc_url: url::Url, rollup: Address, read_timeout: Duration) -> anyhow::Result<Self> {
        let provider = ProviderBuilder::new().on_http(rpc_url);
        Ok(Self {
            provider: Arc::new(provider),
            rollup,
            read_timeout,
        })
    }

    fn contract(&self) -> INativeRollupCore::INativeRollupCoreInstance<(), AnchorProvider> {
        INativeRollupCore::new(self.rollup, self.provider.clone())
    }

    pub async fn l2_block_hash(&self) -> Result<StateHash, AnchorClientError> {
        let hash = self
            .contract()
            .l2BlockHash()
            .call()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?
            ._0;
        Ok(StateHash(hash))
    }

    pub async fn l2_block_number(&self) -> Result<u64, AnchorClientError> {
        let number = self
            .contract()
            .l2BlockNumber()
            .call()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?
            ._0;
        Ok(number.try_into().unwrap_or(u64::MAX))
    }

    pub async fn get_proxy_address(&self, l2_address: L2Address) -> Result<Address, AnchorClientError> {
        Ok(self
            .contract()
            .getProxyAddress(l2_address)
            .call()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?
            ._0)
    }

    pub async fn is_proxy_deployed(&self, l2_address: L2Address) -> Result<bool, AnchorClientError> {
        Ok(self
            .contract()
            .isProxyDeployed(l2_address)
            .call()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?
            ._0)
    }

    pub async fn deploy_proxy(&self, l2_address: L2Address) -> Result<TxHash, AnchorClientError> {
        let pending = self
            .contract()
            .deployProxy(l2_address)
            .send()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        Ok(*pending.tx_hash())
    }

    /// Deploys the L2→L1 proxy for `l2_address` and waits for the deployment
    /// to confirm, used by the Builder before a dry-run that depends on the
    /// proxy already existing (spec.md §4.2's pre-broadcast check 1).
    pub async fn deploy_proxy_and_wait(&self, l2_address: L2Address) -> Result<TxHash, AnchorClientError> {
        let pending = self
            .contract()
            .deployProxy(l2_address)
            .send()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        if !receipt.status() {
            return Err(AnchorClientError::BroadcastReverted {
                reason: format!("deployProxy reverted for l2 address {l2_address}"),
            });
        }
        Ok(receipt.transaction_hash)
    }

    pub async fn get_response_key(
        &self,
        l2_address: L2Address,
        state_hash: StateHash,
        call_data: &[u8],
    ) -> Result<ResponseKey, AnchorClientError> {
        let key = self
            .contract()
            .getResponseKey(l2_address, state_hash.0, Bytes::copy_from_slice(call_data))
            .call()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?
            ._0;
        Ok(ResponseKey(key))
    }

    pub async fn incoming_call_registered(&self, key: ResponseKey) -> Result<bool, AnchorClientError> {
        Ok(self
            .contract()
            .incomingCallRegistered(key.0)
            .call()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?
            ._0)
    }

    pub async fn incoming_call_response(
        &self,
        key: ResponseKey,
        l2_address: L2Address,
        pre_state_hash: StateHash,
    ) -> Result<IncomingCallResponse, AnchorClientError> {
        let response: ResponseAbi = self
            .contract()
            .incomingCallResponses(key.0)
            .call()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?
            ._0;
        Ok(response_from_abi(l2_address, pre_state_hash, &response))
    }

    /// Registers a response for a single cross-layer call. Waits for the
    /// transaction to be mined; the response-uniqueness invariant (spec.md
    /// §4.3 invariant 3) means a revert here is always a
    /// `RegistrationFailed`, never a race the caller should retry.
    pub async fn register_incoming_call(
        &self,
        l2_address: L2Address,
        pre_state_hash: StateHash,
        call_data: &[u8],
        response: &IncomingCallResponse,
        proof: &[u8],
    ) -> Result<TxHash, AnchorClientError> {
        let abi_response = response_to_abi(l2_address, response);
        let pending = self
            .contract()
            .registerIncomingCall(
                l2_address,
                pre_state_hash.0,
                Bytes::copy_from_slice(call_data),
                abi_response,
                Bytes::copy_from_slice(proof),
            )
            .send()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        if !receipt.status() {
            return Err(AnchorClientError::BroadcastReverted {
                reason: "registerIncomingCall reverted".to_string(),
            });
        }
        Ok(receipt.transaction_hash)
    }

    pub async fn commit_l2_block(
        &self,
        prev_hash: StateHash,
        rlp_encoded_tx: &[u8],
        final_state_hash: StateHash,
        proof: &[u8],
    ) -> Result<TxHash, AnchorClientError> {
        let pending = self
            .contract()
            .commitL2Block(
                prev_hash.0,
                Bytes::copy_from_slice(rlp_encoded_tx),
                final_state_hash.0,
                Bytes::copy_from_slice(proof),
            )
            .send()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        Ok(*pending.tx_hash())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn commit_l2_block_with_outgoing_calls(
        &self,
        prev_hash: StateHash,
        rlp_encoded_tx: &[u8],
        pre_outgoing_calls_state_hash: StateHash,
        outgoing_calls: &[OutgoingCall],
        expected_results: &[Bytes],
        final_state_hash: StateHash,
        proof: &[u8],
    ) -> Result<TxHash, AnchorClientError> {
        let abi_calls: Vec<OutgoingCallAbi> = outgoing_calls.iter().map(OutgoingCallAbi::from).collect();
        let pending = self
            .contract()
            .commitL2BlockWithOutgoingCalls(
                prev_hash.0,
                Bytes::copy_from_slice(rlp_encoded_tx),
                pre_outgoing_calls_state_hash.0,
                abi_calls,
                expected_results.to_vec(),
                final_state_hash.0,
                Bytes::copy_from_slice(proof),
            )
            .send()
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        Ok(*pending.tx_hash())
    }

    /// Broadcasts a pre-signed raw transaction and waits for its receipt
    /// within `timeout`, racing that wait against `cancellation`.
    ///
    /// Once `send_raw_transaction` below has accepted the transaction into
    /// the anchor chain's mempool, it cannot be un-broadcast (spec.md §7:
    /// "the user tx may still confirm"). A `cancellation` that fires before
    /// that point simply lets the caller's own future drop mid-await; one
    /// that fires after is reported as `CancelledAfterBroadcast` rather than
    /// silently abandoning the caller to the full `timeout`.
    pub async fn send_raw_transaction(
        &self,
        raw_tx: &[u8],
        timeout: Duration,
        cancellation: &rollup_common::CancelToken,
    ) -> Result<TxHash, AnchorClientError> {
        let pending = self
            .provider
            .send_raw_transaction(raw_tx)
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        let hash = *pending.tx_hash();

        tokio::select! {
            _ = cancellation.cancelled() => Err(AnchorClientError::CancelledAfterBroadcast { tx_hash: hash }),
            outcome = tokio::time::timeout(timeout, pending.get_receipt()) => {
                let receipt = outcome
                    .map_err(|_| AnchorClientError::BroadcastTimeout(timeout))?
                    .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
                if !receipt.status() {
                    return Err(AnchorClientError::BroadcastReverted {
                        reason: format!("transaction {hash} mined with failure status"),
                    });
                }
                Ok(hash)
            }
        }
    }

    /// Read-only dry-run of a transaction request against current anchor
    /// state (used for pre-broadcast checks and `/simulate`).
    pub async fn dry_run(&self, tx: TransactionRequest) -> Result<Bytes, AnchorClientError> {
        self.provider
            .call(&tx)
            .await
            .map_err(|e| AnchorClientError::BroadcastReverted { reason: e.to_string() })
    }

    /// `debug_traceCall` with the `callTracer`, returning a parsed call-trace
    /// tree the Builder walks depth-first during discovery.
    pub async fn debug_trace_call(
        &self,
        tx: TransactionRequest,
    ) -> Result<rollup_types::CallTrace, AnchorClientError> {
        let params = serde_json::json!([
            tx,
            "latest",
            { "tracer": "callTracer" }
        ]);
        let raw: serde_json::Value = self
            .provider
            .client()
            .request("debug_traceCall", params)
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        parse_call_tracer_json(&raw)
    }

    /// Reads and orders every `L2BlockProcessed`/`IncomingCallHandled`
    /// event in `[from_block, to_block]`, strictly by
    /// `(anchor_block_number, anchor_log_index)` (spec.md §3).
    pub async fn get_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<AnchorEvent>, AnchorClientError> {
        use alloy::rpc::types::Filter;

        let filter = Filter::new()
            .address(self.rollup)
            .from_block(from_block)
            .to_block(to_block);
        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;

        let mut events = Vec::with_capacity(logs.len());
        for log in logs {
            let order = EventOrderKey {
                block_number: log.block_number.unwrap_or_default(),
                log_index: log.log_index.unwrap_or_default(),
            };
            if let Ok(decoded) = log.log_decode::<INativeRollupCore::L2BlockProcessed>() {
                let data = decoded.inner.data;
                events.push(AnchorEvent::L2BlockProcessed(L2BlockProcessed {
                    order,
                    prev_hash: StateHash(data.prevHash),
                    new_hash: StateHash(data.newHash),
                    rlp_encoded_tx: data.rlpEncodedTx,
                    outgoing_calls: data.outgoingCalls.iter().map(OutgoingCall::from).collect(),
                    outgoing_results: data.outgoingResults,
                }));
            } else if let Ok(decoded) = log.log_decode::<INativeRollupCore::IncomingCallHandled>() {
                let data = decoded.inner.data;
                events.push(AnchorEvent::IncomingCallHandled(IncomingCallHandled {
                    order,
                    l2_address: data.l2Address,
                    l1_caller: data.l1Caller,
                    prev_hash: StateHash(data.prevHash),
                    call_data: data.callData,
                    value: data.value,
                    outgoing_calls: data.outgoingCalls.iter().map(OutgoingCall::from).collect(),
                    outgoing_results: data.outgoingResults,
                    final_state_hash: StateHash(data.finalStateHash),
                }));
            }
        }
        events.sort_by_key(|e| e.order());
        Ok(events)
    }

    pub fn rollup_address(&self) -> Address {
        self.rollup
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// `eth_getTransactionCount` for `address` on the anchor chain, used by
    /// the Builder to reject a mismatched nonce before any cross-layer work
    /// begins (spec.md §7's `NonceMismatch`).
    pub async fn get_transaction_count(&self, address: Address) -> Result<u64, AnchorClientError> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))
    }

    /// `evm_snapshot` against the anchor chain. Used to bracket `/simulate`'s
    /// discovery-and-registration dance so it has no observable effect on
    /// anchor state (spec.md §4.2: "inside an anchor-chain snapshot that is
    /// always reverted").
    pub async fn snapshot(&self) -> Result<u64, AnchorClientError> {
        let id: String = self
            .provider
            .client()
            .request("evm_snapshot", ())
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        u64::from_str_radix(id.trim_start_matches("0x"), 16)
            .map_err(|_| AnchorClientError::Decode(format!("bad anchor snapshot id: {id}")))
    }

    pub async fn revert(&self, id: u64) -> Result<(), AnchorClientError> {
        let ok: bool = self
            .provider
            .client()
            .request("evm_revert", (format!("0x{id:x}"),))
            .await
            .map_err(|e| AnchorClientError::DependencyUnavailable(e.into()))?;
        if ok {
            Ok(())
        } else {
            Err(AnchorClientError::UnknownSnapshot(id))
        }
    }
}

/// Computes a response key locally, without a round-trip to the anchor
/// chain. The canonical definition lives in `rollup_commitment::response_key`
/// (what this just forwards to) and must match the anchor contract's
/// `getResponseKey` byte for byte; `get_response_key` above is the
/// round-trip fallback when that needs confirming against the live chain.
pub fn local_response_key(l2_address: L2Address, pre_state_hash: StateHash, call_data: &[u8]) -> B256 {
    rollup_commitment::response_key(l2_address, pre_state_hash, call_data).0
}
