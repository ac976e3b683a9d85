use crate::error::BuilderError;
use alloy::primitives::{Address, Bytes, TxHash, B256, U256, U64};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use rollup_types::StateHash;
use serde::{Deserialize, Serialize};

/// Wire shape of `nativerollup_simulateL1ToL2Call`/`executeL1ToL2Call`'s
/// request body, matching `rollup_fullnode_api::types::L1ToL2CallRequest`
/// byte for byte (the two crates are independently versioned sides of one
/// JSON-RPC contract, the way the teacher's sidecar clients match their
/// server counterparts' wire shapes without sharing a types crate).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct L1ToL2CallRequest {
    l1_caller: Address,
    l2_target: Address,
    call_data: Bytes,
    value: U256,
    expected_pre_state_hash: StateHash,
}

/// Wire shape of `nativerollup_getStateRoot`'s response, matching
/// `rollup_fullnode_api::types::StateRootResponse` byte for byte. Only
/// `state_root` is needed on this side; `block_number` rides along for
/// parity with the server's response shape and is ignored here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateRootResponse {
    state_root: B256,
    #[allow(dead_code)]
    block_number: U64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct L1ToL2CallResponse {
    success: bool,
    return_data: Bytes,
    new_state_root: StateHash,
    gas_used: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct L2TransactionResponse {
    success: bool,
    tx_hash: TxHash,
    return_data: Bytes,
    new_state_root: StateHash,
    gas_used: u64,
    error: Option<String>,
}

/// Parameters for an L1→L2 call, independent of simulate/execute.
#[derive(Debug, Clone)]
pub struct L1ToL2CallParams {
    pub l1_caller: Address,
    pub l2_target: Address,
    pub call_data: Bytes,
    pub value: U256,
    pub expected_pre_state_hash: StateHash,
}

/// Result shared by `simulateL1ToL2Call`/`executeL1ToL2Call`.
#[derive(Debug, Clone)]
pub struct L1ToL2CallOutcome {
    pub success: bool,
    pub return_data: Bytes,
    pub new_state_root: StateHash,
    pub gas_used: u64,
}

/// Result of `executeL2Transaction`.
#[derive(Debug, Clone)]
pub struct L2ExecutionOutcome {
    pub success: bool,
    pub tx_hash: TxHash,
    pub return_data: Bytes,
    pub new_state_root: StateHash,
    pub gas_used: u64,
    pub error: Option<String>,
}

/// The Builder's client onto its own Fullnode (spec.md §6's `fullnode-url`).
///
/// Grounded in the teacher's `l1_sidecar::anvil` module, which drives a
/// sibling JSON-RPC service the same way: a thin `jsonrpsee` HTTP client
/// exposing one typed method per RPC the caller actually needs.
#[derive(Clone)]
pub struct FullnodeClient {
    http: HttpClient,
}

impl FullnodeClient {
    pub fn connect(url: url::Url) -> anyhow::Result<Self> {
        let http = HttpClientBuilder::default().build(url)?;
        Ok(Self { http })
    }

    fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> BuilderError {
        BuilderError::DependencyUnavailable(err.into())
    }

    pub async fn get_state_root(&self) -> Result<StateHash, BuilderError> {
        let response: StateRootResponse = self
            .http
            .request("nativerollup_getStateRoot", rpc_params![])
            .await
            .map_err(Self::unavailable)?;
        Ok(StateHash(response.state_root))
    }

    pub async fn simulate_l1_to_l2_call(
        &self,
        params: L1ToL2CallParams,
    ) -> Result<L1ToL2CallOutcome, BuilderError> {
        let request = L1ToL2CallRequest::from(params);
        let response: L1ToL2CallResponse = self
            .http
            .request("nativerollup_simulateL1ToL2Call", rpc_params![request])
            .await
            .map_err(Self::unavailable)?;
        Ok(response.into())
    }

    pub async fn execute_l1_to_l2_call(
        &self,
        params: L1ToL2CallParams,
    ) -> Result<L1ToL2CallOutcome, BuilderError> {
        let request = L1ToL2CallRequest::from(params);
        let response: L1ToL2CallResponse = self
            .http
            .request("nativerollup_executeL1ToL2Call", rpc_params![request])
            .await
            .map_err(Self::unavailable)?;
        Ok(response.into())
    }

    pub async fn execute_l2_transaction(&self, raw_tx: &[u8]) -> Result<L2ExecutionOutcome, BuilderError> {
        let response: L2TransactionResponse = self
            .http
            .request(
                "nativerollup_executeL2Transaction",
                rpc_params![Bytes::copy_from_slice(raw_tx)],
            )
            .await
            .map_err(Self::unavailable)?;
        Ok(L2ExecutionOutcome {
            success: response.success,
            tx_hash: response.tx_hash,
            return_data: response.return_data,
            new_state_root: response.new_state_root,
            gas_used: response.gas_used,
            error: response.error,
        })
    }

    /// Nonce check for the L2 transaction path (spec.md §7's
    /// `NonceMismatch`: "rejected before any anchor-chain work").
    pub async fn eth_get_transaction_count(&self, address: Address) -> Result<u64, BuilderError> {
        let count: U64 = self
            .http
            .request("eth_getTransactionCount", rpc_params![address])
            .await
            .map_err(Self::unavailable)?;
        Ok(count.to())
    }

    pub async fn get_l1_sender_proxy_l2(&self, l1_address: Address) -> Result<Address, BuilderError> {
        self.http
            .request("nativerollup_getL1SenderProxyL2", rpc_params![l1_address])
            .await
            .map_err(Self::unavailable)
    }

    pub async fn is_l1_sender_proxy_l2_deployed(&self, l1_address: Address) -> Result<bool, BuilderError> {
        self.http
            .request("nativerollup_isL1SenderProxyL2Deployed", rpc_params![l1_address])
            .await
            .map_err(Self::unavailable)
    }

    /// Brackets the discovery-and-registration dance so the Builder's own
    /// Fullnode state is unchanged afterward (spec.md §4.2: "inside a
    /// Fullnode snapshot that is always reverted").
    pub async fn snapshot(&self) -> Result<u64, BuilderError> {
        let id: U64 = self
            .http
            .request("evm_snapshot", rpc_params![])
            .await
            .map_err(Self::unavailable)?;
        Ok(id.to())
    }

    pub async fn revert(&self, id: u64) -> Result<(), BuilderError> {
        let ok: bool = self
            .http
            .request("evm_revert", rpc_params![U64::from(id)])
            .await
            .map_err(Self::unavailable)?;
        if ok {
            Ok(())
        } else {
            Err(BuilderError::DependencyUnavailable(anyhow::anyhow!(
                "fullnode rejected revert of unknown snapshot {id}"
            )))
        }
    }
}

impl From<L1ToL2CallParams> for L1ToL2CallRequest {
    fn from(params: L1ToL2CallParams) -> Self {
        Self {
            l1_caller: params.l1_caller,
            l2_target: params.l2_target,
            call_data: params.call_data,
            value: params.value,
            expected_pre_state_hash: params.expected_pre_state_hash,
        }
    }
}

impl From<L1ToL2CallResponse> for L1ToL2CallOutcome {
    fn from(response: L1ToL2CallResponse) -> Self {
        Self {
            success: response.success,
            return_data: response.return_data,
            new_state_root: response.new_state_root,
            gas_used: response.gas_used,
        }
    }
}
