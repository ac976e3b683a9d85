use crate::error::FullnodeError;
use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use std::sync::Arc;

type Inner = Arc<dyn Provider + Send + Sync>;

/// Result of submitting a transaction (plain L2 or a system-account-driven
/// proxy invocation) to the underlying EVM.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub tx_hash: TxHash,
    pub return_data: Bytes,
    pub gas_used: u64,
    pub revert_reason: Option<String>,
}

/// Thin wrapper over the JSON-RPC connection to the EVM the fullnode drives.
///
/// Modeled on the teacher's anvil process wrapper (`l1_sidecar::anvil`):
/// same "spin up a `Provider` over an HTTP endpoint, expose the handful of
/// admin extensions we need" shape, but pointed at an externally-supplied
/// `--evm-rpc` endpoint instead of a spawned child process, since spec.md §1
/// treats the EVM implementation itself as an external collaborator.
#[derive(Clone)]
pub struct EvmClient {
    provider: Inner,
}

impl EvmClient {
    pub fn connect(rpc_url: url::Url) -> anyhow::Result<Self> {
        let provider = ProviderBuilder::new().on_http(rpc_url);
        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> FullnodeError {
        FullnodeError::DependencyUnavailable(err.into())
    }

    pub async fn chain_id(&self) -> Result<u64, FullnodeError> {
        self.provider.get_chain_id().await.map_err(Self::unavailable)
    }

    pub async fn block_number(&self) -> Result<u64, FullnodeError> {
        self.provider.get_block_number().await.map_err(Self::unavailable)
    }

    pub async fn get_balance(&self, address: Address) -> Result<U256, FullnodeError> {
        self.provider.get_balance(address).await.map_err(Self::unavailable)
    }

    pub async fn get_code(&self, address: Address) -> Result<Bytes, FullnodeError> {
        self.provider.get_code_at(address).await.map_err(Self::unavailable)
    }

    pub async fn get_transaction_count(&self, address: Address) -> Result<u64, FullnodeError> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(Self::unavailable)
    }

    pub async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, FullnodeError> {
        self.provider.call(tx).await.map_err(Self::unavailable)
    }

    /// Submits `tx`, waits for its receipt, and reports success/gas/return
    /// data. Used both for plain L2 transactions and for the system
    /// account's proxy-deployment/proxy-invocation transactions during
    /// L1→L2 execution.
    pub async fn send_and_wait(&self, tx: TransactionRequest) -> Result<ExecutionOutcome, FullnodeError> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(Self::unavailable)?;
        let tx_hash = *pending.tx_hash();
        let receipt = pending.get_receipt().await.map_err(Self::unavailable)?;
        let success = receipt.status();
        let return_data = if success {
            self.transaction_return_data(tx_hash).await.unwrap_or_default()
        } else {
            Bytes::new()
        };
        let revert_reason = if !success {
            self.revert_reason(tx_hash).await
        } else {
            None
        };
        Ok(ExecutionOutcome {
            success,
            tx_hash,
            return_data,
            gas_used: receipt.gas_used.try_into().unwrap_or(u64::MAX),
            revert_reason,
        })
    }

    pub async fn send_raw_and_wait(&self, raw_tx: &[u8]) -> Result<ExecutionOutcome, FullnodeError> {
        let pending = self
            .provider
            .send_raw_transaction(raw_tx)
            .await
            .map_err(Self::unavailable)?;
        let tx_hash = *pending.tx_hash();
        let receipt = pending.get_receipt().await.map_err(Self::unavailable)?;
        let success = receipt.status();
        Ok(ExecutionOutcome {
            success,
            tx_hash,
            return_data: Bytes::new(),
            gas_used: receipt.gas_used.try_into().unwrap_or(u64::MAX),
            revert_reason: if success { None } else { self.revert_reason(tx_hash).await },
        })
    }

    async fn transaction_return_data(&self, _tx_hash: TxHash) -> Option<Bytes> {
        // Historical return data isn't generally recoverable from a receipt
        // alone; callers that need the return value re-derive it via
        // `call` against the pre-commit state before sending.
        None
    }

    async fn revert_reason(&self, tx_hash: TxHash) -> Option<String> {
        let params = serde_json::json!([tx_hash]);
        let result: Result<serde_json::Value, _> =
            self.provider.client().request("trace_transaction", params).await;
        result.ok().map(|v| v.to_string())
    }

    /// `evm_snapshot` — returns an opaque id private to the caller.
    pub async fn snapshot(&self) -> Result<u64, FullnodeError> {
        let id: String = self
            .provider
            .client()
            .request("evm_snapshot", ())
            .await
            .map_err(Self::unavailable)?;
        parse_hex_u64(&id).ok_or_else(|| FullnodeError::Decode(format!("bad snapshot id: {id}")))
    }

    /// `evm_revert` — reverting to an unknown id surfaces as `false` from
    /// the underlying EVM, which we turn into `UnknownSnapshot`.
    pub async fn revert(&self, id: u64) -> Result<(), FullnodeError> {
        let ok: bool = self
            .provider
            .client()
            .request("evm_revert", (format!("0x{id:x}"),))
            .await
            .map_err(Self::unavailable)?;
        if ok {
            Ok(())
        } else {
            Err(FullnodeError::UnknownSnapshot(id))
        }
    }

    pub async fn set_balance(&self, address: Address, balance: U256) -> Result<(), FullnodeError> {
        self.provider
            .client()
            .request::<_, ()>("anvil_setBalance", (address, balance))
            .await
            .map_err(Self::unavailable)
    }

    pub async fn impersonate_account(&self, address: Address) -> Result<(), FullnodeError> {
        self.provider
            .client()
            .request::<_, ()>("anvil_impersonateAccount", (address,))
            .await
            .map_err(Self::unavailable)
    }

    pub async fn stop_impersonating_account(&self, address: Address) -> Result<(), FullnodeError> {
        self.provider
            .client()
            .request::<_, ()>("anvil_stopImpersonatingAccount", (address,))
            .await
            .map_err(Self::unavailable)
    }

    /// Forces a block to be mined immediately, used after every
    /// state-mutating step so `getStateRoot` observes a settled state.
    pub async fn mine(&self) -> Result<(), FullnodeError> {
        self.provider
            .client()
            .request::<_, ()>("evm_mine", ())
            .await
            .map_err(Self::unavailable)
    }

    /// The EVM's state root for the latest block, which is what `getStateRoot`
    /// and every commitment in this system treats as "the L2 state hash".
    pub async fn state_root(&self) -> Result<B256, FullnodeError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(Self::unavailable)?
            .ok_or_else(|| FullnodeError::Decode("node has no latest block".to_string()))?;
        Ok(block.header.state_root)
    }

    /// Same as [`Self::state_root`] but also reports the backing block
    /// number, so operators can correlate a state hash with a concrete L2
    /// block in logs without a second round-trip.
    pub async fn state_root_and_block(&self) -> Result<(B256, u64), FullnodeError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(Self::unavailable)?
            .ok_or_else(|| FullnodeError::Decode("node has no latest block".to_string()))?;
        Ok((block.header.state_root, block.header.number))
    }
}

fn parse_hex_u64(s: &str) -> Option<u64> {
    u64::from_str_radix(s.trim_start_matches("0x"), 16).ok()
}
