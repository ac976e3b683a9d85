use crate::abi::IL1SenderProxyFactory;
use crate::error::FullnodeError;
use crate::evm_client::EvmClient;
use crate::genesis::SYSTEM_ACCOUNT;
use alloy::primitives::{Address, Bytes};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use rollup_types::L1Address;

/// Tracks where each L1 address's derived L2 proxy lives and whether it has
/// been deployed, without claiming a language-level reference to it (spec.md
/// §9's "cyclic ownership of proxies" note: proxies are derived addresses
/// plus lazy deployment flags).
#[derive(Clone)]
pub struct ProxyRegistry {
    factory_address: Address,
}

impl ProxyRegistry {
    pub fn new(factory_address: Address) -> Self {
        Self { factory_address }
    }

    pub fn derive(&self, l1_address: L1Address) -> Address {
        rollup_commitment::derive_l1_sender_proxy_l2(l1_address)
    }

    pub async fn is_deployed(&self, evm: &EvmClient, l1_address: L1Address) -> Result<bool, FullnodeError> {
        let address = self.derive(l1_address);
        let code = evm.get_code(address).await?;
        Ok(!code.is_empty())
    }

    /// Deploys the proxy for `l1_address` if it is not already deployed,
    /// asserting the factory produced the same address our own derivation
    /// rule predicts (spec.md §4.1: "the derivation must match what the
    /// Fullnode returns from `getL1SenderProxyL2`").
    pub async fn ensure_deployed(&self, evm: &EvmClient, l1_address: L1Address) -> Result<Address, FullnodeError> {
        let expected = self.derive(l1_address);
        if self.is_deployed(evm, l1_address).await? {
            return Ok(expected);
        }

        let calldata = IL1SenderProxyFactory::deployCall { l1Caller: l1_address }.abi_encode();
        let tx = TransactionRequest::default()
            .from(SYSTEM_ACCOUNT)
            .to(self.factory_address)
            .input(Bytes::from(calldata).into());
        let outcome = evm.send_and_wait(tx).await?;
        if !outcome.success {
            return Err(FullnodeError::InvalidTransaction(format!(
                "proxy factory deployment reverted for l1 address {l1_address}"
            )));
        }

        let deployed = self.is_deployed(evm, l1_address).await?;
        if !deployed {
            return Err(FullnodeError::InvalidTransaction(format!(
                "proxy factory reported success but no code at derived address {expected} for {l1_address}"
            )));
        }
        Ok(expected)
    }
}
