use crate::error::BuilderError;
use alloy::consensus::{Transaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;

/// The handful of fields the Builder needs out of a signed raw transaction,
/// independent of which layer it will ultimately run on.
#[derive(Debug, Clone)]
pub struct DecodedTx {
    pub sender: Address,
    pub nonce: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
}

impl DecodedTx {
    /// A `debug_traceCall`/dry-run-shaped request reproducing this
    /// transaction's effect without its signature, used for tracing and
    /// pre-broadcast dry-runs.
    pub fn as_call_request(&self) -> TransactionRequest {
        let mut req = TransactionRequest::default().from(self.sender).value(self.value).input(self.input.clone().into());
        if let Some(to) = self.to {
            req = req.to(to);
        }
        req
    }
}

/// Decodes an EIP-2718 signed raw transaction and recovers its sender.
///
/// Both the Builder's L1 broadcast path and its L2 transaction path start
/// from the same `signedTx` hex blob (spec.md §4.2); this is the one place
/// that blob is opened up.
pub fn decode(raw_tx: &[u8]) -> Result<DecodedTx, BuilderError> {
    let mut slice = raw_tx;
    let envelope =
        TxEnvelope::decode_2718(&mut slice).map_err(|e| BuilderError::InvalidTransaction(e.to_string()))?;

    let sender = recover_sender(&envelope)?;
    let nonce = envelope.nonce();
    let to = envelope.to();
    let value = envelope.value();
    let input = envelope.input().clone();

    Ok(DecodedTx {
        sender,
        nonce,
        to,
        value,
        input,
    })
}

fn recover_sender(envelope: &TxEnvelope) -> Result<Address, BuilderError> {
    match envelope {
        TxEnvelope::Legacy(tx) => tx.recover_signer(),
        TxEnvelope::Eip2930(tx) => tx.recover_signer(),
        TxEnvelope::Eip1559(tx) => tx.recover_signer(),
        TxEnvelope::Eip4844(tx) => tx.recover_signer(),
        TxEnvelope::Eip7702(tx) => tx.recover_signer(),
        _ => return Err(BuilderError::InvalidTransaction("unsupported transaction envelope".to_string())),
    }
    .map_err(|e| BuilderError::InvalidTransaction(format!("failed to recover sender: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn rejects_garbage_bytes() {
        assert!(decode(&[0xff, 0x00, 0x01]).is_err());
    }

    // Table-driven over malformed inputs a signed-tx blob can never
    // legitimately be: empty, a single byte, an EIP-2718 type byte with no
    // payload, and a legacy-looking byte that is not valid RLP. None of
    // these should panic; all must surface as `InvalidTransaction`.
    #[test_case(&[]; "empty input")]
    #[test_case(&[0x02]; "eip-1559 type byte with no payload")]
    #[test_case(&[0x01]; "eip-2930 type byte with no payload")]
    #[test_case(&[0xc0]; "empty rlp list, not a valid envelope")]
    fn rejects_malformed_envelopes(raw: &[u8]) {
        let err = decode(raw).expect_err("malformed envelope must not decode");
        assert!(matches!(err, BuilderError::InvalidTransaction(_)));
    }
}
