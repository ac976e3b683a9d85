use crate::hashing::{hash_bytes, hash_calls, hash_results};
use crate::signer::AdminSigner;
use alloy::primitives::{keccak256, Bytes, Signature, B256};
use rollup_types::{L2Address, OutgoingCall, StateHash};

fn abi_words(words: &[B256]) -> B256 {
    let mut preimage = Vec::with_capacity(words.len() * 32);
    for word in words {
        preimage.extend_from_slice(word.as_slice());
    }
    keccak256(&preimage)
}

fn left_pad_address(address: L2Address) -> B256 {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    B256::from(word)
}

/// `H( prevHash, H(callData), postExecutionStateHash, H_calls(outgoingCalls),
/// H_results(expectedResults), finalStateHash )` — six 32-byte words,
/// ABI-encoded.
#[derive(Debug, Clone)]
pub struct L2BlockProof {
    pub digest: B256,
    pub signature: Signature,
}

impl L2BlockProof {
    pub fn digest(
        prev_hash: StateHash,
        raw_tx: &[u8],
        post_execution_state_hash: StateHash,
        outgoing_calls: &[OutgoingCall],
        expected_results: &[Bytes],
        final_state_hash: StateHash,
    ) -> B256 {
        abi_words(&[
            prev_hash.0,
            hash_bytes(raw_tx),
            post_execution_state_hash.0,
            hash_calls(outgoing_calls),
            hash_results(expected_results),
            final_state_hash.0,
        ])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn sign(
        signer: &AdminSigner,
        prev_hash: StateHash,
        raw_tx: &[u8],
        post_execution_state_hash: StateHash,
        outgoing_calls: &[OutgoingCall],
        expected_results: &[Bytes],
        final_state_hash: StateHash,
    ) -> anyhow::Result<Self> {
        let digest = Self::digest(
            prev_hash,
            raw_tx,
            post_execution_state_hash,
            outgoing_calls,
            expected_results,
            final_state_hash,
        );
        let signature = signer.sign_digest(digest)?;
        Ok(Self { digest, signature })
    }
}

/// `H( l2Address, preStateHash, H(callData), preOutgoingCallsStateHash,
/// H_calls(outgoingCalls), H_results(expectedResults), H(returnValue),
/// finalStateHash )` — eight 32-byte words, ABI-encoded.
#[derive(Debug, Clone)]
pub struct IncomingCallProof {
    pub digest: B256,
    pub signature: Signature,
}

impl IncomingCallProof {
    #[allow(clippy::too_many_arguments)]
    pub fn digest(
        l2_address: L2Address,
        pre_state_hash: StateHash,
        call_data: &[u8],
        pre_outgoing_calls_state_hash: StateHash,
        outgoing_calls: &[OutgoingCall],
        expected_results: &[Bytes],
        return_value: &[u8],
        final_state_hash: StateHash,
    ) -> B256 {
        abi_words(&[
            left_pad_address(l2_address),
            pre_state_hash.0,
            hash_bytes(call_data),
            pre_outgoing_calls_state_hash.0,
            hash_calls(outgoing_calls),
            hash_results(expected_results),
            hash_bytes(return_value),
            final_state_hash.0,
        ])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn sign(
        signer: &AdminSigner,
        l2_address: L2Address,
        pre_state_hash: StateHash,
        call_data: &[u8],
        pre_outgoing_calls_state_hash: StateHash,
        outgoing_calls: &[OutgoingCall],
        expected_results: &[Bytes],
        return_value: &[u8],
        final_state_hash: StateHash,
    ) -> anyhow::Result<Self> {
        let digest = Self::digest(
            l2_address,
            pre_state_hash,
            call_data,
            pre_outgoing_calls_state_hash,
            outgoing_calls,
            expected_results,
            return_value,
            final_state_hash,
        );
        let signature = signer.sign_digest(digest)?;
        Ok(Self { digest, signature })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2_block_digest_is_sensitive_to_final_hash() {
        let d1 = L2BlockProof::digest(
            StateHash::zero(),
            b"tx",
            StateHash::zero(),
            &[],
            &[],
            StateHash::zero(),
        );
        let d2 = L2BlockProof::digest(
            StateHash::zero(),
            b"tx",
            StateHash::zero(),
            &[],
            &[],
            StateHash(B256::repeat_byte(1)),
        );
        assert_ne!(d1, d2);
    }

    #[test]
    fn incoming_call_digest_is_sensitive_to_l2_address() {
        let a = L2Address::with_last_byte(1);
        let b = L2Address::with_last_byte(2);
        let d1 = IncomingCallProof::digest(
            a,
            StateHash::zero(),
            b"call",
            StateHash::zero(),
            &[],
            &[],
            b"",
            StateHash::zero(),
        );
        let d2 = IncomingCallProof::digest(
            b,
            StateHash::zero(),
            b"call",
            StateHash::zero(),
            &[],
            &[],
            b"",
            StateHash::zero(),
        );
        assert_ne!(d1, d2);
    }
}
