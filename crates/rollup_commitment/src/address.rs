use alloy::primitives::{keccak256, Address};
use rollup_types::{L1Address, L2Address};

/// Domain separator for the L1→L2 sender proxy derivation. Part of the
/// determinism constants: changing it changes every derived proxy address,
/// hence the genesis hash.
pub const L1_SENDER_PROXY_SALT: &[u8] = b"L1SenderProxyL2.v1";

/// Deterministic L1→L2 proxy address for an L1 address `a`:
/// `last20(H("L1SenderProxyL2.v1" ++ a))`.
///
/// This is a pure function of the salt and the L1 address; it does not
/// depend on any deployed state. Deployment is lazy and handled by the
/// Fullnode the first time `a` makes a cross-layer call.
pub fn derive_l1_sender_proxy_l2(l1_address: L1Address) -> L2Address {
    let mut preimage = Vec::with_capacity(L1_SENDER_PROXY_SALT.len() + 20);
    preimage.extend_from_slice(L1_SENDER_PROXY_SALT);
    preimage.extend_from_slice(l1_address.as_slice());
    let digest = keccak256(&preimage);
    Address::from_slice(&digest[12..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic_and_injective_for_distinct_inputs() {
        let a = Address::with_last_byte(1);
        let b = Address::with_last_byte(2);
        assert_eq!(derive_l1_sender_proxy_l2(a), derive_l1_sender_proxy_l2(a));
        assert_ne!(derive_l1_sender_proxy_l2(a), derive_l1_sender_proxy_l2(b));
    }
}
