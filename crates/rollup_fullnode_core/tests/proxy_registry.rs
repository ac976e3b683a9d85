use alloy::primitives::Address;
use rollup_fullnode_core::ProxyRegistry;
use test_case::test_case;

#[test]
fn derivation_matches_commitment_crate_and_is_stable() {
    let registry = ProxyRegistry::new(Address::with_last_byte(0xaa));
    let l1_address = Address::with_last_byte(0x01);

    let expected = rollup_commitment::derive_l1_sender_proxy_l2(l1_address);
    assert_eq!(registry.derive(l1_address), expected);
    assert_eq!(registry.derive(l1_address), registry.derive(l1_address));
}

#[test]
fn distinct_l1_addresses_derive_distinct_proxies() {
    let registry = ProxyRegistry::new(Address::with_last_byte(0xaa));
    let a = registry.derive(Address::with_last_byte(0x01));
    let b = registry.derive(Address::with_last_byte(0x02));
    assert_ne!(a, b);
}

// The proxy factory address is not an input to the derivation rule (spec.md
// §3: `last20(H("L1SenderProxyL2.v1" ++ a))` depends only on `a`), so two
// registries pointed at different factories must still agree on where a
// given L1 address's proxy lives.
#[test_case(0x01, 0xaa, 0x01, 0xbb; "same l1 address, different factory, same proxy")]
#[test_case(0x01, 0xaa, 0x02, 0xaa; "different l1 address, same factory, different proxy")]
fn factory_address_is_irrelevant_to_derivation(
    l1_a: u8,
    factory_a: u8,
    l1_b: u8,
    factory_b: u8,
) {
    let registry_a = ProxyRegistry::new(Address::with_last_byte(factory_a));
    let registry_b = ProxyRegistry::new(Address::with_last_byte(factory_b));

    let proxy_a = registry_a.derive(Address::with_last_byte(l1_a));
    let proxy_b = registry_b.derive(Address::with_last_byte(l1_b));

    if l1_a == l1_b {
        assert_eq!(proxy_a, proxy_b);
    } else {
        assert_ne!(proxy_a, proxy_b);
    }
}
