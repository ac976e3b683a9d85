use alloy::primitives::Address;
use rollup_anchor_client::AnchorClient;
use rollup_types::L2Address;
use std::collections::HashMap;
use std::sync::Mutex;

/// Tracks which anchor-chain addresses are derived L2→L1 proxies for which
/// L2 contract, so that trace-walking during discovery can recognize "a
/// call into a known proxy" (spec.md §4.2) without an on-chain reverse
/// lookup — the anchor ABI only exposes the forward direction
/// (`getProxyAddress(l2Address) -> address`).
///
/// Seeded from every `l2Addresses`/`l2TargetAddress` hint a caller supplies;
/// grows across submissions for the lifetime of one Builder process. This
/// is the resolution recorded in DESIGN.md for discovering cross-layer
/// calls when a transaction carries no hints at all: the Builder only
/// recognizes proxies for L2 addresses it has seen hinted at least once.
#[derive(Default)]
pub struct ProxyIndex {
    // anchor-side proxy address -> L2 address it represents.
    by_proxy: Mutex<HashMap<Address, L2Address>>,
}

impl ProxyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures the anchor-derived proxy address for `l2_address` is present
    /// in the index, querying the anchor chain if it hasn't been seen yet.
    pub async fn learn(&self, anchor: &AnchorClient, l2_address: L2Address) -> anyhow::Result<Address> {
        if let Some(existing) = self.proxy_for(l2_address) {
            return Ok(existing);
        }
        let proxy = anchor.get_proxy_address(l2_address).await?;
        self.by_proxy.lock().expect("proxy index mutex poisoned").insert(proxy, l2_address);
        Ok(proxy)
    }

    fn proxy_for(&self, l2_address: L2Address) -> Option<Address> {
        self.by_proxy
            .lock()
            .expect("proxy index mutex poisoned")
            .iter()
            .find(|(_, l2)| **l2 == l2_address)
            .map(|(proxy, _)| *proxy)
    }

    /// Resolves a raw anchor-chain address observed in a trace frame back to
    /// the L2 address it is a proxy for, if this index already knows it.
    pub fn l2_address_for_proxy(&self, proxy: Address) -> Option<L2Address> {
        self.by_proxy.lock().expect("proxy index mutex poisoned").get(&proxy).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_proxy_resolves_to_none() {
        let index = ProxyIndex::new();
        assert_eq!(index.l2_address_for_proxy(Address::with_last_byte(1)), None);
    }
}
