use alloy::primitives::{Address, Signature, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signer, SignerSync};

/// Wraps the admin key used to sign response and L2-block commitments.
///
/// The admin may only *commit* what the Fullnode could independently
/// compute; a correct Fullnode ignores any admin-signed claim that
/// contradicts its own replay (spec.md §4.3 invariant 5). This type does not
/// enforce that on its own — it is enforced by the Fullnode's replayer.
#[derive(Clone)]
pub struct AdminSigner {
    inner: PrivateKeySigner,
}

impl AdminSigner {
    pub fn from_private_key(hex_key: &str) -> anyhow::Result<Self> {
        let inner: PrivateKeySigner = hex_key.trim_start_matches("0x").parse()?;
        Ok(Self { inner })
    }

    pub fn address(&self) -> Address {
        self.inner.address()
    }

    /// Signs the Ethereum-signed-message form of `digest`: the `Signer`
    /// trait applies the `"\x19Ethereum Signed Message:\n32"` prefix before
    /// hashing and signing, per spec.md §4.2's "exact shape" note.
    pub fn sign_digest(&self, digest: B256) -> anyhow::Result<Signature> {
        Ok(self.inner.sign_message_sync(digest.as_slice())?)
    }
}

impl std::fmt::Debug for AdminSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSigner")
            .field("address", &self.address())
            .finish()
    }
}
