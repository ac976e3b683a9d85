use alloy::primitives::B256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque 32-byte commitment to the full L2 state at a block boundary.
///
/// Two Fullnodes starting from the same genesis and consuming the same event
/// sequence must produce identical `StateHash`es after every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateHash(pub B256);

impl StateHash {
    pub const fn zero() -> Self {
        Self(B256::ZERO)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_ref()
    }
}

impl From<B256> for StateHash {
    fn from(value: B256) -> Self {
        Self(value)
    }
}

impl From<StateHash> for B256 {
    fn from(value: StateHash) -> Self {
        value.0
    }
}

impl FromStr for StateHash {
    type Err = <B256 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(B256::from_str(s)?))
    }
}

impl fmt::Display for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
