mod abi;
mod error;
mod evm_client;
mod executor;
mod genesis;
mod l1_to_l2;
mod l2_tx;
mod node;
mod proxy;
mod replayer;
mod verify;

pub use error::FullnodeError;
pub use evm_client::EvmClient;
pub use genesis::{GenesisManifest, GenesisOutcome, SYSTEM_ACCOUNT, SYSTEM_ACCOUNT_BALANCE};
pub use l2_tx::L2Outcome;
pub use l1_to_l2::{CallOutcome, L1ToL2Params};
pub use node::{FullnodeCore, ReplayerStatus};
pub use proxy::ProxyRegistry;
pub use verify::{ChainVerification, EventVerification};
