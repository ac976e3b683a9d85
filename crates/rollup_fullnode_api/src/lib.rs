mod decl;
mod error;
mod impls;
mod server;
mod types;

pub use server::{FullnodeServerBuilder, FullnodeServerHandle};
pub use types::{
    EventVerificationResponse, L1ToL2CallRequest, L1ToL2CallResponse, L2TransactionResponse,
    VerifyStateChainRequest, VerifyStateChainResponse,
};
