mod decl;
mod error;
mod impls;
mod server;
mod types;

pub use server::{BuilderServerBuilder, BuilderServerHandle};
pub use types::{
    ClassificationDto, DiscoveredCallDto, SimulateResponse, StatusResponse, SubmitRequest, SubmitResponse,
};
