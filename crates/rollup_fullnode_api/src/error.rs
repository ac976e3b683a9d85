use jsonrpsee::types::{ErrorCode, ErrorObjectOwned};
use rollup_fullnode_core::FullnodeError;

pub struct RpcErrorAdapter(pub FullnodeError);

impl From<FullnodeError> for RpcErrorAdapter {
    fn from(err: FullnodeError) -> Self {
        Self(err)
    }
}

impl From<RpcErrorAdapter> for ErrorObjectOwned {
    fn from(adapter: RpcErrorAdapter) -> Self {
        match adapter.0 {
            err @ FullnodeError::StalePreState { .. } => invalid_params(err.to_string()),
            err @ FullnodeError::UnknownSnapshot(_) => invalid_params(err.to_string()),
            err @ FullnodeError::InvalidTransaction(_) => invalid_params(err.to_string()),
            err @ FullnodeError::Halted(_) => internal(err.to_string()),
            err @ FullnodeError::Divergence { .. } => internal(err.to_string()),
            err @ FullnodeError::NoResumableSuffix => internal(err.to_string()),
            err @ FullnodeError::DependencyUnavailable(_) => internal(err.to_string()),
            err @ FullnodeError::Decode(_) => internal(err.to_string()),
        }
    }
}

fn internal(msg: String) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(ErrorCode::InternalError.code(), msg, None::<()>)
}

fn invalid_params(msg: String) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(ErrorCode::InvalidParams.code(), msg, None::<()>)
}
