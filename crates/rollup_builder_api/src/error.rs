use jsonrpsee::types::{ErrorCode, ErrorObjectOwned};
use rollup_builder_core::BuilderError;

pub struct RpcErrorAdapter(pub BuilderError);

impl From<BuilderError> for RpcErrorAdapter {
    fn from(err: BuilderError) -> Self {
        Self(err)
    }
}

impl From<RpcErrorAdapter> for ErrorObjectOwned {
    fn from(adapter: RpcErrorAdapter) -> Self {
        match adapter.0 {
            err @ BuilderError::InvalidTransaction(_) => invalid_params(err.to_string()),
            err @ BuilderError::HintMismatch { .. } => invalid_params(err.to_string()),
            err @ BuilderError::NonceMismatch { .. } => invalid_params(err.to_string()),
            err @ BuilderError::FullnodeUnsynchronized { .. } => internal(err.to_string()),
            err @ BuilderError::DiscoveryNonTermination(_) => internal(err.to_string()),
            err @ BuilderError::RegistrationFailed { .. } => internal(err.to_string()),
            err @ BuilderError::PreBroadcastCheckFailed(_) => internal(err.to_string()),
            err @ BuilderError::BroadcastReverted(_) => internal(err.to_string()),
            err @ BuilderError::BroadcastTimeout(_) => internal(err.to_string()),
            err @ BuilderError::CancelledAfterBroadcast => internal(err.to_string()),
            err @ BuilderError::DependencyUnavailable(_) => internal(err.to_string()),
        }
    }
}

fn internal(msg: String) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(ErrorCode::InternalError.code(), msg, None::<()>)
}

fn invalid_params(msg: String) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(ErrorCode::InvalidParams.code(), msg, None::<()>)
}
