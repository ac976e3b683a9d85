use backon::{ExponentialBuilder, Retryable};
use std::future::Future;
use std::time::Duration;

/// Bounded exponential backoff for transient RPC errors (spec.md §7:
/// "transient RPC errors are retried with bounded backoff at the
/// callsite"). Structural errors must not be passed through this helper —
/// callers should match on the error and only retry when it is classified
/// as transient.
pub fn policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(100))
        .with_max_delay(Duration::from_secs(5))
        .with_max_times(5)
}

/// Runs `f` under [`policy`], retrying whenever it returns `Err`.
///
/// Only appropriate when every error `f` can produce is itself transient;
/// most callers have a mixed error type and should use
/// [`with_backoff_when`] instead so structural/fatal errors are not retried.
pub async fn with_backoff<T, E, F, Fut>(f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    f.retry(policy()).await
}

/// Runs `f` under [`policy`], but only retries while `is_transient` returns
/// `true` for the error `f` produced. A structural error (one `is_transient`
/// rejects) is returned to the caller on its first occurrence instead of
/// being retried into a delayed observation of the same outcome — the
/// callsite discipline this module's docs call for, made mechanical.
pub async fn with_backoff_when<T, E, F, Fut>(f: F, is_transient: impl FnMut(&E) -> bool) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    f.retry(policy()).when(is_transient).await
}
