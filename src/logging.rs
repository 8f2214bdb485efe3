//! Tracing subscriber setup for hosts that do not install their own.

use crate::config::LogFormat;

/// Install the global tracing subscriber with the specified log format.
///
/// - `LogFormat::Text`: human-readable lines on stderr
/// - `LogFormat::Json`: one flattened JSON object per event
///
/// The filter comes from `RUST_LOG` with INFO added as a floor.
///
/// # Errors
/// Fails if a global subscriber is already set.
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let result = match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .flatten_event(true)
            .with_env_filter(filter)
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}

