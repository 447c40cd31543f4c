//! Tracing subscriber setup.
//!
//! The filter comes from `--log-level`, then RUST_LOG, then `DEFAULT_LOG_FILTER`.
//! `LOG_FORMAT` picks between human-readable lines and one JSON object per line.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, DEFAULT_LOG_FILTER, LOG_FILTER_ENV};

/// Picks the effective filter directive. Blank values count as unset.
pub fn resolve_filter(cli: Option<String>, env: Option<String>) -> String {
    cli.into_iter()
        .chain(env)
        .find(|filter| !filter.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Formatting layer for `format`, writing to `writer`.
pub fn fmt_layer<S, W>(format: LogFormat, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer().with_writer(writer);
    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Installs the global subscriber, logging to stdout.
pub fn init(cli_filter: Option<String>, format: LogFormat) {
    let filter = resolve_filter(cli_filter, std::env::var(LOG_FILTER_ENV).ok());

    tracing_subscriber::registry()
        .with(EnvFilter::new(&filter))
        .with(fmt_layer(format, std::io::stdout))
        .init();
}
