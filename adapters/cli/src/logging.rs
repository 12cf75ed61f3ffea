//! Diagnostic logging for the command-line adapter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter applied when neither `RUST_LOG` nor the config provide one.
const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber, writing compact lines to stderr.
///
/// `RUST_LOG` wins over `configured`, which wins over [`DEFAULT_FILTER`].
pub(crate) fn init(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        configured
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
