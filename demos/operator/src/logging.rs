//! Console logging setup.

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt, registry};

/// Install a stdout subscriber.  The level comes from `RUST_LOG`, default
/// `info`.  With `json`, each event is one JSON object per line.
pub fn init_logging(json: bool) {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // At most one of these is Some; a None layer is skipped.
    let plain = (!json).then(|| fmt::layer().with_writer(io::stdout).with_filter(filter()));
    let structured = json.then(|| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(io::stdout)
            .with_filter(filter())
    });

    registry().with(plain).with(structured).init();
}
