//! The snapshot stream returned by `observe_fleet`.

use fleet_registry::FleetSnapshot;
use tokio::sync::mpsc;

use crate::SourceResult;

/// Lazy, infinite, non-restartable sequence of fleet snapshots.
///
/// Yields one `Ok` snapshot per tick.  A producer that hits an
/// unrecoverable failure yields a single `Err` and then the stream ends
/// (`None`).  Dropping the stream unsubscribes.
pub struct FleetStream {
    rx: mpsc::UnboundedReceiver<SourceResult<FleetSnapshot>>,
}

impl FleetStream {
    /// Create a connected sender/stream pair.
    pub fn channel() -> (mpsc::UnboundedSender<SourceResult<FleetSnapshot>>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    /// Wait for the next snapshot.  `None` once the producer has stopped.
    pub async fn next(&mut self) -> Option<SourceResult<FleetSnapshot>> {
        self.rx.recv().await
    }
}
