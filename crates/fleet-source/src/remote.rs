//! `RemoteSource`: a [`FleetDataSource`] backed by a JSON-over-HTTP server.
//!
//! A single `reqwest::Client` (and therefore one connection pool) is shared
//! by the poller and every command.  Each request is bounded by the client
//! timeout; expiry surfaces as [`SourceError::Transport`].  Dropping a
//! command future cancels its request.  A ride command answered with
//! `404 Not Found` targets a vehicle the server does not know and succeeds
//! without effect.

use std::time::Duration;

use chrono::Utc;
use fleet_core::{RideState, VehicleId};
use fleet_registry::{FleetSnapshot, HistoryEvent};
use reqwest::{Client, Response, StatusCode, Url};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::wire::{NewHistoryRecord, StatePatch, decode_history, decode_vehicles};
use crate::{FleetDataSource, FleetStream, SourceError, SourceFuture, SourceResult};

/// HTTP fleet backend.
#[derive(Clone, Debug)]
pub struct RemoteSource {
    client:      Client,
    base:        Url,
    poll_period: Duration,
}

impl RemoteSource {
    /// Connect to `base_url` (e.g. `http://localhost:3000`), with `timeout`
    /// applied to every request and `GET /vehicles` polled every
    /// `poll_period`.
    pub fn new(base_url: &str, timeout: Duration, poll_period: Duration) -> SourceResult<Self> {
        let base = Url::parse(base_url).map_err(|e| SourceError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(SourceError::InvalidUrl(base_url.to_owned()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base, poll_period })
    }

    #[inline]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `base` with `segments` appended as percent-encoded path segments.
    pub fn endpoint(&self, segments: &[&str]) -> SourceResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// One `GET /vehicles`.
    pub async fn fetch_vehicles(&self) -> SourceResult<FleetSnapshot> {
        let url = self.endpoint(&["vehicles"])?;
        let response = check_status(self.client.get(url).send().await?)?;
        decode_vehicles(&response.bytes().await?)
    }

    fn patch_state(&self, id: &VehicleId, state: RideState) -> SourceFuture<()> {
        let client = self.client.clone();
        let url = self.endpoint(&["vehicles", id.as_str()]);
        let id = id.clone();
        Box::pin(async move {
            let url = url?;
            debug!(vehicle = %id, %state, "PATCH vehicle state");
            let response = client.patch(url).json(&StatePatch { state }).send().await?;
            if response.status() == StatusCode::NOT_FOUND {
                debug!(vehicle = %id, "PATCH for unknown vehicle ignored");
                return Ok(());
            }
            check_status(response)?;
            Ok(())
        })
    }
}

/// Map a non-success status to [`SourceError::Status`].
fn check_status(response: Response) -> SourceResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SourceError::Status { status: status.as_u16(), url: response.url().to_string() })
    }
}

impl FleetDataSource for RemoteSource {
    /// Polls `GET /vehicles` immediately and then every `poll_period`.
    /// The first failure is delivered on the stream, which then ends.
    fn observe_fleet(&self) -> FleetStream {
        let (tx, stream) = FleetStream::channel();
        let source = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(source.poll_period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                match source.fetch_vehicles().await {
                    Ok(snapshot) => {
                        if tx.send(Ok(snapshot)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "fleet poll failed; ending stream");
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
        });
        stream
    }

    fn start_ride(&self, id: &VehicleId) -> SourceFuture<()> {
        self.patch_state(id, RideState::InProgress)
    }

    fn stop_ride(&self, id: &VehicleId) -> SourceFuture<()> {
        self.patch_state(id, RideState::Stopped)
    }

    fn log_event(&self, vehicle_id: &VehicleId, action: &str) -> SourceFuture<()> {
        let client = self.client.clone();
        let url = self.endpoint(&["history"]);
        let body = NewHistoryRecord {
            vehicle_id: vehicle_id.clone(),
            action:     action.to_owned(),
            timestamp:  Utc::now(),
        };
        Box::pin(async move {
            check_status(client.post(url?).json(&body).send().await?)?;
            Ok(())
        })
    }

    fn fetch_history(&self) -> SourceFuture<Vec<HistoryEvent>> {
        let client = self.client.clone();
        let url = self.endpoint(&["history"]);
        Box::pin(async move {
            let response = check_status(client.get(url?).send().await?)?;
            decode_history(&response.bytes().await?)
        })
    }
}
