//! operator: headless run of the fleet operator flow.
//!
//! Polls a fleet (simulated by default, or a remote backend), starts a ride
//! on the first waiting vehicle by feeding the controller a QR payload, lets
//! the fleet run for `--ticks` periods, stops the ride and prints the
//! history log.  `--record <dir>` also writes the snapshots and history to
//! CSV.

mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use fleet_controller::{FleetController, started_notice};
use fleet_core::config::DEFAULT_TIMEOUT_MS;
use fleet_core::{BackendConfig, FleetConfig, RideState};
use fleet_output::{CsvWriter, SnapshotRecorder};
use fleet_registry::FleetSnapshot;
use fleet_source::AnySource;
use tracing::{info, warn};

use logging::init_logging;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON fleet configuration; defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tick periods to run while the ride is in progress.
    #[arg(long, default_value_t = 6)]
    ticks: u64,

    /// Use the HTTP backend at this base URL instead of the simulation.
    #[arg(long)]
    remote: Option<String>,

    /// Write vehicle_snapshots.csv and history.csv into this directory.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Log one JSON object per line.
    #[arg(long)]
    json_logs: bool,
}

fn load_config(args: &Args) -> Result<FleetConfig> {
    let mut config = match &args.config {
        Some(path) => FleetConfig::from_json_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => FleetConfig::default(),
    };
    if let Some(base_url) = &args.remote {
        let timeout_ms = match config.backend {
            BackendConfig::Remote { timeout_ms, .. } => timeout_ms,
            BackendConfig::Simulated => DEFAULT_TIMEOUT_MS,
        };
        config.backend = BackendConfig::Remote { base_url: base_url.clone(), timeout_ms };
    }
    config.validate()?;
    Ok(config)
}

fn print_fleet(snapshot: &FleetSnapshot) {
    println!("{:<6} {:<10} {:>12} {:>13} {:<12}", "Id", "Name", "Latitude", "Longitude", "State");
    println!("{}", "-".repeat(57));
    for v in snapshot {
        println!(
            "{:<6} {:<10} {:>12.6} {:>13.6} {:<12}",
            v.id(),
            v.name,
            v.position.lat,
            v.position.lon,
            v.state,
        );
    }
}

/// Wait until the controller holds a non-empty snapshot.
async fn first_snapshot(controller: &FleetController<AnySource>, period: Duration) -> Result<FleetSnapshot> {
    for _ in 0..3 {
        let snapshot = controller.snapshot();
        if !snapshot.is_empty() {
            return Ok(snapshot);
        }
        tokio::time::sleep(period + Duration::from_millis(50)).await;
    }
    bail!("no fleet snapshot received after three periods")
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs);

    let config = load_config(&args)?;
    let period = config.tick_period();
    info!(backend = ?config.backend, ?period, "starting operator");

    // 1. Data source and controller.
    let source = AnySource::from_config(&config)?;
    let recorder = match &args.record {
        Some(dir) => Some(SnapshotRecorder::new(CsvWriter::new(dir)?)),
        None => None,
    };
    let mut controller = FleetController::new(source);
    if let Some(recorder) = &recorder {
        controller = controller.with_observer(recorder.clone());
    }

    // 2. Poll until the first snapshot arrives.
    controller.start_polling();
    let snapshot = first_snapshot(&controller, period).await?;
    if let Some(region) = controller.initial_region() {
        println!(
            "Fleet of {} around {} (span {:.4}° × {:.4}°)",
            snapshot.len(),
            region.center,
            region.lat_span,
            region.lon_span
        );
    }
    print_fleet(&snapshot);
    println!();

    // 3. Start a ride through the QR flow.
    let Some(target) = snapshot.iter().find(|v| v.state == RideState::Waiting).map(|v| v.id().clone()) else {
        warn!("no waiting vehicle to start");
        return Ok(());
    };
    let code = format!("myapp://startRide?vehicleId={target}");
    let (vehicle, pending) = controller.start_ride_from_code(&code)?;
    println!("{}", started_notice(&vehicle));
    if let Err(e) = pending.wait().await {
        warn!(error = %e, "start failed");
    }

    // 4. Let the fleet move.
    for _ in 0..args.ticks {
        tokio::time::sleep(period).await;
        if let Some(v) = controller.selected() {
            println!("{} {} at {}: {}", v.id(), v.name, v.position, v.state);
        }
    }

    // 5. Stop the ride if it is still going.
    if controller.selected().is_some_and(|v| v.state == RideState::InProgress) {
        if let Err(e) = controller.stop_ride()?.wait().await {
            warn!(error = %e, "stop failed");
        } else if let Some(v) = controller.selected() {
            println!("Ride stopped for {}", v.name);
        }
    }
    controller.stop_polling();

    // 6. History.
    let history = controller.fetch_history().await?;
    println!();
    println!("{:<4} {:<8} {:<8} {}", "Id", "Vehicle", "Action", "Timestamp");
    println!("{}", "-".repeat(50));
    for event in &history {
        println!("{:<4} {:<8} {:<8} {}", event.id.0, event.vehicle_id, event.action, event.timestamp.to_rfc3339());
    }

    if let Some(recorder) = recorder {
        recorder.record_history(&history);
        recorder.finish()?;
        println!();
        println!("Recorded {} snapshot rows", recorder.rows_written());
    }

    Ok(())
}
