//! `fleet-controller` — the operator's view of the fleet.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`controller`] | `FleetController` — polling, selection, ride commands          |
//! | [`command`]    | `PendingCommand` handle for an in-flight ride command          |
//! | [`state`]      | `ControllerState` — held snapshot, selection, busy flag        |
//! | [`observer`]   | `FleetObserver` callbacks, `NoopObserver`                      |
//! | [`qr`]         | `parse_qr_payload` for `myapp://startRide?vehicleId=…`         |
//! | [`tracking`]   | `AutoTracking` — map camera follow/pan flags                   |
//! | [`error`]      | `ControllerError`, `CommandRejected`, `ControllerResult<T>`    |
//!
//! # Optimistic commands
//!
//! `start_ride`/`stop_ride` change the held snapshot immediately, then wait
//! for the data source in a spawned task.  Success keeps the change and logs
//! a history event; failure restores the snapshot captured before the
//! change.  Only one command may be in flight; a second one is rejected,
//! never queued.
//!
//! ```rust,ignore
//! let controller = FleetController::new(source);
//! controller.start_polling();
//! controller.select_vehicle(&VehicleId::from("1"));
//! controller.start_ride()?.wait().await?;
//! ```

pub mod command;
pub mod controller;
pub mod error;
pub mod observer;
pub mod qr;
pub mod state;
pub mod tracking;


pub use command::PendingCommand;
pub use controller::FleetController;
pub use error::{CommandRejected, ControllerError, ControllerResult};
pub use observer::{FleetObserver, NoopObserver};
pub use qr::{QR_ACTION, QR_SCHEME, QR_VEHICLE_PARAM, parse_qr_payload, started_notice};
pub use state::ControllerState;
pub use tracking::AutoTracking;
