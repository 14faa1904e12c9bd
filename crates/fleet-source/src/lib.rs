//! `fleet-source` — where fleet snapshots come from and where ride commands go.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`source`]     | `FleetDataSource` trait, `SourceFuture<T>`                  |
//! | [`stream`]     | `FleetStream` — one snapshot per tick until failure         |
//! | [`simulated`]  | `SimulatedSource` — drives a `SimulationEngine` on a timer  |
//! | [`remote`]     | `RemoteSource` — JSON over HTTP via `reqwest`               |
//! | [`wire`]       | Backend DTOs and whole-payload decoding                     |
//! | [`any`]        | `AnySource` — the variant chosen from `BackendConfig`       |
//! | [`error`]      | `SourceError`, `SourceResult<T>`                            |
//!
//! # Runtime
//!
//! Both implementations spawn their producers on the ambient Tokio runtime;
//! [`FleetDataSource::observe_fleet`] must be called from within one.

pub mod any;
pub mod error;
pub mod remote;
pub mod simulated;
pub mod source;
pub mod stream;
pub mod wire;


pub use any::AnySource;
pub use error::{SourceError, SourceResult};
pub use remote::RemoteSource;
pub use simulated::SimulatedSource;
pub use source::{FleetDataSource, SourceFuture};
pub use stream::FleetStream;
