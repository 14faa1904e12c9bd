//! Handle for an in-flight ride command.

use fleet_core::{RideAction, VehicleId};
use tokio::task::JoinHandle;

use crate::{ControllerError, ControllerResult};

/// Completion handle returned by the controller's ride commands.
///
/// Dropping it does not cancel the command; the completion task still
/// commits or rolls back.
#[derive(Debug)]
pub struct PendingCommand {
    pub(crate) vehicle: VehicleId,
    pub(crate) action:  RideAction,
    pub(crate) task:    JoinHandle<ControllerResult<()>>,
}

impl PendingCommand {
    pub fn vehicle(&self) -> &VehicleId {
        &self.vehicle
    }

    pub fn action(&self) -> RideAction {
        self.action
    }

    /// Wait until the command has committed or been rolled back.
    ///
    /// `Err(ControllerError::Source(_))` means the data source failed and
    /// the held snapshot is back to its pre-command value.
    pub async fn wait(self) -> ControllerResult<()> {
        self.task.await.map_err(|e| ControllerError::TaskAborted(e.to_string()))?
    }
}
