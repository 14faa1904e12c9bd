//! Ride state and mobility class enums shared across the workspace.

use serde::{Deserialize, Serialize};

/// The ride state of a vehicle.  Exactly one holds at any time.
///
/// Serialized with the backend's wire labels: `"waiting"`, `"in_progress"`,
/// `"stopped"`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideState {
    #[default]
    Waiting,
    InProgress,
    Stopped,
}

impl RideState {
    /// All states in declaration order, sampled uniformly at seed time.
    pub const ALL: [RideState; 3] = [RideState::Waiting, RideState::InProgress, RideState::Stopped];

    /// Wire label, also used for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            RideState::Waiting    => "waiting",
            RideState::InProgress => "in_progress",
            RideState::Stopped    => "stopped",
        }
    }

    /// The operator action offered for a vehicle in this state.
    pub fn available_action(self) -> Option<RideAction> {
        match self {
            RideState::Waiting    => Some(RideAction::Start),
            RideState::InProgress => Some(RideAction::Stop),
            RideState::Stopped    => None,
        }
    }
}

impl std::fmt::Display for RideState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A user-initiated ride command.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RideAction {
    Start,
    Stop,
}

impl RideAction {
    /// The state a vehicle moves to when this command is applied.
    pub fn target_state(self) -> RideState {
        match self {
            RideAction::Start => RideState::InProgress,
            RideAction::Stop  => RideState::Stopped,
        }
    }

    /// History action label.
    pub fn as_str(self) -> &'static str {
        match self {
            RideAction::Start => "start",
            RideAction::Stop  => "stop",
        }
    }
}

impl std::fmt::Display for RideAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Per-vehicle tag fixed at seed time, governing idle behavior.
///
/// `Dynamic` vehicles jitter while idle and may start a ride on their own;
/// `Static` vehicles stay put unless an operator starts them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MobilityClass {
    Dynamic,
    Static,
}

impl MobilityClass {
    #[inline]
    pub fn is_static(self) -> bool {
        matches!(self, MobilityClass::Static)
    }
}
