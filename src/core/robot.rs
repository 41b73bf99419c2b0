//! Valet robot finite-state machine.

use serde::{Deserialize, Serialize};

use crate::core::vehicle::Vehicle;
use crate::util::types::{RobotId, SlotId, VehicleClass};

/// The four-state cycle a robot runs for every placement.
///
/// `Idle` is both the initial and the resting state; there is no terminal
/// state. A robot advances exactly one transition per tick, and only the
/// assignment step moves it out of `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RobotState {
    /// At base, ready to accept a vehicle.
    Idle,
    /// Travelling to the target slot with the vehicle.
    EnRoute,
    /// Arrived; commits the vehicle into the slot on the next tick.
    Placing,
    /// Driving back to base empty.
    Returning,
}

/// One unit of automated placement capacity.
///
/// Holds its current vehicle exclusively: the assignment step never hands the
/// same vehicle to two robots, and all mutation happens inside one
/// single-threaded tick, so no locking is involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Robot {
    /// Robot identifier.
    pub id: RobotId,
    /// Current FSM state.
    pub state: RobotState,
    /// Vehicle being carried; set from `EnRoute` through `Placing`.
    pub vehicle: Option<Vehicle>,
    /// Slot the robot is heading to; same lifetime as `vehicle`.
    pub target_slot: Option<SlotId>,
}

impl Robot {
    /// Create an idle robot.
    #[must_use]
    pub const fn new(id: RobotId) -> Self {
        Self {
            id,
            state: RobotState::Idle,
            vehicle: None,
            target_slot: None,
        }
    }
}

/// Point-in-time view of a robot, reported by the tick loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotSnapshot {
    /// Robot identifier.
    pub id: RobotId,
    /// FSM state at the end of the tick.
    pub state: RobotState,
    /// Class of the carried vehicle, if any.
    pub vehicle: Option<VehicleClass>,
}

impl From<&Robot> for RobotSnapshot {
    fn from(robot: &Robot) -> Self {
        Self {
            id: robot.id,
            state: robot.state,
            vehicle: robot.vehicle.as_ref().map(|v| v.class),
        }
    }
}
