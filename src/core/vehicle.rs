//! Vehicle (admission request) state.

use serde::{Deserialize, Serialize};

use crate::util::types::{VehicleClass, VehicleId};

/// Lifecycle of a vehicle from arrival to robot pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleState {
    /// Waiting in the admission queue.
    Waiting,
    /// Claimed by a robot; placement is irrevocable from here.
    Assigned,
}

/// One pending or in-flight parking request.
///
/// Owned by the [`AdmissionQueue`](crate::core::AdmissionQueue) while
/// waiting, then exclusively by the claiming robot; discarded once the
/// placement commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Monotonic identifier, unique for the lifetime of the lot.
    pub id: VehicleId,
    /// Vehicle class.
    pub class: VehicleClass,
    /// Requested stay in hours (positive, validated by the caller layer).
    pub duration_hours: f64,
    /// Dynamic priority, computed once at enqueue: `base_rank + ordinal × 0.01`.
    pub priority: f64,
    /// Current lifecycle state.
    pub state: VehicleState,
}

impl Vehicle {
    /// Create a waiting vehicle with its dynamic priority fixed.
    #[must_use]
    pub const fn new(id: VehicleId, class: VehicleClass, duration_hours: f64, priority: f64) -> Self {
        Self {
            id,
            class,
            duration_hours,
            priority,
            state: VehicleState::Waiting,
        }
    }
}
