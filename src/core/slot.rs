//! Parking slot state.

use serde::{Deserialize, Serialize};

use crate::util::clock::HOUR_MS;
use crate::util::types::{RobotId, SlotClass, SlotId, VehicleClass};

/// One allocatable unit of parking capacity.
///
/// A slot is always in exactly one of three states:
/// - free: `occupant`, `entered_at_ms`, `ends_at_ms` and `locked_by` all unset;
/// - occupied: `occupant` plus both timestamps set, `locked_by` unset;
/// - locked-pending: `locked_by` set while a robot is en route, `occupant` unset.
///
/// Slots are created once at lot construction and never destroyed; only
/// placement, release and lock/unlock mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Stable slot identifier.
    pub id: SlotId,
    /// Fixed class assigned at construction.
    pub class: SlotClass,
    /// Descriptive label ("Near Entrance", "Charging Station", ...).
    pub label: String,
    /// Class of the vehicle currently occupying the slot, if any. May
    /// legitimately differ from `class` under the overflow rules.
    pub occupant: Option<VehicleClass>,
    /// When the current occupant entered (ms since epoch).
    pub entered_at_ms: Option<u64>,
    /// Reserved departure time of the current occupant (ms since epoch).
    pub ends_at_ms: Option<u64>,
    /// Robot currently en route to this slot, if any.
    pub locked_by: Option<RobotId>,
    /// Whether the occupant was placed by a robot rather than directly.
    pub auto_placed: bool,
}

impl Slot {
    /// Create a free slot.
    #[must_use]
    pub fn new(id: SlotId, class: SlotClass, label: impl Into<String>) -> Self {
        Self {
            id,
            class,
            label: label.into(),
            occupant: None,
            entered_at_ms: None,
            ends_at_ms: None,
            locked_by: None,
            auto_placed: false,
        }
    }

    /// Free AND not locked by a robot: eligible for placement.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.occupant.is_none() && self.locked_by.is_none()
    }

    /// Whether the slot currently holds an occupant.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Write an occupant into the slot, releasing any robot lock.
    pub fn occupy(&mut self, class: VehicleClass, now_ms: u64, duration_hours: f64, auto: bool) {
        self.occupant = Some(class);
        self.entered_at_ms = Some(now_ms);
        self.ends_at_ms = Some(now_ms + duration_ms(duration_hours));
        self.locked_by = None;
        self.auto_placed = auto;
    }

    /// Clear the slot back to the free state.
    pub fn clear(&mut self) {
        self.occupant = None;
        self.entered_at_ms = None;
        self.ends_at_ms = None;
        self.locked_by = None;
        self.auto_placed = false;
    }

    /// Milliseconds until the occupant's reserved departure, if occupied and
    /// not yet past due.
    #[must_use]
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.ends_at_ms
            .filter(|_| self.is_occupied())
            .and_then(|end| end.checked_sub(now_ms))
            .filter(|rem| *rem > 0)
    }

    /// Whether the occupant's reserved departure time has passed.
    #[must_use]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.is_occupied() && self.ends_at_ms.is_some_and(|end| end <= now_ms)
    }
}

/// Convert a fractional hour duration to milliseconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn duration_ms(hours: f64) -> u64 {
    (hours * HOUR_MS as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupy_then_clear_round_trips_the_state() {
        let mut slot = Slot::new(7, SlotClass::Normal, "Standard");
        assert!(slot.is_available());

        slot.occupy(VehicleClass::Normal, 1_000, 2.0, false);
        assert!(!slot.is_available());
        assert!(slot.is_occupied());
        assert_eq!(slot.ends_at_ms, Some(1_000 + 2 * HOUR_MS));

        slot.clear();
        assert!(slot.is_available());
        assert_eq!(slot, Slot::new(7, SlotClass::Normal, "Standard"));
    }

    #[test]
    fn locked_slot_is_not_available() {
        let mut slot = Slot::new(1, SlotClass::Vip, "Near Entrance");
        slot.locked_by = Some(2);
        assert!(!slot.is_available());
        assert!(!slot.is_occupied());
    }

    #[test]
    fn occupy_releases_the_robot_lock() {
        let mut slot = Slot::new(1, SlotClass::Vip, "Near Entrance");
        slot.locked_by = Some(1);
        slot.occupy(VehicleClass::Vip, 0, 1.0, true);
        assert_eq!(slot.locked_by, None);
        assert!(slot.auto_placed);
    }

    #[test]
    fn remaining_and_expiry() {
        let mut slot = Slot::new(3, SlotClass::Ev, "Charging Station");
        slot.occupy(VehicleClass::Ev, 0, 1.0, false);
        assert_eq!(slot.remaining_ms(HOUR_MS / 2), Some(HOUR_MS / 2));
        assert!(!slot.is_expired(HOUR_MS - 1));
        assert!(slot.is_expired(HOUR_MS));
        assert_eq!(slot.remaining_ms(HOUR_MS), None);
    }
}
