//! Shared serde-derived vocabulary types used across the engine.

use serde::{Deserialize, Serialize};

/// Identifier of a parking slot (stable, assigned at lot construction).
pub type SlotId = u32;
/// Identifier of a vehicle (monotonically increasing, never reused).
pub type VehicleId = u64;
/// Identifier of a valet robot.
pub type RobotId = u32;

/// Closed set of vehicle classes handled by the lot.
///
/// `Reserved` is a placeholder occupant written by [`reserve`] operations; it
/// is never enqueued by real traffic.
///
/// [`reserve`]: crate::core::ParkingLot::reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleClass {
    /// Emergency vehicle, always served first.
    Ambulance,
    /// Premium customer.
    Vip,
    /// Electric vehicle needing a charging station.
    Ev,
    /// Senior/assisted driver, discounted rate.
    Senior,
    /// Standard vehicle.
    Normal,
    /// Reservation placeholder occupant.
    Reserved,
}

impl VehicleClass {
    /// Base priority rank used for queue ordering. Lower is served first.
    #[must_use]
    pub const fn base_rank(self) -> u8 {
        match self {
            Self::Ambulance => 0,
            Self::Vip => 1,
            Self::Ev => 2,
            Self::Senior => 3,
            Self::Normal => 4,
            Self::Reserved => 5,
        }
    }

    /// Hourly billing rate in dollars. Ambulances park free; `Reserved`
    /// falls back to the standard rate.
    #[must_use]
    pub const fn hourly_rate(self) -> f64 {
        match self {
            Self::Vip => 20.0,
            Self::Ev => 15.0,
            Self::Senior => 5.0,
            Self::Ambulance => 0.0,
            Self::Normal | Self::Reserved => 10.0,
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ambulance => "AMBULANCE",
            Self::Vip => "VIP",
            Self::Ev => "EV",
            Self::Senior => "SENIOR",
            Self::Normal => "NORMAL",
            Self::Reserved => "RESERVED",
        };
        f.write_str(name)
    }
}

/// Fixed class of a parking slot, assigned at construction and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotClass {
    /// Premium slot near the entrance.
    Vip,
    /// Slot with a charging station.
    Ev,
    /// Wide slot for assisted drivers.
    Senior,
    /// Standard slot.
    Normal,
    /// Dedicated emergency slot by the exit ramp.
    Emergency,
}

impl SlotClass {
    /// Whether a vehicle of `class` is an exact match for this slot.
    /// Ambulances match the emergency slot; `Reserved` matches nothing
    /// (reservations select through the true vehicle class).
    #[must_use]
    pub const fn matches(self, class: VehicleClass) -> bool {
        matches!(
            (self, class),
            (Self::Vip, VehicleClass::Vip)
                | (Self::Ev, VehicleClass::Ev)
                | (Self::Senior, VehicleClass::Senior)
                | (Self::Normal, VehicleClass::Normal)
                | (Self::Emergency, VehicleClass::Ambulance)
        )
    }
}

/// Traffic generation mode. Gates both arrival synthesis and the
/// cross-class overflow rules of the placement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrafficMode {
    /// No synthetic arrivals; both overflow directions allowed.
    Manual,
    /// Heavy standard traffic; Normal vehicles may overflow into Vip slots.
    Peak,
    /// Event traffic (mostly Vip); Vip vehicles may overflow into Normal slots.
    Event,
}

impl std::fmt::Display for TrafficMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Manual => "MANUAL",
            Self::Peak => "PEAK",
            Self::Event => "EVENT",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_order_is_total_and_fixed() {
        assert_eq!(VehicleClass::Ambulance.base_rank(), 0);
        assert_eq!(VehicleClass::Vip.base_rank(), 1);
        assert_eq!(VehicleClass::Ev.base_rank(), 2);
        assert_eq!(VehicleClass::Senior.base_rank(), 3);
        assert_eq!(VehicleClass::Normal.base_rank(), 4);
        assert_eq!(VehicleClass::Reserved.base_rank(), 5);
    }

    #[test]
    fn ambulance_matches_emergency_slot_only() {
        assert!(SlotClass::Emergency.matches(VehicleClass::Ambulance));
        assert!(!SlotClass::Normal.matches(VehicleClass::Ambulance));
        assert!(!SlotClass::Emergency.matches(VehicleClass::Normal));
    }

    #[test]
    fn reserved_never_exact_matches() {
        for slot in [
            SlotClass::Vip,
            SlotClass::Ev,
            SlotClass::Senior,
            SlotClass::Normal,
            SlotClass::Emergency,
        ] {
            assert!(!slot.matches(VehicleClass::Reserved));
        }
    }
}
