//! Structured operation outcomes.
//!
//! Every mutating lot operation returns an [`Outcome`]. Capacity exhaustion,
//! invalid slot references and empty-queue undos are ordinary variants, not
//! errors. The `Display` rendering is the wire contract towards the web
//! layer: for `Placed`, `Reserved` and `Released` the text embeds the slot id
//! as `Slot {id}`, which calling code parses to create booking records.
//! Internally, callers should use the typed accessors instead.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::types::{SlotId, TrafficMode, VehicleClass, VehicleId};

/// Result of one lot operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// A vehicle was placed directly into a slot and billed upfront.
    Placed {
        /// Assigned slot.
        slot: SlotId,
        /// Upfront bill collected.
        cost: f64,
        /// Requested stay.
        duration_hours: f64,
    },
    /// A slot was locked by a reservation and billed upfront.
    Reserved {
        /// Reserved slot.
        slot: SlotId,
        /// Upfront bill collected.
        cost: f64,
        /// Requested stay.
        duration_hours: f64,
    },
    /// No suitable slot available for the class under the current mode.
    LotFull {
        /// Class that could not be placed.
        class: VehicleClass,
    },
    /// A slot was released back to the free state.
    Released {
        /// Freed slot.
        slot: SlotId,
    },
    /// The slot id is outside the lot's range.
    InvalidSlot {
        /// Offending id.
        slot: SlotId,
    },
    /// Release was requested for a slot that is already free.
    SlotAlreadyFree {
        /// Offending id.
        slot: SlotId,
    },
    /// A vehicle joined the admission queue.
    Queued {
        /// Assigned vehicle id.
        vehicle: VehicleId,
        /// Vehicle class.
        class: VehicleClass,
        /// Dynamic priority fixed at enqueue.
        priority: f64,
    },
    /// The most recent arrival was removed from the queue.
    Undone {
        /// Removed vehicle id.
        vehicle: VehicleId,
        /// Its class.
        class: VehicleClass,
    },
    /// Undo was requested with nothing queued.
    QueueEmpty,
    /// The traffic mode was changed.
    ModeSet {
        /// New mode.
        mode: TrafficMode,
    },
}

impl Outcome {
    /// Slot id carried by the outcome, if any.
    #[must_use]
    pub const fn slot_id(&self) -> Option<SlotId> {
        match self {
            Self::Placed { slot, .. }
            | Self::Reserved { slot, .. }
            | Self::Released { slot }
            | Self::InvalidSlot { slot }
            | Self::SlotAlreadyFree { slot } => Some(*slot),
            _ => None,
        }
    }

    /// Upfront cost billed by the outcome, if any.
    #[must_use]
    pub const fn cost(&self) -> Option<f64> {
        match self {
            Self::Placed { cost, .. } | Self::Reserved { cost, .. } => Some(*cost),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placed {
                slot,
                cost,
                duration_hours,
            } => write!(
                f,
                "Slot {slot} assigned. Bill paid: ${cost:.2} (for {duration_hours} hrs)."
            ),
            Self::Reserved {
                slot,
                cost,
                duration_hours,
            } => write!(
                f,
                "Slot {slot} LOCKED for {duration_hours} hrs. Upfront payment: ${cost:.2} received."
            ),
            Self::LotFull { class } => {
                write!(f, "Parking FULL! No suitable slot for {class}.")
            }
            Self::Released { slot } => {
                write!(f, "Vehicle exited Slot {slot}. Slot is now FREE.")
            }
            Self::InvalidSlot { slot } => write!(f, "Invalid slot id {slot}."),
            Self::SlotAlreadyFree { slot } => write!(f, "Slot {slot} is already empty."),
            Self::Queued {
                vehicle,
                class,
                priority,
            } => write!(f, "Vehicle {vehicle} ({class}) [Prio: {priority:.2}] added."),
            Self::Undone { vehicle, .. } => {
                write!(f, "Undo: Vehicle {vehicle} removed from queue.")
            }
            Self::QueueEmpty => f.write_str("Queue is empty. Nothing to undo."),
            Self::ModeSet { mode } => write!(f, "Traffic pattern set to: {mode}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The web layer extracts the numeric slot id from the rendered text, so
    // the `Slot {id}` form is load-bearing.
    fn extract_slot_id(message: &str) -> Option<SlotId> {
        let rest = message.split("Slot ").nth(1)?;
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    }

    #[test]
    fn placed_message_embeds_parseable_slot_id() {
        let outcome = Outcome::Placed {
            slot: 7,
            cost: 20.0,
            duration_hours: 2.0,
        };
        assert_eq!(extract_slot_id(&outcome.to_string()), Some(7));
        assert_eq!(outcome.slot_id(), Some(7));
        assert_eq!(outcome.cost(), Some(20.0));
    }

    #[test]
    fn reserved_message_embeds_parseable_slot_id() {
        let outcome = Outcome::Reserved {
            slot: 12,
            cost: 40.0,
            duration_hours: 2.0,
        };
        assert_eq!(extract_slot_id(&outcome.to_string()), Some(12));
    }

    #[test]
    fn released_message_embeds_parseable_slot_id() {
        let outcome = Outcome::Released { slot: 3 };
        assert_eq!(extract_slot_id(&outcome.to_string()), Some(3));
    }

    #[test]
    fn non_placement_outcomes_carry_no_cost() {
        assert_eq!(Outcome::QueueEmpty.cost(), None);
        assert_eq!(
            Outcome::LotFull {
                class: VehicleClass::Vip
            }
            .slot_id(),
            None
        );
    }
}
