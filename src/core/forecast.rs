//! Availability forecasting.
//!
//! Pure derivation of a free-slot probability and the soonest-freeing slots
//! from current lot state and queue depth. No mutation, no failure mode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::slot::Slot;
use crate::util::clock::hour_of_day;
use crate::util::types::SlotId;

/// How many soon-to-free slots the forecast reports.
const UPCOMING_CAP: usize = 4;

/// An occupied slot and when it frees up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingSlot {
    /// Slot that will free up.
    pub slot: SlotId,
    /// Departure time (ms since epoch).
    pub free_at_ms: u64,
    /// Whole hours until departure.
    pub hours_left: u64,
    /// Remaining minutes past the whole hours.
    pub mins_left: u64,
    /// Total seconds until departure.
    pub seconds_left: u64,
}

/// Forecast output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    /// Chance of finding a free slot, 0..=100.
    pub probability: u8,
    /// Raw count of free slots right now.
    pub free_slots: usize,
    /// Queue depth factored into the estimate.
    pub queue_impact: usize,
    /// Whether the current hour falls in a peak window.
    pub is_peak: bool,
    /// Up to four soonest-freeing occupied slots, soonest first.
    pub upcoming: Vec<UpcomingSlot>,
}

/// Whether an hour of day falls in one of the two fixed peak windows.
#[must_use]
pub const fn is_peak_hour(hour: u8) -> bool {
    matches!(hour, 8..=10 | 17..=19)
}

/// Derive the availability forecast from lot state and queue depth.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn forecast(slots: &BTreeMap<SlotId, Slot>, queue_len: usize, now_ms: u64) -> Forecast {
    let mut free_count = 0_usize;
    let mut upcoming = Vec::new();

    for slot in slots.values() {
        if !slot.is_occupied() {
            free_count += 1;
        } else if let Some(remaining) = slot.remaining_ms(now_ms) {
            let seconds_left = remaining / 1_000;
            upcoming.push(UpcomingSlot {
                slot: slot.id,
                free_at_ms: now_ms + remaining,
                hours_left: seconds_left / 3_600,
                mins_left: (seconds_left % 3_600) / 60,
                seconds_left,
            });
        }
    }

    upcoming.sort_by_key(|u| u.seconds_left);
    upcoming.truncate(UPCOMING_CAP);

    let effective_free = free_count as i64 - queue_len as i64;
    let is_peak = is_peak_hour(hour_of_day(now_ms));

    let mut base_prob = if effective_free > 2 {
        0.9
    } else if effective_free > 0 {
        0.4
    } else {
        0.05
    };
    if is_peak {
        base_prob -= 0.2;
    }
    if queue_len > 0 {
        base_prob -= queue_len as f64 * 0.1;
    }

    // Truncate, then clamp: a negative estimate floors at zero.
    let probability = ((base_prob * 100.0) as i64).clamp(0, 100) as u8;

    Forecast {
        probability,
        free_slots: free_count,
        queue_impact: queue_len,
        is_peak,
        upcoming,
    }
}
