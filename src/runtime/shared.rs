//! Serialization boundary for concurrent callers.
//!
//! The engine mutates with no internal suspension points but its slot locks
//! are plain flags, not compare-and-swap primitives, so interleaved mutation
//! is unsafe. [`SharedLot`] puts every entry point behind a single
//! `parking_lot::Mutex`: one critical section per operation, which is the
//! whole concurrency contract a web layer needs to honor.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::forecast::Forecast;
use crate::core::outcome::Outcome;
use crate::core::pool::{ParkingLot, TickReport};
use crate::core::slot::Slot;
use crate::util::clock::now_ms;
use crate::util::types::{SlotId, TrafficMode, VehicleClass};

/// Thread-safe handle to one lot. Cloning shares the same lot.
#[derive(Clone)]
pub struct SharedLot {
    inner: Arc<Mutex<ParkingLot>>,
}

impl SharedLot {
    /// Wrap a lot for shared access.
    #[must_use]
    pub fn new(lot: ParkingLot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(lot)),
        }
    }

    /// Queue a vehicle for robot placement.
    pub fn enqueue(&self, class: VehicleClass, duration_hours: f64) -> Outcome {
        self.inner.lock().enqueue(class, duration_hours)
    }

    /// Remove the most recently queued vehicle.
    pub fn undo_last_queued(&self) -> Outcome {
        self.inner.lock().undo_last_queued()
    }

    /// Change the traffic mode.
    pub fn set_mode(&self, mode: TrafficMode) -> Outcome {
        self.inner.lock().set_mode(mode)
    }

    /// Advance the simulation one clock cycle at the current wall time.
    pub fn tick(&self) -> TickReport {
        self.inner.lock().tick(now_ms())
    }

    /// Direct placement at the current wall time.
    pub fn place(&self, class: VehicleClass, duration_hours: f64) -> Outcome {
        self.inner.lock().place(class, duration_hours, now_ms())
    }

    /// Reservation at the current wall time.
    pub fn reserve(&self, class: VehicleClass, duration_hours: f64) -> Outcome {
        self.inner.lock().reserve(class, duration_hours, now_ms())
    }

    /// Release a slot at the current wall time.
    pub fn release(&self, slot_id: SlotId) -> Outcome {
        self.inner.lock().release(slot_id, now_ms())
    }

    /// Release every slot whose reserved duration has passed. Call this from
    /// the external expiry poller.
    pub fn sweep_expired(&self) -> Vec<Outcome> {
        self.inner.lock().sweep_expired(now_ms())
    }

    /// Availability forecast at the current wall time.
    #[must_use]
    pub fn forecast(&self) -> Forecast {
        self.inner.lock().forecast(now_ms())
    }

    /// Snapshot of every slot.
    #[must_use]
    pub fn status(&self) -> std::collections::BTreeMap<SlotId, Slot> {
        self.inner.lock().status()
    }
}
