//! Placement history log and external audit sinks.
//!
//! The lot keeps its own sequential in-memory history of entries, exits and
//! reservations, and mirrors every event into an optional attached
//! [`HistorySink`] so the surrounding layer can persist billing or
//! notification records out of band.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::util::types::{SlotId, VehicleClass};

/// What happened to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    /// Direct placement through the gate.
    Entry,
    /// Occupant left (released).
    Exit,
    /// Upfront reservation lock.
    Reserve,
}

/// One entry of the sequential placement history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Event time (ms since epoch).
    pub at_ms: u64,
    /// Affected slot.
    pub slot: SlotId,
    /// Vehicle class involved; for exits, the class that left.
    pub class: VehicleClass,
    /// Action taken.
    pub action: HistoryAction,
    /// Requested stay for entries/reservations.
    pub duration_hours: Option<f64>,
    /// Upfront bill collected, if any.
    pub cost: Option<f64>,
}

/// External history sink abstraction.
pub trait HistorySink: Send {
    /// Record a history event.
    fn record(&mut self, event: HistoryEvent);
}

/// Bounded in-memory history, the lot's own sequential log.
#[derive(Debug)]
pub struct InMemoryHistory {
    events: VecDeque<HistoryEvent>,
    max_events: usize,
}

impl InMemoryHistory {
    /// Create a history with a bounded buffer; the oldest events are dropped
    /// once `max_events` is reached.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events.min(1024)),
            max_events,
        }
    }

    /// Snapshot of stored events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<HistoryEvent> {
        self.events.iter().cloned().collect()
    }

    /// Number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl HistorySink for InMemoryHistory {
    fn record(&mut self, event: HistoryEvent) {
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(at_ms: u64, slot: SlotId) -> HistoryEvent {
        HistoryEvent {
            at_ms,
            slot,
            class: VehicleClass::Normal,
            action: HistoryAction::Entry,
            duration_hours: Some(2.0),
            cost: Some(20.0),
        }
    }

    #[test]
    fn records_in_order() {
        let mut history = InMemoryHistory::new(10);
        history.record(entry(1, 1));
        history.record(entry(2, 2));
        let events = history.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].slot, 1);
        assert_eq!(events[1].slot, 2);
    }

    #[test]
    fn drops_oldest_past_the_bound() {
        let mut history = InMemoryHistory::new(2);
        history.record(entry(1, 1));
        history.record(entry(2, 2));
        history.record(entry(3, 3));
        let events = history.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].slot, 2);
        assert_eq!(events[1].slot, 3);
    }
}
