//! Priority-ordered admission queue.
//!
//! Entries are kept sorted ascending by dynamic priority (lower is served
//! first). Insertion scans for the first entry with a strictly greater
//! priority and inserts before it, which keeps the order stable for
//! same-class arrivals: the per-class ordinal baked into the priority makes
//! later arrivals strictly larger.

use crate::core::vehicle::Vehicle;
use crate::util::types::VehicleId;

/// Ordered waiting list of vehicles pending placement.
#[derive(Debug, Default)]
pub struct AdmissionQueue {
    entries: Vec<Vehicle>,
}

impl AdmissionQueue {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a vehicle keeping the priority order, O(n) and stable.
    pub fn insert(&mut self, vehicle: Vehicle) {
        let at = self
            .entries
            .iter()
            .position(|v| v.priority > vehicle.priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, vehicle);
    }

    /// Remove and return the most recently created vehicle still waiting
    /// (maximum id), regardless of its position in the priority order.
    pub fn remove_newest(&mut self) -> Option<Vehicle> {
        let at = self
            .entries
            .iter()
            .enumerate()
            .max_by_key(|(_, v)| v.id)
            .map(|(i, _)| i)?;
        Some(self.entries.remove(at))
    }

    /// Remove a vehicle by id (claimed by a robot).
    pub fn remove(&mut self, id: VehicleId) -> Option<Vehicle> {
        let at = self.entries.iter().position(|v| v.id == id)?;
        Some(self.entries.remove(at))
    }

    /// Vehicles in service order.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.entries.iter()
    }

    /// Id of the head-of-queue vehicle, if any.
    #[must_use]
    pub fn head_id(&self) -> Option<VehicleId> {
        self.entries.first().map(|v| v.id)
    }

    /// Number of waiting vehicles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::types::VehicleClass;

    fn vehicle(id: VehicleId, class: VehicleClass, ordinal: u32) -> Vehicle {
        let priority = f64::from(class.base_rank()) + f64::from(ordinal) * 0.01;
        Vehicle::new(id, class, 2.0, priority)
    }

    #[test]
    fn orders_across_classes_by_rank() {
        let mut q = AdmissionQueue::new();
        q.insert(vehicle(1, VehicleClass::Normal, 1));
        q.insert(vehicle(2, VehicleClass::Ambulance, 1));
        q.insert(vehicle(3, VehicleClass::Ev, 1));
        q.insert(vehicle(4, VehicleClass::Vip, 1));

        let order: Vec<_> = q.iter().map(|v| v.id).collect();
        assert_eq!(order, vec![2, 4, 3, 1]);
    }

    #[test]
    fn fifo_within_a_class() {
        let mut q = AdmissionQueue::new();
        q.insert(vehicle(1, VehicleClass::Vip, 1));
        q.insert(vehicle(2, VehicleClass::Vip, 2));
        q.insert(vehicle(3, VehicleClass::Vip, 3));

        let order: Vec<_> = q.iter().map(|v| v.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn stays_sorted_under_interleaved_arrivals() {
        let mut q = AdmissionQueue::new();
        let mut normal = 0;
        let mut vip = 0;
        for id in 1..=20_u64 {
            let v = if id % 3 == 0 {
                vip += 1;
                vehicle(id, VehicleClass::Vip, vip)
            } else {
                normal += 1;
                vehicle(id, VehicleClass::Normal, normal)
            };
            q.insert(v);
            let priorities: Vec<_> = q.iter().map(|v| v.priority).collect();
            let mut sorted = priorities.clone();
            sorted.sort_by(f64::total_cmp);
            assert_eq!(priorities, sorted);
        }
    }

    #[test]
    fn remove_newest_ignores_priority_order() {
        let mut q = AdmissionQueue::new();
        q.insert(vehicle(1, VehicleClass::Normal, 1));
        q.insert(vehicle(2, VehicleClass::Ambulance, 1));

        // Vehicle 2 sits at the head, but undo targets the newest arrival.
        let removed = q.remove_newest().unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(q.len(), 1);
        assert_eq!(q.head_id(), Some(1));
    }

    #[test]
    fn remove_newest_on_empty_queue() {
        let mut q = AdmissionQueue::new();
        assert!(q.remove_newest().is_none());
    }

    #[test]
    fn remove_by_id() {
        let mut q = AdmissionQueue::new();
        q.insert(vehicle(1, VehicleClass::Normal, 1));
        q.insert(vehicle(2, VehicleClass::Normal, 2));
        assert_eq!(q.remove(1).unwrap().id, 1);
        assert!(q.remove(1).is_none());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn ordinal_drift_crosses_rank_past_99() {
        // Known boundary of the rank + ordinal*0.01 scheme: the 100th Vip
        // arrival reaches priority 2.00 and sorts ahead of (or level with)
        // the Ev base rank. Preserved from the original behavior.
        let mut q = AdmissionQueue::new();
        q.insert(vehicle(1, VehicleClass::Ev, 1)); // 2.01
        q.insert(vehicle(2, VehicleClass::Vip, 100)); // 2.00
        q.insert(vehicle(3, VehicleClass::Vip, 102)); // 2.02, behind the Ev

        let order: Vec<_> = q.iter().map(|v| v.id).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }
}
