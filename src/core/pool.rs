//! The lot orchestrator: slot ownership, admission queue, robot fleet,
//! traffic modes and the per-tick simulation loop.

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::LotConfig;
use crate::core::audit::{HistoryAction, HistoryEvent, HistorySink, InMemoryHistory};
use crate::core::billing;
use crate::core::error::EngineError;
use crate::core::forecast::{forecast, Forecast};
use crate::core::outcome::Outcome;
use crate::core::queue::AdmissionQueue;
use crate::core::robot::{Robot, RobotSnapshot, RobotState};
use crate::core::slot::Slot;
use crate::core::vehicle::{Vehicle, VehicleState};
use crate::util::types::{SlotClass, SlotId, TrafficMode, VehicleClass, VehicleId};

/// Result of one simulation tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    /// Human-readable events that happened during the tick, in order.
    pub events: Vec<String>,
    /// Robot states at the end of the tick.
    pub robots: Vec<RobotSnapshot>,
    /// Queue depth after assignment.
    pub queue_len: usize,
    /// Total synthetic arrivals generated so far.
    pub auto_generated: u64,
}

/// In-memory model of one parking facility.
///
/// Owns every slot, the admission queue, the robot fleet and the traffic
/// mode; nothing it owns is shared outside. All mutation happens inside one
/// call with no internal suspension points, so a concurrent caller layer must
/// serialize entry (see [`SharedLot`](crate::runtime::SharedLot)). Expiry of
/// reserved durations is driven by an external poller through
/// [`sweep_expired`](Self::sweep_expired) or [`release`](Self::release).
pub struct ParkingLot {
    slots: BTreeMap<SlotId, Slot>,
    queue: AdmissionQueue,
    robots: Vec<Robot>,
    mode: TrafficMode,
    vehicle_counter: VehicleId,
    class_arrivals: HashMap<VehicleClass, u32>,
    auto_generated: u64,
    config: LotConfig,
    rng: StdRng,
    history: InMemoryHistory,
    sink: Option<Box<dyn HistorySink>>,
}

impl ParkingLot {
    /// Build a lot from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the configuration fails
    /// validation.
    pub fn new(config: LotConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        let slots = config
            .slots
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let id = u32::try_from(i + 1).unwrap_or(u32::MAX);
                (id, Slot::new(id, spec.class, spec.label.clone()))
            })
            .collect();
        let robots = (1..=u32::try_from(config.robots).unwrap_or(u32::MAX))
            .map(Robot::new)
            .collect();
        let history = InMemoryHistory::new(config.history_capacity);

        Ok(Self {
            slots,
            queue: AdmissionQueue::new(),
            robots,
            mode: TrafficMode::Manual,
            vehicle_counter: 0,
            class_arrivals: HashMap::new(),
            auto_generated: 0,
            config,
            rng: StdRng::from_os_rng(),
            history,
            sink: None,
        })
    }

    /// Reseed the traffic RNG for deterministic simulation runs.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Attach an external history sink; every placement event is mirrored
    /// into it in addition to the lot's own in-memory log.
    #[must_use]
    pub fn with_history_sink(mut self, sink: Box<dyn HistorySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the traffic mode, gating both arrival synthesis and overflow.
    pub fn set_mode(&mut self, mode: TrafficMode) -> Outcome {
        tracing::info!(%mode, "traffic mode set");
        self.mode = mode;
        Outcome::ModeSet { mode }
    }

    /// Current traffic mode.
    #[must_use]
    pub const fn mode(&self) -> TrafficMode {
        self.mode
    }

    /// Add a vehicle to the admission queue.
    ///
    /// The dynamic priority is fixed here, once: `base_rank + ordinal × 0.01`
    /// with a strictly increasing per-class ordinal starting at 1. The 0.01
    /// increments cross into the next rank once a class accumulates 100+
    /// concurrent arrivals; that boundary is preserved from the original
    /// scheme (see DESIGN.md).
    pub fn enqueue(&mut self, class: VehicleClass, duration_hours: f64) -> Outcome {
        self.vehicle_counter += 1;
        let ordinal = self
            .class_arrivals
            .entry(class)
            .and_modify(|c| *c += 1)
            .or_insert(1);
        let priority = f64::from(class.base_rank()) + f64::from(*ordinal) * 0.01;

        let id = self.vehicle_counter;
        tracing::info!(vehicle = id, %class, priority, duration_hours, "queued");
        self.queue
            .insert(Vehicle::new(id, class, duration_hours, priority));

        Outcome::Queued {
            vehicle: id,
            class,
            priority,
        }
    }

    /// Remove the most recently queued vehicle, regardless of its priority
    /// position. Cancellation of an in-flight robot task is not possible.
    pub fn undo_last_queued(&mut self) -> Outcome {
        self.queue.remove_newest().map_or(Outcome::QueueEmpty, |v| {
            tracing::info!(vehicle = v.id, class = %v.class, "undo: removed from queue");
            Outcome::Undone {
                vehicle: v.id,
                class: v.class,
            }
        })
    }

    /// Select a slot for a vehicle class under the current mode.
    ///
    /// Searches free, unlocked slots in ascending id order. Ambulances take
    /// the emergency slot first and fall back to any available slot; other
    /// classes need an exact match or one of the two mode-gated overflow
    /// directions. The policy never relaxes beyond these rules.
    #[must_use]
    pub fn find_best_slot(&self, class: VehicleClass) -> Option<SlotId> {
        let available = || self.slots.values().filter(|s| s.is_available());

        if class == VehicleClass::Ambulance {
            return available()
                .find(|s| s.class == SlotClass::Emergency)
                .or_else(|| available().next())
                .map(|s| s.id);
        }

        if let Some(slot) = available().find(|s| s.class.matches(class)) {
            return Some(slot.id);
        }

        let overflow_into = match (class, self.mode) {
            (VehicleClass::Normal, TrafficMode::Peak | TrafficMode::Manual) => SlotClass::Vip,
            (VehicleClass::Vip, TrafficMode::Event | TrafficMode::Manual) => SlotClass::Normal,
            _ => return None,
        };
        available().find(|s| s.class == overflow_into).map(|s| s.id)
    }

    /// Direct placement through the gate: select a slot, occupy it
    /// immediately (no robot involved), bill upfront and log the entry.
    pub fn place(&mut self, class: VehicleClass, duration_hours: f64, now_ms: u64) -> Outcome {
        let Some(slot_id) = self.find_best_slot(class) else {
            tracing::warn!(%class, mode = %self.mode, "no suitable slot for direct placement");
            return Outcome::LotFull { class };
        };

        let cost = billing::upfront_cost(class, duration_hours);
        if let Some(slot) = self.slots.get_mut(&slot_id) {
            slot.occupy(class, now_ms, duration_hours, false);
        }
        self.record(HistoryEvent {
            at_ms: now_ms,
            slot: slot_id,
            class,
            action: HistoryAction::Entry,
            duration_hours: Some(duration_hours),
            cost: Some(cost),
        });
        tracing::info!(slot = slot_id, %class, cost, "direct placement");

        Outcome::Placed {
            slot: slot_id,
            cost,
            duration_hours,
        }
    }

    /// Reserve a slot upfront. Selection runs on the true vehicle class and
    /// so does billing, but the occupant is written as the `Reserved`
    /// placeholder.
    pub fn reserve(&mut self, class: VehicleClass, duration_hours: f64, now_ms: u64) -> Outcome {
        let Some(slot_id) = self.find_best_slot(class) else {
            tracing::warn!(%class, mode = %self.mode, "no suitable slot to reserve");
            return Outcome::LotFull { class };
        };

        let cost = billing::upfront_cost(class, duration_hours);
        if let Some(slot) = self.slots.get_mut(&slot_id) {
            slot.occupy(VehicleClass::Reserved, now_ms, duration_hours, false);
        }
        self.record(HistoryEvent {
            at_ms: now_ms,
            slot: slot_id,
            class,
            action: HistoryAction::Reserve,
            duration_hours: Some(duration_hours),
            cost: Some(cost),
        });
        tracing::info!(slot = slot_id, %class, cost, "reservation");

        Outcome::Reserved {
            slot: slot_id,
            cost,
            duration_hours,
        }
    }

    /// Release a slot back to the free state and log the exit.
    pub fn release(&mut self, slot_id: SlotId, now_ms: u64) -> Outcome {
        let Some(slot) = self.slots.get_mut(&slot_id) else {
            return Outcome::InvalidSlot { slot: slot_id };
        };
        let Some(class) = slot.occupant else {
            return Outcome::SlotAlreadyFree { slot: slot_id };
        };

        slot.clear();
        self.record(HistoryEvent {
            at_ms: now_ms,
            slot: slot_id,
            class,
            action: HistoryAction::Exit,
            duration_hours: None,
            cost: None,
        });
        tracing::info!(slot = slot_id, %class, "released");

        Outcome::Released { slot: slot_id }
    }

    /// Advance the simulation by one clock cycle.
    ///
    /// Order within the tick: synthesize arrivals (mode-dependent), advance
    /// every robot one FSM step, then match queued vehicles to their
    /// designated robots.
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        let mut events = Vec::new();

        self.synthesize_traffic(&mut events);
        self.advance_robots(now_ms, &mut events);
        self.assign_idle_robots(&mut events);

        TickReport {
            events,
            robots: self.robots.iter().map(RobotSnapshot::from).collect(),
            queue_len: self.queue.len(),
            auto_generated: self.auto_generated,
        }
    }

    /// Mode-dependent arrival synthesis, step 1 of the tick.
    fn synthesize_traffic(&mut self, events: &mut Vec<String>) {
        let spawn_chance = match self.mode {
            TrafficMode::Manual => return,
            TrafficMode::Peak => self.config.traffic.peak_spawn_chance,
            TrafficMode::Event => self.config.traffic.event_spawn_chance,
        };
        if self.rng.random::<f64>() >= spawn_chance {
            return;
        }

        let mut class = VehicleClass::Normal;
        if self.mode == TrafficMode::Event
            && self.rng.random::<f64>() < self.config.traffic.event_vip_ratio
        {
            class = VehicleClass::Vip;
        }

        self.auto_generated += 1;
        let duration = (self.rng.random_range(1.0..=4.0_f64) * 10.0).round() / 10.0;
        let outcome = self.enqueue(class, duration);
        events.push(format!("Auto-Gen #{}: {outcome}", self.auto_generated));
    }

    /// Advance each robot exactly one FSM transition, step 2 of the tick.
    fn advance_robots(&mut self, now_ms: u64, events: &mut Vec<String>) {
        for robot in &mut self.robots {
            match robot.state {
                RobotState::EnRoute => {
                    robot.state = RobotState::Placing;
                    if let Some(slot_id) = robot.target_slot {
                        events.push(format!("Robot {} arriving at Slot {slot_id}...", robot.id));
                    }
                }
                RobotState::Placing => {
                    // Commit the held vehicle into its target slot, bill it,
                    // and drop the robot's references before returning.
                    if let (Some(vehicle), Some(slot_id)) =
                        (robot.vehicle.take(), robot.target_slot.take())
                    {
                        if let Some(slot) = self.slots.get_mut(&slot_id) {
                            slot.occupy(vehicle.class, now_ms, vehicle.duration_hours, true);
                        }
                        let cost = billing::upfront_cost(vehicle.class, vehicle.duration_hours);
                        let event = HistoryEvent {
                            at_ms: now_ms,
                            slot: slot_id,
                            class: vehicle.class,
                            action: HistoryAction::Entry,
                            duration_hours: Some(vehicle.duration_hours),
                            cost: Some(cost),
                        };
                        if let Some(sink) = self.sink.as_mut() {
                            sink.record(event.clone());
                        }
                        self.history.record(event);
                        tracing::info!(
                            robot = robot.id,
                            vehicle = vehicle.id,
                            slot = slot_id,
                            cost,
                            "robot parked vehicle"
                        );
                        events.push(format!(
                            "Robot {} parked Vehicle {} in Slot {slot_id}. Paid: ${cost:.2}",
                            robot.id, vehicle.id
                        ));
                    }
                    robot.state = RobotState::Returning;
                }
                RobotState::Returning => {
                    robot.state = RobotState::Idle;
                    events.push(format!("Robot {} returned to base.", robot.id));
                }
                RobotState::Idle => {}
            }
        }
    }

    /// Match queued vehicles to their designated robots, step 3 of the tick.
    ///
    /// Each vehicle is pinned to robot `(id − 1) mod fleet_size` and waits as
    /// long as that specific robot is busy, even when others are idle. A
    /// no-slot condition is reported only for the queue head to keep the
    /// event stream quiet.
    fn assign_idle_robots(&mut self, events: &mut Vec<String>) {
        let fleet = self.robots.len();
        let head = self.queue.head_id();
        let pending: Vec<(VehicleId, VehicleClass)> =
            self.queue.iter().map(|v| (v.id, v.class)).collect();

        for (vehicle_id, class) in pending {
            let idx = usize::try_from(vehicle_id - 1).unwrap_or(0) % fleet;
            if self.robots[idx].state != RobotState::Idle {
                continue;
            }

            match self.find_best_slot(class) {
                Some(slot_id) => {
                    let Some(mut vehicle) = self.queue.remove(vehicle_id) else {
                        continue;
                    };
                    vehicle.state = VehicleState::Assigned;

                    let robot = &mut self.robots[idx];
                    robot.state = RobotState::EnRoute;
                    robot.target_slot = Some(slot_id);
                    if let Some(slot) = self.slots.get_mut(&slot_id) {
                        slot.locked_by = Some(robot.id);
                    }
                    tracing::info!(
                        robot = robot.id,
                        vehicle = vehicle_id,
                        %class,
                        slot = slot_id,
                        "assignment"
                    );
                    events.push(format!(
                        "Robot {} picked up Vehicle {vehicle_id} ({class}) -> Slot {slot_id}",
                        robot.id
                    ));
                    robot.vehicle = Some(vehicle);
                }
                None if head == Some(vehicle_id) => {
                    tracing::debug!(vehicle = vehicle_id, %class, "no slot, head keeps waiting");
                    events.push(format!("No slot for Vehicle {vehicle_id}. Waiting..."));
                }
                None => {}
            }
        }
    }

    /// Availability forecast from current slot state and queue depth.
    #[must_use]
    pub fn forecast(&self, now_ms: u64) -> Forecast {
        forecast(&self.slots, self.queue.len(), now_ms)
    }

    /// Snapshot of every slot, keyed by id. Idempotent: identical between
    /// mutations.
    #[must_use]
    pub fn status(&self) -> BTreeMap<SlotId, Slot> {
        self.slots.clone()
    }

    /// Occupied slots whose reserved departure time has passed.
    #[must_use]
    pub fn expired_slots(&self, now_ms: u64) -> Vec<SlotId> {
        self.slots
            .values()
            .filter(|s| s.is_expired(now_ms))
            .map(|s| s.id)
            .collect()
    }

    /// Release every expired slot. Meant to be driven by an external poller;
    /// the engine keeps no timers of its own.
    pub fn sweep_expired(&mut self, now_ms: u64) -> Vec<Outcome> {
        let expired = self.expired_slots(now_ms);
        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "sweeping expired slots");
        }
        expired
            .into_iter()
            .map(|id| self.release(id, now_ms))
            .collect()
    }

    /// Occupied slots ending within `horizon_ms`, with their remaining time.
    /// Feeds the caller's expiry-warning notifications.
    #[must_use]
    pub fn expiring_within(&self, now_ms: u64, horizon_ms: u64) -> Vec<(SlotId, u64)> {
        self.slots
            .values()
            .filter_map(|s| s.remaining_ms(now_ms).map(|rem| (s.id, rem)))
            .filter(|(_, rem)| *rem <= horizon_ms)
            .collect()
    }

    /// Current admission queue depth.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Total synthetic arrivals generated so far.
    #[must_use]
    pub const fn auto_generated(&self) -> u64 {
        self.auto_generated
    }

    /// The lot's sequential placement history, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEvent> {
        self.history.events()
    }

    /// Robot states right now.
    #[must_use]
    pub fn robots(&self) -> Vec<RobotSnapshot> {
        self.robots.iter().map(RobotSnapshot::from).collect()
    }

    /// Record into the lot's own history and mirror to the external sink.
    fn record(&mut self, event: HistoryEvent) {
        if let Some(sink) = self.sink.as_mut() {
            sink.record(event.clone());
        }
        self.history.record(event);
    }
}

impl Default for ParkingLot {
    /// The canonical 12-slot lot with three robots.
    fn default() -> Self {
        Self::new(LotConfig::default()).unwrap_or_else(|_| {
            unreachable!("default configuration always validates")
        })
    }
}
