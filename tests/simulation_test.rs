//! Integration tests for the tick loop: robot FSM cycling, id-pinned
//! assignment, queue ordering under the simulation, traffic synthesis and
//! expiry sweeps.

use valet_lot::builders::LotBuilder;
use valet_lot::config::{LotConfig, SlotSpec, TrafficConfig};
use valet_lot::core::{ParkingLot, RobotState};
use valet_lot::util::types::{SlotClass, TrafficMode, VehicleClass};

const NOON: u64 = 12 * 3_600_000;
const HOUR_MS: u64 = 3_600_000;

fn lot_with_robots(robots: usize) -> ParkingLot {
    let cfg = LotConfig {
        robots,
        ..LotConfig::default()
    };
    ParkingLot::new(cfg).unwrap()
}

#[test]
fn robot_cycles_through_all_four_states() {
    let mut lot = lot_with_robots(1);
    lot.enqueue(VehicleClass::Normal, 2.0);

    // Tick 1: assignment picks the vehicle up.
    let report = lot.tick(NOON);
    assert_eq!(report.robots[0].state, RobotState::EnRoute);
    assert_eq!(report.robots[0].vehicle, Some(VehicleClass::Normal));
    assert_eq!(report.queue_len, 0);

    // The target slot is locked while the robot is en route.
    let status = lot.status();
    let locked: Vec<_> = status.values().filter(|s| s.locked_by.is_some()).collect();
    assert_eq!(locked.len(), 1);
    assert!(locked[0].occupant.is_none());

    // Tick 2: arrival.
    assert_eq!(lot.tick(NOON).robots[0].state, RobotState::Placing);

    // Tick 3: commit. The slot is occupied, unlocked, marked auto-placed,
    // and the robot has dropped its references.
    let report = lot.tick(NOON);
    assert_eq!(report.robots[0].state, RobotState::Returning);
    assert_eq!(report.robots[0].vehicle, None);
    let status = lot.status();
    let slot = &status[&7];
    assert_eq!(slot.occupant, Some(VehicleClass::Normal));
    assert_eq!(slot.locked_by, None);
    assert!(slot.auto_placed);
    assert_eq!(slot.ends_at_ms, Some(NOON + 2 * HOUR_MS));

    // Tick 4: home again.
    assert_eq!(lot.tick(NOON).robots[0].state, RobotState::Idle);
}

#[test]
fn robot_placement_is_billed_into_the_history() {
    let mut lot = lot_with_robots(1);
    lot.enqueue(VehicleClass::Vip, 2.0);
    for _ in 0..3 {
        lot.tick(NOON);
    }
    let history = lot.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].cost, Some(40.0));
    assert_eq!(history[0].class, VehicleClass::Vip);
}

#[test]
fn single_robot_serves_one_vehicle_per_cycle() {
    let mut lot = lot_with_robots(1);
    lot.enqueue(VehicleClass::Normal, 1.0);
    lot.enqueue(VehicleClass::Normal, 1.0);
    lot.enqueue(VehicleClass::Normal, 1.0);

    // With one robot every vehicle maps to it; only one can start per cycle.
    assert_eq!(lot.tick(NOON).queue_len, 2);
    assert_eq!(lot.tick(NOON).queue_len, 2); // robot placing
    assert_eq!(lot.tick(NOON).queue_len, 2); // robot returning
    assert_eq!(lot.tick(NOON).queue_len, 1); // idle again, next pickup
}

#[test]
fn assignment_is_deterministic_by_vehicle_id() {
    let mut lot = lot_with_robots(3);
    lot.enqueue(VehicleClass::Normal, 1.0); // id 1 -> robot 1
    lot.enqueue(VehicleClass::Normal, 1.0); // id 2 -> robot 2
    lot.enqueue(VehicleClass::Normal, 1.0); // id 3 -> robot 3

    let report = lot.tick(NOON);
    assert_eq!(report.queue_len, 0);
    assert!(report
        .robots
        .iter()
        .all(|r| r.state == RobotState::EnRoute));
    let pickups: Vec<_> = report
        .events
        .iter()
        .filter(|e| e.contains("picked up"))
        .cloned()
        .collect();
    assert!(pickups[0].contains("Robot 1 picked up Vehicle 1"));
    assert!(pickups[1].contains("Robot 2 picked up Vehicle 2"));
    assert!(pickups[2].contains("Robot 3 picked up Vehicle 3"));
}

#[test]
fn vehicle_waits_for_its_pinned_robot_even_when_others_are_idle() {
    let mut lot = lot_with_robots(3);
    lot.enqueue(VehicleClass::Normal, 1.0); // id 1 -> robot 1
    lot.tick(NOON); // robot 1 en route

    lot.enqueue(VehicleClass::Normal, 1.0); // id 2 -> robot 2
    lot.enqueue(VehicleClass::Normal, 1.0); // id 3, cancelled below
    lot.undo_last_queued();
    lot.enqueue(VehicleClass::Normal, 1.0); // id 4 -> robot 1 (busy)

    let report = lot.tick(NOON);
    // Vehicle 2 went out with robot 2; vehicle 4 stays pinned to the busy
    // robot 1 although robot 3 is idle the whole time.
    assert_eq!(report.queue_len, 1);
    assert_eq!(report.robots[2].state, RobotState::Idle);
}

#[test]
fn emergency_vehicles_are_served_before_earlier_arrivals() {
    let mut lot = lot_with_robots(3);
    lot.enqueue(VehicleClass::Normal, 1.0); // id 1 -> robot 1
    lot.enqueue(VehicleClass::Ambulance, 1.0); // id 2 -> robot 2, but queue head

    let report = lot.tick(NOON);
    let pickups: Vec<_> = report
        .events
        .iter()
        .filter(|e| e.contains("picked up"))
        .cloned()
        .collect();
    // Queue order puts the ambulance first; it lands in the emergency slot.
    assert!(pickups[0].contains("Vehicle 2 (AMBULANCE) -> Slot 12"));
    assert!(pickups[1].contains("Vehicle 1 (NORMAL)"));
}

#[test]
fn only_the_queue_head_reports_a_missing_slot() {
    // A lot with a single, pre-occupied standard slot: nobody can be placed.
    let cfg = LotConfig {
        slots: vec![SlotSpec {
            class: SlotClass::Normal,
            label: "Standard".into(),
        }],
        robots: 3,
        history_capacity: 16,
        traffic: TrafficConfig::default(),
    };
    let mut lot = ParkingLot::new(cfg).unwrap();
    lot.place(VehicleClass::Normal, 4.0, NOON);
    lot.enqueue(VehicleClass::Normal, 1.0);
    lot.enqueue(VehicleClass::Normal, 1.0);

    let report = lot.tick(NOON);
    let waiting: Vec<_> = report
        .events
        .iter()
        .filter(|e| e.contains("No slot"))
        .collect();
    assert_eq!(waiting.len(), 1);
    assert_eq!(report.queue_len, 2);

    // Unmatched vehicles are retried naturally on the next tick.
    let report = lot.tick(NOON);
    assert_eq!(report.queue_len, 2);
}

#[test]
fn manual_mode_never_synthesizes_traffic() {
    let mut lot = ParkingLot::default().with_rng_seed(7);
    for _ in 0..50 {
        lot.tick(NOON);
    }
    assert_eq!(lot.auto_generated(), 0);
    assert_eq!(lot.queue_len(), 0);
}

#[test]
fn peak_mode_spawns_standard_vehicles() {
    let cfg = LotConfig {
        traffic: TrafficConfig {
            peak_spawn_chance: 1.0,
            ..TrafficConfig::default()
        },
        ..LotConfig::default()
    };
    let mut lot = LotBuilder::new(cfg).with_seed(7).build().unwrap();
    lot.set_mode(TrafficMode::Peak);

    let report = lot.tick(NOON);
    assert_eq!(report.auto_generated, 1);
    // Spawned at the top of the tick and assigned in the same cycle.
    assert_eq!(report.robots[0].vehicle, Some(VehicleClass::Normal));
    assert!(report.events.iter().any(|e| e.contains("Auto-Gen #1")));
}

#[test]
fn event_mode_spawns_vip_vehicles_at_full_ratio() {
    let cfg = LotConfig {
        traffic: TrafficConfig {
            event_spawn_chance: 1.0,
            event_vip_ratio: 1.0,
            ..TrafficConfig::default()
        },
        ..LotConfig::default()
    };
    let mut lot = LotBuilder::new(cfg).with_seed(7).build().unwrap();
    lot.set_mode(TrafficMode::Event);

    let report = lot.tick(NOON);
    assert_eq!(report.auto_generated, 1);
    assert_eq!(report.robots[0].vehicle, Some(VehicleClass::Vip));
}

#[test]
fn sweep_expired_frees_past_due_slots() {
    let mut lot = ParkingLot::default();
    let short = lot.place(VehicleClass::Normal, 1.0, NOON).slot_id().unwrap();
    let long = lot.place(VehicleClass::Normal, 3.0, NOON).slot_id().unwrap();

    assert!(lot.expired_slots(NOON + HOUR_MS - 1).is_empty());

    let outcomes = lot.sweep_expired(NOON + HOUR_MS);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].slot_id(), Some(short));

    let status = lot.status();
    assert!(status[&short].is_available());
    assert!(status[&long].is_occupied());
}

#[test]
fn expiring_within_reports_the_warning_horizon() {
    let mut lot = ParkingLot::default();
    let soon = lot.place(VehicleClass::Normal, 1.0, NOON).slot_id().unwrap();
    lot.place(VehicleClass::Normal, 3.0, NOON);

    let warnings = lot.expiring_within(NOON + HOUR_MS / 2, HOUR_MS);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].0, soon);
    assert_eq!(warnings[0].1, HOUR_MS / 2);
}
