//! # Valet Lot
//!
//! An in-memory slot-allocation and discrete-event simulation engine for
//! automated parking facilities.
//!
//! The engine models a fixed pool of typed parking slots served by a small
//! fleet of valet robots. Vehicles either enter directly through the gate or
//! join a priority-ordered admission queue and are placed by the robots, one
//! four-state task cycle per placement. A forecasting module derives a
//! free-slot probability from the same state.
//!
//! ## Core pieces
//!
//! - **Placement policy**: exact class matching with mode-gated overflow
//!   (standard traffic may spill into VIP slots during peaks, VIP traffic
//!   into standard slots during events) and an emergency override that always
//!   wins.
//! - **Admission queue**: sorted by a dynamic priority combining class rank
//!   and per-class arrival order, so classes never starve each other and
//!   same-class arrivals stay FIFO.
//! - **Robot FSM**: `Idle → EnRoute → Placing → Returning → Idle`, one
//!   transition per simulation tick; each queued vehicle is pinned to one
//!   robot by its id.
//! - **Forecaster**: a pure probability estimate plus the four
//!   soonest-freeing slots.
//!
//! ## Quick start
//!
//! ```
//! use valet_lot::core::ParkingLot;
//! use valet_lot::util::types::VehicleClass;
//!
//! let mut lot = ParkingLot::default();
//! let outcome = lot.place(VehicleClass::Normal, 2.0, 0);
//! assert!(outcome.slot_id().is_some());
//! ```
//!
//! The engine is single-threaded by design: every operation is one atomic
//! mutation. Behind a concurrent request layer, wrap the lot in
//! [`runtime::SharedLot`], which serializes entry through one mutex.
//! Persistence, HTTP routing and account handling live outside; the engine
//! only reports structured [`core::Outcome`] values and mirrors placement
//! history into an attachable sink.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Builders to construct the engine from configuration.
pub mod builders;
/// Configuration models for the lot layout and traffic synthesis.
pub mod config;
/// Core engine: slots, vehicles, robots, queue, orchestrator.
pub mod core;
/// Runtime adapters and the concurrency boundary.
pub mod runtime;
/// Shared utilities.
pub mod util;
