//! Core engine: slots, vehicles, robots, the admission queue and the lot
//! orchestrator.

pub mod audit;
pub mod billing;
pub mod error;
pub mod forecast;
pub mod outcome;
pub mod pool;
pub mod queue;
pub mod robot;
pub mod slot;
pub mod vehicle;

pub use audit::{HistoryAction, HistoryEvent, HistorySink, InMemoryHistory};
pub use billing::upfront_cost;
pub use error::{AppResult, EngineError};
pub use forecast::{forecast, Forecast, UpcomingSlot};
pub use outcome::Outcome;
pub use pool::{ParkingLot, TickReport};
pub use queue::AdmissionQueue;
pub use robot::{Robot, RobotSnapshot, RobotState};
pub use slot::Slot;
pub use vehicle::{Vehicle, VehicleState};
