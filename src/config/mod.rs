//! Configuration models for the lot layout and traffic synthesis.

pub mod lot;

pub use lot::{LotConfig, SlotSpec, TrafficConfig};
