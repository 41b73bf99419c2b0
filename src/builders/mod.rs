//! Builders to construct the engine from configuration.

pub mod lot_builder;

pub use lot_builder::LotBuilder;
