//! Runtime adapters: the concurrency boundary external callers go through.

pub mod shared;

pub use shared::SharedLot;
