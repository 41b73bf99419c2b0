//! Builder to construct a lot from configuration.

use crate::config::LotConfig;
use crate::core::audit::HistorySink;
use crate::core::error::EngineError;
use crate::core::pool::ParkingLot;

/// Assemble a [`ParkingLot`] from configuration, an optional RNG seed and an
/// optional external history sink.
///
/// ```
/// use valet_lot::builders::LotBuilder;
/// use valet_lot::config::LotConfig;
///
/// let lot = LotBuilder::new(LotConfig::default())
///     .with_seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(lot.status().len(), 12);
/// ```
pub struct LotBuilder {
    config: LotConfig,
    seed: Option<u64>,
    sink: Option<Box<dyn HistorySink>>,
}

impl LotBuilder {
    /// Start from a configuration.
    #[must_use]
    pub const fn new(config: LotConfig) -> Self {
        Self {
            config,
            seed: None,
            sink: None,
        }
    }

    /// Seed the traffic RNG for deterministic simulation runs.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Mirror every placement event into an external sink.
    #[must_use]
    pub fn with_history_sink(mut self, sink: Box<dyn HistorySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate the configuration and build the lot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when validation fails.
    pub fn build(self) -> Result<ParkingLot, EngineError> {
        let mut lot = ParkingLot::new(self.config)?;
        if let Some(seed) = self.seed {
            lot = lot.with_rng_seed(seed);
        }
        if let Some(sink) = self.sink {
            lot = lot.with_history_sink(sink);
        }
        Ok(lot)
    }
}
