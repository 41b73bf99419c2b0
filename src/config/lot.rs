//! Lot layout and traffic configuration structures.

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::util::types::SlotClass;

/// One slot to create at lot construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSpec {
    /// Fixed class of the slot.
    pub class: SlotClass,
    /// Descriptive label shown in status views.
    pub label: String,
}

impl SlotSpec {
    fn new(class: SlotClass, label: &str) -> Self {
        Self {
            class,
            label: label.into(),
        }
    }
}

/// Synthetic arrival tuning for the non-manual traffic modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficConfig {
    /// Per-tick spawn chance in PEAK mode.
    pub peak_spawn_chance: f64,
    /// Per-tick spawn chance in EVENT mode.
    pub event_spawn_chance: f64,
    /// Share of EVENT spawns that are VIP vehicles.
    pub event_vip_ratio: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            peak_spawn_chance: 0.2,
            event_spawn_chance: 0.15,
            event_vip_ratio: 0.7,
        }
    }
}

/// Lot configuration: slot layout, robot fleet, history depth, traffic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotConfig {
    /// Slots to create, assigned ids 1..=N in order.
    pub slots: Vec<SlotSpec>,
    /// Number of valet robots.
    pub robots: usize,
    /// Bound of the in-memory placement history.
    pub history_capacity: usize,
    /// Synthetic traffic tuning.
    pub traffic: TrafficConfig,
}

impl Default for LotConfig {
    /// The canonical 12-slot lot: two VIP, two EV charging, two senior,
    /// five standard, one emergency slot by the exit ramp; three robots.
    fn default() -> Self {
        Self {
            slots: vec![
                SlotSpec::new(SlotClass::Vip, "Near Entrance"),
                SlotSpec::new(SlotClass::Vip, "Near Entrance"),
                SlotSpec::new(SlotClass::Ev, "Charging Station"),
                SlotSpec::new(SlotClass::Ev, "Charging Station"),
                SlotSpec::new(SlotClass::Senior, "Wide Space"),
                SlotSpec::new(SlotClass::Senior, "Wide Space"),
                SlotSpec::new(SlotClass::Normal, "Standard"),
                SlotSpec::new(SlotClass::Normal, "Standard"),
                SlotSpec::new(SlotClass::Normal, "Standard"),
                SlotSpec::new(SlotClass::Normal, "Standard"),
                SlotSpec::new(SlotClass::Normal, "Standard"),
                SlotSpec::new(SlotClass::Emergency, "Exit Ramp"),
            ],
            robots: 3,
            history_capacity: 1024,
            traffic: TrafficConfig::default(),
        }
    }
}

impl LotConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.slots.is_empty() {
            return Err("at least one slot must be defined".into());
        }
        if self.robots == 0 {
            return Err("robots must be greater than 0".into());
        }
        if self.history_capacity == 0 {
            return Err("history_capacity must be greater than 0".into());
        }
        for (name, p) in [
            ("peak_spawn_chance", self.traffic.peak_spawn_chance),
            ("event_spawn_chance", self.traffic.event_spawn_chance),
            ("event_vip_ratio", self.traffic.event_vip_ratio),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} must be within [0, 1]"));
            }
        }
        Ok(())
    }

    /// Parse a lot configuration from a JSON string and validate it.
    pub fn from_json_str(input: &str) -> Result<Self, EngineError> {
        let cfg: Self =
            serde_json::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        cfg.validate().map_err(EngineError::InvalidConfig)?;
        Ok(cfg)
    }
}
