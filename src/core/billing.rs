//! Upfront billing arithmetic.

use crate::util::types::VehicleClass;

/// Bill charged before entry for a requested stay, `rate × hours` rounded to
/// two decimals. Duration is assumed positive; the caller layer validates it.
#[must_use]
pub fn upfront_cost(class: VehicleClass, duration_hours: f64) -> f64 {
    let total = class.hourly_rate() * duration_hours;
    (total * 100.0).round() / 100.0
}
