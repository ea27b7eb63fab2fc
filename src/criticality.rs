//! Criticality index.
//!
//! The index of a part is the worse of its two temperature/limit ratios.
//! A value of 1.0 means the critical side sits exactly at its limit.
//!
//! Limits must be positive. A zero or negative limit yields an infinite or NaN
//! index; [`evaluate`] passes that through and the scanner disqualifies it.

use crate::rate::Rates;
use crate::types::{CriticalityResult, ThermalSample};

/// Scores one sample, selecting temperature, limit and rate from the critical side.
///
/// Skin is critical only when its ratio is strictly greater than the core ratio.
#[must_use]
pub fn evaluate(sample: &ThermalSample, rates: Rates) -> CriticalityResult {
    let core_ratio = sample.core_temperature / sample.core_limit;
    let skin_ratio = sample.skin_temperature / sample.skin_limit;
    let is_skin_critical = core_ratio < skin_ratio;

    let (critical_temperature, critical_limit, critical_rate) = if is_skin_critical {
        (sample.skin_temperature, sample.skin_limit, rates.skin)
    } else {
        (sample.core_temperature, sample.core_limit, rates.core)
    };

    // f64::max would hide a NaN ratio behind the other side.
    let index = if core_ratio.is_nan() || skin_ratio.is_nan() {
        f64::NAN
    } else {
        core_ratio.max(skin_ratio)
    };

    CriticalityResult {
        entity_id: sample.entity_id,
        index,
        is_skin_critical,
        critical_temperature,
        critical_limit,
        critical_rate,
    }
}
