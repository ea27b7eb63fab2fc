//! Temperature rate estimation.
//!
//! Exponential smoothing of the per-part temperature derivative. Each part
//! keeps its own [`RateState`] keyed by [`EntityId`]; the first sample of a part
//! seeds the state and reports a zero rate.
//!
//! The raw derivative is taken over `2 * dt` rather than `dt`. This is a
//! calibration constant for the fixed update cadence and must stay as is.

use crate::types::EntityId;
use std::collections::HashMap;

/// Smoothing weight for the core temperature rate.
pub const CORE_SMOOTHING: f64 = 0.5;

/// Smoothing weight for the skin temperature rate (noisier, smoothed harder).
pub const SKIN_SMOOTHING: f64 = 0.1;

/// Multiplier applied to the time delta.
pub const SPAN_FACTOR: f64 = 2.0;

/// Smoothed rates for the two sides of a part, in degrees per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rates {
    /// Core temperature rate.
    pub core: f64,
    /// Skin temperature rate.
    pub skin: f64,
}

/// Per-part smoothing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateState {
    /// Last accepted core temperature.
    pub last_temperature_core: f64,
    /// Last accepted skin temperature.
    pub last_temperature_skin: f64,
    /// Time of the last accepted sample.
    pub last_timestamp: f64,
    /// Current smoothed core rate.
    pub rate_core: f64,
    /// Current smoothed skin rate.
    pub rate_skin: f64,
    /// Scan pass in which the part was last seen.
    seen_in_pass: u64,
}

impl RateState {
    fn seed(timestamp: f64, core: f64, skin: f64, pass: u64) -> Self {
        Self {
            last_temperature_core: core,
            last_temperature_skin: skin,
            last_timestamp: timestamp,
            rate_core: 0.0,
            rate_skin: 0.0,
            seen_in_pass: pass,
        }
    }

    fn rates(&self) -> Rates {
        Rates { core: self.rate_core, skin: self.rate_skin }
    }

    fn advance(&mut self, timestamp: f64, core: f64, skin: f64) {
        let span = SPAN_FACTOR * (timestamp - self.last_timestamp);
        if span.is_nan() || span <= 0.0 {
            return;
        }

        self.rate_core = smooth(self.rate_core, core - self.last_temperature_core, span, CORE_SMOOTHING);
        self.rate_skin = smooth(self.rate_skin, skin - self.last_temperature_skin, span, SKIN_SMOOTHING);
        self.last_temperature_core = core;
        self.last_temperature_skin = skin;
        self.last_timestamp = timestamp;
    }
}

#[inline]
fn smooth(previous: f64, delta: f64, span: f64, alpha: f64) -> f64 {
    (1.0 - alpha) * previous + alpha * delta / span
}

/// Stateful rate estimator keyed by part id.
#[derive(Debug, Clone, Default)]
pub struct RateEstimator {
    states: HashMap<EntityId, RateState>,
    pass: u64,
}

impl RateEstimator {
    /// Creates an empty estimator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one sample and returns the smoothed `(core, skin)` rates.
    ///
    /// Unseen ids are seeded and return zero. Samples whose timestamp does not
    /// move forward leave the state untouched and return the stored rates.
    pub fn update(&mut self, entity_id: EntityId, timestamp: f64, core: f64, skin: f64) -> Rates {
        let pass = self.pass;
        match self.states.get_mut(&entity_id) {
            Some(state) => {
                state.seen_in_pass = pass;
                state.advance(timestamp, core, skin);
                state.rates()
            }
            None => {
                self.states.insert(entity_id, RateState::seed(timestamp, core, skin, pass));
                Rates::default()
            }
        }
    }

    /// Current rates for a part, if it has been seen.
    #[must_use]
    pub fn rate(&self, entity_id: EntityId) -> Option<Rates> {
        self.states.get(&entity_id).map(RateState::rates)
    }

    /// Full state for a part, if it has been seen.
    #[must_use]
    pub fn state(&self, entity_id: EntityId) -> Option<&RateState> {
        self.states.get(&entity_id)
    }

    /// Drops the state of one part.
    pub fn forget(&mut self, entity_id: EntityId) -> bool {
        self.states.remove(&entity_id).is_some()
    }

    /// Drops all states.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Number of tracked parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when no part is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Starts a scan pass. Parts not updated before [`end_pass`](Self::end_pass)
    /// are dropped.
    pub fn begin_pass(&mut self) {
        self.pass = self.pass.wrapping_add(1);
    }

    /// Ends a scan pass, dropping parts that were not seen in it.
    ///
    /// Returns the number of dropped states.
    pub fn end_pass(&mut self) -> usize {
        let pass = self.pass;
        let before = self.states.len();
        self.states.retain(|_, state| state.seen_in_pass == pass);
        before - self.states.len()
    }
}
