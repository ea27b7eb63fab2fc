//! Core types for the gauge.
//!
//! - [`EntityId`]: stable identifier of a monitored part
//! - [`PartSnapshot`]: what the host hands in for one part on one tick
//! - [`ThermalSample`]: the immutable thermal measurement extracted from a snapshot
//! - [`CriticalityResult`]: the scored, side-selected view of a sample
//! - [`PartSource`]: trait for hosts that produce snapshots on demand

use crate::error::{GaugeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a part, unique for the part's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// One part as seen by the host on one tick.
///
/// `name` is the internal part name, `title` the human-readable one, and
/// `modules` the category labels (module names) attached to the part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSnapshot {
    /// Part identifier.
    pub id: EntityId,
    /// Internal part name.
    #[serde(default)]
    pub name: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Category labels (module names).
    #[serde(default)]
    pub modules: Vec<String>,
    /// Core (internal) temperature.
    pub core_temperature: f64,
    /// Core temperature limit.
    pub core_limit: f64,
    /// Skin (surface) temperature.
    pub skin_temperature: f64,
    /// Skin temperature limit.
    pub skin_limit: f64,
    /// Simulation time of the measurement, in seconds.
    pub timestamp: f64,
}

impl PartSnapshot {
    /// Creates a snapshot with empty name/title/modules.
    #[must_use]
    pub fn new(
        id: EntityId,
        timestamp: f64,
        (core_temperature, core_limit): (f64, f64),
        (skin_temperature, skin_limit): (f64, f64),
    ) -> Self {
        Self {
            id,
            name: String::new(),
            title: String::new(),
            modules: Vec::new(),
            core_temperature,
            core_limit,
            skin_temperature,
            skin_limit,
            timestamp,
        }
    }

    /// Sets the part name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the part title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds a module (category label).
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    /// Title to display, falling back to the name when the title is empty.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }

    /// Extracts the thermal measurement.
    #[must_use]
    pub fn sample(&self) -> ThermalSample {
        ThermalSample {
            entity_id: self.id,
            timestamp: self.timestamp,
            core_temperature: self.core_temperature,
            core_limit: self.core_limit,
            skin_temperature: self.skin_temperature,
            skin_limit: self.skin_limit,
        }
    }
}

/// A single part's measured temperatures and limits at a timestamp.
///
/// Limits are expected to be positive; this is not checked here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalSample {
    /// Part identifier.
    pub entity_id: EntityId,
    /// Simulation time in seconds.
    pub timestamp: f64,
    /// Core temperature.
    pub core_temperature: f64,
    /// Core temperature limit.
    pub core_limit: f64,
    /// Skin temperature.
    pub skin_temperature: f64,
    /// Skin temperature limit.
    pub skin_limit: f64,
}

/// Which measured side of a part is the critical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThermalSide {
    /// Internal temperature.
    Core,
    /// Surface temperature.
    Skin,
}

impl ThermalSide {
    /// Lower-case label used in the readout.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Skin => "skin",
        }
    }
}

/// Criticality of one part on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalityResult {
    /// Part identifier.
    pub entity_id: EntityId,
    /// Worse of the two temperature/limit ratios; 1.0 means "at limit".
    pub index: f64,
    /// True when the skin ratio is strictly greater than the core ratio.
    pub is_skin_critical: bool,
    /// Temperature of the critical side.
    pub critical_temperature: f64,
    /// Limit of the critical side.
    pub critical_limit: f64,
    /// Smoothed rate of change of the critical side, in degrees per second.
    pub critical_rate: f64,
}

impl CriticalityResult {
    /// The critical side as an enum.
    #[must_use]
    pub fn side(&self) -> ThermalSide {
        if self.is_skin_critical {
            ThermalSide::Skin
        } else {
            ThermalSide::Core
        }
    }

    /// Index clamped to `[0, 1]`, for filling a gauge bar.
    #[must_use]
    pub fn gauge_fill(&self) -> f64 {
        if self.index.is_nan() {
            0.0
        } else {
            self.index.clamp(0.0, 1.0)
        }
    }

    /// False when the index is NaN or infinite (non-positive limits).
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.index.is_finite()
    }
}

/// Trait for hosts that produce part snapshots.
///
/// This is the seam between the gauge and whatever simulation owns the parts.
pub trait PartSource {
    /// Returns the unique identifier for this source.
    fn id(&self) -> &'static str;

    /// Returns the current parts, in a deterministic order.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot produce a snapshot (no active vessel).
    fn snapshot(&mut self) -> Result<Vec<PartSnapshot>>;

    /// Returns true if the source can currently produce snapshots.
    fn is_available(&self) -> bool {
        true
    }
}

/// In-memory source replaying a fixed list of parts.
#[derive(Debug, Clone)]
pub struct StaticSource {
    parts: Vec<PartSnapshot>,
    available: bool,
}

impl StaticSource {
    /// Creates an available source holding `parts`.
    #[must_use]
    pub fn new(parts: Vec<PartSnapshot>) -> Self {
        Self { parts, available: true }
    }

    /// Creates a source that reports itself unavailable.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { parts: Vec::new(), available: false }
    }

    /// Replaces the parts returned by the next snapshot.
    pub fn set_parts(&mut self, parts: Vec<PartSnapshot>) {
        self.parts = parts;
    }
}

impl PartSource for StaticSource {
    fn id(&self) -> &'static str {
        "static"
    }

    fn snapshot(&mut self) -> Result<Vec<PartSnapshot>> {
        if !self.available {
            return Err(GaugeError::SourceUnavailable(self.id()));
        }
        Ok(self.parts.clone())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(index: f64, is_skin_critical: bool) -> CriticalityResult {
        CriticalityResult {
            entity_id: EntityId(1),
            index,
            is_skin_critical,
            critical_temperature: 0.0,
            critical_limit: 1.0,
            critical_rate: 0.0,
        }
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(42).to_string(), "#42");
        assert_eq!(EntityId::from(7), EntityId(7));
    }

    #[test]
    fn test_snapshot_sample_copies_measurements() {
        let part = PartSnapshot::new(EntityId(3), 12.5, (500.0, 1000.0), (200.0, 1200.0));
        let sample = part.sample();

        assert_eq!(sample.entity_id, EntityId(3));
        assert_eq!(sample.timestamp, 12.5);
        assert_eq!(sample.core_temperature, 500.0);
        assert_eq!(sample.core_limit, 1000.0);
        assert_eq!(sample.skin_temperature, 200.0);
        assert_eq!(sample.skin_limit, 1200.0);
    }

    #[test]
    fn test_display_title_falls_back_to_name() {
        let part = PartSnapshot::new(EntityId(1), 0.0, (1.0, 2.0), (1.0, 2.0)).with_name("mk1pod");
        assert_eq!(part.display_title(), "mk1pod");

        let part = part.with_title("Mk1 Command Pod");
        assert_eq!(part.display_title(), "Mk1 Command Pod");
    }

    #[test]
    fn test_side_and_label() {
        assert_eq!(result(0.5, false).side(), ThermalSide::Core);
        assert_eq!(result(0.5, true).side(), ThermalSide::Skin);
        assert_eq!(ThermalSide::Skin.label(), "skin");
    }

    #[test]
    fn test_gauge_fill_clamps() {
        assert_eq!(result(0.25, false).gauge_fill(), 0.25);
        assert_eq!(result(1.7, false).gauge_fill(), 1.0);
        assert_eq!(result(f64::NAN, false).gauge_fill(), 0.0);
        assert_eq!(result(f64::INFINITY, false).gauge_fill(), 1.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(result(0.9, false).is_finite());
        assert!(!result(f64::NAN, false).is_finite());
        assert!(!result(f64::INFINITY, true).is_finite());
    }

    #[test]
    fn test_static_source() {
        let part = PartSnapshot::new(EntityId(1), 0.0, (1.0, 2.0), (1.0, 2.0));
        let mut source = StaticSource::new(vec![part.clone()]);

        assert!(source.is_available());
        assert_eq!(source.snapshot().unwrap(), vec![part]);

        let mut missing = StaticSource::unavailable();
        assert!(!missing.is_available());
        assert!(matches!(missing.snapshot(), Err(GaugeError::SourceUnavailable("static"))));
    }

    #[test]
    fn test_snapshot_deserializes_with_defaults() {
        let yaml = r#"
id: 9
core_temperature: 300.0
core_limit: 1000.0
skin_temperature: 290.0
skin_limit: 2000.0
timestamp: 1.0
"#;
        let part: PartSnapshot = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(part.id, EntityId(9));
        assert!(part.name.is_empty());
        assert!(part.modules.is_empty());
    }
}
