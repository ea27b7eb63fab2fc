//! # Critical Temperature Gauge
//!
//! Finds the most thermally critical part of a vehicle each simulation tick
//! and decides whether a temperature gauge should be shown and which part
//! should flash.
//!
//! ## Features
//!
//! - **Rate estimation**: per-part exponentially smoothed temperature rates
//! - **Criticality**: `max(core / limit, skin / limit)` with side detection
//! - **Hysteresis**: separate show and hide thresholds so the gauge does not flicker
//! - **Highlight**: warp-aware color cycling of the critical part
//! - **Exclusion**: ignore parts by name, title, or module
//!
//! ## Quick Start
//!
//! ```rust
//! use critical_temp_gauge::prelude::*;
//!
//! let mut gauge = ThermalGauge::new(GaugeSettings::default());
//! let parts = vec![
//!     PartSnapshot::new(EntityId(1), 0.0, (600.0, 1000.0), (300.0, 2000.0)).with_title("Pod"),
//! ];
//!
//! let out = gauge.tick(&parts, 0.0, 1.0);
//! assert!(out.visible);
//! assert_eq!(out.title.as_deref(), Some("Pod"));
//! ```
//!
//! ## Threading
//!
//! The gauge is driven by one tick call at a time. [`ThermalGauge`] is `Send`;
//! hosts ticking from several threads put the whole gauge behind a `Mutex`.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

// ============================================================================
// Core Modules
// ============================================================================

/// Shared data types and the part source trait.
pub mod types;

/// Exponentially smoothed temperature rates.
pub mod rate;

/// Criticality index of a single part.
pub mod criticality;

/// Exclusion of parts by name and module.
pub mod exclusion;

/// Selection of the most critical part.
pub mod scanner;

/// Show/hide hysteresis.
pub mod visibility;

/// Flashing highlight.
pub mod highlight;

// ============================================================================
// Host Surface
// ============================================================================

/// Readout formatting.
pub mod display;

/// Tick entry point.
pub mod gauge;

/// YAML configuration.
pub mod config;

/// Error types.
pub mod error;

/// Debug logging.
pub mod debug;

// ============================================================================
// Prelude
// ============================================================================

/// Convenience re-exports for common usage.
///
/// ```rust
/// use critical_temp_gauge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::display::{DisplayConfig, PartMenuConfig, PartReadout, Readout};
    pub use crate::error::{GaugeError, Result};
    pub use crate::exclusion::ExclusionConfig;
    pub use crate::gauge::{GaugeSettings, ThermalGauge, TickOutput};
    pub use crate::highlight::{HighlightColor, HighlightUpdate};
    pub use crate::types::{
        CriticalityResult, EntityId, PartSnapshot, PartSource, StaticSource, ThermalSide,
    };
    pub use crate::visibility::{Thresholds, Transition};
}

pub use error::{GaugeError, Result};
pub use gauge::{GaugeSettings, ThermalGauge, TickOutput};
