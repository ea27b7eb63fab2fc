//! Hysteresis-gated gauge visibility.
//!
//! The gauge shows once the critical index rises strictly above the show
//! threshold and hides once it falls strictly below the hide threshold. Between
//! the two thresholds the state is held.

use crate::types::CriticalityResult;

/// Show threshold used when none (or an out-of-range one) is configured.
pub const DEFAULT_SHOW_THRESHOLD: f64 = 0.5;

/// Hide threshold used when none (or an out-of-range one) is configured.
pub const DEFAULT_HIDE_THRESHOLD: f64 = 0.4;

fn in_unit_interval(value: f64) -> bool {
    value > 0.0 && value < 1.0
}

/// Show/hide thresholds with write-time validation.
///
/// Invariant: `0 < hide <= show < 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    show: f64,
    hide: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { show: DEFAULT_SHOW_THRESHOLD, hide: DEFAULT_HIDE_THRESHOLD }
    }
}

impl Thresholds {
    /// Builds thresholds by setting `show` first and `hide` second.
    #[must_use]
    pub fn new(show: f64, hide: f64) -> Self {
        let mut thresholds = Self::default();
        thresholds.set_show(show);
        thresholds.set_hide(hide);
        thresholds
    }

    /// Threshold above which the gauge appears.
    #[must_use]
    pub fn show(&self) -> f64 {
        self.show
    }

    /// Threshold below which the gauge disappears.
    #[must_use]
    pub fn hide(&self) -> f64 {
        self.hide
    }

    /// Sets the show threshold; values outside `(0, 1)` fall back to the default.
    ///
    /// The hide threshold is lowered if it would exceed the new value.
    pub fn set_show(&mut self, value: f64) {
        self.show = if in_unit_interval(value) {
            value
        } else {
            crate::warn!("thresholds", "show threshold {value} out of range, using {DEFAULT_SHOW_THRESHOLD}");
            DEFAULT_SHOW_THRESHOLD
        };
        self.hide = self.hide.min(self.show);
    }

    /// Sets the hide threshold; values outside `(0, 1)` fall back to the
    /// default, and the result is capped at the show threshold.
    pub fn set_hide(&mut self, value: f64) {
        let value = if in_unit_interval(value) {
            value
        } else {
            crate::warn!("thresholds", "hide threshold {value} out of range, using {DEFAULT_HIDE_THRESHOLD}");
            DEFAULT_HIDE_THRESHOLD
        };
        self.hide = value.min(self.show);
    }
}

/// A change of visibility produced by one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Visibility unchanged.
    None,
    /// The gauge just became visible.
    Shown,
    /// The gauge just became hidden.
    Hidden,
}

/// Two-state visibility machine, initially hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityGate {
    visible: bool,
}

impl VisibilityGate {
    /// Creates a hidden gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the gauge is currently visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Forces the gate back to hidden without reporting a transition.
    pub fn reset(&mut self) {
        self.visible = false;
    }

    /// Consumes this tick's selection and returns the resulting transition.
    pub fn update(
        &mut self,
        current: Option<&CriticalityResult>,
        thresholds: &Thresholds,
        force_visible: bool,
    ) -> Transition {
        if self.visible {
            let should_hide = match current {
                None => true,
                Some(result) => result.index < thresholds.hide() && !force_visible,
            };
            if should_hide {
                self.visible = false;
                return Transition::Hidden;
            }
        } else if let Some(result) = current {
            if result.index > thresholds.show() || force_visible {
                self.visible = true;
                return Transition::Shown;
            }
        }
        Transition::None
    }
}
