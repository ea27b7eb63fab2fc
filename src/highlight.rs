//! Flashing highlight of the critical part.
//!
//! While a part is highlighted its color cycles through [`PALETTE`], advancing
//! one step each time more than `flash_period * warp_rate` simulation seconds
//! have passed since the last change. Scaling by the warp rate keeps the
//! flashing speed constant on screen under time acceleration.
//!
//! The highlight uses the same two thresholds as the visibility gate but keeps
//! its own "already active" flag, so in the band between the thresholds the
//! two may disagree.

use crate::types::{CriticalityResult, EntityId};
use crate::visibility::Thresholds;

/// Default time between color changes, in simulation seconds at 1x warp.
pub const DEFAULT_FLASH_PERIOD: f64 = 0.166;

/// Highlight colors, in cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightColor {
    /// Yellow.
    Yellow,
    /// Red.
    Red,
    /// Blue.
    Blue,
}

impl HighlightColor {
    /// 8-bit RGB components.
    #[must_use]
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Self::Yellow => [255, 235, 4],
            Self::Red => [255, 0, 0],
            Self::Blue => [0, 0, 255],
        }
    }

    /// Lower-case color name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

/// Cycling order of highlight colors.
pub const PALETTE: [HighlightColor; 3] =
    [HighlightColor::Yellow, HighlightColor::Red, HighlightColor::Blue];

/// What the host must do to part highlights after one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightUpdate {
    /// Part to highlight this tick, with its color.
    pub highlight: Option<(EntityId, HighlightColor)>,
    /// Previously highlighted part whose highlight must be reset.
    pub cleared: Option<EntityId>,
}

/// Stateful color cycler for the highlighted part.
#[derive(Debug, Clone)]
pub struct HighlightCycler {
    flash_period: f64,
    color_index: usize,
    last_change: f64,
    current: Option<EntityId>,
    pending_clear: Option<EntityId>,
}

impl Default for HighlightCycler {
    fn default() -> Self {
        Self::new(DEFAULT_FLASH_PERIOD)
    }
}

impl HighlightCycler {
    /// Creates a cycler with the given flash period (non-positive or
    /// non-finite periods fall back to [`DEFAULT_FLASH_PERIOD`]).
    #[must_use]
    pub fn new(flash_period: f64) -> Self {
        Self {
            flash_period: valid_period(flash_period),
            color_index: 0,
            last_change: 0.0,
            current: None,
            pending_clear: None,
        }
    }

    /// Configured flash period.
    #[must_use]
    pub fn flash_period(&self) -> f64 {
        self.flash_period
    }

    /// Changes the flash period, keeping the highlighted part and color phase.
    pub fn set_flash_period(&mut self, flash_period: f64) {
        self.flash_period = valid_period(flash_period);
    }

    /// Drops the highlight without forgetting it: the next tick reports the
    /// released part as cleared unless it is highlighted again.
    pub fn release(&mut self) {
        if let Some(id) = self.current.take() {
            self.pending_clear = Some(id);
        }
    }

    /// Currently highlighted part.
    #[must_use]
    pub fn selected(&self) -> Option<EntityId> {
        self.current
    }

    /// Whether a part was highlighted on the last tick.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Color the highlighted part will get on the next tick.
    #[must_use]
    pub fn current_color(&self) -> HighlightColor {
        PALETTE[self.color_index]
    }

    /// Decides this tick's highlight.
    ///
    /// A part is highlighted when `enabled`, a selection exists, and its index
    /// is above the show threshold, or above the hide threshold while a
    /// highlight is already active.
    pub fn tick(
        &mut self,
        selection: Option<&CriticalityResult>,
        now: f64,
        warp_rate: f64,
        enabled: bool,
        thresholds: &Thresholds,
    ) -> HighlightUpdate {
        let active = self.is_active();
        let target = selection
            .filter(|result| {
                enabled
                    && ((active && result.index > thresholds.hide())
                        || result.index > thresholds.show())
            })
            .map(|result| result.entity_id);

        let mut update = HighlightUpdate::default();
        if let Some(released) = self.pending_clear.take() {
            if target != Some(released) {
                update.cleared = Some(released);
            }
        }
        if target != self.current {
            if self.current.is_some() {
                update.cleared = self.current;
            }
            if let Some(id) = target {
                crate::info!("highlight", "highlighting part {id}");
            }
            self.current = target;
        }

        if let Some(id) = target {
            update.highlight = Some((id, self.current_color()));
            self.advance(now, warp_rate);
        }
        update
    }

    fn advance(&mut self, now: f64, warp_rate: f64) {
        let warp = if warp_rate.is_finite() && warp_rate > 0.0 { warp_rate } else { 1.0 };
        if now - self.last_change > self.flash_period * warp {
            self.color_index = (self.color_index + 1) % PALETTE.len();
            self.last_change = now;
        }
    }
}

fn valid_period(flash_period: f64) -> f64 {
    if flash_period.is_finite() && flash_period > 0.0 {
        flash_period
    } else {
        DEFAULT_FLASH_PERIOD
    }
}
