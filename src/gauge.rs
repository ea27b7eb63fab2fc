//! Tick entry point.
//!
//! [`ThermalGauge`] wires the pieces together: scan the fleet, update the
//! visibility gate, cycle the highlight. The result of each tick is returned
//! as a [`TickOutput`] value; nothing is kept in process-wide state, so hosts
//! pass the output to whichever consumer needs it.
//!
//! The gauge is `Send` but not internally synchronized. A host that ticks it
//! from several threads wraps the whole gauge in a `Mutex`.

use crate::display::{DisplayConfig, PartMenuConfig, PartReadout, Readout};
use crate::error::Result;
use crate::exclusion::{is_excluded, ExclusionConfig};
use crate::highlight::{HighlightCycler, HighlightUpdate, DEFAULT_FLASH_PERIOD};
use crate::rate::RateEstimator;
use crate::scanner::{FleetScanner, ScanStats};
use crate::types::{CriticalityResult, PartSnapshot, PartSource};
use crate::visibility::{Thresholds, Transition, VisibilityGate};

/// Runtime settings of the gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSettings {
    /// Show/hide thresholds.
    pub thresholds: Thresholds,
    /// Keep the gauge visible whenever a critical part exists.
    pub force_visible: bool,
    /// Flash the critical part.
    pub highlight_enabled: bool,
    /// Seconds between highlight color changes at 1x warp.
    pub flash_period: f64,
    /// Parts ignored by the scan.
    pub exclusion: ExclusionConfig,
    /// Readout lines.
    pub display: DisplayConfig,
}

impl Default for GaugeSettings {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            force_visible: false,
            highlight_enabled: true,
            flash_period: DEFAULT_FLASH_PERIOD,
            exclusion: ExclusionConfig::new(),
            display: DisplayConfig::default(),
        }
    }
}

/// Everything a host needs to render one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    /// Most critical part, if any.
    pub critical: Option<CriticalityResult>,
    /// Display title of the critical part.
    pub title: Option<String>,
    /// Gauge visibility after this tick.
    pub visible: bool,
    /// Visibility change caused by this tick.
    pub transition: Transition,
    /// Highlight directives.
    pub highlight: HighlightUpdate,
}

impl TickOutput {
    /// Readout text, or `None` when there is no critical part.
    #[must_use]
    pub fn readout(&self, config: &DisplayConfig) -> Option<Readout> {
        let critical = self.critical.as_ref()?;
        Some(Readout::build(critical, self.title.as_deref().unwrap_or_default(), config))
    }
}

/// Critical temperature gauge state across ticks.
#[derive(Debug, Clone)]
pub struct ThermalGauge {
    settings: GaugeSettings,
    scanner: FleetScanner,
    rates: RateEstimator,
    visibility: VisibilityGate,
    highlight: HighlightCycler,
}

impl Default for ThermalGauge {
    fn default() -> Self {
        Self::new(GaugeSettings::default())
    }
}

impl ThermalGauge {
    /// Creates a hidden gauge with no rate history.
    #[must_use]
    pub fn new(settings: GaugeSettings) -> Self {
        let highlight = HighlightCycler::new(settings.flash_period);
        Self {
            settings,
            scanner: FleetScanner::new(),
            rates: RateEstimator::new(),
            visibility: VisibilityGate::new(),
            highlight,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &GaugeSettings {
        &self.settings
    }

    /// Replaces the settings. Rate history, visibility and the current
    /// highlight are kept.
    pub fn set_settings(&mut self, settings: GaugeSettings) {
        self.highlight.set_flash_period(settings.flash_period);
        self.settings = settings;
    }

    /// Sets the show/hide thresholds.
    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.settings.thresholds = thresholds;
    }

    /// Sets the exclusion lists.
    pub fn set_exclusion(&mut self, exclusion: ExclusionConfig) {
        self.settings.exclusion = exclusion;
    }

    /// Sets the always-visible override.
    pub fn set_force_visible(&mut self, force_visible: bool) {
        self.settings.force_visible = force_visible;
    }

    /// Enables or disables the part highlight.
    pub fn set_highlight_enabled(&mut self, enabled: bool) {
        self.settings.highlight_enabled = enabled;
    }

    /// Whether the gauge is visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Per-part rate history.
    #[must_use]
    pub fn rates(&self) -> &RateEstimator {
        &self.rates
    }

    /// Counters of the last scan.
    #[must_use]
    pub fn last_stats(&self) -> ScanStats {
        self.scanner.last_stats()
    }

    /// Drops rate history and hides the gauge, e.g. after a vessel switch.
    ///
    /// A part still highlighted is reported as cleared by the next tick.
    pub fn reset(&mut self) {
        crate::debug!("gauge", "reset, dropping {} rate states", self.rates.len());
        self.rates.clear();
        self.visibility.reset();
        self.highlight.release();
    }

    /// Per-part core and skin readout lines.
    ///
    /// `None` when the part menu is disabled or the part is excluded. Parts
    /// without rate history show a zero rate.
    #[must_use]
    pub fn part_readout(&self, part: &PartSnapshot, config: &PartMenuConfig) -> Option<PartReadout> {
        if is_excluded(part, &self.settings.exclusion) {
            return None;
        }
        PartReadout::build(part, self.rates.rate(part.id).unwrap_or_default(), config)
    }

    /// Runs one tick over `parts` at simulation time `now`.
    pub fn tick(&mut self, parts: &[PartSnapshot], now: f64, warp_rate: f64) -> TickOutput {
        crate::time_scope!("gauge", "tick");

        let critical = self.scanner.scan(parts, &self.settings.exclusion, &mut self.rates);
        let title = critical.and_then(|result| {
            parts
                .iter()
                .find(|part| part.id == result.entity_id)
                .map(|part| part.display_title().to_string())
        });

        let transition =
            self.visibility.update(critical.as_ref(), &self.settings.thresholds, self.settings.force_visible);
        match transition {
            Transition::Shown => crate::info!(
                "gauge",
                "shown at index {:.3} ({})",
                critical.map_or(0.0, |r| r.index),
                title.as_deref().unwrap_or("?")
            ),
            Transition::Hidden => crate::info!("gauge", "hidden"),
            Transition::None => {}
        }

        let highlight = self.highlight.tick(
            critical.as_ref(),
            now,
            warp_rate,
            self.settings.highlight_enabled,
            &self.settings.thresholds,
        );

        TickOutput { critical, title, visible: self.visibility.is_visible(), transition, highlight }
    }

    /// Pulls a snapshot from `source` and ticks on it.
    ///
    /// # Errors
    ///
    /// Returns the source error; gauge state is left untouched in that case.
    pub fn tick_source<S: PartSource + ?Sized>(
        &mut self,
        source: &mut S,
        now: f64,
        warp_rate: f64,
    ) -> Result<TickOutput> {
        let parts = source.snapshot().map_err(|e| {
            crate::error!("gauge", "source '{}' failed: {e}", source.id());
            e
        })?;
        Ok(self.tick(&parts, now, warp_rate))
    }
}
