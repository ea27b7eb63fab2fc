//! Readout formatting for the gauge.
//!
//! Produces the text lines a host draws next to the gauge bar: temperature
//! with limit, temperature rate, and the critical part's name and side.
//! Numbers are right-aligned with U+2007 FIGURE SPACE so digits line up in
//! proportional fonts; negative rates use U+2212 MINUS SIGN.
//!
//! ## Key Features
//! - Fixed integer-place padding without column jitter
//! - Signed rates with a typographic minus
//! - Readout composition driven by [`DisplayConfig`]
//! - Per-part core/skin lines driven by [`PartMenuConfig`]

use crate::rate::Rates;
use crate::types::{CriticalityResult, PartSnapshot, ThermalSide};
use serde::{Deserialize, Serialize};

/// Padding character (same width as a digit).
pub const FIGURE_SPACE: char = '\u{2007}';

/// Typographic minus used for negative rates.
pub const MINUS_SIGN: char = '\u{2212}';

/// Minus used for rates in the per-part readout.
pub const EN_DASH: char = '\u{2013}';

/// Temperature unit.
pub const KELVIN: &str = "K";

/// Temperature rate unit.
pub const KELVIN_PER_SECOND: &str = "K/s";

// =============================================================================
// NUMBER FORMATTING
// =============================================================================

fn pad_left(digits: &str, places: usize) -> String {
    let width = digits.chars().count();
    let mut out: String = std::iter::repeat(FIGURE_SPACE).take(places.saturating_sub(width)).collect();
    out.push_str(digits);
    out
}

/// Formats a value rounded to an integer (halves away from zero), left-padded
/// to `places` digits.
///
/// # Examples
/// ```
/// use critical_temp_gauge::display::format_unsigned;
/// assert_eq!(format_unsigned(1234.4, 4), "1234");
/// assert_eq!(format_unsigned(12.0, 4), "\u{2007}\u{2007}12");
/// assert_eq!(format_unsigned(2.5, 1), "3");
/// ```
#[must_use]
pub fn format_unsigned(value: f64, places: usize) -> String {
    pad_left(&format!("{:.0}", value.round()), places)
}

/// Formats a value with an explicit sign, the magnitude padded to `places` digits.
///
/// # Examples
/// ```
/// use critical_temp_gauge::display::format_signed;
/// assert_eq!(format_signed(12.0, 2), "+12");
/// assert_eq!(format_signed(-3.0, 1), "\u{2212}3");
/// ```
#[must_use]
pub fn format_signed(value: f64, places: usize) -> String {
    format_signed_with(value, places, MINUS_SIGN)
}

fn format_signed_with(value: f64, places: usize, minus: char) -> String {
    // `{:.0}` alone rounds ties to even.
    let magnitude = format!("{:.0}", value.abs().round());
    let sign = if value < 0.0 { minus } else { '+' };
    let padding = places.saturating_sub(magnitude.chars().count());

    let mut out: String = std::iter::repeat(FIGURE_SPACE).take(padding).collect();
    out.push(sign);
    out.push_str(&magnitude);
    out
}

// =============================================================================
// READOUT LINES
// =============================================================================

/// Formats a temperature, optionally with its limit.
///
/// # Examples
/// ```
/// use critical_temp_gauge::display::format_temperature;
/// assert_eq!(format_temperature(1234.0, Some(2000.0)), "1234 / 2000 K");
/// assert_eq!(format_temperature(1234.0, None), "1234 K");
/// ```
#[must_use]
pub fn format_temperature(temperature: f64, limit: Option<f64>) -> String {
    match limit {
        Some(limit) => format!(
            "{} / {} {KELVIN}",
            format_unsigned(temperature, 4),
            format_unsigned(limit, 3)
        ),
        None => format!("{} {KELVIN}", format_unsigned(temperature, 4)),
    }
}

/// Formats a temperature rate.
///
/// # Examples
/// ```
/// use critical_temp_gauge::display::format_rate;
/// assert_eq!(format_rate(12.4), "+12 K/s");
/// ```
#[must_use]
pub fn format_rate(rate: f64) -> String {
    format!("{} {KELVIN_PER_SECOND}", format_signed(rate, 1))
}

/// Formats a temperature with optional limit and optional rate.
///
/// The rate is padded to three digits and uses an en dash for negatives.
///
/// # Examples
/// ```
/// use critical_temp_gauge::display::format_temperature_with_rate;
/// assert_eq!(format_temperature_with_rate(1234.0, Some(2000.0), Some(-120.0)), "1234 / 2000 K \u{2013}120 K/s");
/// assert_eq!(format_temperature_with_rate(1234.0, None, None), "1234 K");
/// ```
#[must_use]
pub fn format_temperature_with_rate(temperature: f64, limit: Option<f64>, rate: Option<f64>) -> String {
    let base = format_temperature(temperature, limit);
    match rate {
        Some(rate) => format!("{base} {} {KELVIN_PER_SECOND}", format_signed_with(rate, 3, EN_DASH)),
        None => base,
    }
}

/// Formats the part title with its critical side.
#[must_use]
pub fn format_part_name(title: &str, side: ThermalSide) -> String {
    format!(" {title} ({})", side.label())
}

// =============================================================================
// READOUT
// =============================================================================

/// Which readout lines are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show the critical temperature.
    #[serde(default = "default_true")]
    pub show_temperature: bool,
    /// Append the limit to the temperature.
    #[serde(default = "default_true")]
    pub show_limit: bool,
    /// Show the temperature rate.
    #[serde(default = "default_true")]
    pub show_rate: bool,
    /// Show the critical part's name and side.
    #[serde(default = "default_true")]
    pub show_part_name: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { show_temperature: true, show_limit: true, show_rate: true, show_part_name: true }
    }
}

/// Text and fill level for one gauge frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    /// Bar fill in `[0, 1]`.
    pub fill: f64,
    /// Temperature line.
    pub temperature: Option<String>,
    /// Rate line.
    pub rate: Option<String>,
    /// Part name line.
    pub part: Option<String>,
}

impl Readout {
    /// Builds the readout for the critical part.
    #[must_use]
    pub fn build(result: &CriticalityResult, title: &str, config: &DisplayConfig) -> Self {
        let limit = config.show_limit.then_some(result.critical_limit);
        Self {
            fill: result.gauge_fill(),
            temperature: config
                .show_temperature
                .then(|| format_temperature(result.critical_temperature, limit)),
            rate: config.show_rate.then(|| format_rate(result.critical_rate)),
            part: config.show_part_name.then(|| format_part_name(title, result.side())),
        }
    }

    /// All enabled lines joined by two spaces, after the fill percentage.
    #[must_use]
    pub fn line(&self) -> String {
        let mut line = format!("{:>3.0}%", self.fill * 100.0);
        for text in [&self.temperature, &self.rate, &self.part].into_iter().flatten() {
            line.push_str("  ");
            line.push_str(text.trim_start_matches(' '));
        }
        line
    }
}

// =============================================================================
// PER-PART READOUT
// =============================================================================

/// Per-part temperature lines, shown for every part that is not excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartMenuConfig {
    /// Produce per-part lines at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Append the limit to each temperature.
    #[serde(default = "default_true")]
    pub show_limit: bool,
    /// Append the rate to each temperature.
    #[serde(default = "default_true")]
    pub show_rate: bool,
}

impl Default for PartMenuConfig {
    fn default() -> Self {
        Self { enabled: true, show_limit: true, show_rate: true }
    }
}

/// Core and skin lines of one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartReadout {
    /// Core temperature line.
    pub core: String,
    /// Skin temperature line.
    pub skin: String,
}

impl PartReadout {
    /// Builds both lines, or `None` when the part menu is disabled.
    #[must_use]
    pub fn build(part: &PartSnapshot, rates: Rates, config: &PartMenuConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let line = |temperature: f64, limit: f64, rate: f64| {
            format_temperature_with_rate(
                temperature,
                config.show_limit.then_some(limit),
                config.show_rate.then_some(rate),
            )
        };
        Some(Self {
            core: line(part.core_temperature, part.core_limit, rates.core),
            skin: line(part.skin_temperature, part.skin_limit, rates.skin),
        })
    }
}
