//! YAML configuration for the gauge.
//!
//! Every field has a default, so an empty file (or a missing one, via
//! [`Config::load_or_default`]) yields the stock behavior. Exclusion lists are
//! kept as the comma-separated strings users edit; they are parsed when the
//! configuration is turned into [`GaugeSettings`].

use crate::display::{DisplayConfig, PartMenuConfig};
use crate::error::{GaugeError, Result};
use crate::exclusion::ExclusionConfig;
use crate::gauge::GaugeSettings;
use crate::highlight::DEFAULT_FLASH_PERIOD;
use crate::visibility::{Thresholds, DEFAULT_HIDE_THRESHOLD, DEFAULT_SHOW_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up under the user configuration directory.
pub const CONFIG_FILE: &str = "gauge.yaml";

/// Gauge visibility settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeSection {
    /// Index above which the gauge shows.
    #[serde(default = "default_show_threshold")]
    pub show_threshold: f64,

    /// Index below which the gauge hides.
    #[serde(default = "default_hide_threshold")]
    pub hide_threshold: f64,

    /// Keep the gauge visible whenever a critical part exists.
    #[serde(default)]
    pub always_show: bool,
}

fn default_show_threshold() -> f64 {
    DEFAULT_SHOW_THRESHOLD
}
fn default_hide_threshold() -> f64 {
    DEFAULT_HIDE_THRESHOLD
}

impl Default for GaugeSection {
    fn default() -> Self {
        Self {
            show_threshold: default_show_threshold(),
            hide_threshold: default_hide_threshold(),
            always_show: false,
        }
    }
}

/// Part highlight settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightSection {
    /// Flash the critical part.
    #[serde(default = "default_highlight_enabled")]
    pub enabled: bool,

    /// Seconds between color changes at 1x warp.
    #[serde(default = "default_flash_period")]
    pub flash_period: f64,
}

fn default_highlight_enabled() -> bool {
    true
}
fn default_flash_period() -> f64 {
    DEFAULT_FLASH_PERIOD
}

impl Default for HighlightSection {
    fn default() -> Self {
        Self { enabled: default_highlight_enabled(), flash_period: default_flash_period() }
    }
}

/// Exclusion list settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExclusionSection {
    /// Apply the lists below.
    #[serde(default)]
    pub enabled: bool,

    /// Comma-separated part names or titles.
    #[serde(default)]
    pub names: String,

    /// Comma-separated module names, with or without the `Module` prefix.
    #[serde(default)]
    pub modules: String,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Visibility settings.
    #[serde(default)]
    pub gauge: GaugeSection,

    /// Highlight settings.
    #[serde(default)]
    pub highlight: HighlightSection,

    /// Exclusion settings.
    #[serde(default)]
    pub exclusion: ExclusionSection,

    /// Readout settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Per-part readout settings.
    #[serde(default)]
    pub part_menu: PartMenuConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            gauge: GaugeSection::default(),
            highlight: HighlightSection::default(),
            exclusion: ExclusionSection::default(),
            display: DisplayConfig::default(),
            part_menu: PartMenuConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration file path (`<config dir>/critical-temp-gauge/gauge.yaml`).
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("critical-temp-gauge").join(CONFIG_FILE))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GaugeError::ConfigNotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            GaugeError::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                crate::warn!("config", "{e}, using defaults");
                Self::default()
            }
        }
    }

    /// Serializes the configuration back to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| GaugeError::ConfigInvalid { key: "config".to_string(), message: e.to_string() })
    }

    /// Validated runtime settings.
    ///
    /// Out-of-range thresholds are replaced by their defaults and the hide
    /// threshold is capped at the show threshold.
    #[must_use]
    pub fn settings(&self) -> GaugeSettings {
        GaugeSettings {
            thresholds: Thresholds::new(self.gauge.show_threshold, self.gauge.hide_threshold),
            force_visible: self.gauge.always_show,
            highlight_enabled: self.highlight.enabled,
            flash_period: self.highlight.flash_period,
            exclusion: ExclusionConfig::from_lists(
                self.exclusion.enabled,
                &self.exclusion.names,
                &self.exclusion.modules,
            ),
            display: self.display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::new();

        assert_eq!(config.version, 1);
        assert_eq!(config.gauge.show_threshold, 0.5);
        assert_eq!(config.gauge.hide_threshold, 0.4);
        assert!(!config.gauge.always_show);
        assert!(config.highlight.enabled);
        assert!(!config.exclusion.enabled);
        assert!(config.display.show_rate);
    }

    #[test]
    fn test_config_parse_minimal() {
        let config = Config::parse("version: 1").unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.highlight.flash_period, DEFAULT_FLASH_PERIOD);
    }

    #[test]
    fn test_config_parse_empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.gauge.show_threshold, 0.5);
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r#"
version: 1
gauge:
  show_threshold: 0.7
  hide_threshold: 0.6
  always_show: true
highlight:
  enabled: false
  flash_period: 0.25
exclusion:
  enabled: true
  names: "heatShield2, fuelTank"
  modules: "Ablator"
display:
  show_rate: false
part_menu:
  show_limit: false
"#;

        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.gauge.show_threshold, 0.7);
        assert!(config.gauge.always_show);
        assert!(!config.highlight.enabled);
        assert_eq!(config.highlight.flash_period, 0.25);
        assert_eq!(config.exclusion.names, "heatShield2, fuelTank");
        assert!(!config.display.show_rate);
        assert!(config.display.show_temperature);
        assert!(config.part_menu.enabled);
        assert!(!config.part_menu.show_limit);
        assert!(config.part_menu.show_rate);
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r#"
version: 1
gauge:
  show_threshold: not_a_number
"#;

        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, GaugeError::ConfigParse { .. }), "got {err:?}");
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_settings_validates_thresholds() {
        let mut config = Config::new();
        config.gauge.show_threshold = 1.5;
        config.gauge.hide_threshold = 0.45;

        let settings = config.settings();
        assert_eq!(settings.thresholds.show(), 0.5);
        assert_eq!(settings.thresholds.hide(), 0.45);
    }

    #[test]
    fn test_settings_parses_exclusion_lists() {
        let mut config = Config::new();
        config.exclusion.enabled = true;
        config.exclusion.names = "A, b, a".to_string();
        config.exclusion.modules = "Module Ablator".to_string();

        let settings = config.settings();
        assert!(settings.exclusion.enabled);
        assert_eq!(settings.exclusion.name_count(), 2);
        assert!(settings.exclusion.contains_module("ablator"));
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gauge:\n  always_show: true").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.gauge.always_show);
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = Config::load("/nonexistent/gauge.yaml").unwrap_err();
        assert!(matches!(err, GaugeError::ConfigNotFound(_)));
    }

    #[test]
    fn test_config_load_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, GaugeError::Io(_)));
    }

    #[test]
    fn test_config_load_or_default() {
        let config = Config::load_or_default("/nonexistent/path");
        assert_eq!(config.version, 1);
    }

    #[test]
    fn test_config_yaml_roundtrip_keeps_lists() {
        let mut config = Config::new();
        config.exclusion.modules = "ablator, engines".to_string();

        let parsed = Config::parse(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed.exclusion.modules, "ablator, engines");
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("critical-temp-gauge/gauge.yaml"));
        }
    }
}
