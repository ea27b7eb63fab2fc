//! gauge-replay: run a recorded thermal scenario through the gauge.
//!
//! A scenario is a YAML file with one entry per tick:
//!
//! ```yaml
//! ticks:
//!   - time: 0.0
//!     warp_rate: 1.0
//!     parts:
//!       - id: 1
//!         title: Heat Shield
//!         core_temperature: 600
//!         core_limit: 1000
//!         skin_temperature: 900
//!         skin_limit: 1200
//!         timestamp: 0.0
//! ```
//!
//! Run: `gauge-replay scenario.yaml --config gauge.yaml --debug`
//!
//! `--parts` adds core and skin lines for every tracked part.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::{Context, Result};
use clap::Parser;
use critical_temp_gauge::config::Config;
use critical_temp_gauge::gauge::{ThermalGauge, TickOutput};
use critical_temp_gauge::types::PartSnapshot;
use critical_temp_gauge::visibility::Transition;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// gauge-replay: replay a thermal scenario through the critical temperature gauge
#[derive(Parser, Debug)]
#[command(name = "gauge-replay")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Replay a thermal scenario through the critical temperature gauge", long_about = None)]
struct Cli {
    /// Scenario file (YAML)
    scenario: PathBuf,

    /// Config file path (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to stderr
    #[arg(long)]
    debug: bool,

    /// Print only ticks that change visibility or highlight
    #[arg(short, long)]
    quiet: bool,

    /// Print core and skin temperatures of every part after each tick
    #[arg(short, long)]
    parts: bool,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    ticks: Vec<ScenarioTick>,
}

#[derive(Debug, Deserialize)]
struct ScenarioTick {
    time: f64,
    #[serde(default = "default_warp_rate")]
    warp_rate: f64,
    #[serde(default)]
    parts: Vec<PartSnapshot>,
}

fn default_warp_rate() -> f64 {
    1.0
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading scenario {}", path.display()))?;
    serde_yaml_ng::from_str(&content).with_context(|| format!("parsing scenario {}", path.display()))
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default_path().map(Config::load_or_default).unwrap_or_default()),
    }
}

fn format_tick(time: f64, out: &TickOutput, config: &Config) -> String {
    let marker = match out.transition {
        Transition::Shown => '+',
        Transition::Hidden => '-',
        Transition::None => ' ',
    };
    let state = if out.visible { "visible" } else { "hidden " };

    let mut line = format!("t={time:>8.2} {marker}{state}");
    match out.readout(&config.display) {
        Some(readout) => {
            line.push(' ');
            line.push_str(&readout.line());
        }
        None => line.push_str(" no critical part"),
    }
    if let Some((id, color)) = out.highlight.highlight {
        line.push_str(&format!("  [{id} {}]", color.name()));
    }
    if let Some(id) = out.highlight.cleared {
        line.push_str(&format!("  [{id} cleared]"));
    }
    line
}

fn format_parts(gauge: &ThermalGauge, parts: &[PartSnapshot], config: &Config) -> Vec<String> {
    parts
        .iter()
        .filter_map(|part| {
            let readout = gauge.part_readout(part, &config.part_menu)?;
            let label = if part.title.is_empty() { part.id.to_string() } else { part.title.clone() };
            Some(format!("    {label}: core {}  skin {}", readout.core, readout.skin))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        critical_temp_gauge::debug::enable();
    } else {
        critical_temp_gauge::debug::init_from_env();
    }

    let config = load_config(&cli)?;
    let scenario = load_scenario(&cli.scenario)?;
    critical_temp_gauge::info!("replay", "{} ticks from {}", scenario.ticks.len(), cli.scenario.display());

    let mut gauge = ThermalGauge::new(config.settings());
    for tick in &scenario.ticks {
        let out = gauge.tick(&tick.parts, tick.time, tick.warp_rate);
        let changed = out.transition != Transition::None || out.highlight.cleared.is_some();
        if !cli.quiet || changed {
            println!("{}", format_tick(tick.time, &out, &config));
        }
        if cli.parts {
            for line in format_parts(&gauge, &tick.parts, &config) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
