//! Configuration types deserialized from `stepbench.toml`.

use serde::Deserialize;

/// The top-level bench configuration parsed from `stepbench.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BenchConfig {
    /// Which circuit model to drive.
    pub model: ModelConfig,
    /// Stepping loop parameters.
    pub run: RunConfig,
    /// Input stimulus selection.
    pub stimulus: StimulusConfig,
    /// Waveform trace output.
    pub trace: TraceConfig,
    /// Output checking against the expected inverse of the input.
    pub check: CheckConfig,
}

/// Selection of the circuit under test.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
    /// Registered model name (e.g., "inverter").
    pub name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "inverter".to_string(),
        }
    }
}

/// Parameters of the stepping loop.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    /// The loop runs while simulated time is strictly below this bound.
    pub bound: u64,
    /// Ticks added to simulated time after every step. Must be non-zero.
    pub increment: u64,
    /// Input level before the first step; the first step drives its inverse.
    pub initial_input: bool,
    /// Level driven onto the reset line on every step.
    pub reset: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            bound: 1000,
            increment: 1,
            initial_input: false,
            reset: false,
        }
    }
}

/// How the next input value is produced each step.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StimulusKind {
    /// Negate the previous input (default).
    #[default]
    Toggle,
    /// Draw a uniformly random bit.
    Random,
}

/// Input stimulus configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StimulusConfig {
    /// The stimulus kind.
    pub kind: StimulusKind,
    /// Seed for the random stimulus. Ignored for `toggle`.
    pub seed: Option<u64>,
}

/// Waveform trace configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TraceConfig {
    /// Whether a trace file is written at all.
    pub enabled: bool,
    /// Destination path. The parent directory must already exist.
    pub path: String,
    /// Number of hierarchy levels to trace.
    pub depth: u32,
    /// VCD timescale string, parsed to [`Timescale`](stepbench_common::Timescale).
    pub timescale: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "simx.vcd".to_string(),
            depth: 99,
            timescale: "1ns".to_string(),
        }
    }
}

/// Output checker configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckConfig {
    /// Whether mismatches between `Z` and `!A` are collected.
    pub enabled: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_bench() {
        let config = BenchConfig::default();
        assert_eq!(config.model.name, "inverter");
        assert_eq!(config.run.bound, 1000);
        assert_eq!(config.run.increment, 1);
        assert!(!config.run.initial_input);
        assert!(!config.run.reset);
        assert_eq!(config.stimulus.kind, StimulusKind::Toggle);
        assert!(config.stimulus.seed.is_none());
        assert!(config.trace.enabled);
        assert_eq!(config.trace.path, "simx.vcd");
        assert_eq!(config.trace.depth, 99);
        assert_eq!(config.trace.timescale, "1ns");
        assert!(config.check.enabled);
    }

    #[test]
    fn stimulus_kind_lowercase() {
        let cfg: StimulusConfig = toml::from_str("kind = \"random\"\nseed = 3").unwrap();
        assert_eq!(cfg.kind, StimulusKind::Random);
        assert_eq!(cfg.seed, Some(3));
    }

    #[test]
    fn partial_run_section_keeps_defaults() {
        let cfg: RunConfig = toml::from_str("bound = 4").unwrap();
        assert_eq!(cfg.bound, 4);
        assert_eq!(cfg.increment, 1);
    }
}
