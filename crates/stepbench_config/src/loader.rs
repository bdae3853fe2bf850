//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::BenchConfig;
use stepbench_common::Timescale;
use std::path::Path;

/// The configuration file name looked up in a bench directory.
pub const CONFIG_FILE_NAME: &str = "stepbench.toml";

/// Loads and validates `stepbench.toml` from a bench directory.
///
/// Reads `<dir>/stepbench.toml`, parses it, and validates it.
pub fn load_config(dir: &Path) -> Result<BenchConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<BenchConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<BenchConfig, ConfigError> {
    let config: BenchConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are consistent.
///
/// Exposed so that callers applying command-line overrides can re-check the
/// merged result.
pub fn validate_config(config: &BenchConfig) -> Result<(), ConfigError> {
    if config.model.name.is_empty() {
        return Err(ConfigError::MissingField("model.name".to_string()));
    }
    if config.run.increment == 0 {
        return Err(ConfigError::ValidationError(
            "run.increment must be at least 1".to_string(),
        ));
    }
    if config.trace.enabled && config.trace.path.is_empty() {
        return Err(ConfigError::MissingField("trace.path".to_string()));
    }
    config
        .trace
        .timescale
        .parse::<Timescale>()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StimulusKind;

    #[test]
    fn empty_file_is_default() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, BenchConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[model]
name = "inverter"

[run]
bound = 4
increment = 2
initial_input = true
reset = false

[stimulus]
kind = "random"
seed = 42

[trace]
enabled = true
path = "out/run.vcd"
depth = 1
timescale = "10ps"

[check]
enabled = false
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.run.bound, 4);
        assert_eq!(config.run.increment, 2);
        assert!(config.run.initial_input);
        assert_eq!(config.stimulus.kind, StimulusKind::Random);
        assert_eq!(config.stimulus.seed, Some(42));
        assert_eq!(config.trace.path, "out/run.vcd");
        assert_eq!(config.trace.depth, 1);
        assert_eq!(config.trace.timescale, "10ps");
        assert!(!config.check.enabled);
    }

    #[test]
    fn zero_increment_errors() {
        let err = load_config_from_str("[run]\nincrement = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_model_name_errors() {
        let err = load_config_from_str("[model]\nname = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn empty_trace_path_errors_only_when_enabled() {
        let err = load_config_from_str("[trace]\npath = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));

        let ok = load_config_from_str("[trace]\nenabled = false\npath = \"\"");
        assert!(ok.is_ok());
    }

    #[test]
    fn bad_timescale_errors() {
        let err = load_config_from_str("[trace]\ntimescale = \"3ns\"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn unknown_stimulus_kind_errors() {
        let err = load_config_from_str("[stimulus]\nkind = \"sine\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "[run]\nbound = 8\n").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.run.bound, 8);
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
