//! Parsing and validation of `stepbench.toml` configuration files.
//!
//! This crate reads the bench configuration file and produces a strongly-typed
//! [`BenchConfig`]. Every section is optional; a missing file is equivalent to
//! [`BenchConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_config, load_config_file, load_config_from_str, validate_config, CONFIG_FILE_NAME,
};
pub use types::*;
