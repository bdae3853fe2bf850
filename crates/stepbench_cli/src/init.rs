//! `stepbench init` — write a default bench configuration.
//!
//! Creates `stepbench.toml` with every setting spelled out at its default
//! value, so a bench can be tuned without consulting the option list.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use stepbench_config::CONFIG_FILE_NAME;

use crate::GlobalArgs;

/// Default configuration written by `stepbench init`.
const TEMPLATE: &str = r#"# stepbench configuration

[model]
name = "inverter"

[run]
# The loop runs while simulated time is below `bound`.
bound = 1000
increment = 1
initial_input = false
reset = false

[stimulus]
# "toggle" or "random"
kind = "toggle"
# seed = 42

[trace]
enabled = true
path = "simx.vcd"
depth = 99
timescale = "1ns"

[check]
enabled = true
"#;

/// Runs the `stepbench init` command.
///
/// If `dir` is `Some`, the directory is created when missing. Otherwise the
/// configuration is written to the current working directory. An existing
/// `stepbench.toml` is never overwritten.
pub fn run(dir: Option<String>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let bench_dir = match &dir {
        Some(d) => {
            let dir = PathBuf::from(d);
            fs::create_dir_all(&dir)?;
            dir
        }
        None => std::env::current_dir()?,
    };

    let path = write_template(&bench_dir)?;
    if !global.quiet {
        eprintln!("     Created {}", path.display());
    }
    Ok(0)
}

/// Writes the template into `dir`, refusing to replace an existing file.
fn write_template(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(CONFIG_FILE_NAME);
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(format!("'{}' already exists", path.display()).into());
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(TEMPLATE.as_bytes())?;
    Ok(path)
}
