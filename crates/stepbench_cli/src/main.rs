//! stepbench CLI — drive a circuit model through a bounded stepping run.
//!
//! Provides `stepbench run` to toggle a model's input for a fixed number of
//! simulated steps while recording a VCD trace, and `stepbench init` to write
//! a default `stepbench.toml`.

#![warn(missing_docs)]

mod init;
mod run;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// stepbench — a bounded stepping test bench with waveform tracing.
#[derive(Parser, Debug)]
#[command(name = "stepbench", version, about = "Bounded stepping test bench")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a `stepbench.toml` file, or a directory containing one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default `stepbench.toml`.
    Init {
        /// Directory to write into (created if missing). Defaults to the
        /// current directory.
        dir: Option<String>,
    },
    /// Run the stepping loop.
    Run(RunArgs),
}

/// Arguments for the `stepbench run` subcommand.
///
/// Every option overrides the corresponding `stepbench.toml` value.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Model to drive.
    #[arg(long)]
    pub model: Option<String>,

    /// Run while simulated time is below this many ticks.
    #[arg(long)]
    pub bound: Option<u64>,

    /// Ticks to advance after each step.
    #[arg(long)]
    pub increment: Option<u64>,

    /// Start with the input high, so the first step drives it low
    /// (`--initial-input=false` to force low).
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub initial_input: Option<bool>,

    /// Hold the reset line asserted on every step (`--reset=false` to release).
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub reset: Option<bool>,

    /// How the input changes each step.
    #[arg(long, value_enum)]
    pub stimulus: Option<StimulusArg>,

    /// Seed for the random stimulus.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output path for the VCD trace.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Disable waveform recording.
    #[arg(long)]
    pub no_waveform: bool,

    /// Hierarchy levels to trace.
    #[arg(long)]
    pub depth: Option<u32>,

    /// VCD timescale (e.g., "1ns", "10ps").
    #[arg(long)]
    pub timescale: Option<String>,

    /// Do not check that the output is the inverse of the input.
    #[arg(long)]
    pub no_check: bool,

    /// Do not print a line per step.
    #[arg(long)]
    pub no_echo: bool,

    /// Format of the end-of-run summary.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,

    /// Arguments forwarded verbatim to the simulation engine (after `--`).
    #[arg(last = true)]
    pub engine_args: Vec<String>,
}

/// Stimulus selection on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StimulusArg {
    /// Negate the input every step.
    Toggle,
    /// Random input bits.
    Random,
}

/// Summary output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable lines on stderr.
    Text,
    /// A JSON object on stdout; per-step lines are suppressed.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a config file or directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Init { dir } => init::run(dir, &global),
        Command::Run(ref args) => run::run(args, &global),
    };

    // Everything the command owned has been dropped by now.
    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
