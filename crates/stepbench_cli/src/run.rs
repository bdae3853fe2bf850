//! `stepbench run` — drive the configured model through a bounded run.
//!
//! Loads `stepbench.toml` (if any), applies command-line overrides, runs the
//! stepping loop, echoes one `A is <0|1> , Z is <0|1>` line per step to
//! stdout, and reports a summary. Returns exit code 0 when the run completed
//! and every output matched, 1 otherwise.

use std::path::{Path, PathBuf};

use stepbench_common::Timescale;
use stepbench_config::{BenchConfig, StimulusKind as ConfigStimulus, CONFIG_FILE_NAME};
use stepbench_sim::{
    BenchObserver, BenchOptions, DriverConfig, Model, PortDirection, SimContext, StepRecord,
    StimulusKind, TraceOptions,
};

use crate::{GlobalArgs, ReportFormat, RunArgs, StimulusArg};

/// Runs the `stepbench run` command.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    // Step 1: Load config and apply overrides
    let mut config = load_bench_config(global)?;
    apply_overrides(&mut config, args);
    stepbench_config::validate_config(&config)?;

    // Step 2: Build the run options
    let options = bench_options(&config, args)?;
    if global.verbose {
        print_options(&options);
    }

    // Step 3: Run
    let json = args.report == ReportFormat::Json;
    let mut observer = ConsoleObserver {
        banner: !global.quiet && !json,
        echo: !global.quiet && !json && !args.no_echo,
        verbose: global.verbose,
    };
    let summary = stepbench_sim::run_bench(&options, &mut observer)?;

    // Step 4: Report
    for mismatch in &summary.mismatches {
        eprintln!("CHECK FAILED: {mismatch}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !global.quiet {
        eprintln!(
            "   Simulation finished at {} ({} steps)",
            summary.final_time, summary.iterations
        );
        if let Some(ref path) = summary.trace_path {
            eprintln!(
                "   Waveform: {} ({} records)",
                path.display(),
                summary.trace_records
            );
        }
    }

    if summary.passed() {
        Ok(0)
    } else {
        if !global.quiet {
            eprintln!(
                "   FAILED: {} step(s) with Z != !A",
                summary.mismatches.len()
            );
        }
        Ok(1)
    }
}

/// Loads the bench configuration.
///
/// `--config` may name a file or a directory containing `stepbench.toml`.
/// Without it, `./stepbench.toml` is used when present and defaults otherwise.
fn load_bench_config(global: &GlobalArgs) -> Result<BenchConfig, Box<dyn std::error::Error>> {
    match &global.config {
        Some(config_path) => {
            let p = PathBuf::from(config_path);
            if p.is_dir() {
                Ok(stepbench_config::load_config(&p)?)
            } else {
                Ok(stepbench_config::load_config_file(&p)?)
            }
        }
        None => {
            let local = Path::new(CONFIG_FILE_NAME);
            if local.is_file() {
                Ok(stepbench_config::load_config_file(local)?)
            } else {
                Ok(BenchConfig::default())
            }
        }
    }
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut BenchConfig, args: &RunArgs) {
    if let Some(model) = &args.model {
        config.model.name = model.clone();
    }
    if let Some(bound) = args.bound {
        config.run.bound = bound;
    }
    if let Some(increment) = args.increment {
        config.run.increment = increment;
    }
    if let Some(initial_input) = args.initial_input {
        config.run.initial_input = initial_input;
    }
    if let Some(reset) = args.reset {
        config.run.reset = reset;
    }
    if let Some(stimulus) = args.stimulus {
        config.stimulus.kind = match stimulus {
            StimulusArg::Toggle => ConfigStimulus::Toggle,
            StimulusArg::Random => ConfigStimulus::Random,
        };
    }
    if args.seed.is_some() {
        config.stimulus.seed = args.seed;
    }
    if let Some(output) = &args.output {
        config.trace.path = output.clone();
    }
    if args.no_waveform {
        config.trace.enabled = false;
    }
    if let Some(depth) = args.depth {
        config.trace.depth = depth;
    }
    if let Some(timescale) = &args.timescale {
        config.trace.timescale = timescale.clone();
    }
    if args.no_check {
        config.check.enabled = false;
    }
}

/// Converts a validated configuration into run options.
fn bench_options(
    config: &BenchConfig,
    args: &RunArgs,
) -> Result<BenchOptions, Box<dyn std::error::Error>> {
    let trace = if config.trace.enabled {
        Some(TraceOptions {
            path: PathBuf::from(&config.trace.path),
            depth: config.trace.depth,
            timescale: config.trace.timescale.parse::<Timescale>()?,
        })
    } else {
        None
    };

    Ok(BenchOptions {
        model: config.model.name.clone(),
        driver: DriverConfig {
            bound: config.run.bound,
            increment: config.run.increment,
            reset: config.run.reset,
            initial_input: config.run.initial_input,
        },
        stimulus: match config.stimulus.kind {
            ConfigStimulus::Toggle => StimulusKind::Toggle,
            ConfigStimulus::Random => StimulusKind::Random,
        },
        seed: config.stimulus.seed,
        trace,
        check: config.check.enabled,
        engine_args: args.engine_args.clone(),
    })
}

fn print_options(options: &BenchOptions) {
    eprintln!("   Model: {}", options.model);
    eprintln!(
        "   Bound: {} ticks, increment {} ({} steps), reset {}, initial input {}",
        options.driver.bound,
        options.driver.increment,
        options.driver.expected_iterations(),
        u8::from(options.driver.reset),
        u8::from(options.driver.initial_input)
    );
    eprintln!("   Stimulus: {:?}", options.stimulus);
    match &options.trace {
        Some(trace) => eprintln!(
            "   Trace: {} (depth {}, timescale {})",
            trace.path.display(),
            trace.depth,
            trace.timescale
        ),
        None => eprintln!("   Trace: disabled"),
    }
}

/// Prints the startup banner and per-step lines.
struct ConsoleObserver {
    banner: bool,
    echo: bool,
    verbose: bool,
}

impl BenchObserver for ConsoleObserver {
    fn on_start(&mut self, ctx: &SimContext, model: &dyn Model) {
        if self.banner {
            println!("Starting simulation of {}", model.name());
        }
        if self.verbose || ctx.debug() {
            if !ctx.args().is_empty() {
                eprintln!("   Engine args: {}", ctx.args().join(" "));
            }
            for port in model.ports() {
                let dir = match port.direction {
                    PortDirection::Input => "in",
                    PortDirection::Output => "out",
                };
                eprintln!("   port {:<6} {dir}", port.name);
            }
        }
    }

    fn on_step(&mut self, step: &StepRecord) {
        if self.echo {
            println!("{step}");
        }
    }
}
