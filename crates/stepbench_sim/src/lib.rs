//! Bounded stepping bench for single-input circuit models.
//!
//! This crate drives a circuit [`Model`] through a fixed number of simulated
//! time steps, toggling (or randomizing) its input, and records every step
//! into a VCD waveform through a [`TraceSink`].
//!
//! # Architecture
//!
//! A run owns exactly one [`SimContext`] (time and engine arguments), one
//! model and at most one trace sink. [`SteppingDriver`] sequences them; the
//! optional [`Checker`] compares each output against the inverse of its input.
//! Resources are released on scope exit, so an early error still leaves a
//! finalized trace file.
//!
//! # Usage
//!
//! ```ignore
//! use stepbench_sim::{run_bench, BenchOptions, NullObserver};
//!
//! let options = BenchOptions::default();
//! let summary = run_bench(&options, &mut NullObserver)?;
//! println!("{} steps, {} trace records", summary.iterations, summary.trace_records);
//! ```
//!
//! # Modules
//!
//! - `error` — Simulation error types
//! - `time` — Abstract tick counter
//! - `context` — Simulation time plus engine command arguments
//! - `model` — The engine interface and the built-in inverter
//! - `waveform` — Waveform recording (VCD format)
//! - `trace` — Per-step port snapshots into a recorder
//! - `stimulus` — Toggle and random input generators
//! - `check` — `Z == !A` output checking
//! - `driver` — The bounded stepping loop

#![warn(missing_docs)]

pub mod check;
pub mod context;
pub mod driver;
pub mod error;
pub mod model;
pub mod stimulus;
pub mod time;
pub mod trace;
pub mod waveform;

use std::path::{Path, PathBuf};

use serde::Serialize;
use stepbench_common::Timescale;

pub use check::{Checker, Mismatch};
pub use context::SimContext;
pub use driver::{DriverConfig, DriverOutcome, StepRecord, SteppingDriver};
pub use error::SimError;
pub use model::{build_model, Inverter, Model, PortDirection, PortId, PortInfo, MODEL_NAMES};
pub use stimulus::{Stimulus, StimulusKind};
pub use time::SimTime;
pub use trace::TraceSink;
pub use waveform::{VcdRecorder, WaveformRecorder};

/// Where and how the waveform trace is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOptions {
    /// Destination file. Its directory must exist.
    pub path: PathBuf,
    /// Hierarchy levels to trace.
    pub depth: u32,
    /// Timescale declared in the VCD header.
    pub timescale: Timescale,
}

/// Everything a bench run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchOptions {
    /// Registered model name.
    pub model: String,
    /// Loop parameters.
    pub driver: DriverConfig,
    /// Stimulus selection.
    pub stimulus: StimulusKind,
    /// Random seed; a `+stepbench+seed+<n>` engine argument takes precedence.
    pub seed: Option<u64>,
    /// Trace output, or `None` to run without a trace.
    pub trace: Option<TraceOptions>,
    /// Whether to check `Z == !A` on every step.
    pub check: bool,
    /// Raw arguments forwarded to the simulation context.
    pub engine_args: Vec<String>,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            model: "inverter".to_string(),
            driver: DriverConfig::default(),
            stimulus: StimulusKind::Toggle,
            seed: None,
            trace: None,
            check: true,
            engine_args: Vec::new(),
        }
    }
}

/// Callbacks invoked while a bench runs.
pub trait BenchObserver {
    /// Called once after the model, context and trace are set up.
    fn on_start(&mut self, _ctx: &SimContext, _model: &dyn Model) {}

    /// Called once per step after evaluation.
    fn on_step(&mut self, _step: &StepRecord) {}
}

/// An observer that ignores every event.
pub struct NullObserver;

impl BenchObserver for NullObserver {}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Name of the model that was driven.
    pub model: String,
    /// Number of steps executed.
    pub iterations: u64,
    /// Simulated time when the loop exited.
    pub final_time: SimTime,
    /// Number of trace snapshots written (0 without a trace).
    pub trace_records: u64,
    /// Trace destination, if one was written.
    pub trace_path: Option<PathBuf>,
    /// Stimulus used for the run.
    pub stimulus: StimulusKind,
    /// Effective random seed, if one was given.
    pub seed: Option<u64>,
    /// Output mismatches found by the checker.
    pub mismatches: Vec<Mismatch>,
}

impl RunSummary {
    /// Returns `true` when the checker found no mismatches.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// High-level entry point: builds the model, opens the trace, and runs the
/// stepping loop to completion.
///
/// The trace is opened before the first step and finalized after the model's
/// finalize hook. On error the trace is still finalized as it is dropped.
pub fn run_bench(
    options: &BenchOptions,
    observer: &mut dyn BenchObserver,
) -> Result<RunSummary, SimError> {
    let mut ctx = SimContext::new();
    ctx.command_args(&options.engine_args);
    let seed = ctx.seed()?.or(options.seed);

    let mut model = build_model(&options.model)?;
    let mut driver = SteppingDriver::new(
        options.driver,
        Stimulus::from_kind(options.stimulus, seed),
    )?;
    if options.check {
        driver = driver.with_checker();
    }

    let mut sink = match &options.trace {
        Some(trace) => {
            let mut sink = TraceSink::create(&trace.path, trace.timescale)?;
            sink.attach(model.as_ref(), trace.depth)?;
            Some(sink)
        }
        None => None,
    };

    observer.on_start(&ctx, model.as_ref());

    let outcome = driver.run(&mut ctx, model.as_mut(), sink.as_mut(), |step| {
        observer.on_step(step)
    })?;

    Ok(RunSummary {
        model: model.name().to_string(),
        iterations: outcome.iterations,
        final_time: outcome.final_time,
        trace_records: sink.as_ref().map_or(0, TraceSink::records),
        trace_path: sink.as_ref().and_then(TraceSink::path).map(Path::to_path_buf),
        stimulus: options.stimulus,
        seed: match options.stimulus {
            StimulusKind::Random => seed,
            StimulusKind::Toggle => None,
        },
        mismatches: outcome.mismatches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Recording {
        started: u32,
        lines: Vec<String>,
    }

    impl BenchObserver for Recording {
        fn on_start(&mut self, _ctx: &SimContext, model: &dyn Model) {
            assert_eq!(model.name(), "inverter");
            self.started += 1;
        }

        fn on_step(&mut self, step: &StepRecord) {
            self.lines.push(step.to_string());
        }
    }

    fn options_with_trace(dir: &TempDir, bound: u64) -> BenchOptions {
        BenchOptions {
            driver: DriverConfig {
                bound,
                ..DriverConfig::default()
            },
            trace: Some(TraceOptions {
                path: dir.path().join("simx.vcd"),
                depth: 99,
                timescale: Timescale::default(),
            }),
            ..BenchOptions::default()
        }
    }

    #[test]
    fn bench_options_default() {
        let options = BenchOptions::default();
        assert_eq!(options.model, "inverter");
        assert_eq!(options.driver.bound, 1000);
        assert!(options.trace.is_none());
        assert!(options.check);
    }

    #[test]
    fn run_writes_trace_and_reports_steps() {
        let tmp = TempDir::new().unwrap();
        let options = options_with_trace(&tmp, 4);
        let mut obs = Recording {
            started: 0,
            lines: Vec::new(),
        };
        let summary = run_bench(&options, &mut obs).unwrap();

        assert_eq!(obs.started, 1);
        assert_eq!(
            obs.lines,
            vec![
                "A is 1 , Z is 0",
                "A is 0 , Z is 1",
                "A is 1 , Z is 0",
                "A is 0 , Z is 1"
            ]
        );
        assert_eq!(summary.iterations, 4);
        assert_eq!(summary.trace_records, 4);
        assert!(summary.passed());
        assert_eq!(summary.trace_path, Some(tmp.path().join("simx.vcd")));

        let vcd = fs::read_to_string(tmp.path().join("simx.vcd")).unwrap();
        for t in 0..4 {
            assert!(vcd.contains(&format!("#{t}\n")));
        }
    }

    #[test]
    fn run_without_trace() {
        let options = BenchOptions {
            driver: DriverConfig {
                bound: 10,
                ..DriverConfig::default()
            },
            ..BenchOptions::default()
        };
        let summary = run_bench(&options, &mut NullObserver).unwrap();
        assert_eq!(summary.iterations, 10);
        assert_eq!(summary.trace_records, 0);
        assert!(summary.trace_path.is_none());
    }

    #[test]
    fn missing_trace_directory_fails_before_stepping() {
        let tmp = TempDir::new().unwrap();
        let mut options = options_with_trace(&tmp, 4);
        if let Some(trace) = options.trace.as_mut() {
            trace.path = tmp.path().join("no_such_dir").join("simx.vcd");
        }
        let mut obs = Recording {
            started: 0,
            lines: Vec::new(),
        };
        let err = run_bench(&options, &mut obs).unwrap_err();
        assert!(matches!(err, SimError::TraceOpen { .. }));
        assert_eq!(obs.started, 0);
        assert!(obs.lines.is_empty());
    }

    #[test]
    fn unknown_model_errors() {
        let options = BenchOptions {
            model: "nand".into(),
            ..BenchOptions::default()
        };
        let err = run_bench(&options, &mut NullObserver).unwrap_err();
        assert!(matches!(err, SimError::UnknownModel(_)));
    }

    #[test]
    fn seed_plusarg_overrides_option() {
        let options = BenchOptions {
            driver: DriverConfig {
                bound: 8,
                ..DriverConfig::default()
            },
            stimulus: StimulusKind::Random,
            seed: Some(1),
            engine_args: vec!["+stepbench+seed+5".into()],
            ..BenchOptions::default()
        };
        let summary = run_bench(&options, &mut NullObserver).unwrap();
        assert_eq!(summary.seed, Some(5));
        assert!(summary.passed());
    }

    struct Inputs(Vec<bool>);

    impl BenchObserver for Inputs {
        fn on_step(&mut self, step: &StepRecord) {
            self.0.push(step.input);
        }
    }

    fn random_inputs(seed: Option<u64>, engine_args: &[&str]) -> Vec<bool> {
        let options = BenchOptions {
            driver: DriverConfig {
                bound: 64,
                ..DriverConfig::default()
            },
            stimulus: StimulusKind::Random,
            seed,
            engine_args: engine_args.iter().map(|a| a.to_string()).collect(),
            ..BenchOptions::default()
        };
        let mut obs = Inputs(Vec::new());
        let summary = run_bench(&options, &mut obs).unwrap();
        assert!(summary.passed());
        obs.0
    }

    #[test]
    fn same_seed_reproduces_input_sequence() {
        let first = random_inputs(Some(42), &[]);
        assert_eq!(first.len(), 64);
        assert_eq!(first, random_inputs(Some(42), &[]));
        assert_eq!(first, random_inputs(None, &["+stepbench+seed+42"]));
        assert_eq!(first, random_inputs(Some(7), &["+stepbench+seed=42"]));
        assert_ne!(first, random_inputs(Some(43), &[]));
    }

    #[test]
    fn toggle_reports_no_seed() {
        let options = BenchOptions {
            driver: DriverConfig {
                bound: 2,
                ..DriverConfig::default()
            },
            seed: Some(9),
            ..BenchOptions::default()
        };
        let summary = run_bench(&options, &mut NullObserver).unwrap();
        assert_eq!(summary.seed, None);
    }

    #[test]
    fn summary_serializes_to_json() {
        let options = BenchOptions {
            driver: DriverConfig {
                bound: 3,
                ..DriverConfig::default()
            },
            ..BenchOptions::default()
        };
        let summary = run_bench(&options, &mut NullObserver).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["iterations"], 3);
        assert_eq!(json["final_time"], 3);
        assert_eq!(json["stimulus"], "toggle");
        assert!(json["mismatches"].as_array().unwrap().is_empty());
    }
}
