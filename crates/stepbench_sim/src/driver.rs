//! The stepping driver: a bounded loop that toggles the input, evaluates the
//! model and snapshots its ports into the trace.
//!
//! Each iteration, while simulated time is strictly below the bound:
//!
//! 1. pick the next input level from the stimulus
//! 2. drive the reset line to its configured level
//! 3. drive the input port `A`
//! 4. evaluate the model
//! 5. dump a trace snapshot tagged with the current time
//! 6. report the step (`A is 1 , Z is 0`) and check the output
//! 7. advance time by the increment
//!
//! After the loop the model's finalize hook runs once and the trace is closed.

use std::fmt;

use serde::Serialize;
use stepbench_common::Logic;

use crate::check::{Checker, Mismatch};
use crate::context::SimContext;
use crate::error::SimError;
use crate::model::{Model, PortId};
use crate::stimulus::Stimulus;
use crate::time::SimTime;
use crate::trace::TraceSink;

/// Name of the reset input port.
pub const RESET_PORT: &str = "reset";
/// Name of the stimulus input port.
pub const INPUT_PORT: &str = "A";
/// Name of the observed output port.
pub const OUTPUT_PORT: &str = "Z";

/// Parameters of the stepping loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// The loop runs while simulated time is strictly below this bound.
    pub bound: u64,
    /// Ticks added after every step. Must be non-zero.
    pub increment: u64,
    /// Level driven onto the reset line every step.
    pub reset: bool,
    /// Input level before the first step.
    pub initial_input: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            bound: 1000,
            increment: 1,
            reset: false,
            initial_input: false,
        }
    }
}

impl DriverConfig {
    /// Number of iterations a run with this configuration performs,
    /// `ceil(bound / increment)`.
    pub fn expected_iterations(&self) -> u64 {
        if self.increment == 0 {
            return 0;
        }
        self.bound.div_ceil(self.increment)
    }
}

/// What happened on one step, as seen after evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// Simulated time of the step.
    pub time: SimTime,
    /// Level driven onto the reset line.
    pub reset: bool,
    /// Level driven onto `A`.
    pub input: bool,
    /// Value of `Z` after evaluation.
    pub output: Logic,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A is {} , Z is {}",
            Logic::from_bool(self.input),
            self.output
        )
    }
}

/// Result of a completed stepping loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOutcome {
    /// Number of loop iterations executed.
    pub iterations: u64,
    /// Simulated time when the loop exited. Stays at the last step's time if
    /// the next advance would not fit in a `u64`.
    pub final_time: SimTime,
    /// Output mismatches, empty when checking was disabled.
    pub mismatches: Vec<Mismatch>,
}

/// Owns the loop state: current input level, stimulus and optional checker.
pub struct SteppingDriver {
    config: DriverConfig,
    input: bool,
    stimulus: Stimulus,
    checker: Option<Checker>,
}

impl SteppingDriver {
    /// Creates a driver. A zero increment is rejected because the loop would
    /// never reach the bound.
    pub fn new(config: DriverConfig, stimulus: Stimulus) -> Result<Self, SimError> {
        if config.increment == 0 {
            return Err(SimError::ZeroIncrement);
        }
        Ok(Self {
            config,
            input: config.initial_input,
            stimulus,
            checker: None,
        })
    }

    /// Enables the `Z == !A` output check.
    pub fn with_checker(mut self) -> Self {
        self.checker = Some(Checker::new());
        self
    }

    /// Runs the loop to the bound, then finalizes the model and closes the sink.
    ///
    /// `on_step` is called once per iteration after the snapshot is taken.
    /// Errors from the model or the sink abort the loop. The model's finalize
    /// hook and the sink's close still run before the first error is returned.
    pub fn run<F>(
        &mut self,
        ctx: &mut SimContext,
        model: &mut dyn Model,
        mut sink: Option<&mut TraceSink>,
        mut on_step: F,
    ) -> Result<DriverOutcome, SimError>
    where
        F: FnMut(&StepRecord),
    {
        let stepped = self.step_until_bound(ctx, model, sink.as_deref_mut(), &mut on_step);

        model.finish();
        let closed = match sink {
            Some(sink) => sink.close(),
            None => Ok(()),
        };
        let iterations = stepped?;
        closed?;

        Ok(DriverOutcome {
            iterations,
            final_time: ctx.time(),
            mismatches: self
                .checker
                .as_ref()
                .map(|c| c.mismatches().to_vec())
                .unwrap_or_default(),
        })
    }

    fn step_until_bound(
        &mut self,
        ctx: &mut SimContext,
        model: &mut dyn Model,
        mut sink: Option<&mut TraceSink>,
        on_step: &mut dyn FnMut(&StepRecord),
    ) -> Result<u64, SimError> {
        let reset_id = resolve_port(model, RESET_PORT)?;
        let input_id = resolve_port(model, INPUT_PORT)?;
        let output_id = resolve_port(model, OUTPUT_PORT)?;

        let mut iterations = 0;

        while ctx.time().ticks() < self.config.bound {
            self.input = self.stimulus.next(self.input);
            model.set_input(reset_id, Logic::from_bool(self.config.reset))?;
            model.set_input(input_id, Logic::from_bool(self.input))?;
            model.eval();

            if let Some(sink) = sink.as_mut() {
                sink.dump(ctx.time(), &*model)?;
            }

            let record = StepRecord {
                time: ctx.time(),
                reset: self.config.reset,
                input: self.input,
                output: model.value(output_id)?,
            };
            if let Some(checker) = self.checker.as_mut() {
                checker.observe(&record);
            }
            on_step(&record);

            iterations += 1;
            // Past u64::MAX is necessarily past the bound; time stays at the last step.
            if ctx.time().checked_advance(self.config.increment).is_none() {
                break;
            }
            ctx.time_inc(self.config.increment)?;
        }

        Ok(iterations)
    }
}

fn resolve_port(model: &dyn Model, name: &str) -> Result<PortId, SimError> {
    model.port_id(name).ok_or_else(|| SimError::PortNotFound {
        model: model.name().to_string(),
        port: name.to_string(),
    })
}
