//! Output checking: the inverter's output must be the NOT of its input.

use std::fmt;

use serde::Serialize;
use stepbench_common::Logic;

use crate::driver::StepRecord;
use crate::time::SimTime;

/// A step whose output did not match the expected inverse of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// Simulated time of the offending step.
    pub time: SimTime,
    /// Input level driven on that step.
    pub input: bool,
    /// Output observed after evaluation.
    pub output: Logic,
}

impl Mismatch {
    /// The output value the check expected.
    pub fn expected(&self) -> Logic {
        !Logic::from_bool(self.input)
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at {}: A is {}, expected Z = {} but Z is {}",
            self.time,
            Logic::from_bool(self.input),
            self.expected(),
            self.output
        )
    }
}

/// Collects steps where `Z != !A`.
#[derive(Debug, Clone, Default)]
pub struct Checker {
    mismatches: Vec<Mismatch>,
}

impl Checker {
    /// Creates an empty checker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks one step.
    pub fn observe(&mut self, step: &StepRecord) {
        if step.output != !Logic::from_bool(step.input) {
            self.mismatches.push(Mismatch {
                time: step.time,
                input: step.input,
                output: step.output,
            });
        }
    }

    /// Mismatches found so far, in step order.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }
}
