//! Circuit models driven by the bench.
//!
//! The [`Model`] trait is the engine interface the stepping driver talks to:
//! named single-bit ports, an evaluation step that settles outputs from the
//! current inputs, and a finalize hook. [`Inverter`] is the built-in circuit.

use serde::{Deserialize, Serialize};
use stepbench_common::Logic;

use crate::error::SimError;

/// Opaque ID for a model port, valid only for the model that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PortId(u32);

impl PortId {
    /// Creates a `PortId` from a raw index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// Direction of a model port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Driven by the bench.
    Input,
    /// Computed by the model.
    Output,
}

/// Static description of one port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortInfo {
    /// The port's ID.
    pub id: PortId,
    /// The port's name as it appears in traces.
    pub name: &'static str,
    /// Whether the bench drives or reads the port.
    pub direction: PortDirection,
}

/// An executable circuit model.
///
/// Inputs written with [`set_input`](Model::set_input) take effect on the
/// next [`eval`](Model::eval). Once [`finish`](Model::finish) has run the model
/// rejects further input.
pub trait Model {
    /// The model's name, used as its scope in waveform traces.
    fn name(&self) -> &str;

    /// All ports in declaration order.
    fn ports(&self) -> &[PortInfo];

    /// Looks up a port by name.
    fn port_id(&self, name: &str) -> Option<PortId> {
        self.ports().iter().find(|p| p.name == name).map(|p| p.id)
    }

    /// Returns the current value of a port.
    fn value(&self, id: PortId) -> Result<Logic, SimError>;

    /// Drives an input port.
    fn set_input(&mut self, id: PortId, value: Logic) -> Result<(), SimError>;

    /// Recomputes all outputs from the current inputs.
    fn eval(&mut self);

    /// Runs the model's finalize hook.
    fn finish(&mut self);
}

/// Names accepted by [`build_model`].
pub const MODEL_NAMES: &[&str] = &["inverter"];

/// Instantiates a built-in model by name.
pub fn build_model(name: &str) -> Result<Box<dyn Model>, SimError> {
    match name {
        "inverter" => Ok(Box::new(Inverter::new())),
        other => Err(SimError::UnknownModel(other.to_string())),
    }
}

const RESET: PortId = PortId(0);
const A: PortId = PortId(1);
const Z: PortId = PortId(2);

static INVERTER_PORTS: [PortInfo; 3] = [
    PortInfo {
        id: RESET,
        name: "reset",
        direction: PortDirection::Input,
    },
    PortInfo {
        id: A,
        name: "A",
        direction: PortDirection::Input,
    },
    PortInfo {
        id: Z,
        name: "Z",
        direction: PortDirection::Output,
    },
];

/// A combinational inverter: `Z = !A`.
///
/// The `reset` port exists on the circuit but does not affect the output.
/// `Z` reads `X` until the first evaluation.
#[derive(Debug, Clone)]
pub struct Inverter {
    values: [Logic; 3],
    finished: bool,
}

impl Inverter {
    /// Creates an inverter with inputs low and the output unknown.
    pub fn new() -> Self {
        Self {
            values: [Logic::Zero, Logic::Zero, Logic::X],
            finished: false,
        }
    }

    /// Returns `true` once the finalize hook has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn port(&self, id: PortId) -> Result<&PortInfo, SimError> {
        INVERTER_PORTS
            .get(id.as_raw() as usize)
            .ok_or_else(|| SimError::InvalidSignalRef {
                reason: format!("inverter has no port {}", id.as_raw()),
            })
    }
}

impl Default for Inverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for Inverter {
    fn name(&self) -> &str {
        "inverter"
    }

    fn ports(&self) -> &[PortInfo] {
        &INVERTER_PORTS
    }

    fn value(&self, id: PortId) -> Result<Logic, SimError> {
        self.port(id)?;
        Ok(self.values[id.as_raw() as usize])
    }

    fn set_input(&mut self, id: PortId, value: Logic) -> Result<(), SimError> {
        let port = self.port(id)?;
        if port.direction != PortDirection::Input {
            return Err(SimError::NotAnInput(port.name.to_string()));
        }
        if self.finished {
            return Err(SimError::ModelFinished(self.name().to_string()));
        }
        self.values[id.as_raw() as usize] = value;
        Ok(())
    }

    fn eval(&mut self) {
        self.values[Z.as_raw() as usize] = !self.values[A.as_raw() as usize];
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
