//! Simulation error types for the stepping driver and its collaborators.
//!
//! All errors that can occur while building a model, opening a trace, or
//! stepping a run are represented as variants of [`SimError`].

use std::io;
use std::path::PathBuf;

use crate::model::MODEL_NAMES;

/// Errors that can occur during simulation setup or execution.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// No model is registered under the requested name.
    #[error("unknown model '{0}' (available: {models})", models = MODEL_NAMES.join(", "))]
    UnknownModel(String),

    /// The model has no port with the given name.
    #[error("model '{model}' has no port named '{port}'")]
    PortNotFound {
        /// The model name.
        model: String,
        /// The requested port name.
        port: String,
    },

    /// A port ID did not refer to a port of the model.
    #[error("invalid signal reference: {reason}")]
    InvalidSignalRef {
        /// Description of why the signal reference is invalid.
        reason: String,
    },

    /// An output port was driven from the bench.
    #[error("port '{0}' is not an input")]
    NotAnInput(String),

    /// The model was used after its finalize hook ran.
    #[error("model '{0}' has already been finalized")]
    ModelFinished(String),

    /// The trace file could not be created.
    #[error("failed to open trace file {}: {source}", path.display())]
    TraceOpen {
        /// The destination that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// An I/O error occurred while writing waveform data.
    #[error("waveform I/O error: {0}")]
    WaveformIo(#[from] io::Error),

    /// The trace sink was used out of order.
    #[error("trace sink {0}")]
    TraceState(&'static str),

    /// The time increment was zero, so the run would never terminate.
    #[error("time increment must be at least 1")]
    ZeroIncrement,

    /// Advancing simulated time would exceed the representable range.
    #[error("simulated time overflow: {time} + {increment}")]
    TimeOverflow {
        /// The time before the increment.
        time: u64,
        /// The increment that overflowed.
        increment: u64,
    },

    /// An engine-defined plusarg carried a malformed value.
    #[error("invalid value '{value}' for plusarg +{name}")]
    InvalidPlusarg {
        /// The plusarg name, without the leading `+`.
        name: String,
        /// The rejected value.
        value: String,
    },
}
