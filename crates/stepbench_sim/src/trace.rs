//! Trace sink: snapshots of model ports written to a waveform recorder.
//!
//! A [`TraceSink`] is opened once, attached to a model to declare which ports
//! it records, then receives one [`dump`](TraceSink::dump) per simulated step.
//! Only ports whose value changed since the previous snapshot are written,
//! except for the first snapshot which writes every traced port.
//!
//! The sink finalizes its recorder when closed, or when dropped without being
//! closed, so a run that fails midway still leaves a well-formed file.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use stepbench_common::{Logic, Timescale};

use crate::error::SimError;
use crate::model::{Model, PortId};
use crate::time::SimTime;
use crate::waveform::{VcdRecorder, WaveformRecorder};

/// Scope name of the outermost trace level.
pub const TOP_SCOPE: &str = "TOP";

/// Records per-step port snapshots into a waveform.
pub struct TraceSink {
    recorder: Box<dyn WaveformRecorder>,
    path: Option<PathBuf>,
    attached: bool,
    traced: Vec<(PortId, Option<Logic>)>,
    records: u64,
    closed: bool,
}

impl TraceSink {
    /// Wraps an existing recorder.
    pub fn new(recorder: Box<dyn WaveformRecorder>) -> Self {
        Self {
            recorder,
            path: None,
            attached: false,
            traced: Vec::new(),
            records: 0,
            closed: false,
        }
    }

    /// Creates `path` and records VCD into it.
    ///
    /// The parent directory is not created; a missing directory surfaces as
    /// [`SimError::TraceOpen`].
    pub fn create(path: &Path, timescale: Timescale) -> Result<Self, SimError> {
        let file = File::create(path).map_err(|source| SimError::TraceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let recorder = VcdRecorder::with_timescale(BufWriter::new(file), timescale);
        let mut sink = Self::new(Box::new(recorder));
        sink.path = Some(path.to_path_buf());
        Ok(sink)
    }

    /// Returns the destination path, if the sink writes to a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Declares the model's ports up to `depth` hierarchy levels.
    ///
    /// Level 1 is the `TOP` scope holding the model's ports; level 2 adds the
    /// model's own scope nested inside it, aliasing the same signals. A depth
    /// of 0 traces nothing.
    pub fn attach(&mut self, model: &dyn Model, depth: u32) -> Result<(), SimError> {
        if self.closed {
            return Err(SimError::TraceState("is closed"));
        }
        if self.attached {
            return Err(SimError::TraceState("is already attached to a model"));
        }
        self.attached = true;
        if depth == 0 {
            return Ok(());
        }

        self.recorder.begin_scope(TOP_SCOPE)?;
        for port in model.ports() {
            self.recorder.register_signal(port.id, port.name)?;
        }
        if depth >= 2 {
            self.recorder.begin_scope(model.name())?;
            for port in model.ports() {
                self.recorder.register_signal(port.id, port.name)?;
            }
            self.recorder.end_scope()?;
        }
        self.recorder.end_scope()?;

        self.traced = model.ports().iter().map(|p| (p.id, None)).collect();
        Ok(())
    }

    /// Writes one snapshot of the traced ports tagged with `time`.
    pub fn dump(&mut self, time: SimTime, model: &dyn Model) -> Result<(), SimError> {
        if self.closed {
            return Err(SimError::TraceState("is closed"));
        }
        for (id, last) in &mut self.traced {
            let value = model.value(*id)?;
            if *last != Some(value) {
                self.recorder.record_change(time.ticks(), *id, value)?;
                *last = Some(value);
            }
        }
        self.records += 1;
        Ok(())
    }

    /// Number of snapshots taken so far.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Returns `true` once the sink has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Flushes and finalizes the waveform. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), SimError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.recorder.finalize()
    }
}

impl Drop for TraceSink {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            let _ = self.recorder.finalize();
        }
    }
}
