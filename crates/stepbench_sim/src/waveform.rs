//! Waveform recording for simulation output.
//!
//! The [`WaveformRecorder`] trait abstracts waveform output. [`VcdRecorder`]
//! implements the IEEE 1364 Value Change Dump (VCD) format, producing text
//! files that can be viewed in GTKWave, Surfer, or other waveform viewers.

use std::io::Write;

use stepbench_common::{Logic, Timescale};

use crate::error::SimError;
use crate::model::PortId;

/// Trait for recording simulation waveforms.
pub trait WaveformRecorder {
    /// Declares a single-bit signal inside the current scope.
    ///
    /// Declaring the same port again (in another scope) creates an alias that
    /// shares the first declaration's value changes.
    fn register_signal(&mut self, id: PortId, name: &str) -> Result<(), SimError>;

    /// Opens a new scope (hierarchy level) in the waveform.
    fn begin_scope(&mut self, name: &str) -> Result<(), SimError>;

    /// Closes the current scope.
    fn end_scope(&mut self) -> Result<(), SimError>;

    /// Records a value change at the given time (in ticks).
    fn record_change(&mut self, time: u64, id: PortId, value: Logic) -> Result<(), SimError>;

    /// Finalizes the waveform output (flush, close open sections).
    fn finalize(&mut self) -> Result<(), SimError>;
}

/// VCD (Value Change Dump) format recorder following IEEE 1364.
///
/// Signal identifiers use printable ASCII characters starting from `!` (0x21).
/// The first timestamp's changes are wrapped in a `$dumpvars` section.
pub struct VcdRecorder<W: Write> {
    writer: W,
    timescale: Timescale,
    id_map: Vec<(PortId, String)>,
    header_written: bool,
    current_time: Option<u64>,
    dumpvars_open: bool,
}

impl<W: Write> VcdRecorder<W> {
    /// Creates a new VCD recorder with a 1ns timescale.
    pub fn new(writer: W) -> Self {
        Self::with_timescale(writer, Timescale::default())
    }

    /// Creates a new VCD recorder declaring the given timescale.
    pub fn with_timescale(writer: W, timescale: Timescale) -> Self {
        Self {
            writer,
            timescale,
            id_map: Vec::new(),
            header_written: false,
            current_time: None,
            dumpvars_open: false,
        }
    }

    /// Consumes the recorder and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_header(&mut self) -> Result<(), SimError> {
        if !self.header_written {
            writeln!(self.writer, "$version")?;
            writeln!(self.writer, "  stepbench {}", env!("CARGO_PKG_VERSION"))?;
            writeln!(self.writer, "$end")?;
            writeln!(self.writer, "$timescale")?;
            writeln!(self.writer, "  {}", self.timescale)?;
            writeln!(self.writer, "$end")?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Generates a VCD identifier code from a sequential index.
    ///
    /// Multi-character codes are generated for indices >= 94.
    fn make_id_code(index: u32) -> String {
        let mut result = String::new();
        let mut idx = index;
        loop {
            let c = (b'!' + (idx % 94) as u8) as char;
            result.push(c);
            idx /= 94;
            if idx == 0 {
                break;
            }
            idx -= 1;
        }
        result
    }
}

impl<W: Write> WaveformRecorder for VcdRecorder<W> {
    fn register_signal(&mut self, id: PortId, name: &str) -> Result<(), SimError> {
        self.ensure_header()?;
        if self.current_time.is_some() {
            return Err(SimError::TraceState("cannot declare signals after the first change"));
        }
        let id_code = match self.id_map.iter().find(|(pid, _)| *pid == id) {
            Some((_, code)) => code.clone(),
            None => {
                let code = Self::make_id_code(self.id_map.len() as u32);
                self.id_map.push((id, code.clone()));
                code
            }
        };
        writeln!(self.writer, "$var wire 1 {id_code} {name} $end")?;
        Ok(())
    }

    fn begin_scope(&mut self, name: &str) -> Result<(), SimError> {
        self.ensure_header()?;
        writeln!(self.writer, "$scope module {name} $end")?;
        Ok(())
    }

    fn end_scope(&mut self) -> Result<(), SimError> {
        writeln!(self.writer, "$upscope $end")?;
        Ok(())
    }

    fn record_change(&mut self, time: u64, id: PortId, value: Logic) -> Result<(), SimError> {
        let id_code = self
            .id_map
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, code)| code.clone())
            .ok_or_else(|| SimError::InvalidSignalRef {
                reason: format!("unregistered VCD signal {}", id.as_raw()),
            })?;

        match self.current_time {
            None => {
                self.ensure_header()?;
                writeln!(self.writer, "$enddefinitions $end")?;
                writeln!(self.writer, "#{time}")?;
                writeln!(self.writer, "$dumpvars")?;
                self.dumpvars_open = true;
                self.current_time = Some(time);
            }
            Some(t) if t != time => {
                if self.dumpvars_open {
                    writeln!(self.writer, "$end")?;
                    self.dumpvars_open = false;
                }
                writeln!(self.writer, "#{time}")?;
                self.current_time = Some(time);
            }
            Some(_) => {}
        }

        writeln!(self.writer, "{}{id_code}", value.vcd_char())?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), SimError> {
        if self.current_time.is_none() {
            // No changes recorded, still close the definitions
            self.ensure_header()?;
            writeln!(self.writer, "$enddefinitions $end")?;
            self.current_time = Some(0);
        }
        if self.dumpvars_open {
            writeln!(self.writer, "$end")?;
            self.dumpvars_open = false;
        }
        self.writer.flush()?;
        Ok(())
    }
}
