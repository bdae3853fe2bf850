//! Waveform timescale values with unit parsing and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A time unit accepted in a VCD `$timescale` declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Seconds.
    S,
    /// Milliseconds.
    Ms,
    /// Microseconds.
    Us,
    /// Nanoseconds.
    Ns,
    /// Picoseconds.
    Ps,
    /// Femtoseconds.
    Fs,
}

impl TimeUnit {
    /// Returns the VCD spelling of this unit.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::S => "s",
            TimeUnit::Ms => "ms",
            TimeUnit::Us => "us",
            TimeUnit::Ns => "ns",
            TimeUnit::Ps => "ps",
            TimeUnit::Fs => "fs",
        }
    }
}

/// The real time represented by one simulation tick in a waveform.
///
/// VCD only allows a magnitude of 1, 10 or 100, so parsing rejects anything
/// else. Parses strings like "1ns", "10 ps" and "100us".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timescale {
    magnitude: u16,
    unit: TimeUnit,
}

impl Timescale {
    /// Creates a timescale, returning `None` if `magnitude` is not 1, 10 or 100.
    pub fn new(magnitude: u16, unit: TimeUnit) -> Option<Self> {
        matches!(magnitude, 1 | 10 | 100).then_some(Self { magnitude, unit })
    }

    /// One nanosecond per tick.
    pub fn one_ns() -> Self {
        Self {
            magnitude: 1,
            unit: TimeUnit::Ns,
        }
    }

    /// Returns the magnitude (1, 10 or 100).
    pub fn magnitude(&self) -> u16 {
        self.magnitude
    }

    /// Returns the unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }
}

impl Default for Timescale {
    fn default() -> Self {
        Self::one_ns()
    }
}

impl fmt::Display for Timescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.as_str())
    }
}

/// Error type for parsing timescale strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timescale: '{input}' (use 1, 10 or 100 followed by s, ms, us, ns, ps or fs)")]
pub struct ParseTimescaleError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Timescale {
    type Err = ParseTimescaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseTimescaleError {
            input: s.to_string(),
        };

        let digit_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        if digit_end == 0 {
            return Err(err());
        }
        let magnitude: u16 = s[..digit_end].parse().map_err(|_| err())?;

        let unit = match s[digit_end..].trim().to_ascii_lowercase().as_str() {
            "s" => TimeUnit::S,
            "ms" => TimeUnit::Ms,
            "us" => TimeUnit::Us,
            "ns" => TimeUnit::Ns,
            "ps" => TimeUnit::Ps,
            "fs" => TimeUnit::Fs,
            _ => return Err(err()),
        };

        Timescale::new(magnitude, unit).ok_or_else(err)
    }
}
