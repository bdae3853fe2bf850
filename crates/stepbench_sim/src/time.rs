//! Simulated time as an abstract tick counter.
//!
//! [`SimTime`] counts ticks from zero and only moves forward. How long a tick
//! lasts in real time is a property of the waveform trace (its timescale),
//! not of the counter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in simulated time, measured in ticks since the start of the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(u64);

impl SimTime {
    /// Creates a time point at tick zero.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Creates a time point from a raw tick count.
    pub fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Returns the raw tick count.
    pub fn ticks(self) -> u64 {
        self.0
    }

    /// Returns the time `increment` ticks later, or `None` on overflow.
    pub fn checked_advance(self, increment: u64) -> Option<Self> {
        self.0.checked_add(increment).map(Self)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_time() {
        assert_eq!(SimTime::zero().ticks(), 0);
        assert_eq!(SimTime::default(), SimTime::zero());
    }

    #[test]
    fn advance_adds_increment() {
        let t = SimTime::from_ticks(5);
        assert_eq!(t.checked_advance(3), Some(SimTime::from_ticks(8)));
    }

    #[test]
    fn advance_overflow_is_none() {
        assert_eq!(SimTime::from_ticks(u64::MAX).checked_advance(1), None);
    }

    #[test]
    fn ordering() {
        assert!(SimTime::from_ticks(1) < SimTime::from_ticks(2));
    }

    #[test]
    fn display_is_tick_count() {
        assert_eq!(SimTime::from_ticks(42).to_string(), "42");
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&SimTime::from_ticks(7)).unwrap();
        assert_eq!(json, "7");
        let back: SimTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ticks(), 7);
    }
}
