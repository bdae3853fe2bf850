//! Shared foundational types used across the stepbench workspace.
//!
//! This crate provides the four-state [`Logic`] value that flows through model
//! ports and waveform records, and the [`Timescale`] unit attached to every
//! waveform trace.

#![warn(missing_docs)]

pub mod logic;
pub mod timescale;

pub use logic::Logic;
pub use timescale::{ParseTimescaleError, Timescale, TimeUnit};
