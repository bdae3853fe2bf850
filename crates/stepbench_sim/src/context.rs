//! Simulation context: the time counter and engine command arguments.
//!
//! A [`SimContext`] is created once per run and owned by whoever drives the
//! model. Raw command-line arguments are forwarded to it verbatim; arguments
//! starting with `+` are kept as plusargs and can be queried by name.

use crate::error::SimError;
use crate::time::SimTime;

/// Plusarg carrying the random stimulus seed (`+stepbench+seed+<u64>`).
pub const SEED_PLUSARG: &str = "stepbench+seed";

/// Plusarg enabling the startup port dump (`+stepbench+debug`).
pub const DEBUG_PLUSARG: &str = "stepbench+debug";

/// Owns simulated time and the engine's view of the command line.
#[derive(Debug, Clone, Default)]
pub struct SimContext {
    time: SimTime,
    args: Vec<String>,
    plusargs: Vec<String>,
}

impl SimContext {
    /// Creates a context at time zero with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the command-line arguments forwarded to the engine.
    ///
    /// Arguments are appended to any recorded earlier. Arguments not starting
    /// with `+` are stored but otherwise ignored.
    pub fn command_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if let Some(plus) = arg.strip_prefix('+') {
                if !plus.is_empty() {
                    self.plusargs.push(plus.to_string());
                }
            }
            self.args.push(arg.to_string());
        }
    }

    /// Returns every argument recorded so far, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the value of the first plusarg matching `name`.
    ///
    /// `+name` yields `Some("")`; `+name+value` and `+name=value` yield
    /// `Some("value")`. A plusarg that merely shares a prefix with `name`
    /// does not match.
    pub fn plusarg(&self, name: &str) -> Option<&str> {
        self.plusargs.iter().find_map(|p| {
            let rest = p.strip_prefix(name)?;
            if rest.is_empty() {
                Some("")
            } else if rest.starts_with('+') || rest.starts_with('=') {
                Some(&rest[1..])
            } else {
                None
            }
        })
    }

    /// Returns the random stimulus seed given with `+stepbench+seed+<n>`.
    pub fn seed(&self) -> Result<Option<u64>, SimError> {
        match self.plusarg(SEED_PLUSARG) {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| SimError::InvalidPlusarg {
                    name: SEED_PLUSARG.to_string(),
                    value: value.to_string(),
                }),
        }
    }

    /// Returns `true` if `+stepbench+debug` was given.
    pub fn debug(&self) -> bool {
        self.plusarg(DEBUG_PLUSARG).is_some()
    }

    /// Returns the current simulated time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Advances simulated time by `increment` ticks.
    pub fn time_inc(&mut self, increment: u64) -> Result<(), SimError> {
        self.time = self
            .time
            .checked_advance(increment)
            .ok_or(SimError::TimeOverflow {
                time: self.time.ticks(),
                increment,
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let ctx = SimContext::new();
        assert_eq!(ctx.time(), SimTime::zero());
        assert!(ctx.args().is_empty());
    }

    #[test]
    fn time_inc_accumulates() {
        let mut ctx = SimContext::new();
        ctx.time_inc(1).unwrap();
        ctx.time_inc(5).unwrap();
        assert_eq!(ctx.time().ticks(), 6);
    }

    #[test]
    fn time_inc_overflow_errors_and_keeps_time() {
        let mut ctx = SimContext::new();
        ctx.time_inc(u64::MAX).unwrap();
        let err = ctx.time_inc(1).unwrap_err();
        assert!(matches!(err, SimError::TimeOverflow { .. }));
        assert_eq!(ctx.time().ticks(), u64::MAX);
    }

    #[test]
    fn args_are_kept_verbatim() {
        let mut ctx = SimContext::new();
        ctx.command_args(["sim", "-v", "+trace"]);
        assert_eq!(ctx.args(), ["sim", "-v", "+trace"]);
    }

    #[test]
    fn plusarg_forms() {
        let mut ctx = SimContext::new();
        ctx.command_args(["+flag", "+width=8", "+stepbench+seed+11"]);
        assert_eq!(ctx.plusarg("flag"), Some(""));
        assert_eq!(ctx.plusarg("width"), Some("8"));
        assert_eq!(ctx.plusarg("stepbench+seed"), Some("11"));
        assert_eq!(ctx.plusarg("missing"), None);
    }

    #[test]
    fn plusarg_prefix_does_not_match() {
        let mut ctx = SimContext::new();
        ctx.command_args(["+flagged"]);
        assert_eq!(ctx.plusarg("flag"), None);
    }

    #[test]
    fn first_plusarg_wins() {
        let mut ctx = SimContext::new();
        ctx.command_args(["+n=1", "+n=2"]);
        assert_eq!(ctx.plusarg("n"), Some("1"));
    }

    #[test]
    fn lone_plus_is_ignored() {
        let mut ctx = SimContext::new();
        ctx.command_args(["+"]);
        assert_eq!(ctx.plusarg(""), None);
    }

    #[test]
    fn seed_plusarg() {
        let mut ctx = SimContext::new();
        assert_eq!(ctx.seed().unwrap(), None);
        ctx.command_args(["+stepbench+seed+99"]);
        assert_eq!(ctx.seed().unwrap(), Some(99));
    }

    #[test]
    fn malformed_seed_errors() {
        let mut ctx = SimContext::new();
        ctx.command_args(["+stepbench+seed+abc"]);
        assert!(matches!(
            ctx.seed().unwrap_err(),
            SimError::InvalidPlusarg { .. }
        ));
    }

    #[test]
    fn debug_plusarg() {
        let mut ctx = SimContext::new();
        assert!(!ctx.debug());
        ctx.command_args(["+stepbench+debug"]);
        assert!(ctx.debug());
    }
}
