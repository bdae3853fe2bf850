//! Input stimulus: how the next input level is chosen each step.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Stimulus selection, independent of any RNG state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StimulusKind {
    /// Negate the previous input.
    #[default]
    Toggle,
    /// Draw a uniformly random bit.
    Random,
}

/// Produces successive input levels.
pub enum Stimulus {
    /// `next = !previous`.
    Toggle,
    /// Independent random bits from a seedable generator.
    Random(StdRng),
}

impl Stimulus {
    /// A toggling stimulus.
    pub fn toggle() -> Self {
        Stimulus::Toggle
    }

    /// A random stimulus. With a seed the sequence is reproducible; without
    /// one the generator is seeded from system entropy.
    pub fn random(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Stimulus::Random(rng)
    }

    /// Builds the stimulus for `kind`; `seed` only applies to `Random`.
    pub fn from_kind(kind: StimulusKind, seed: Option<u64>) -> Self {
        match kind {
            StimulusKind::Toggle => Self::toggle(),
            StimulusKind::Random => Self::random(seed),
        }
    }

    /// Returns the input level for the next step.
    pub fn next(&mut self, previous: bool) -> bool {
        match self {
            Stimulus::Toggle => !previous,
            Stimulus::Random(rng) => rng.gen(),
        }
    }
}
