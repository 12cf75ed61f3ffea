#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Loop detector that proves a run can no longer reach its goal.
//!
//! Every transition is a pure function of the configuration [`Signature`].
//! Once a signature repeats, all later configurations repeat as well, so the
//! goal is unreachable from that point on.

use std::collections::HashSet;

use maze_robot_core::Signature;

/// Number of directions the robot can face.
const FACINGS: u128 = 4;
/// Combinations of the breaker and inverted flags.
const MODE_COMBINATIONS: u128 = 4;

/// Verdict returned after recording a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Observation {
    /// The configuration had not been seen during this run.
    Novel,
    /// The configuration was already recorded; the run is cycling.
    Repeated,
}

/// Records observed configurations for the duration of a single run.
///
/// A detector is built fresh for every run.
#[derive(Clone, Debug, Default)]
pub struct LoopDetector {
    seen: HashSet<Signature>,
}

impl LoopDetector {
    /// Creates an empty detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `signature`, reporting whether it had been observed before.
    pub fn observe(&mut self, signature: Signature) -> Observation {
        if self.seen.insert(signature) {
            Observation::Novel
        } else {
            Observation::Repeated
        }
    }

    /// Number of distinct configurations recorded so far.
    #[must_use]
    pub fn configurations(&self) -> usize {
        self.seen.len()
    }
}

/// Upper bound on the distinct configurations a run can visit:
/// `cells * 4 facings * 2 breaker * 2 inverted * 2^breakable_walls`.
///
/// Returns `None` when the bound does not fit in a `u128`.
#[must_use]
pub fn state_space_bound(cells: usize, breakable_walls: usize) -> Option<u128> {
    let cells = u128::try_from(cells).ok()?;
    let exponent = u32::try_from(breakable_walls).ok()?;
    let destroyed_subsets = 2_u128.checked_pow(exponent)?;

    cells
        .checked_mul(FACINGS)?
        .checked_mul(MODE_COMBINATIONS)?
        .checked_mul(destroyed_subsets)
}
