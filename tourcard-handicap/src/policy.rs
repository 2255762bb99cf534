//! Handicap bounds
//!
//! Level 4 - Configuration

use serde::{Deserialize, Serialize};
use tourcard_core::half_rounded_up;

/// Limits on how far a playing handicap may drift from the starting one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandicapPolicy {
    /// Highest playing handicap is `starting + max_above_start`
    pub max_above_start: i32,
}

impl Default for HandicapPolicy {
    fn default() -> Self {
        Self { max_above_start: 3 }
    }
}

impl HandicapPolicy {
    /// Policy with a custom ceiling above the starting handicap
    pub fn with_max_above_start(max_above_start: i32) -> Self {
        Self { max_above_start }
    }

    /// Lowest allowed: half the starting handicap, rounded up
    pub fn min_for(&self, starting_handicap: i32) -> i32 {
        half_rounded_up(starting_handicap)
    }

    /// Highest allowed
    pub fn max_for(&self, starting_handicap: i32) -> i32 {
        starting_handicap.saturating_add(self.max_above_start)
    }

    /// Clamp a playing handicap into the player's bounds
    pub fn clamp(&self, playing_handicap: i32, starting_handicap: i32) -> i32 {
        let min = self.min_for(starting_handicap);
        let max = self.max_for(starting_handicap).max(min);
        playing_handicap.clamp(min, max)
    }
}
