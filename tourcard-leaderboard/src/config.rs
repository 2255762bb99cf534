//! Leaderboard configuration
//!
//! Typed view of the stored tour settings. Out-of-range values entered by an
//! admin are clamped here instead of failing.

use serde::{Deserialize, Serialize};
use tourcard_core::{RoundRule, TourSettings};

/// Which rounds count toward an individual or pair tour total
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaderboardRule {
    /// Sum every round
    #[default]
    All,
    /// Sum the best `n` rounds, optionally forcing the final round in
    BestN { n: usize, final_required: bool },
}

impl LeaderboardRule {
    /// Best-N rule; `n <= 0` becomes 1
    pub fn best_n(n: i32, final_required: bool) -> Self {
        LeaderboardRule::BestN {
            n: clamp_count(n),
            final_required,
        }
    }

    fn from_settings(rule: RoundRule, n: i32, final_required: bool) -> Self {
        match rule {
            RoundRule::All => LeaderboardRule::All,
            RoundRule::BestN => Self::best_n(n, final_required),
        }
    }
}

/// Leaderboard format, each carrying its own rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaderboardKind {
    Individual(LeaderboardRule),
    /// Better-ball pairs
    Pair(LeaderboardRule),
    /// Best `best_y` positive scores per hole, minus one per zero
    Team { best_y: usize },
}

impl LeaderboardKind {
    /// Short name for headings
    pub fn title(&self) -> &'static str {
        match self {
            LeaderboardKind::Individual(_) => "Individual",
            LeaderboardKind::Pair(_) => "Pairs",
            LeaderboardKind::Team { .. } => "Teams",
        }
    }
}

/// Rules for all three leaderboards of a tour
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardConfig {
    pub individual: LeaderboardRule,
    pub pairs: LeaderboardRule,
    pub team_best_y: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            individual: LeaderboardRule::All,
            pairs: LeaderboardRule::All,
            team_best_y: 2,
        }
    }
}

impl From<&TourSettings> for LeaderboardConfig {
    fn from(settings: &TourSettings) -> Self {
        Self {
            individual: LeaderboardRule::from_settings(
                settings.individual_rule,
                settings.best_n,
                settings.individual_final_required,
            ),
            pairs: LeaderboardRule::from_settings(
                settings.pair_rule,
                settings.best_q,
                settings.pair_final_required,
            ),
            team_best_y: clamp_count(settings.team_best_y),
        }
    }
}

impl LeaderboardConfig {
    /// Set the individual rule
    pub fn with_individual(mut self, rule: LeaderboardRule) -> Self {
        self.individual = rule;
        self
    }

    /// Set the pairs rule
    pub fn with_pairs(mut self, rule: LeaderboardRule) -> Self {
        self.pairs = rule;
        self
    }

    /// Set best-Y for teams (0 becomes 1)
    pub fn with_team_best_y(mut self, best_y: usize) -> Self {
        self.team_best_y = best_y.max(1);
        self
    }

    pub fn individual_kind(&self) -> LeaderboardKind {
        LeaderboardKind::Individual(self.individual)
    }

    pub fn pair_kind(&self) -> LeaderboardKind {
        LeaderboardKind::Pair(self.pairs)
    }

    pub fn team_kind(&self) -> LeaderboardKind {
        LeaderboardKind::Team {
            best_y: self.team_best_y,
        }
    }
}

fn clamp_count(n: i32) -> usize {
    usize::try_from(n).unwrap_or(0).max(1)
}
