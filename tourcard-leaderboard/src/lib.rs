//! Tourcard Leaderboard - Aggregation of Stableford points into standings
//!
//! This crate provides the tour leaderboards:
//! - Individual totals (all rounds or best N, optional mandatory final)
//! - Better-ball pairs under the same round rules
//! - Teams scoring the best Y positive scores per hole, minus zeros
//! - Shared selection policies and ranked standings
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: build_leaderboard (dispatch on leaderboard kind)
//! - Level 2: individual/pair/team leaderboards (one row per entrant)
//! - Level 3: round totals, team holes, contributions (steps)
//! - Level 4: selection policies, configuration

mod config;
mod individual;
mod pairs;
mod selection;
mod standings;
mod teams;

pub use config::{LeaderboardConfig, LeaderboardKind, LeaderboardRule};
pub use individual::{individual_leaderboard, individual_round_total, individual_row};
pub use pairs::{better_ball_hole, pair_leaderboard, pair_round_total, pair_row};
pub use selection::{pick_best_n, top_k_with_ties, HoleSelection};
pub use standings::{apply_rule, rank_rows, Leaderboard, LeaderboardRow, RoundTotal};
pub use teams::{
    member_contributions, team_detail, team_hole, team_leaderboard, team_round,
    team_round_from_cards, MemberContribution, TeamDetail, TeamHole, TeamRound,
};

use tourcard_core::{Result, TourIndex};

/// Build a ranked leaderboard (Level 1 dispatch)
pub fn build_leaderboard(index: &TourIndex, kind: LeaderboardKind) -> Result<Leaderboard> {
    tracing::debug!(
        "Building {} leaderboard over {} rounds",
        kind.title(),
        index.ordered_rounds().len()
    );

    let rows = match kind {
        LeaderboardKind::Individual(rule) => individual_leaderboard(index, rule)?,
        LeaderboardKind::Pair(rule) => pair_leaderboard(index, rule)?,
        LeaderboardKind::Team { best_y } => team_leaderboard(index, best_y.max(1))?,
    };

    Ok(Leaderboard { kind, rows })
}
