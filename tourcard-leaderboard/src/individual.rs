//! Individual Stableford leaderboard

use rayon::prelude::*;
use tourcard_core::{Player, Result, TourIndex};

use crate::config::LeaderboardRule;
use crate::standings::{apply_rule, rank_rows, round_totals, LeaderboardRow};

/// A player's Stableford total for one round.
///
/// `None` when the player is not playing or has nothing recorded yet.
pub fn individual_round_total(index: &TourIndex, round_id: &str, player_id: &str) -> Result<Option<i32>> {
    Ok(index
        .card(round_id, player_id)?
        .filter(|card| card.thru > 0)
        .map(|card| card.total_points))
}

/// Leaderboard row for one player (unranked)
pub fn individual_row(index: &TourIndex, player: &Player, rule: LeaderboardRule) -> Result<LeaderboardRow> {
    let rounds = round_totals(index.ordered_rounds(), |round| {
        individual_round_total(index, &round.id, &player.id)
    })?;
    let mut row = LeaderboardRow::new(&player.id, &player.name, rounds);
    apply_rule(&mut row, rule, index.final_round().map(|r| r.id.as_str()));
    Ok(row)
}

/// Ranked rows for every tour member
pub fn individual_leaderboard(index: &TourIndex, rule: LeaderboardRule) -> Result<Vec<LeaderboardRow>> {
    let mut rows: Vec<LeaderboardRow> = index
        .players()
        .par_iter()
        .map(|player| individual_row(index, player, rule))
        .collect::<Result<_>>()?;
    rank_rows(&mut rows);
    Ok(rows)
}
