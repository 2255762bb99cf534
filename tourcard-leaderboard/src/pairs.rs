//! Better-ball pairs leaderboard

use rayon::prelude::*;
use tourcard_core::{Group, GroupKind, Result, RoundCard, TourIndex, HOLES};

use crate::config::LeaderboardRule;
use crate::standings::{apply_rule, rank_rows, round_totals, LeaderboardRow};

/// Better-ball points on a hole: the best member score.
///
/// Members without a card or a score are ignored; `None` if nobody scored.
pub fn better_ball_hole(cards: &[Option<RoundCard>], hole: u8) -> Option<i32> {
    cards
        .iter()
        .flatten()
        .filter_map(|card| card.points_on(hole))
        .max()
}

/// Pair total for one round, `None` when no member recorded anything
pub fn pair_round_total(index: &TourIndex, group: &Group, round_id: &str) -> Result<Option<i32>> {
    let cards = group
        .members
        .iter()
        .map(|member| index.card(round_id, member))
        .collect::<Result<Vec<_>>>()?;

    if !cards.iter().flatten().any(|card| card.thru > 0) {
        return Ok(None);
    }

    let total = (1..=HOLES as u8)
        .filter_map(|hole| better_ball_hole(&cards, hole))
        .sum();
    Ok(Some(total))
}

/// Leaderboard row for one pair (unranked)
pub fn pair_row(index: &TourIndex, group: &Group, rule: LeaderboardRule) -> Result<LeaderboardRow> {
    let rounds = round_totals(index.ordered_rounds(), |round| {
        pair_round_total(index, group, &round.id)
    })?;
    let mut row = LeaderboardRow::new(&group.id, &group.name, rounds);
    apply_rule(&mut row, rule, index.final_round().map(|r| r.id.as_str()));
    Ok(row)
}

/// Ranked rows for every pair of the tour
pub fn pair_leaderboard(index: &TourIndex, rule: LeaderboardRule) -> Result<Vec<LeaderboardRow>> {
    let pairs: Vec<&Group> = index
        .snapshot()
        .groups
        .iter()
        .filter(|g| g.kind == GroupKind::Pair)
        .collect();

    let mut rows: Vec<LeaderboardRow> = pairs
        .par_iter()
        .map(|group| pair_row(index, group, rule))
        .collect::<Result<_>>()?;
    rank_rows(&mut rows);
    Ok(rows)
}
