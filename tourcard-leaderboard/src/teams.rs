//! Team leaderboard - best Y positive scores per hole, minus one per zero
//!
//! Also produces the per-member breakdown used by the team detail view.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tourcard_core::{Group, GroupId, GroupKind, PlayerId, Result, RoundCard, RoundId, TourIndex, HOLES};

use crate::selection::top_k_with_ties;
use crate::standings::{rank_rows, LeaderboardRow, RoundTotal};

/// One hole of a team's round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamHole {
    pub hole: u8,
    /// Per member in group order; `None` means no recorded score
    pub member_points: Vec<Option<i32>>,
    /// Member indices summed into the total
    pub counted: Vec<usize>,
    /// Member indices tied with the cutoff but not summed
    pub qualifying: Vec<usize>,
    /// Members who scored exactly zero
    pub zero_count: usize,
    pub total: i32,
}

/// Score one hole from member points.
///
/// Sums the counted positive scores and subtracts one per member on zero.
/// Members with no recorded score are neither counted nor penalised. A
/// pickup is a recorded score worth 0, so it costs the team a point.
pub fn team_hole(hole: u8, member_points: &[Option<i32>], best_y: usize) -> TeamHole {
    let selection = top_k_with_ties(member_points, best_y);
    let zero_count = member_points.iter().filter(|p| **p == Some(0)).count();
    let counted_sum: i32 = selection
        .counted
        .iter()
        .filter_map(|&i| member_points[i])
        .sum();

    TeamHole {
        hole,
        member_points: member_points.to_vec(),
        counted: selection.counted,
        qualifying: selection.qualifying,
        zero_count,
        total: counted_sum - zero_count as i32,
    }
}

/// A team's round, hole by hole
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRound {
    pub round_id: RoundId,
    pub round_no: u32,
    pub holes: Vec<TeamHole>,
    pub total: i32,
    /// Whether any member has a recorded score in the round
    pub recorded: bool,
}

/// Score a team's round from member cards (`None` for non-playing members)
pub fn team_round_from_cards(
    round_id: &str,
    round_no: u32,
    cards: &[Option<RoundCard>],
    best_y: usize,
) -> TeamRound {
    let holes: Vec<TeamHole> = (1..=HOLES as u8)
        .map(|hole| {
            let member_points: Vec<Option<i32>> = cards
                .iter()
                .map(|card| card.as_ref().and_then(|c| c.points_on(hole)))
                .collect();
            team_hole(hole, &member_points, best_y)
        })
        .collect();

    TeamRound {
        round_id: round_id.to_string(),
        round_no,
        total: holes.iter().map(|h| h.total).sum(),
        recorded: cards.iter().flatten().any(|card| card.thru > 0),
        holes,
    }
}

/// Score a team's round from the index
pub fn team_round(index: &TourIndex, group: &Group, round_id: &str, best_y: usize) -> Result<TeamRound> {
    let round = index.round(round_id)?;
    let cards = group
        .members
        .iter()
        .map(|member| index.card(round_id, member))
        .collect::<Result<Vec<_>>>()?;
    Ok(team_round_from_cards(&round.id, round.round_no, &cards, best_y))
}

/// A member's share of the team total
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberContribution {
    pub player_id: PlayerId,
    pub name: String,
    /// Own points on holes where the member was counted
    pub counted_points: i32,
    /// Holes where the member was counted
    pub counted_holes: usize,
    /// Holes where the member tied the cutoff without being counted
    pub qualifying_holes: usize,
    /// Holes scored as zero, each costing the team one point
    pub zeros: usize,
    /// `counted_points - zeros`
    pub contribution: i32,
}

/// Team breakdown across the tour
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDetail {
    pub group_id: GroupId,
    pub name: String,
    pub best_y: usize,
    pub rounds: Vec<TeamRound>,
    pub total: i32,
    pub contributions: Vec<MemberContribution>,
}

/// Accumulate member contributions over scored team rounds.
///
/// Contributions summed over all members equal the team total.
pub fn member_contributions(index: &TourIndex, group: &Group, rounds: &[TeamRound]) -> Result<Vec<MemberContribution>> {
    group
        .members
        .iter()
        .enumerate()
        .map(|(m, player_id)| {
            let player = index.player(player_id)?;
            let mut counted_points = 0;
            let mut counted_holes = 0;
            let mut qualifying_holes = 0;
            let mut zeros = 0;

            for hole in rounds.iter().flat_map(|r| r.holes.iter()) {
                if hole.counted.contains(&m) {
                    counted_points += hole.member_points[m].unwrap_or(0);
                    counted_holes += 1;
                }
                if hole.qualifying.contains(&m) {
                    qualifying_holes += 1;
                }
                if hole.member_points[m] == Some(0) {
                    zeros += 1;
                }
            }

            Ok(MemberContribution {
                player_id: player.id.clone(),
                name: player.name.clone(),
                counted_points,
                counted_holes,
                qualifying_holes,
                zeros,
                contribution: counted_points - zeros as i32,
            })
        })
        .collect()
}

/// Full breakdown for one team
pub fn team_detail(index: &TourIndex, group_id: &str, best_y: usize) -> Result<TeamDetail> {
    let group = index.group(group_id)?;
    let rounds = index
        .ordered_rounds()
        .iter()
        .map(|round| team_round(index, group, &round.id, best_y))
        .collect::<Result<Vec<_>>>()?;
    let contributions = member_contributions(index, group, &rounds)?;

    Ok(TeamDetail {
        group_id: group.id.clone(),
        name: group.name.clone(),
        best_y,
        total: rounds.iter().map(|r| r.total).sum(),
        rounds,
        contributions,
    })
}

/// Leaderboard row for one team (unranked); every recorded round counts
pub fn team_row(index: &TourIndex, group: &Group, best_y: usize) -> Result<LeaderboardRow> {
    let rounds = index
        .ordered_rounds()
        .iter()
        .map(|round| {
            let scored = team_round(index, group, &round.id, best_y)?;
            Ok(RoundTotal {
                round_id: scored.round_id,
                round_no: scored.round_no,
                points: scored.recorded.then_some(scored.total),
                counted: scored.recorded,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut row = LeaderboardRow::new(&group.id, &group.name, rounds);
    row.total = row.rounds.iter().filter_map(|r| r.points).sum();
    Ok(row)
}

/// Ranked rows for every team of the tour
pub fn team_leaderboard(index: &TourIndex, best_y: usize) -> Result<Vec<LeaderboardRow>> {
    let teams: Vec<&Group> = index
        .snapshot()
        .groups
        .iter()
        .filter(|g| g.kind == GroupKind::Team)
        .collect();

    let mut rows: Vec<LeaderboardRow> = teams
        .par_iter()
        .map(|group| team_row(index, group, best_y))
        .collect::<Result<_>>()?;
    rank_rows(&mut rows);
    Ok(rows)
}
