//! Leaderboard rows, counted-round selection and positions

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tourcard_core::{Round, RoundId};

use crate::config::{LeaderboardKind, LeaderboardRule};
use crate::selection::pick_best_n;

/// An entrant's total for one round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTotal {
    pub round_id: RoundId,
    pub round_no: u32,
    /// `None` when nothing was recorded for the round
    pub points: Option<i32>,
    /// Whether the round counts toward the tour total
    pub counted: bool,
}

/// One line of a leaderboard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// Player id or group id
    pub entrant_id: String,
    pub name: String,
    pub rounds: Vec<RoundTotal>,
    pub total: i32,
    /// 1-based; tied totals share a position
    pub position: usize,
    /// "1", "T2", ...
    pub position_label: String,
}

impl LeaderboardRow {
    /// Row with totals not yet counted or ranked
    pub fn new(entrant_id: &str, name: &str, rounds: Vec<RoundTotal>) -> Self {
        Self {
            entrant_id: entrant_id.to_string(),
            name: name.to_string(),
            rounds,
            total: 0,
            position: 0,
            position_label: String::new(),
        }
    }

    /// Number of rounds with a recorded total
    pub fn rounds_played(&self) -> usize {
        self.rounds.iter().filter(|r| r.points.is_some()).count()
    }

    /// Total for a round, if recorded
    pub fn points_for(&self, round_id: &str) -> Option<i32> {
        self.rounds
            .iter()
            .find(|r| r.round_id == round_id)
            .and_then(|r| r.points)
    }
}

/// A ranked leaderboard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub kind: LeaderboardKind,
    /// Sorted by total (descending), then name
    pub rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Top row
    pub fn leader(&self) -> Option<&LeaderboardRow> {
        self.rows.first()
    }

    /// Get top N rows
    pub fn top_n(&self, n: usize) -> &[LeaderboardRow] {
        let n = n.min(self.rows.len());
        &self.rows[..n]
    }

    /// Row for a player or group id
    pub fn row_for(&self, entrant_id: &str) -> Option<&LeaderboardRow> {
        self.rows.iter().find(|r| r.entrant_id == entrant_id)
    }
}

/// Build the per-round totals for an entrant in round order
pub fn round_totals<F>(rounds: &[&Round], mut points_for: F) -> tourcard_core::Result<Vec<RoundTotal>>
where
    F: FnMut(&Round) -> tourcard_core::Result<Option<i32>>,
{
    rounds
        .iter()
        .map(|round| {
            Ok(RoundTotal {
                round_id: round.id.clone(),
                round_no: round.round_no,
                points: points_for(*round)?,
                counted: false,
            })
        })
        .collect()
}

/// Mark counted rounds under `rule` and set the row total.
///
/// `final_round_id` is the last round of the tour in play order.
pub fn apply_rule(row: &mut LeaderboardRow, rule: LeaderboardRule, final_round_id: Option<&str>) {
    match rule {
        LeaderboardRule::All => {
            for round in &mut row.rounds {
                round.counted = round.points.is_some();
            }
        }
        LeaderboardRule::BestN { n, final_required } => {
            let totals: FxHashMap<&str, i32> = row
                .rounds
                .iter()
                .filter_map(|r| r.points.map(|p| (r.round_id.as_str(), p)))
                .collect();
            let order: Vec<&str> = row.rounds.iter().map(|r| r.round_id.as_str()).collect();
            let picked: Vec<String> = pick_best_n(&totals, &order, n, final_round_id, final_required)
                .into_iter()
                .map(str::to_string)
                .collect();
            for round in &mut row.rounds {
                round.counted = picked.contains(&round.round_id);
            }
        }
    }
    row.total = row
        .rounds
        .iter()
        .filter(|r| r.counted)
        .filter_map(|r| r.points)
        .sum();
}

/// Sort rows by total (descending) then name, and assign shared positions
pub fn rank_rows(rows: &mut [LeaderboardRow]) {
    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.entrant_id.cmp(&b.entrant_id))
    });

    let totals: Vec<i32> = rows.iter().map(|r| r.total).collect();
    for (i, row) in rows.iter_mut().enumerate() {
        let first = totals.iter().position(|&t| t == row.total).unwrap_or(i);
        let tied = totals.iter().filter(|&&t| t == row.total).count() > 1;
        row.position = first + 1;
        row.position_label = if tied {
            format!("T{}", row.position)
        } else {
            row.position.to_string()
        };
    }
}
