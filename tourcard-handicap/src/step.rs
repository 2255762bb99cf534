//! One rehandicapping step: a round's scores to next round's handicaps
//!
//! Level 3 - Steps

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tourcard_core::{round_half_up_ratio, PlayerId};

use crate::policy::HandicapPolicy;

/// Adjustments are a third of the distance from the field average
const ADJUSTMENT_DIVISOR: i64 = 3;

/// A tour member's state going into the step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRoundInput {
    pub player_id: PlayerId,
    pub starting_handicap: i32,
    /// Playing handicap used for the round
    pub playing_handicap: i32,
    /// Flagged as playing the round
    pub playing: bool,
    /// Stableford total, only when all 18 holes are recorded
    pub complete_total: Option<i32>,
}

/// Why a player's handicap did or did not move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentStatus {
    Adjusted,
    NotPlaying,
    /// Playing but the card has blank holes
    Incomplete,
    /// Nobody completed the round
    NoFieldAverage,
}

/// Result of the step for one player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAdjustment {
    pub player_id: PlayerId,
    pub incoming: i32,
    pub score: Option<i32>,
    /// Applied adjustment before clamping
    pub adjustment: i32,
    /// Playing handicap for the next round
    pub next: i32,
    pub status: AdjustmentStatus,
}

/// Result of the step for the whole field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Rounded field average; `None` when nobody completed the round
    pub avg_rounded: Option<i32>,
    /// In input order
    pub adjustments: Vec<PlayerAdjustment>,
}

/// Rounded (half up) mean of completed totals, `None` for an empty field
pub fn field_average(totals: &[i32]) -> Option<i32> {
    let sum: i64 = totals.iter().map(|&t| i64::from(t)).sum();
    round_half_up_ratio(sum, totals.len() as i64).map(|avg| avg as i32)
}

/// Handicap adjustment for a score against the rounded field average
pub fn adjustment_for(avg_rounded: i32, score: i32) -> i32 {
    let diff = i64::from(avg_rounded) - i64::from(score);
    round_half_up_ratio(diff, ADJUSTMENT_DIVISOR).unwrap_or(0) as i32
}

/// Compute next-round playing handicaps for every input player.
///
/// Players not playing, or playing with an incomplete card, carry their
/// handicap forward unchanged. Players are independent once the field
/// average is known, so they are adjusted in parallel.
pub fn rehandicap_round(inputs: &[PlayerRoundInput], policy: &HandicapPolicy) -> RoundOutcome {
    let completed: Vec<i32> = inputs
        .iter()
        .filter(|p| p.playing)
        .filter_map(|p| p.complete_total)
        .collect();
    let avg_rounded = field_average(&completed);

    let adjustments = inputs
        .par_iter()
        .map(|input| adjust_player(input, avg_rounded, policy))
        .collect();

    RoundOutcome {
        avg_rounded,
        adjustments,
    }
}

fn adjust_player(input: &PlayerRoundInput, avg_rounded: Option<i32>, policy: &HandicapPolicy) -> PlayerAdjustment {
    let carry = |status: AdjustmentStatus| PlayerAdjustment {
        player_id: input.player_id.clone(),
        incoming: input.playing_handicap,
        score: input.complete_total,
        adjustment: 0,
        next: input.playing_handicap,
        status,
    };

    if !input.playing {
        return carry(AdjustmentStatus::NotPlaying);
    }
    let Some(score) = input.complete_total else {
        return carry(AdjustmentStatus::Incomplete);
    };
    let Some(avg) = avg_rounded else {
        return carry(AdjustmentStatus::NoFieldAverage);
    };

    let adjustment = adjustment_for(avg, score);
    PlayerAdjustment {
        player_id: input.player_id.clone(),
        incoming: input.playing_handicap,
        score: Some(score),
        adjustment,
        next: policy.clamp(
            input.playing_handicap.saturating_add(adjustment),
            input.starting_handicap,
        ),
        status: AdjustmentStatus::Adjusted,
    }
}
