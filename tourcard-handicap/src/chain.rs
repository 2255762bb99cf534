//! Full handicap chain - a fold over the round history
//!
//! Level 1 - Orchestration and Level 2 - Phases
//!
//! Round 1 is seeded from starting handicaps. Each round is scored with the
//! handicaps the chain carries into it, and its outcome is the next round's
//! input. Any edit to an earlier score or to a starting handicap means the
//! chain is recomputed from round 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tourcard_core::{EngineError, PlayerId, Result, Round, RoundId, RoundPlayer, TourIndex, TourSnapshot};

use crate::policy::HandicapPolicy;
use crate::step::{rehandicap_round, AdjustmentStatus, PlayerRoundInput, RoundOutcome};

/// Handicaps in effect for one round, and what the round did to them
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundHandicaps {
    pub round_id: RoundId,
    pub round_no: u32,
    /// Playing handicap used for this round, for every tour member
    pub handicaps: BTreeMap<PlayerId, i32>,
    pub outcome: RoundOutcome,
}

/// The recomputed chain for a whole tour
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandicapChain {
    /// In play order
    pub rounds: Vec<RoundHandicaps>,
    /// Handicaps after the last round, for the round not yet created
    pub next_round: BTreeMap<PlayerId, i32>,
}

/// One line of a player's handicap history
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub round_id: RoundId,
    pub round_no: u32,
    pub playing_handicap: i32,
    pub score: Option<i32>,
    pub avg_rounded: Option<i32>,
    pub adjustment: i32,
    pub next: i32,
    pub status: AdjustmentStatus,
}

impl HandicapChain {
    /// Playing handicap for a round
    pub fn playing_handicap(&self, round_id: &str, player_id: &str) -> Result<i32> {
        let round = self
            .rounds
            .iter()
            .find(|r| r.round_id == round_id)
            .ok_or_else(|| EngineError::UnknownRound(round_id.to_string()))?;
        round
            .handicaps
            .get(player_id)
            .copied()
            .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))
    }

    /// Every `(round, player) -> playing handicap` value, for a batch write
    pub fn as_map(&self) -> BTreeMap<(RoundId, PlayerId), i32> {
        self.rounds
            .iter()
            .flat_map(|round| {
                round
                    .handicaps
                    .iter()
                    .map(|(player, ph)| ((round.round_id.clone(), player.clone()), *ph))
            })
            .collect()
    }

    /// Round-by-round history for one player
    pub fn history(&self, player_id: &str) -> Result<Vec<HistoryEntry>> {
        if !self.next_round.contains_key(player_id) {
            return Err(EngineError::UnknownPlayer(player_id.to_string()));
        }
        Ok(self
            .rounds
            .iter()
            .filter_map(|round| {
                let adj = round
                    .outcome
                    .adjustments
                    .iter()
                    .find(|a| a.player_id == player_id)?;
                Some(HistoryEntry {
                    round_id: round.round_id.clone(),
                    round_no: round.round_no,
                    playing_handicap: adj.incoming,
                    score: adj.score,
                    avg_rounded: round.outcome.avg_rounded,
                    adjustment: adj.adjustment,
                    next: adj.next,
                    status: adj.status,
                })
            })
            .collect())
    }
}

/// Recompute the whole chain from round 1 (Level 1 orchestration)
pub fn recompute_chain(index: &TourIndex, policy: &HandicapPolicy) -> Result<HandicapChain> {
    let rounds = index.ordered_rounds();
    check_history(rounds)?;

    let seed: BTreeMap<PlayerId, i32> = index
        .players()
        .iter()
        .map(|p| (p.id.clone(), p.starting_handicap))
        .collect();

    let mut chain = HandicapChain {
        rounds: Vec::with_capacity(rounds.len()),
        next_round: seed,
    };

    for round in rounds {
        let handicaps = chain.next_round.clone();
        let inputs = round_inputs(index, round, &handicaps)?;
        let outcome = rehandicap_round(&inputs, policy);

        tracing::debug!(
            "Round {} ({}): field average {:?}, {} adjusted",
            round.round_no,
            round.id,
            outcome.avg_rounded,
            outcome
                .adjustments
                .iter()
                .filter(|a| a.status == AdjustmentStatus::Adjusted)
                .count()
        );

        chain.next_round = outcome
            .adjustments
            .iter()
            .map(|a| (a.player_id.clone(), a.next))
            .collect();
        chain.rounds.push(RoundHandicaps {
            round_id: round.id.clone(),
            round_no: round.round_no,
            handicaps,
            outcome,
        });
    }

    Ok(chain)
}

/// Write a chain back into a copy of the snapshot.
///
/// Every tour member gets a participation row per round carrying the
/// chain's playing handicap; missing rows are added as not playing.
pub fn apply_chain(snapshot: &TourSnapshot, chain: &HandicapChain) -> TourSnapshot {
    let mut updated = snapshot.clone();
    let values = chain.as_map();

    for rp in &mut updated.round_players {
        if let Some(ph) = values.get(&(rp.round_id.clone(), rp.player_id.clone())) {
            rp.playing_handicap = Some(*ph);
        }
    }

    for ((round_id, player_id), ph) in &values {
        let exists = updated
            .round_players
            .iter()
            .any(|rp| &rp.round_id == round_id && &rp.player_id == player_id);
        if !exists {
            updated.round_players.push(RoundPlayer {
                round_id: round_id.clone(),
                player_id: player_id.clone(),
                playing: false,
                playing_handicap: Some(*ph),
            });
        }
    }

    updated
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Round numbers must start at 1 and never skip
fn check_history(rounds: &[&Round]) -> Result<()> {
    let mut expected_max = 1;
    for round in rounds {
        if round.round_no > expected_max || round.round_no == 0 {
            return Err(EngineError::MissingRoundHistory {
                expected: expected_max,
                found: round.round_no,
            });
        }
        expected_max = round.round_no + 1;
    }
    Ok(())
}

/// Score every tour member's round with the chain's handicaps
fn round_inputs(
    index: &TourIndex,
    round: &Round,
    handicaps: &BTreeMap<PlayerId, i32>,
) -> Result<Vec<PlayerRoundInput>> {
    index
        .players()
        .iter()
        .map(|player| {
            let playing_handicap = handicaps
                .get(&player.id)
                .copied()
                .unwrap_or(player.starting_handicap);
            let card = index.card_with_handicap(&round.id, &player.id, playing_handicap)?;
            Ok(PlayerRoundInput {
                player_id: player.id.clone(),
                starting_handicap: player.starting_handicap,
                playing_handicap,
                playing: card.is_some(),
                complete_total: card
                    .filter(|c| c.is_complete())
                    .map(|c| c.total_points),
            })
        })
        .collect()
}
