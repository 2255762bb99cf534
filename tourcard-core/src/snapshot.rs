//! Tour snapshots - every row the engine needs, passed in explicitly
//!
//! `TourSnapshot` is the serde form of the rows. `TourIndex` borrows a
//! snapshot and builds the hash lookups used by scoring and aggregation.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::card::{score_round, CourseLayout, HoleLayout, RoundCard};
use crate::error::{EngineError, Result};
use crate::model::{
    Group, HoleSpec, Player, Round, RoundPlayer, ScoreRow, Tee, Tour, TourSettings,
};
use crate::raw_score::RawScore;
use crate::stableford::HOLES;

/// In-memory copy of a tour's rows
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TourSnapshot {
    #[serde(default)]
    pub tour: Tour,
    #[serde(default)]
    pub settings: TourSettings,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub hole_specs: Vec<HoleSpec>,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub round_players: Vec<RoundPlayer>,
    #[serde(default)]
    pub scores: Vec<ScoreRow>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl TourSnapshot {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that every id referenced by a row exists
    pub fn validate(&self) -> Result<()> {
        let player_known = |id: &str| self.players.iter().any(|p| p.id == id);
        let round_known = |id: &str| self.rounds.iter().any(|r| r.id == id);

        for rp in &self.round_players {
            if !round_known(&rp.round_id) {
                return Err(EngineError::UnknownRound(rp.round_id.clone()));
            }
            if !player_known(&rp.player_id) {
                return Err(EngineError::UnknownPlayer(rp.player_id.clone()));
            }
        }
        for score in &self.scores {
            if !round_known(&score.round_id) {
                return Err(EngineError::UnknownRound(score.round_id.clone()));
            }
            if !player_known(&score.player_id) {
                return Err(EngineError::UnknownPlayer(score.player_id.clone()));
            }
        }
        for group in &self.groups {
            if let Some(missing) = group.members.iter().find(|m| !player_known(m)) {
                return Err(EngineError::UnknownPlayer(missing.clone()));
            }
        }
        Ok(())
    }

    /// Rounds in play order: ascending round number, then creation time,
    /// then row order.
    pub fn ordered_rounds(&self) -> Vec<&Round> {
        let mut rounds: Vec<(usize, &Round)> = self.rounds.iter().enumerate().collect();
        rounds.sort_by(|(ia, a), (ib, b)| {
            a.round_no
                .cmp(&b.round_no)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| ia.cmp(ib))
        });
        rounds.into_iter().map(|(_, r)| r).collect()
    }
}

/// Hash lookups over a borrowed snapshot
pub struct TourIndex<'a> {
    snapshot: &'a TourSnapshot,
    players: FxHashMap<&'a str, &'a Player>,
    rounds: FxHashMap<&'a str, &'a Round>,
    ordered_rounds: Vec<&'a Round>,
    groups: FxHashMap<&'a str, &'a Group>,
    layouts: FxHashMap<&'a str, FxHashMap<Tee, CourseLayout>>,
    round_players: FxHashMap<&'a str, FxHashMap<&'a str, &'a RoundPlayer>>,
    scores: FxHashMap<&'a str, FxHashMap<&'a str, [RawScore; HOLES]>>,
}

impl<'a> TourIndex<'a> {
    /// Validate the snapshot and index its rows
    pub fn new(snapshot: &'a TourSnapshot) -> Result<Self> {
        snapshot.validate()?;

        let players = snapshot.players.iter().map(|p| (p.id.as_str(), p)).collect();
        let rounds = snapshot.rounds.iter().map(|r| (r.id.as_str(), r)).collect();
        let groups = snapshot.groups.iter().map(|g| (g.id.as_str(), g)).collect();

        let mut layouts: FxHashMap<&'a str, FxHashMap<Tee, CourseLayout>> = FxHashMap::default();
        for spec in &snapshot.hole_specs {
            let Some(slot) = hole_slot(spec.hole) else {
                tracing::warn!(
                    "Ignoring hole spec {} for course {}: hole out of range",
                    spec.hole,
                    spec.course_id
                );
                continue;
            };
            layouts
                .entry(spec.course_id.as_str())
                .or_default()
                .entry(spec.tee)
                .or_insert([None; HOLES])[slot] = Some(HoleLayout {
                par: spec.par,
                stroke_index: spec.stroke_index,
            });
        }

        let mut round_players: FxHashMap<&'a str, FxHashMap<&'a str, &'a RoundPlayer>> =
            FxHashMap::default();
        for rp in &snapshot.round_players {
            round_players
                .entry(rp.round_id.as_str())
                .or_default()
                .insert(rp.player_id.as_str(), rp);
        }

        let mut scores: FxHashMap<&'a str, FxHashMap<&'a str, [RawScore; HOLES]>> =
            FxHashMap::default();
        for row in &snapshot.scores {
            let Some(slot) = hole_slot(row.hole) else {
                tracing::warn!(
                    "Ignoring score for hole {} in round {}: hole out of range",
                    row.hole,
                    row.round_id
                );
                continue;
            };
            scores
                .entry(row.round_id.as_str())
                .or_default()
                .entry(row.player_id.as_str())
                .or_insert([RawScore::Blank; HOLES])[slot] = row.score;
        }

        Ok(Self {
            snapshot,
            players,
            rounds,
            ordered_rounds: snapshot.ordered_rounds(),
            groups,
            layouts,
            round_players,
            scores,
        })
    }

    pub fn snapshot(&self) -> &'a TourSnapshot {
        self.snapshot
    }

    /// Tour members in row order
    pub fn players(&self) -> &'a [Player] {
        &self.snapshot.players
    }

    /// Rounds in play order
    pub fn ordered_rounds(&self) -> &[&'a Round] {
        &self.ordered_rounds
    }

    /// The last round in play order
    pub fn final_round(&self) -> Option<&'a Round> {
        self.ordered_rounds.last().copied()
    }

    pub fn player(&self, player_id: &str) -> Result<&'a Player> {
        self.players
            .get(player_id)
            .copied()
            .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))
    }

    pub fn round(&self, round_id: &str) -> Result<&'a Round> {
        self.rounds
            .get(round_id)
            .copied()
            .ok_or_else(|| EngineError::UnknownRound(round_id.to_string()))
    }

    pub fn group(&self, group_id: &str) -> Result<&'a Group> {
        self.groups
            .get(group_id)
            .copied()
            .ok_or_else(|| EngineError::UnknownGroup(group_id.to_string()))
    }

    /// Participation row, if one exists
    pub fn round_player(&self, round_id: &str, player_id: &str) -> Option<&'a RoundPlayer> {
        self.round_players
            .get(round_id)
            .and_then(|by_player| by_player.get(player_id))
            .copied()
    }

    /// Whether the player is flagged as playing the round
    pub fn is_playing(&self, round_id: &str, player_id: &str) -> Result<bool> {
        self.round(round_id)?;
        self.player(player_id)?;
        Ok(self
            .round_player(round_id, player_id)
            .is_some_and(|rp| rp.playing))
    }

    /// Stored playing handicap for the round, falling back to the starting
    /// handicap when none has been written yet
    pub fn playing_handicap(&self, round_id: &str, player_id: &str) -> Result<i32> {
        let player = self.player(player_id)?;
        self.round(round_id)?;
        Ok(self
            .round_player(round_id, player_id)
            .and_then(|rp| rp.playing_handicap)
            .unwrap_or(player.starting_handicap))
    }

    /// Raw entries for a player's round; unentered holes are blank
    pub fn raw_scores(&self, round_id: &str, player_id: &str) -> [RawScore; HOLES] {
        self.scores
            .get(round_id)
            .and_then(|by_player| by_player.get(player_id))
            .copied()
            .unwrap_or([RawScore::Blank; HOLES])
    }

    /// Hole layout for a course and tee; unknown combinations have no holes
    pub fn layout(&self, course_id: &str, tee: Tee) -> CourseLayout {
        match self.layouts.get(course_id).and_then(|by_tee| by_tee.get(&tee)) {
            Some(layout) => *layout,
            None => {
                tracing::warn!("No hole specs for course {} ({:?} tee)", course_id, tee);
                [None; HOLES]
            }
        }
    }

    /// Card scored with the stored playing handicap.
    ///
    /// `None` when the player is not playing the round.
    pub fn card(&self, round_id: &str, player_id: &str) -> Result<Option<RoundCard>> {
        let playing_handicap = self.playing_handicap(round_id, player_id)?;
        self.card_with_handicap(round_id, player_id, playing_handicap)
    }

    /// Card scored with an explicit playing handicap
    pub fn card_with_handicap(
        &self,
        round_id: &str,
        player_id: &str,
        playing_handicap: i32,
    ) -> Result<Option<RoundCard>> {
        if !self.is_playing(round_id, player_id)? {
            return Ok(None);
        }
        let round = self.round(round_id)?;
        let player = self.player(player_id)?;
        let layout = self.layout(&round.course_id, player.tee);
        let scores = self.raw_scores(round_id, player_id);
        Ok(Some(score_round(&layout, &scores, playing_handicap)))
    }
}

fn hole_slot(hole: u8) -> Option<usize> {
    let slot = usize::from(hole).checked_sub(1)?;
    (slot < HOLES).then_some(slot)
}
