//! Row types owned by the row-store
//!
//! The engine only ever reads these. Field names follow the stored rows so a
//! snapshot can be dumped straight from the database into JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::raw_score::RawScore;

pub type PlayerId = String;
pub type RoundId = String;
pub type GroupId = String;
pub type CourseId = String;

/// Tee a player's hole specs are read from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tee {
    #[default]
    Men,
    Women,
}

/// Par and stroke index for one hole of a course from one tee
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoleSpec {
    pub course_id: CourseId,
    #[serde(default)]
    pub tee: Tee,
    pub hole: u8,
    pub par: i32,
    pub stroke_index: i32,
}

/// Tour member
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub tee: Tee,
    /// Set by an admin, bounds how far the playing handicap may drift
    pub starting_handicap: i32,
}

/// One round of the tour, played on one course
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub round_no: u32,
    pub course_id: CourseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Round {
    /// Display label ("Round 2" when unnamed)
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Round {}", self.round_no))
    }
}

/// A player's participation in a round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundPlayer {
    pub round_id: RoundId,
    pub player_id: PlayerId,
    #[serde(default)]
    pub playing: bool,
    /// Stored playing handicap for this round, if one has been written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playing_handicap: Option<i32>,
}

/// A single hole score
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub round_id: RoundId,
    pub player_id: PlayerId,
    pub hole: u8,
    #[serde(default)]
    pub score: RawScore,
}

/// Pair or team
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Pair,
    Team,
}

/// Ordered list of players competing together
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub kind: GroupKind,
    /// Member order breaks ties in team selection
    pub members: Vec<PlayerId>,
}

/// Tour header row
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Which rounds count toward a tour total, as stored in settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundRule {
    #[default]
    All,
    BestN,
}

/// Leaderboard settings row
///
/// Values are stored as entered by the admin; the leaderboard crate clamps
/// them when building its typed configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourSettings {
    #[serde(default)]
    pub individual_rule: RoundRule,
    #[serde(default = "default_best")]
    pub best_n: i32,
    #[serde(default)]
    pub individual_final_required: bool,
    #[serde(default)]
    pub pair_rule: RoundRule,
    #[serde(default = "default_best")]
    pub best_q: i32,
    #[serde(default)]
    pub pair_final_required: bool,
    #[serde(default = "default_team_best_y")]
    pub team_best_y: i32,
}

fn default_best() -> i32 {
    1
}

fn default_team_best_y() -> i32 {
    2
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            individual_rule: RoundRule::All,
            best_n: default_best(),
            individual_final_required: false,
            pair_rule: RoundRule::All,
            best_q: default_best(),
            pair_final_required: false,
            team_best_y: default_team_best_y(),
        }
    }
}
