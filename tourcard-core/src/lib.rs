//! Tourcard Core - Rows, scoring and lookups for multi-round golf tours
//!
//! This crate provides the leaf layer of the tour engine:
//! - Row types read from the row-store (players, rounds, hole specs, scores)
//! - Raw score parsing with blank/pickup fallbacks
//! - Net Stableford scoring for a single hole
//! - Round cards (hole-by-hole points, out/in/total)
//! - Snapshot loading, validation and indexed lookups

pub mod card;
pub mod error;
pub mod model;
pub mod raw_score;
pub mod rounding;
pub mod snapshot;
pub mod stableford;

// Re-exports for convenient access
pub use card::{score_round, CourseLayout, HoleLayout, HoleResult, RoundCard};
pub use error::{EngineError, Result};
pub use model::{
    Group, GroupId, GroupKind, HoleSpec, Player, PlayerId, Round, RoundId, RoundPlayer, RoundRule,
    ScoreRow, Tee, Tour, TourSettings,
};
pub use raw_score::RawScore;
pub use rounding::{half_rounded_up, round_half_up, round_half_up_ratio};
pub use snapshot::{TourIndex, TourSnapshot};
pub use stableford::{points_for_hole, shots_received, HOLES, MAX_POINTS};
