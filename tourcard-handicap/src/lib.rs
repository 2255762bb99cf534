//! Tourcard Handicap - Round-by-round playing handicap adjustment
//!
//! After each round the field average of complete Stableford totals is
//! taken, and every player who completed the round moves a third of the
//! way from their score towards it. The result is clamped between half the
//! starting handicap (rounded up) and three above it.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: recompute_chain (whole tour from round 1)
//! - Level 2: per-round fold, write-back into a snapshot
//! - Level 3: rehandicap_round (one round's adjustments)
//! - Level 4: HandicapPolicy bounds

mod chain;
mod policy;
mod step;

pub use chain::{apply_chain, recompute_chain, HandicapChain, HistoryEntry, RoundHandicaps};
pub use policy::HandicapPolicy;
pub use step::{
    adjustment_for, field_average, rehandicap_round, AdjustmentStatus, PlayerAdjustment,
    PlayerRoundInput, RoundOutcome,
};
