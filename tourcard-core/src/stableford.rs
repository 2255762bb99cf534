//! Net Stableford scoring for a single hole

use crate::raw_score::RawScore;

/// Holes on a card
pub const HOLES: usize = 18;

/// Cap on points from one hole
pub const MAX_POINTS: i32 = 10;

/// Points for net par
const NET_PAR_POINTS: i64 = 2;

/// Handicap strokes received on a hole.
///
/// Every hole gets `hcp / 18`; the remaining `hcp % 18` strokes go to the
/// holes with the lowest stroke index. Negative handicaps count as scratch.
pub fn shots_received(playing_handicap: i32, stroke_index: i32) -> i32 {
    let hcp = playing_handicap.max(0);
    let base = hcp / HOLES as i32;
    let rem = hcp % HOLES as i32;
    base + i32::from(stroke_index <= rem)
}

/// Net Stableford points for one hole, always within `[0, MAX_POINTS]`.
///
/// Blank and pickup score 0. Two points for net par, one more per stroke
/// under, one fewer per stroke over.
pub fn points_for_hole(raw: RawScore, par: i32, stroke_index: i32, playing_handicap: i32) -> i32 {
    let strokes = match raw {
        RawScore::Strokes(n) => i64::from(n),
        RawScore::Pickup | RawScore::Blank => return 0,
    };

    let net = strokes - i64::from(shots_received(playing_handicap, stroke_index));
    let points = NET_PAR_POINTS + (i64::from(par) - net);
    points.clamp(0, i64::from(MAX_POINTS)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_shots_received_distribution() {
        // 10 strokes: one each on SI 1-10
        assert_eq!(shots_received(10, 1), 1);
        assert_eq!(shots_received(10, 10), 1);
        assert_eq!(shots_received(10, 11), 0);

        // 20 strokes: one everywhere, two on SI 1-2
        assert_eq!(shots_received(20, 2), 2);
        assert_eq!(shots_received(20, 3), 1);

        // 18 strokes: exactly one everywhere
        assert_eq!(shots_received(18, 1), 1);
        assert_eq!(shots_received(18, 18), 1);
    }

    #[test]
    fn test_negative_handicap_is_scratch() {
        assert_eq!(shots_received(-4, 1), 0);
        assert_eq!(points_for_hole(RawScore::Strokes(4), 4, 1, -4), 2);
    }

    #[test]
    fn test_points_basic() {
        // Net par
        assert_eq!(points_for_hole(RawScore::Strokes(5), 4, 1, 10), 2);
        // Net bogey
        assert_eq!(points_for_hole(RawScore::Strokes(5), 4, 11, 10), 1);
        // Net birdie
        assert_eq!(points_for_hole(RawScore::Strokes(3), 4, 18, 0), 3);
        // Net double bogey or worse
        assert_eq!(points_for_hole(RawScore::Strokes(6), 4, 18, 0), 0);
        assert_eq!(points_for_hole(RawScore::Strokes(9), 4, 18, 0), 0);
    }

    #[test]
    fn test_points_capped() {
        assert_eq!(points_for_hole(RawScore::Strokes(0), 5, 1, 54), MAX_POINTS);
        assert_eq!(points_for_hole(RawScore::Strokes(1), 5, 1, 36), 8);
    }

    #[test]
    fn test_pickup_and_blank_score_zero() {
        for hcp in [0, 10, 36] {
            for si in 1..=18 {
                assert_eq!(points_for_hole(RawScore::Pickup, 4, si, hcp), 0);
                assert_eq!(points_for_hole(RawScore::Blank, 4, si, hcp), 0);
            }
        }
    }

    #[test]
    fn test_extreme_inputs_stay_in_bounds() {
        assert_eq!(points_for_hole(RawScore::Strokes(0), i32::MAX, 1, i32::MAX), MAX_POINTS);
        assert_eq!(points_for_hole(RawScore::Strokes(u32::MAX), i32::MIN, 1, 0), 0);
    }

    #[test]
    fn test_points_bounds_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..5000 {
            let strokes = rng.gen_range(0..20u32);
            let par = rng.gen_range(3..=5);
            let si = rng.gen_range(1..=18);
            let hcp = rng.gen_range(0..=54);
            let pts = points_for_hole(RawScore::Strokes(strokes), par, si, hcp);
            assert!((0..=MAX_POINTS).contains(&pts));
        }
    }

    #[test]
    fn test_points_monotone_in_strokes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let par = rng.gen_range(3..=5);
            let si = rng.gen_range(1..=18);
            let hcp = rng.gen_range(0..=54);
            let mut previous = i32::MAX;
            for strokes in 0..20u32 {
                let pts = points_for_hole(RawScore::Strokes(strokes), par, si, hcp);
                assert!(pts <= previous, "points rose at {} strokes", strokes);
                previous = pts;
            }
        }
    }
}
