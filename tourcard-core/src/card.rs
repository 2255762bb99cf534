//! Round cards - hole-by-hole Stableford for one player in one round

use serde::{Deserialize, Serialize};

use crate::raw_score::RawScore;
use crate::stableford::{points_for_hole, shots_received, HOLES};

/// Par and stroke index of one hole
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleLayout {
    pub par: i32,
    pub stroke_index: i32,
}

/// Layout of a course from one tee, indexed by hole number - 1
pub type CourseLayout = [Option<HoleLayout>; HOLES];

/// One scored hole
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoleResult {
    pub hole: u8,
    pub raw: RawScore,
    pub layout: Option<HoleLayout>,
    pub shots_received: i32,
    /// Net strokes when strokes were entered and the hole has a layout
    pub net: Option<i64>,
    /// `None` when nothing was recorded or the hole has no layout
    pub points: Option<i32>,
}

/// Full card for a player's round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundCard {
    pub playing_handicap: i32,
    pub holes: Vec<HoleResult>,
    /// Points on holes 1-9
    pub out_points: i32,
    /// Points on holes 10-18
    pub in_points: i32,
    pub total_points: i32,
    /// Strokes over the holes where strokes were entered
    pub gross: u64,
    /// Holes with a recorded entry (strokes or pickup)
    pub thru: usize,
}

impl RoundCard {
    /// Every hole has a recorded entry
    pub fn is_complete(&self) -> bool {
        self.thru == HOLES
    }

    /// Points for a hole number (1-based)
    pub fn points_on(&self, hole: u8) -> Option<i32> {
        self.holes
            .get(usize::from(hole).checked_sub(1)?)
            .and_then(|h| h.points)
    }
}

/// Score a round from raw entries, a layout and a playing handicap.
///
/// Holes without a layout contribute 0 and report no points.
pub fn score_round(layout: &CourseLayout, scores: &[RawScore; HOLES], playing_handicap: i32) -> RoundCard {
    let holes: Vec<HoleResult> = (0..HOLES)
        .map(|i| score_hole(i, layout[i], scores[i], playing_handicap))
        .collect();

    let points_between = |from: usize, to: usize| -> i32 {
        holes[from..to].iter().filter_map(|h| h.points).sum()
    };
    let out_points = points_between(0, 9);
    let in_points = points_between(9, HOLES);

    let gross = scores
        .iter()
        .filter_map(RawScore::strokes)
        .map(u64::from)
        .sum();
    let thru = scores.iter().filter(|s| s.is_recorded()).count();

    RoundCard {
        playing_handicap,
        out_points,
        in_points,
        total_points: out_points + in_points,
        holes,
        gross,
        thru,
    }
}

fn score_hole(index: usize, layout: Option<HoleLayout>, raw: RawScore, playing_handicap: i32) -> HoleResult {
    let hole = (index + 1) as u8;
    let Some(hole_layout) = layout else {
        return HoleResult {
            hole,
            raw,
            layout: None,
            shots_received: 0,
            net: None,
            points: None,
        };
    };

    let received = shots_received(playing_handicap, hole_layout.stroke_index);
    let points = raw
        .is_recorded()
        .then(|| points_for_hole(raw, hole_layout.par, hole_layout.stroke_index, playing_handicap));

    HoleResult {
        hole,
        raw,
        layout: Some(hole_layout),
        shots_received: received,
        net: raw.strokes().map(|s| i64::from(s) - i64::from(received)),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn par_four_layout() -> CourseLayout {
        let mut layout = [None; HOLES];
        for (i, slot) in layout.iter_mut().enumerate() {
            *slot = Some(HoleLayout {
                par: 4,
                stroke_index: i as i32 + 1,
            });
        }
        layout
    }

    #[test]
    fn test_bogey_round_with_ten_handicap() {
        let card = score_round(&par_four_layout(), &[RawScore::Strokes(5); HOLES], 10);
        assert_eq!(card.total_points, 28);
        assert_eq!(card.out_points, 18);
        assert_eq!(card.in_points, 10);
        assert_eq!(card.gross, 90);
        assert!(card.is_complete());
        assert_eq!(card.points_on(1), Some(2));
        assert_eq!(card.points_on(18), Some(1));
        assert_eq!(card.holes[0].net, Some(4));
    }

    #[test]
    fn test_blank_and_pickup_holes() {
        let mut scores = [RawScore::Strokes(4); HOLES];
        scores[0] = RawScore::Pickup;
        scores[1] = RawScore::Blank;
        let card = score_round(&par_four_layout(), &scores, 0);

        assert_eq!(card.points_on(1), Some(0));
        assert_eq!(card.points_on(2), None);
        assert_eq!(card.thru, 17);
        assert!(!card.is_complete());
        assert_eq!(card.total_points, 16 * 2);
        assert_eq!(card.gross, 16 * 4);
    }

    #[test]
    fn test_missing_layout_contributes_nothing() {
        let mut layout = par_four_layout();
        layout[17] = None;
        let card = score_round(&layout, &[RawScore::Strokes(4); HOLES], 0);
        assert_eq!(card.points_on(18), None);
        assert_eq!(card.total_points, 17 * 2);
        // Still recorded, so the card is complete
        assert!(card.is_complete());
    }

    #[test]
    fn test_huge_stroke_counts_do_not_overflow_gross() {
        let mut scores = [RawScore::Strokes(4); HOLES];
        scores[0] = RawScore::Strokes(3_000_000_000);
        scores[1] = RawScore::Strokes(3_000_000_000);
        let card = score_round(&par_four_layout(), &scores, 0);

        assert_eq!(card.gross, 6_000_000_000 + 16 * 4);
        assert_eq!(card.points_on(1), Some(0));
        assert_eq!(card.total_points, 16 * 2);
        assert!(card.is_complete());
    }

    #[test]
    fn test_points_on_out_of_range() {
        let card = score_round(&par_four_layout(), &[RawScore::Blank; HOLES], 0);
        assert_eq!(card.points_on(0), None);
        assert_eq!(card.points_on(19), None);
        assert_eq!(card.total_points, 0);
    }
}
