//! Integration tests for the tour engine
//!
//! Tests the full stack: snapshot loading, cards, leaderboards, team
//! accounting and the handicap chain, against a fixture tour

use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tourcard_core::{RawScore, TourIndex, TourSnapshot};
use tourcard_handicap::{apply_chain, recompute_chain, AdjustmentStatus, HandicapPolicy};
use tourcard_leaderboard::{
    better_ball_hole, build_leaderboard, team_detail, team_hole, LeaderboardConfig,
    LeaderboardKind, LeaderboardRule,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_tour.json")
}

/// Two rounds on an all-par-4 course, four players, two pairs and a team
fn sample_tour() -> TourSnapshot {
    TourSnapshot::load(&fixture_path()).unwrap()
}

// ============================================================================
// SNAPSHOT TESTS
// ============================================================================

#[test]
fn test_fixture_loads_and_validates() {
    let snapshot = sample_tour();
    assert_eq!(snapshot.tour.name, "Spring Tour");
    assert_eq!(snapshot.players.len(), 4);
    assert_eq!(snapshot.hole_specs.len(), 18);
    snapshot.validate().unwrap();

    let index = TourIndex::new(&snapshot).unwrap();
    assert_eq!(index.final_round().unwrap().id, "r2");
    assert_eq!(index.ordered_rounds()[0].label(), "Opening Round");
    assert_eq!(index.ordered_rounds()[1].label(), "Round 2");
}

#[test]
fn test_raw_score_forms_survive_save() {
    let snapshot = sample_tour();
    let carol: Vec<RawScore> = snapshot
        .scores
        .iter()
        .filter(|s| s.round_id == "r1" && s.player_id == "carol" && s.hole >= 17)
        .map(|s| s.score)
        .collect();
    assert_eq!(carol, vec![RawScore::Pickup, RawScore::Blank]);

    let path = std::env::temp_dir().join(format!("tourcard-save-{}.json", std::process::id()));
    snapshot.save(&path).unwrap();
    let reloaded = TourSnapshot::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(reloaded, snapshot);
}

// ============================================================================
// CARD TESTS
// ============================================================================

#[test]
fn test_bogey_golf_off_ten_scores_28() {
    let snapshot = sample_tour();
    let index = TourIndex::new(&snapshot).unwrap();
    let card = index.card("r1", "alice").unwrap().unwrap();

    assert_eq!(card.playing_handicap, 10);
    assert_eq!(card.total_points, 28);
    assert_eq!(card.gross, 90);
    assert!(card.is_complete());
    for hole in &card.holes {
        let expected_shots = if hole.hole <= 10 { 1 } else { 0 };
        assert_eq!(hole.shots_received, expected_shots);
    }
}

#[test]
fn test_pickup_and_blank_on_card() {
    let snapshot = sample_tour();
    let index = TourIndex::new(&snapshot).unwrap();
    let card = index.card("r1", "carol").unwrap().unwrap();

    // Carol has no stored handicap for the round, so plays off 11
    assert_eq!(card.playing_handicap, 11);
    assert_eq!(card.points_on(17), Some(0));
    assert_eq!(card.points_on(18), None);
    assert_eq!(card.thru, 17);
    assert!(!card.is_complete());
    assert_eq!(card.total_points, 11 * 3 + 5 * 2);
}

#[test]
fn test_not_playing_has_no_card() {
    let snapshot = sample_tour();
    let index = TourIndex::new(&snapshot).unwrap();
    assert!(index.card("r1", "dave").unwrap().is_none());
    // No participation row at all
    assert!(index.card("r2", "bob").unwrap().is_none());
    assert!(index.card("r9", "bob").is_err());
}

// ============================================================================
// LEADERBOARD TESTS
// ============================================================================

#[test]
fn test_individual_best_one_with_final() {
    let snapshot = sample_tour();
    let index = TourIndex::new(&snapshot).unwrap();
    let config = LeaderboardConfig::from(&snapshot.settings);
    assert_eq!(config.individual, LeaderboardRule::best_n(1, true));

    let board = build_leaderboard(&index, config.individual_kind()).unwrap();
    let names: Vec<&str> = board.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Carol", "Bob", "Dave"]);

    // Stored handicap for round 2 is unset, so Alice plays off 10 again
    assert_eq!(board.row_for("alice").unwrap().total, 46);
    assert!(!board.row_for("alice").unwrap().rounds[0].counted);
    assert_eq!(board.row_for("carol").unwrap().total, 43);
    assert_eq!(board.row_for("bob").unwrap().total, 20);
    assert_eq!(board.row_for("dave").unwrap().total, 20);
    assert_eq!(board.row_for("dave").unwrap().position_label, "T3");
}

#[test]
fn test_pairs_better_ball() {
    let snapshot = sample_tour();
    let index = TourIndex::new(&snapshot).unwrap();
    let board = build_leaderboard(&index, LeaderboardKind::Pair(LeaderboardRule::All)).unwrap();

    let p1 = board.row_for("p1").unwrap();
    assert_eq!(p1.points_for("r1"), Some(28));
    assert_eq!(p1.points_for("r2"), Some(46));
    let p2 = board.row_for("p2").unwrap();
    assert_eq!(p2.points_for("r1"), Some(43));
    assert_eq!(p2.points_for("r2"), Some(20));
    assert_eq!(board.leader().unwrap().total, 28 + 46);
}

#[test]
fn test_better_ball_three_and_five() {
    let snapshot = sample_tour();
    let index = TourIndex::new(&snapshot).unwrap();
    // Hole 1 of round 1: Carol 3 points, Alice 2 points
    let carol = index.card("r1", "carol").unwrap();
    let alice = index.card("r1", "alice").unwrap();
    assert_eq!(better_ball_hole(&[carol.clone(), alice], 1), Some(3));
    assert_eq!(better_ball_hole(&[carol, None], 1), Some(3));

    assert_eq!(team_hole(1, &[Some(3), Some(5)], 1).total, 5);
}

#[test]
fn test_team_total_reconciles_with_contributions() {
    let snapshot = sample_tour();
    let index = TourIndex::new(&snapshot).unwrap();
    let detail = team_detail(&index, "t1", 2).unwrap();

    assert_eq!(detail.rounds[0].total, 72);
    // Hole 17: Alice 1 + Bob 1 counted, Carol picked up
    assert_eq!(detail.rounds[0].holes[16].total, 1);
    assert_eq!(detail.rounds[1].total, 46 + 20);

    let summed: i32 = detail.contributions.iter().map(|c| c.contribution).sum();
    assert_eq!(summed, detail.total);

    let carol = detail.contributions.iter().find(|c| c.player_id == "carol").unwrap();
    assert_eq!(carol.zeros, 1);

    let board = build_leaderboard(&index, LeaderboardKind::Team { best_y: 2 }).unwrap();
    assert_eq!(board.rows[0].total, detail.total);
}

// ============================================================================
// HANDICAP TESTS
// ============================================================================

#[test]
fn test_rehandicap_after_28_and_20() {
    let snapshot = sample_tour();
    let index = TourIndex::new(&snapshot).unwrap();
    let chain = recompute_chain(&index, &HandicapPolicy::default()).unwrap();

    let round_one = &chain.rounds[0];
    assert_eq!(round_one.outcome.avg_rounded, Some(24));
    assert_eq!(chain.playing_handicap("r2", "alice").unwrap(), 9);
    assert_eq!(chain.playing_handicap("r2", "bob").unwrap(), 11);
    // Incomplete card and not playing both carry forward
    assert_eq!(chain.playing_handicap("r2", "carol").unwrap(), 11);
    assert_eq!(chain.playing_handicap("r2", "dave").unwrap(), 20);

    // Round 2 at PH 9: Alice 45, Dave 20, average 33
    assert_eq!(chain.rounds[1].outcome.avg_rounded, Some(33));
    assert_eq!(chain.next_round["alice"], 5);
    assert_eq!(chain.next_round["dave"], 23);
    assert_eq!(chain.next_round["bob"], 11);
}

#[test]
fn test_player_history() {
    let snapshot = sample_tour();
    let index = TourIndex::new(&snapshot).unwrap();
    let chain = recompute_chain(&index, &HandicapPolicy::default()).unwrap();

    let history = chain.history("carol").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].score, None);
    assert_eq!(history[0].status, AdjustmentStatus::Incomplete);
    assert_eq!(history[1].status, AdjustmentStatus::NotPlaying);

    let alice = chain.history("alice").unwrap();
    assert_eq!(alice[0].adjustment, -1);
    assert_eq!(alice[1].adjustment, -4);
    assert_eq!(alice[1].next, 5);
}

#[test]
fn test_write_back_changes_scoring() {
    let snapshot = sample_tour();
    let index = TourIndex::new(&snapshot).unwrap();
    let chain = recompute_chain(&index, &HandicapPolicy::default()).unwrap();
    let updated = apply_chain(&snapshot, &chain);

    let index = TourIndex::new(&updated).unwrap();
    assert_eq!(index.playing_handicap("r2", "alice").unwrap(), 9);
    assert_eq!(index.playing_handicap("r2", "bob").unwrap(), 11);
    assert!(!index.is_playing("r2", "bob").unwrap());
    assert_eq!(updated.round_players.len(), 8);

    let board = build_leaderboard(&index, LeaderboardKind::Individual(LeaderboardRule::All)).unwrap();
    assert_eq!(board.row_for("alice").unwrap().points_for("r2"), Some(45));

    // Applying the same chain again changes nothing
    let index = TourIndex::new(&updated).unwrap();
    let again = recompute_chain(&index, &HandicapPolicy::default()).unwrap();
    assert_eq!(again, chain);
    assert_eq!(apply_chain(&updated, &again), updated);
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

#[test]
fn test_team_holes_reconcile_random() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..500 {
        let members = rng.gen_range(1..7);
        let points: Vec<Option<i32>> = (0..members)
            .map(|_| {
                if rng.gen_bool(0.15) {
                    None
                } else {
                    Some(rng.gen_range(0..6))
                }
            })
            .collect();
        let best_y = rng.gen_range(1..5);
        let hole = team_hole(1, &points, best_y);

        let per_member: i32 = (0..members)
            .map(|m| {
                let counted = if hole.counted.contains(&m) {
                    points[m].unwrap_or(0)
                } else {
                    0
                };
                counted - i32::from(points[m] == Some(0))
            })
            .sum();
        assert_eq!(per_member, hole.total);
        assert!(hole.counted.len() <= best_y);
    }
}
