//! Leaderboard command - standings under the tour's settings
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_board(), report_board()
//! - Level 3: row formatting
//! - Level 4: arguments

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use tourcard_core::{TourIndex, TourSnapshot};
use tourcard_leaderboard::{
    build_leaderboard, Leaderboard, LeaderboardConfig, LeaderboardKind, LeaderboardRow, RoundTotal,
};

use crate::tour::{fmt_points, prepare, print_json, TourArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BoardKind {
    Individual,
    Pairs,
    Teams,
}

#[derive(Args)]
pub struct LeaderboardArgs {
    #[command(flatten)]
    pub tour: TourArgs,

    /// Which leaderboard to print
    #[arg(long, value_enum, default_value = "individual")]
    pub kind: BoardKind,

    /// Only print the first N rows
    #[arg(long)]
    pub top: Option<usize>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run leaderboard command
pub fn run(args: LeaderboardArgs) -> Result<()> {
    let snapshot = prepare(&args.tour)?;

    tracing::info!(
        "Building {:?} leaderboard for {} ({} rounds)",
        args.kind,
        snapshot.tour.name,
        snapshot.rounds.len()
    );

    let board = build_board(&snapshot, args.kind)?;
    let rows = match args.top {
        Some(n) => board.top_n(n),
        None => &board.rows[..],
    };
    report_board(&board, rows, args.tour.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Resolve the configured rule for `kind` and build the board
fn build_board(snapshot: &TourSnapshot, kind: BoardKind) -> Result<Leaderboard> {
    let index = TourIndex::new(snapshot).context("Invalid tour snapshot")?;
    let config = LeaderboardConfig::from(&snapshot.settings);
    let board = build_leaderboard(&index, board_kind(&config, kind))?;
    Ok(board)
}

fn report_board(board: &Leaderboard, rows: &[LeaderboardRow], json: bool) -> Result<()> {
    if json {
        return print_json_board(board, rows);
    }
    print_text_board(board, rows);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn board_kind(config: &LeaderboardConfig, kind: BoardKind) -> LeaderboardKind {
    match kind {
        BoardKind::Individual => config.individual_kind(),
        BoardKind::Pairs => config.pair_kind(),
        BoardKind::Teams => config.team_kind(),
    }
}

/// Round cell; rounds left out of the total are bracketed
fn round_cell(round: &RoundTotal) -> String {
    let points = fmt_points(round.points);
    if round.points.is_some() && !round.counted {
        format!("({})", points)
    } else {
        points
    }
}

fn print_json_board(board: &Leaderboard, rows: &[LeaderboardRow]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        title: &'static str,
        kind: &'a LeaderboardKind,
        rows: &'a [LeaderboardRow],
    }

    print_json(&JsonOutput {
        title: board.kind.title(),
        kind: &board.kind,
        rows,
    })
}

fn print_text_board(board: &Leaderboard, rows: &[LeaderboardRow]) {
    println!("\n=== {} Leaderboard ===", board.kind.title());
    if rows.is_empty() {
        println!("No entrants");
        return;
    }

    for row in rows {
        let rounds: Vec<String> = row.rounds.iter().map(round_cell).collect();
        println!(
            "{:>4}  {:<24} {:>5}   {}",
            row.position_label,
            row.name,
            row.total,
            rounds.join(" ")
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
