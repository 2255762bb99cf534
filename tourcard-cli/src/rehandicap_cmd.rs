//! Rehandicap command - recompute the playing handicap chain
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: compute_chain(), write_output(), report_chain()
//! - Level 3: status and history formatting
//! - Level 4: arguments

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use tourcard_core::{TourIndex, TourSnapshot};
use tourcard_handicap::{
    apply_chain, recompute_chain, AdjustmentStatus, HandicapChain, HandicapPolicy, HistoryEntry,
};

use crate::tour::{fmt_points, load_snapshot, print_json, TourArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RehandicapArgs {
    #[command(flatten)]
    pub tour: TourArgs,

    /// Write the snapshot with recomputed handicaps to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print one player's history instead of the whole chain
    #[arg(long)]
    pub player: Option<String>,

    /// Highest playing handicap above the starting one
    #[arg(long, default_value = "3")]
    pub max_above_start: i32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run rehandicap command
///
/// 1. Load the tour
/// 2. Fold the chain from round 1
/// 3. Optionally write the updated snapshot
/// 4. Report the chain or one player's history
pub fn run(args: RehandicapArgs) -> Result<()> {
    check_args(&args)?;
    let snapshot = load_snapshot(&args.tour.tour)?;
    let policy = HandicapPolicy::with_max_above_start(args.max_above_start);

    tracing::info!(
        "Recomputing handicaps for {} players over {} rounds",
        snapshot.players.len(),
        snapshot.rounds.len()
    );

    let chain = compute_chain(&snapshot, &policy)?;

    if let Some(path) = &args.output {
        write_output(&snapshot, &chain, path)?;
    }

    match &args.player {
        Some(player_id) => {
            let history = chain.history(player_id)?;
            report_history(player_id, &history, args.tour.json)
        }
        None => report_chain(&chain, args.tour.json),
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// The chain is always recomputed here, so `--recompute` is meaningless
fn check_args(args: &RehandicapArgs) -> Result<()> {
    if args.tour.recompute {
        bail!("--recompute does not apply to rehandicap, which always recomputes from round 1");
    }
    Ok(())
}

fn compute_chain(snapshot: &TourSnapshot, policy: &HandicapPolicy) -> Result<HandicapChain> {
    let index = TourIndex::new(snapshot).context("Invalid tour snapshot")?;
    let chain = recompute_chain(&index, policy).context("Failed to recompute handicaps")?;
    Ok(chain)
}

fn write_output(snapshot: &TourSnapshot, chain: &HandicapChain, path: &Path) -> Result<()> {
    let updated = apply_chain(snapshot, chain);
    updated
        .save(path)
        .with_context(|| format!("Failed to write tour: {}", path.display()))?;
    tracing::info!("Wrote recomputed handicaps to {}", path.display());
    Ok(())
}

fn report_chain(chain: &HandicapChain, json: bool) -> Result<()> {
    if json {
        return print_json(chain);
    }
    print_text_chain(chain);
    Ok(())
}

fn report_history(player_id: &str, history: &[HistoryEntry], json: bool) -> Result<()> {
    if json {
        #[derive(serde::Serialize)]
        struct JsonHistory<'a> {
            player_id: &'a str,
            rounds: &'a [HistoryEntry],
        }
        return print_json(&JsonHistory {
            player_id,
            rounds: history,
        });
    }
    print_text_history(player_id, history);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn status_label(status: AdjustmentStatus) -> &'static str {
    match status {
        AdjustmentStatus::Adjusted => "adjusted",
        AdjustmentStatus::NotPlaying => "not playing",
        AdjustmentStatus::Incomplete => "incomplete card",
        AdjustmentStatus::NoFieldAverage => "no field average",
    }
}

fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

fn print_text_chain(chain: &HandicapChain) {
    for round in &chain.rounds {
        println!(
            "\n=== Round {} ({}) - field average {} ===",
            round.round_no,
            round.round_id,
            fmt_points(round.outcome.avg_rounded)
        );
        for adj in &round.outcome.adjustments {
            println!(
                "  {:<16} PH {:>3}  pts {:>3}  adj {:>3}  next {:>3}  {}",
                adj.player_id,
                adj.incoming,
                fmt_points(adj.score),
                signed(adj.adjustment),
                adj.next,
                status_label(adj.status)
            );
        }
    }

    println!("\n=== Next round ===");
    for (player_id, ph) in &chain.next_round {
        println!("  {:<16} {:>3}", player_id, ph);
    }
}

fn print_text_history(player_id: &str, history: &[HistoryEntry]) {
    println!("\n=== Handicap history: {} ===", player_id);
    println!("Round   PH  Pts  Avg  Adj  Next");
    for entry in history {
        println!(
            "{:>5}  {:>3}  {:>3}  {:>3}  {:>3}  {:>4}  {}",
            entry.round_no,
            entry.playing_handicap,
            fmt_points(entry.score),
            fmt_points(entry.avg_rounded),
            signed(entry.adjustment),
            entry.next,
            status_label(entry.status)
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
