//! Team command - per-hole scoring and member contributions
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_detail(), report_detail()
//! - Level 3: hole and contribution formatting
//! - Level 4: arguments

use anyhow::{Context, Result};
use clap::Args;

use tourcard_core::{TourIndex, TourSnapshot};
use tourcard_leaderboard::{team_detail, LeaderboardConfig, TeamDetail, TeamHole};

use crate::tour::{fmt_points, prepare, print_json, TourArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct TeamArgs {
    #[command(flatten)]
    pub tour: TourArgs,

    /// Team group id
    #[arg(long)]
    pub team: String,

    /// Also print every hole of every round
    #[arg(long)]
    pub holes: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run team command
pub fn run(args: TeamArgs) -> Result<()> {
    let snapshot = prepare(&args.tour)?;

    tracing::info!("Breaking down team {}", args.team);

    let detail = load_detail(&snapshot, &args.team)?;
    report_detail(&detail, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Team breakdown using the tour's configured best-Y
fn load_detail(snapshot: &TourSnapshot, team_id: &str) -> Result<TeamDetail> {
    let index = TourIndex::new(snapshot).context("Invalid tour snapshot")?;
    let best_y = LeaderboardConfig::from(&snapshot.settings).team_best_y;
    let detail = team_detail(&index, team_id, best_y)?;
    Ok(detail)
}

fn report_detail(detail: &TeamDetail, args: &TeamArgs) -> Result<()> {
    if args.tour.json {
        return print_json(detail);
    }
    print_text_detail(detail, args.holes);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Member points for a hole: counted `*`, qualifying `=`
fn hole_cells(hole: &TeamHole) -> Vec<String> {
    hole.member_points
        .iter()
        .enumerate()
        .map(|(m, points)| {
            let mark = if hole.counted.contains(&m) {
                "*"
            } else if hole.qualifying.contains(&m) {
                "="
            } else {
                ""
            };
            format!("{}{}", fmt_points(*points), mark)
        })
        .collect()
}

fn print_text_detail(detail: &TeamDetail, show_holes: bool) {
    println!("\n=== {} (best {}) ===", detail.name, detail.best_y);

    for round in &detail.rounds {
        let total = if round.recorded {
            round.total.to_string()
        } else {
            "-".to_string()
        };
        println!("Round {}: {}", round.round_no, total);

        if show_holes && round.recorded {
            for hole in &round.holes {
                println!(
                    "  {:>2}  {:<32} {:>3}",
                    hole.hole,
                    hole_cells(hole).join(" "),
                    hole.total
                );
            }
        }
    }
    println!("Total: {}", detail.total);

    println!("\nMember              Counted  Holes  Tied  Zeros  Contribution");
    for c in &detail.contributions {
        println!(
            "{:<18} {:>8} {:>6} {:>5} {:>6} {:>13}",
            c.name, c.counted_points, c.counted_holes, c.qualifying_holes, c.zeros, c.contribution
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
