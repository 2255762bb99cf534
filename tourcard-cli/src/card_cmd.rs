//! Card command - one player's round, hole by hole
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: score_card(), report_card()
//! - Level 3: hole cell formatting
//! - Level 4: arguments

use anyhow::{bail, Context, Result};
use clap::Args;

use tourcard_core::{HoleResult, RawScore, RoundCard, TourIndex, TourSnapshot};

use crate::tour::{fmt_points, prepare, print_json, TourArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct CardArgs {
    #[command(flatten)]
    pub tour: TourArgs,

    /// Round id
    #[arg(long)]
    pub round: String,

    /// Player id
    #[arg(long)]
    pub player: String,
}

/// A scored card with the names it belongs to
#[derive(Clone, Debug, serde::Serialize)]
struct ScoredCard {
    player: String,
    round: String,
    card: RoundCard,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run card command
pub fn run(args: CardArgs) -> Result<()> {
    let snapshot = prepare(&args.tour)?;

    tracing::info!("Scoring round {} for player {}", args.round, args.player);

    let scored = score_card(&snapshot, &args.round, &args.player)?;
    report_card(&scored, args.tour.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn score_card(snapshot: &TourSnapshot, round_id: &str, player_id: &str) -> Result<ScoredCard> {
    let index = TourIndex::new(snapshot).context("Invalid tour snapshot")?;
    let round = index.round(round_id)?;
    let player = index.player(player_id)?;

    let Some(card) = index.card(round_id, player_id)? else {
        bail!("{} is not playing {}", player.name, round.label());
    };

    Ok(ScoredCard {
        player: player.name.clone(),
        round: round.label(),
        card,
    })
}

fn report_card(scored: &ScoredCard, json: bool) -> Result<()> {
    if json {
        return print_json(scored);
    }
    print_text_card(scored);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn print_text_card(scored: &ScoredCard) {
    let card = &scored.card;

    println!("\n=== {} - {} ===", scored.player, scored.round);
    println!("Playing handicap: {}", card.playing_handicap);
    println!("\nHole  Par  SI  Score  Shots  Net  Pts");
    for hole in &card.holes {
        println!("{}", hole_line(hole));
        if hole.hole == 9 {
            println!("Out{:>33}", card.out_points);
        }
    }
    println!("In{:>34}", card.in_points);
    println!("\nGross:  {}", card.gross);
    println!("Points: {}", card.total_points);
    println!("Thru:   {}", card.thru);
}

fn hole_line(hole: &HoleResult) -> String {
    let (par, si) = match hole.layout {
        Some(layout) => (layout.par.to_string(), layout.stroke_index.to_string()),
        None => ("-".to_string(), "-".to_string()),
    };
    let net = hole.net.map_or_else(|| "-".to_string(), |n| n.to_string());
    format!(
        "{:>4}  {:>3}  {:>2}  {:>5}  {:>5}  {:>3}  {:>3}",
        hole.hole,
        par,
        si,
        raw_cell(hole.raw),
        hole.shots_received,
        net,
        fmt_points(hole.points)
    )
}

fn raw_cell(raw: RawScore) -> String {
    match raw {
        RawScore::Strokes(s) => s.to_string(),
        RawScore::Pickup => "P".to_string(),
        RawScore::Blank => "-".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
