//! TOURCARD CLI - Command-line interface
//!
//! Commands:
//! - card: Score one player's round hole by hole
//! - leaderboard: Individual, pairs or teams standings
//! - team: Per-hole and per-member breakdown for a team
//! - rehandicap: Recompute the playing handicap chain

mod card_cmd;
mod leaderboard_cmd;
mod rehandicap_cmd;
mod team_cmd;
mod tour;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tourcard")]
#[command(about = "Stableford tour scoring, leaderboards and handicaps")]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one player's round
    Card(card_cmd::CardArgs),
    /// Print a leaderboard
    Leaderboard(leaderboard_cmd::LeaderboardArgs),
    /// Team breakdown and member contributions
    Team(team_cmd::TeamArgs),
    /// Recompute playing handicaps from round 1
    Rehandicap(rehandicap_cmd::RehandicapArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Card(args) => card_cmd::run(args),
        Commands::Leaderboard(args) => leaderboard_cmd::run(args),
        Commands::Team(args) => team_cmd::run(args),
        Commands::Rehandicap(args) => rehandicap_cmd::run(args),
    }
}

/// `RUST_LOG` wins unless `--verbose` is given; otherwise warnings only
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
