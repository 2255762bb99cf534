//! Shared tour loading and output helpers for the commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tourcard_core::{TourIndex, TourSnapshot};
use tourcard_handicap::{apply_chain, recompute_chain, HandicapPolicy};

/// Arguments every command takes
#[derive(Args, Clone, Debug)]
pub struct TourArgs {
    /// Tour snapshot JSON file
    #[arg(long, value_name = "FILE")]
    pub tour: PathBuf,

    /// Recompute the handicap chain before scoring
    #[arg(long)]
    pub recompute: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Read a snapshot from disk
pub fn load_snapshot(path: &Path) -> Result<TourSnapshot> {
    TourSnapshot::load(path).with_context(|| format!("Failed to load tour: {}", path.display()))
}

/// Load the tour, applying a fresh handicap chain when asked
pub fn prepare(args: &TourArgs) -> Result<TourSnapshot> {
    let snapshot = load_snapshot(&args.tour)?;
    if !args.recompute {
        return Ok(snapshot);
    }
    with_recomputed_handicaps(&snapshot)
}

/// Snapshot with every playing handicap replaced by the recomputed chain
pub fn with_recomputed_handicaps(snapshot: &TourSnapshot) -> Result<TourSnapshot> {
    let index = TourIndex::new(snapshot).context("Invalid tour snapshot")?;
    let chain = recompute_chain(&index, &HandicapPolicy::default())
        .context("Failed to recompute handicaps")?;
    tracing::info!("Recomputed handicaps over {} rounds", chain.rounds.len());
    Ok(apply_chain(snapshot, &chain))
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Points cell, `-` when nothing was recorded
pub fn fmt_points(points: Option<i32>) -> String {
    points.map_or_else(|| "-".to_string(), |p| p.to_string())
}
