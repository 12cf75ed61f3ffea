#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the robot over a grid layout.

mod config;
mod layout;
mod logging;
mod output;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use maze_robot_system_simulation::{replay, simulate, Report};
use maze_robot_world::Grid;
use tracing::info;

use crate::config::{OutputFormat, Settings};

/// Command-line arguments accepted by the robot simulator.
#[derive(Debug, Parser)]
#[command(name = "maze-robot")]
#[command(about = "Simulates the robot on a grid and prints its path or LOOP")]
struct CliArgs {
    /// Layout file to read; standard input when omitted
    input: Option<PathBuf>,

    /// Output presentation, overriding the config file
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Replay a successful path before printing it
    #[arg(long)]
    verify: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Entry point for the robot simulator command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    let settings = match &args.config {
        Some(path) => config::load(path)?,
        None => Settings::default(),
    };
    logging::init(settings.log_filter.as_deref());

    let format = args.format.unwrap_or(settings.format);
    let verify = args.verify || settings.verify;

    let text = read_input(args.input.as_deref())?;
    let grid = layout::parse_layout(&text).context("failed to load grid layout")?;
    info!(
        columns = grid.columns(),
        rows = grid.rows(),
        goals = grid.goals().len(),
        breakable_walls = grid.breakable_walls().len(),
        "loaded grid"
    );

    let report = simulate(grid.clone());
    if verify {
        verify_report(&grid, &report)?;
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::render(&report, format, &mut handle)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read layout at {}", path.display())),
        None => io::read_to_string(io::stdin()).context("failed to read layout from stdin"),
    }
}

fn verify_report(grid: &Grid, report: &Report) -> Result<()> {
    let Some(path) = report.outcome.path() else {
        return Ok(());
    };

    let replayed = replay(grid, path).context("emitted path does not replay")?;
    ensure!(
        replayed.final_cell == report.final_cell,
        "replay ended at {:?} but the run ended at {:?}",
        replayed.final_cell,
        report.final_cell
    );
    ensure!(
        replayed.destroyed_walls == report.destroyed_walls,
        "replay destroyed {} walls but the run destroyed {}",
        replayed.destroyed_walls.len(),
        report.destroyed_walls.len()
    );
    info!(moves = path.len(), "verified path by replay");
    Ok(())
}
