//! Rendering of run reports on standard output.

use std::io::Write;

use anyhow::{Context, Result};
use maze_robot_core::{CellCoord, Outcome};
use maze_robot_system_simulation::Report;
use serde::Serialize;

use crate::config::OutputFormat;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    outcome: &'a Outcome,
    steps: usize,
    configurations: usize,
    teleports: usize,
    destroyed_walls: &'a [CellCoord],
    final_cell: CellCoord,
}

impl<'a> From<&'a Report> for JsonReport<'a> {
    fn from(report: &'a Report) -> Self {
        Self {
            outcome: &report.outcome,
            steps: report.steps,
            configurations: report.configurations,
            teleports: report.teleports,
            destroyed_walls: &report.destroyed_walls,
            final_cell: report.final_cell,
        }
    }
}

/// Writes `report` to `out` using the requested presentation.
pub(crate) fn render<W: Write>(report: &Report, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for line in report.outcome.lines() {
                writeln!(out, "{line}").context("failed to write result")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &JsonReport::from(report))
                .context("failed to encode report as json")?;
            writeln!(out).context("failed to write result")?;
        }
    }
    out.flush().context("failed to flush result")
}
