// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::ValueEnum;
use refgrid::{PipelineOutput, RefereeRow, WeeklyGrid};
use refgrid_ingest::IngestError;
use serde::Serialize;
use std::io::Write;

/// Output format of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One block per referee, one indented line per cell entry.
    Text,
    /// The grid and its conditions as JSON.
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    grid: &'a WeeklyGrid,
    conditions: Vec<String>,
    skipped: &'a [IngestError],
}

/// Writes the grid in the requested format.
pub fn write_grid(
    out: &mut impl Write,
    output: &PipelineOutput,
    format: OutputFormat,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => write_text(out, &output.grid),
        OutputFormat::Json => {
            let report: JsonReport<'_> = JsonReport {
                grid: &output.grid,
                conditions: output.conditions.iter().map(ToString::to_string).collect(),
                skipped: &output.skipped,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)
        }
    }
}

fn write_text(out: &mut impl Write, grid: &WeeklyGrid) -> std::io::Result<()> {
    let labels: Vec<String> = grid.week_labels();
    for row in &grid.rows {
        write_row(out, row, &labels, &grid.empty_marker)?;
    }
    Ok(())
}

fn write_row(
    out: &mut impl Write,
    row: &RefereeRow,
    labels: &[String],
    empty_marker: &str,
) -> std::io::Result<()> {
    writeln!(out, "{}", row.label)?;
    if let Some(details) = &row.details {
        writeln!(out, "  {details}")?;
    }
    for (label, cell) in labels.iter().zip(&row.cells) {
        writeln!(out, "  {label}")?;
        for line in cell.text(empty_marker).lines() {
            writeln!(out, "    {line}")?;
        }
    }
    writeln!(out)
}
