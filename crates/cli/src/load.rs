// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! File loading. Everything past this module works on in-memory cells and text.

use color_eyre::Result;
use color_eyre::eyre::Context;
use refgrid::GridConfig;
use refgrid_ingest::{DelimitedFormat, InputKind, RawTable, RawText};
use std::path::Path;
use tracing::{info, warn};

/// Reads the configuration, or returns defaults when no path is given.
pub fn read_config(path: Option<&Path>) -> Result<GridConfig> {
    let Some(path) = path else {
        info!("No configuration file given; using defaults");
        return Ok(GridConfig::default());
    };
    let text: String = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading configuration {}", path.display()))?;
    GridConfig::from_json(&text)
        .wrap_err_with(|| format!("loading configuration {}", path.display()))
}

/// Reads a delimited table.
pub fn read_table(path: &Path, format: &DelimitedFormat, input: InputKind) -> Result<RawTable> {
    let text: String = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading {input} file {}", path.display()))?;
    let table: RawTable = RawTable::from_delimited(&text, format, input)?;
    info!(input = %input, rows = table.rows().len(), path = %path.display(), "Loaded table");
    Ok(table)
}

/// Reads extracted report text, one page per form feed.
pub fn read_report(path: &Path) -> Result<RawText> {
    let text: String = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading scores file {}", path.display()))?;
    let report: RawText = RawText::from_form_feed(&text);
    info!(pages = report.pages().len(), path = %path.display(), "Loaded score report");
    Ok(report)
}

/// Loads an optional input. A failure is logged and the input treated as absent.
pub fn optional<T>(
    path: Option<&Path>,
    input: InputKind,
    load: impl FnOnce(&Path) -> Result<T>,
) -> Option<T> {
    let path: &Path = path?;
    match load(path) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(input = %input, "{err:#}; continuing without it");
            None
        }
    }
}
