// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod load;
mod output;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::Result;
use color_eyre::eyre::Context;
use output::{OutputFormat, write_grid};
use refgrid::{GridConfig, Pipeline, PipelineOutput, RawInputs};
use refgrid_ingest::{DelimitedFormat, InputKind};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

/// Weekly referee grid - reconciles assignments, scores and unavailability
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid configuration (JSON). Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Referee roster (delimited text with a header row)
    #[arg(short, long)]
    roster: PathBuf,

    /// Competition extract (delimited text)
    #[arg(short, long)]
    matches: Option<PathBuf>,

    /// Score report text, as extracted from the PDF
    #[arg(short, long)]
    scores: Option<PathBuf>,

    /// Unavailability sheet (delimited text with a header row)
    #[arg(short, long)]
    unavailability: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// The competition extract starts with a header row
    #[arg(long)]
    match_headers: bool,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn load_inputs(&self) -> Result<RawInputs> {
        let headed: DelimitedFormat = DelimitedFormat::default();
        let match_format: DelimitedFormat = DelimitedFormat {
            has_headers: self.match_headers,
            ..DelimitedFormat::default()
        };

        Ok(RawInputs {
            roster: Some(load::read_table(&self.roster, &headed, InputKind::Roster)?),
            matches: load::optional(self.matches.as_deref(), InputKind::Matches, |path: &Path| {
                load::read_table(path, &match_format, InputKind::Matches)
            }),
            scores: load::optional(
                self.scores.as_deref(),
                InputKind::Scores,
                load::read_report,
            ),
            unavailability: load::optional(
                self.unavailability.as_deref(),
                InputKind::Unavailability,
                |path: &Path| load::read_table(path, &headed, InputKind::Unavailability),
            ),
        })
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    // Logs go to stderr so stdout carries only the grid
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config: GridConfig = load::read_config(args.config.as_deref())?;
    info!(
        start = %config.period.start(),
        end = %config.period.end(),
        "Building weekly grid"
    );

    let inputs: RawInputs = args.load_inputs()?;
    let mut pipeline: Pipeline = Pipeline::new(config)?;
    let output: PipelineOutput = pipeline.run(&inputs)?;

    for condition in &output.conditions {
        warn!("{condition}");
    }
    for skipped in &output.skipped {
        debug!("{skipped}");
    }
    if !output.skipped.is_empty() {
        info!(
            count = output.skipped.len(),
            "Rows skipped; rerun with -v for details"
        );
    }

    let stdout: std::io::Stdout = std::io::stdout();
    let mut handle: std::io::StdoutLock<'_> = stdout.lock();
    write_grid(&mut handle, &output, args.format).wrap_err("writing grid")?;
    Ok(())
}
