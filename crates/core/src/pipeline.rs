// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The parse, join and aggregate pipeline.
//!
//! A run is a pure function of the raw inputs and the configuration. Each
//! input's parse result is memoized on a content hash of the input and the
//! settings that affect its parsing, so re-running with only one changed
//! input reparses only that input.

use crate::aggregate::{WeeklyGrid, aggregate};
use crate::config::GridConfig;
use crate::error::CoreError;
use crate::memo::Memo;
use crate::reconcile::{reconcile, unscored};
use refgrid_domain::{
    MatchRecord, MatchWithScore, RefereeIdentity, ScoreRecord, UnavailabilityRecord,
};
use refgrid_ingest::{
    ContentHash, Fingerprint, IngestError, InputKind, ParseSettings, Parsed, RawTable, RawText,
    parse_matches, parse_roster, parse_scores, parse_unavailability,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Raw inputs for one run. An absent input is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    /// Roster cells.
    pub roster: Option<RawTable>,
    /// Match extract cells.
    pub matches: Option<RawTable>,
    /// Score report text.
    pub scores: Option<RawText>,
    /// Unavailability sheet cells.
    pub unavailability: Option<RawTable>,
}

/// The result of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// The aggregated grid.
    pub grid: WeeklyGrid,
    /// The joined matches, one per parsed match record.
    pub joined: Vec<MatchWithScore>,
    /// Source-level conditions, each naming its input.
    pub conditions: Vec<CoreError>,
    /// Rows and lines that were skipped.
    pub skipped: Vec<IngestError>,
}

/// Runs the pipeline, remembering the last parse of each input.
#[derive(Debug)]
pub struct Pipeline {
    config: GridConfig,
    roster: Memo<Parsed<RefereeIdentity>>,
    matches: Memo<Parsed<MatchRecord>>,
    scores: Memo<Parsed<ScoreRecord>>,
    unavailability: Memo<Parsed<UnavailabilityRecord>>,
}

impl Pipeline {
    /// Creates a pipeline for a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: GridConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            config,
            roster: Memo::new(),
            matches: Memo::new(),
            scores: Memo::new(),
            unavailability: Memo::new(),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Returns how many parses were served from the memo across all inputs.
    #[must_use]
    pub const fn cache_hits(&self) -> usize {
        self.roster.hits() + self.matches.hits() + self.scores.hits() + self.unavailability.hits()
    }

    /// Parses, joins and aggregates one set of inputs.
    ///
    /// Unreadable rows and degraded inputs are reported in the output, not
    /// as errors. A missing join key is reported as a condition and the
    /// matches are shown without scores.
    ///
    /// # Errors
    ///
    /// Returns an error only if the week buckets cannot be derived.
    pub fn run(&mut self, inputs: &RawInputs) -> Result<PipelineOutput, CoreError> {
        let settings: ParseSettings = self.config.parse_settings();

        let roster: Arc<Parsed<RefereeIdentity>> = load(
            &mut self.roster,
            inputs.roster.as_ref(),
            InputKind::Roster,
            &(settings, &self.config.roster),
            |table| parse_roster(table, &self.config.roster, &settings),
        );
        let matches: Arc<Parsed<MatchRecord>> = load(
            &mut self.matches,
            inputs.matches.as_ref(),
            InputKind::Matches,
            &(settings, &self.config.matches),
            |table| parse_matches(table, &self.config.matches, &settings),
        );
        let scores: Arc<Parsed<ScoreRecord>> = load(
            &mut self.scores,
            inputs.scores.as_ref(),
            InputKind::Scores,
            &(settings, &self.config.scores),
            |text| parse_scores(text, &self.config.scores, &settings),
        );
        let unavailability: Arc<Parsed<UnavailabilityRecord>> = load(
            &mut self.unavailability,
            inputs.unavailability.as_ref(),
            InputKind::Unavailability,
            &(settings, &self.config.unavailability),
            |table| parse_unavailability(table, &self.config.unavailability, &settings),
        );

        let mut conditions: Vec<CoreError> = Vec::new();
        let mut skipped: Vec<IngestError> = Vec::new();
        collect(&roster, &mut conditions, &mut skipped);
        collect(&matches, &mut conditions, &mut skipped);
        collect(&scores, &mut conditions, &mut skipped);
        collect(&unavailability, &mut conditions, &mut skipped);

        let joined: Vec<MatchWithScore> = match reconcile(&matches, &scores) {
            Ok(joined) => joined,
            Err(condition) => {
                warn!(%condition, "Score join skipped");
                conditions.push(condition);
                unscored(&matches.records)
            }
        };

        let grid: WeeklyGrid = aggregate(
            &self.config.period,
            &roster.records,
            &joined,
            &unavailability.records,
            &self.config.render,
        )?;

        info!(
            referees = roster.records.len(),
            matches = joined.len(),
            conditions = conditions.len(),
            skipped = skipped.len(),
            "Pipeline run complete"
        );

        Ok(PipelineOutput {
            grid,
            joined,
            conditions,
            skipped,
        })
    }
}

fn load<I, T, K>(
    memo: &mut Memo<Parsed<T>>,
    input: Option<&I>,
    kind: InputKind,
    key_settings: &K,
    parse: impl FnOnce(&I) -> Parsed<T>,
) -> Arc<Parsed<T>>
where
    I: Fingerprint,
    K: Serialize + ?Sized,
{
    match input {
        None => Arc::new(Parsed::not_supplied(kind)),
        Some(raw) => memo.get_or_insert_with(ContentHash::of(raw, key_settings), || parse(raw)),
    }
}

fn collect<T>(parsed: &Parsed<T>, conditions: &mut Vec<CoreError>, skipped: &mut Vec<IngestError>) {
    conditions.extend(parsed.conditions.iter().cloned().map(CoreError::from));
    skipped.extend(parsed.skipped.iter().cloned());
}
