// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly aggregation.
//!
//! The period is tiled into week buckets and every roster referee gets one
//! cell per bucket. A cell lists the referee's matches in that week and the
//! unavailability ranges overlapping it; a cell with neither is empty.
//!
//! ## Ordering
//!
//! - Rows follow roster order
//! - Cells follow week order, starting at the period start
//! - Matches within a cell are sorted by date, then match id, then role
//! - Annotations within a cell follow the unavailability sheet order
//!
//! Matches with no date, a date outside every bucket, or a referee code not
//! in the roster are left out of the grid.

use crate::error::CoreError;
use crate::render::{RenderOptions, referee_details, referee_label};
use refgrid_domain::{
    MatchWithScore, RefereeCode, RefereeIdentity, TestPeriod, UnavailabilityRecord, WeekBucket,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// One (referee, week) cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WeekCell {
    /// Formatted match lines, in date, match id, role order.
    pub matches: Vec<String>,
    /// Formatted unavailability annotations.
    pub unavailability: Vec<String>,
}

impl WeekCell {
    /// Returns whether the cell has neither matches nor annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.unavailability.is_empty()
    }

    /// Iterates over match lines followed by annotations.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.matches
            .iter()
            .chain(self.unavailability.iter())
            .map(String::as_str)
    }

    /// Joins the cell lines with newlines, or returns `empty_marker`.
    #[must_use]
    pub fn text(&self, empty_marker: &str) -> String {
        if self.is_empty() {
            return String::from(empty_marker);
        }
        self.lines().collect::<Vec<&str>>().join("\n")
    }
}

/// One referee and their cells, one per week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefereeRow {
    /// The roster entry.
    pub referee: RefereeIdentity,
    /// Row label, for example `ROSSI Mario (123)`.
    pub label: String,
    /// Section and age, when known.
    pub details: Option<String>,
    /// One cell per week.
    pub cells: Vec<WeekCell>,
}

/// The aggregated grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyGrid {
    /// The week buckets, in order.
    pub weeks: Vec<WeekBucket>,
    /// One row per roster referee.
    pub rows: Vec<RefereeRow>,
    /// Text of an empty cell.
    pub empty_marker: String,
}

impl WeeklyGrid {
    /// Returns the week column labels.
    #[must_use]
    pub fn week_labels(&self) -> Vec<String> {
        self.weeks.iter().map(WeekBucket::label).collect()
    }

    /// Finds the row of a normalized referee code.
    #[must_use]
    pub fn row(&self, code: &str) -> Option<&RefereeRow> {
        self.rows.iter().find(|r| r.referee.code.value() == code)
    }

    /// Returns the rendered text of one cell.
    #[must_use]
    pub fn cell_text(&self, code: &str, week: usize) -> Option<String> {
        self.row(code)?
            .cells
            .get(week)
            .map(|cell| cell.text(&self.empty_marker))
    }
}

/// Builds the weekly grid.
///
/// # Errors
///
/// Returns an error if the period's week buckets cannot be derived.
pub fn aggregate(
    period: &TestPeriod,
    referees: &[RefereeIdentity],
    matches: &[MatchWithScore],
    unavailability: &[UnavailabilityRecord],
    options: &RenderOptions,
) -> Result<WeeklyGrid, CoreError> {
    let weeks: Vec<WeekBucket> = period.weeks()?;

    let positions: HashMap<&RefereeCode, usize> = referees
        .iter()
        .enumerate()
        .map(|(idx, referee)| (&referee.code, idx))
        .collect();

    let mut placed: Vec<Vec<Vec<&MatchWithScore>>> =
        vec![vec![Vec::new(); weeks.len()]; referees.len()];
    let mut undated: usize = 0;
    let mut outside: usize = 0;
    let mut unknown_referee: usize = 0;

    for entry in matches {
        let Some(date) = entry.assignment.date else {
            undated += 1;
            continue;
        };
        let Some(week) = period.week_index(date) else {
            outside += 1;
            continue;
        };
        let Some(&row) = positions.get(&entry.assignment.referee_code) else {
            unknown_referee += 1;
            continue;
        };
        placed[row][week].push(entry);
    }

    let mut cells: Vec<Vec<WeekCell>> = placed
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|week_matches| match_cell(week_matches, options))
                .collect()
        })
        .collect();

    let mut unmatched_ranges: usize = 0;
    for record in unavailability {
        let Some(&row) = positions.get(&record.referee_code) else {
            unmatched_ranges += 1;
            continue;
        };
        for week in weeks.iter().filter(|w| record.overlaps(w)) {
            cells[row][week.index()]
                .unavailability
                .push(options.unavailability_line(record));
        }
    }

    if undated + outside + unknown_referee + unmatched_ranges > 0 {
        debug!(
            undated,
            outside,
            unknown_referee,
            unmatched_ranges,
            "Records left out of the grid"
        );
    }

    let rows: Vec<RefereeRow> = referees
        .iter()
        .zip(cells)
        .map(|(referee, cells)| RefereeRow {
            referee: referee.clone(),
            label: referee_label(referee),
            details: referee_details(referee),
            cells,
        })
        .collect();

    info!(
        referees = rows.len(),
        weeks = weeks.len(),
        "Aggregated weekly grid"
    );

    Ok(WeeklyGrid {
        weeks,
        rows,
        empty_marker: options.empty_marker.clone(),
    })
}

fn match_cell(mut week_matches: Vec<&MatchWithScore>, options: &RenderOptions) -> WeekCell {
    week_matches.sort_by(|a, b| {
        (a.assignment.date, &a.assignment.match_id, &a.assignment.role).cmp(&(
            b.assignment.date,
            &b.assignment.match_id,
            &b.assignment.role,
        ))
    });
    WeekCell {
        matches: week_matches
            .into_iter()
            .map(|m| options.match_line(m))
            .collect(),
        unavailability: Vec::new(),
    }
}
