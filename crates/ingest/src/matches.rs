// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Competition extract parsing.
//!
//! Extracts are usually headerless spreadsheets addressed by column
//! position, but delimited exports with headers work the same way through
//! [`ColumnRef::Header`]. Dates are read permissively: an unreadable date
//! keeps the record with `date: None`, it never drops it.

use crate::columns::{ColumnRef, Resolver};
use crate::error::{IngestError, InputKind};
use crate::outcome::Parsed;
use crate::settings::ParseSettings;
use crate::table::{RawTable, cell, is_blank_row};
use refgrid_domain::{MatchId, MatchRecord, RefereeCode, clean_cell, parse_date};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Field name of the join key, as reported in `MissingField`.
pub const MATCH_ID_FIELD: &str = "match_id";

/// Column mapping for the competition extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchColumns {
    /// Match identifier.
    pub match_id: ColumnRef,
    /// Competition category.
    pub category: ColumnRef,
    /// Group within the category.
    pub group: ColumnRef,
    /// Match date.
    pub date: ColumnRef,
    /// Referee function.
    pub role: ColumnRef,
    /// Referee code.
    pub referee_code: ColumnRef,
}

impl Default for MatchColumns {
    fn default() -> Self {
        Self {
            match_id: ColumnRef::Position(1),
            category: ColumnRef::Position(2),
            group: ColumnRef::Position(3),
            date: ColumnRef::Position(6),
            role: ColumnRef::Position(16),
            referee_code: ColumnRef::Position(17),
        }
    }
}

struct MatchIndices {
    match_id: Option<usize>,
    category: usize,
    group: usize,
    date: usize,
    role: usize,
    referee_code: usize,
}

/// Parses extract rows into match assignments.
///
/// At most one record is kept per (referee code, match id) pair. An extract
/// without a match id column is still read: the `MissingField(match_id)`
/// condition is reported and every record carries `match_id: None`, so the
/// assignments can be shown even though no score can reach them.
#[must_use]
pub fn parse_matches(
    table: &RawTable,
    columns: &MatchColumns,
    settings: &ParseSettings,
) -> Parsed<MatchRecord> {
    let mut resolver: Resolver<'_> = Resolver::new(table, InputKind::Matches);
    let key: Result<usize, IngestError> = resolver.keyed(MATCH_ID_FIELD, &columns.match_id);
    let indices: MatchIndices = MatchIndices {
        match_id: key.as_ref().ok().copied(),
        category: resolver.required("category", &columns.category),
        group: resolver.required("group", &columns.group),
        date: resolver.required("date", &columns.date),
        role: resolver.required("role", &columns.role),
        referee_code: resolver.required("referee_code", &columns.referee_code),
    };
    if let Err(mut missing) = resolver.finish() {
        missing.extend(key.err());
        return Parsed::degraded(InputKind::Matches, missing);
    }

    let mut parsed: Parsed<MatchRecord> = Parsed::new(InputKind::Matches);
    if let Err(missing) = key {
        warn!(input = %InputKind::Matches, "{missing}; reading assignments without match ids");
        parsed.conditions.push(missing);
    }
    let mut seen: HashSet<(RefereeCode, MatchId)> = HashSet::new();

    for (idx, row) in table.rows().iter().enumerate() {
        if is_blank_row(row) {
            continue;
        }
        let line: usize = table.line_number(idx);

        let match_id: Option<MatchId> = if let Some(id_idx) = indices.match_id {
            let raw_id: &str = cell(row, id_idx);
            let Some(match_id) = MatchId::parse(raw_id) else {
                parsed.skip(line, format!("match_id: missing or unreadable '{}'", raw_id.trim()));
                continue;
            };
            Some(match_id)
        } else {
            None
        };

        let raw_code: &str = cell(row, indices.referee_code);
        let Some(referee_code) = RefereeCode::parse(raw_code, &settings.normalization) else {
            parsed.skip(
                line,
                format!("referee_code: missing or unreadable '{}'", raw_code.trim()),
            );
            continue;
        };

        // Without ids there is nothing to deduplicate on
        if let Some(id) = match_id
            .as_ref()
            .filter(|id| !seen.insert((referee_code.clone(), (*id).clone())))
        {
            parsed.duplicate(format!("{referee_code}/{id}"));
            continue;
        }

        parsed.records.push(MatchRecord {
            match_id,
            category: text(row, indices.category),
            group: text(row, indices.group),
            date: parse_date(cell(row, indices.date), settings.date_order),
            role: text(row, indices.role),
            referee_code,
        });
    }

    parsed.log_summary();
    parsed
}

fn text(row: &[String], idx: usize) -> String {
    clean_cell(cell(row, idx)).map(String::from).unwrap_or_default()
}
