// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unavailability sheet parsing.
//!
//! Ranges are inclusive at both ends and may overlap each other. A row
//! whose start or end date cannot be read, or whose end precedes its
//! start, is skipped.

use crate::columns::{ColumnRef, Resolver};
use crate::error::InputKind;
use crate::outcome::Parsed;
use crate::settings::ParseSettings;
use crate::table::{RawTable, cell, is_blank_row};
use refgrid_domain::{RefereeCode, UnavailabilityRecord, clean_cell, parse_date};
use serde::{Deserialize, Serialize};

/// Column mapping for the unavailability sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnavailabilityColumns {
    /// Referee code.
    pub referee_code: ColumnRef,
    /// First unavailable day.
    pub start: ColumnRef,
    /// Last unavailable day.
    pub end: ColumnRef,
    /// Free-text reason.
    pub reason: ColumnRef,
}

impl Default for UnavailabilityColumns {
    fn default() -> Self {
        Self {
            referee_code: ColumnRef::from("Cod.Mecc."),
            start: ColumnRef::from("Inizio"),
            end: ColumnRef::from("Fine"),
            reason: ColumnRef::from("Motivo"),
        }
    }
}

/// Parses unavailability rows.
#[must_use]
pub fn parse_unavailability(
    table: &RawTable,
    columns: &UnavailabilityColumns,
    settings: &ParseSettings,
) -> Parsed<UnavailabilityRecord> {
    let mut resolver: Resolver<'_> = Resolver::new(table, InputKind::Unavailability);
    let code_idx: usize = resolver.required("referee_code", &columns.referee_code);
    let start_idx: usize = resolver.required("start", &columns.start);
    let end_idx: usize = resolver.required("end", &columns.end);
    let reason_idx: usize = resolver.required("reason", &columns.reason);
    if let Err(missing) = resolver.finish() {
        return Parsed::degraded(InputKind::Unavailability, missing);
    }

    let mut parsed: Parsed<UnavailabilityRecord> = Parsed::new(InputKind::Unavailability);

    for (idx, row) in table.rows().iter().enumerate() {
        if is_blank_row(row) {
            continue;
        }
        let line: usize = table.line_number(idx);

        let raw_code: &str = cell(row, code_idx);
        let Some(referee_code) = RefereeCode::parse(raw_code, &settings.normalization) else {
            parsed.skip(
                line,
                format!("referee_code: missing or unreadable '{}'", raw_code.trim()),
            );
            continue;
        };

        let raw_start: &str = cell(row, start_idx);
        let raw_end: &str = cell(row, end_idx);
        let (Some(start), Some(end)) = (
            parse_date(raw_start, settings.date_order),
            parse_date(raw_end, settings.date_order),
        ) else {
            parsed.skip(
                line,
                format!(
                    "dates: unreadable range '{}' - '{}'",
                    raw_start.trim(),
                    raw_end.trim()
                ),
            );
            continue;
        };

        if end < start {
            parsed.skip(line, format!("dates: range ends {end} before it starts {start}"));
            continue;
        }

        parsed.records.push(UnavailabilityRecord {
            referee_code,
            start,
            end,
            reason: clean_cell(cell(row, reason_idx))
                .map(String::from)
                .unwrap_or_default(),
        });
    }

    parsed.log_summary();
    parsed
}
