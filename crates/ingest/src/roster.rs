// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster parsing.
//!
//! One row per referee. Codes are unique: the first row for a code wins and
//! later rows are reported as `DuplicateKey`.

use crate::columns::{ColumnRef, Resolver};
use crate::error::InputKind;
use crate::outcome::Parsed;
use crate::settings::ParseSettings;
use crate::table::{RawTable, cell, is_blank_row};
use refgrid_domain::{CodeNormalization, RefereeCode, RefereeIdentity, clean_cell};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Column mapping for the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterColumns {
    /// Referee code.
    pub code: ColumnRef,
    /// Family name.
    pub surname: ColumnRef,
    /// Given name.
    pub given_name: ColumnRef,
    /// Section, if the roster has one.
    pub section: Option<ColumnRef>,
    /// Age, if the roster has one.
    pub age: Option<ColumnRef>,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            code: ColumnRef::from("Cod.Mecc."),
            surname: ColumnRef::from("Cognome"),
            given_name: ColumnRef::from("Nome"),
            section: Some(ColumnRef::from("Sezione")),
            age: Some(ColumnRef::from("Età")),
        }
    }
}

/// Resolved column positions.
struct RosterIndices {
    code: usize,
    surname: usize,
    given_name: usize,
    section: Option<usize>,
    age: Option<usize>,
}

/// Parses roster rows into referee identities.
#[must_use]
pub fn parse_roster(
    table: &RawTable,
    columns: &RosterColumns,
    settings: &ParseSettings,
) -> Parsed<RefereeIdentity> {
    let mut resolver: Resolver<'_> = Resolver::new(table, InputKind::Roster);
    let indices: RosterIndices = RosterIndices {
        code: resolver.required("code", &columns.code),
        surname: resolver.required("surname", &columns.surname),
        given_name: resolver.required("given_name", &columns.given_name),
        section: resolver.optional("section", columns.section.as_ref()),
        age: resolver.optional("age", columns.age.as_ref()),
    };
    if let Err(missing) = resolver.finish() {
        return Parsed::degraded(InputKind::Roster, missing);
    }

    let mut parsed: Parsed<RefereeIdentity> = Parsed::new(InputKind::Roster);
    let mut seen: HashSet<RefereeCode> = HashSet::new();

    for (idx, row) in table.rows().iter().enumerate() {
        if is_blank_row(row) {
            continue;
        }
        let line: usize = table.line_number(idx);

        let raw_code: &str = cell(row, indices.code);
        let Some(code) = RefereeCode::parse(raw_code, &settings.normalization) else {
            parsed.skip(line, format!("code: missing or unreadable '{}'", raw_code.trim()));
            continue;
        };

        if !seen.insert(code.clone()) {
            parsed.duplicate(code.value());
            continue;
        }

        parsed.records.push(RefereeIdentity {
            code,
            surname: text_cell(row, Some(indices.surname)),
            given_name: text_cell(row, Some(indices.given_name)),
            section: text_cell(row, indices.section),
            age: indices.age.and_then(|i| parse_age(cell(row, i))),
        });
    }

    parsed.log_summary();
    parsed
}

fn text_cell(row: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| clean_cell(cell(row, i)))
        .map(String::from)
        .unwrap_or_default()
}

/// Reads an age cell, tolerating float decoration (`"34.0"`).
fn parse_age(raw: &str) -> Option<u16> {
    CodeNormalization::default().apply(raw)?.parse().ok()
}
