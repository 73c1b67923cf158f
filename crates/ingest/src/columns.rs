// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column mapping.
//!
//! Each source system lays its columns out differently, so every parser
//! takes an injected mapping from logical fields to columns. A mapping is
//! resolved once per input against the actual table before any row is read;
//! a shortfall becomes a named `MissingField` condition instead of an
//! out-of-range index.

use crate::error::{IngestError, InputKind};
use crate::table::RawTable;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A reference to one column of a table.
///
/// In configuration a JSON number is a zero-based position and a JSON string
/// is a header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// Zero-based column position.
    Position(usize),
    /// Header name, matched trimmed and case-insensitively.
    Header(String),
}

impl From<usize> for ColumnRef {
    fn from(position: usize) -> Self {
        Self::Position(position)
    }
}

impl From<&str> for ColumnRef {
    fn from(header: &str) -> Self {
        Self::Header(String::from(header))
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position(idx) => write!(f, "column #{idx}"),
            Self::Header(name) => write!(f, "column '{name}'"),
        }
    }
}

/// Normalizes a header string for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

/// Resolves column references against one table, collecting every shortfall.
pub(crate) struct Resolver<'a> {
    table: &'a RawTable,
    input: InputKind,
    missing: Vec<IngestError>,
}

impl<'a> Resolver<'a> {
    pub(crate) const fn new(table: &'a RawTable, input: InputKind) -> Self {
        Self {
            table,
            input,
            missing: Vec::new(),
        }
    }

    fn lookup(&self, column: &ColumnRef) -> Option<usize> {
        match column {
            ColumnRef::Position(idx) => (*idx < self.table.column_count()).then_some(*idx),
            ColumnRef::Header(name) => {
                let wanted: String = normalize_header(name);
                self.table
                    .headers()?
                    .iter()
                    .position(|h| normalize_header(h) == wanted)
            }
        }
    }

    /// Resolves a required column.
    ///
    /// A missing column is recorded and `0` returned; callers must check
    /// [`Resolver::finish`] before using any index.
    pub(crate) fn required(&mut self, field: &str, column: &ColumnRef) -> usize {
        self.lookup(column).unwrap_or_else(|| {
            self.missing.push(IngestError::MissingField {
                input: self.input,
                field: String::from(field),
                column: column.to_string(),
            });
            0
        })
    }

    /// Resolves a column whose absence only disables the fields keyed on it.
    ///
    /// The shortfall is handed back as a `MissingField` condition instead of
    /// failing the whole input at [`Resolver::finish`].
    pub(crate) fn keyed(&self, field: &str, column: &ColumnRef) -> Result<usize, IngestError> {
        self.lookup(column).ok_or_else(|| IngestError::MissingField {
            input: self.input,
            field: String::from(field),
            column: column.to_string(),
        })
    }

    /// Resolves an optional column; a configured but absent column is logged.
    pub(crate) fn optional(&self, field: &str, column: Option<&ColumnRef>) -> Option<usize> {
        let column: &ColumnRef = column?;
        let resolved: Option<usize> = self.lookup(column);
        if resolved.is_none() {
            warn!(
                input = %self.input,
                field,
                column = %column,
                "Optional column not found; field left empty"
            );
        }
        resolved
    }

    /// Returns every missing required column, if any.
    pub(crate) fn finish(self) -> Result<(), Vec<IngestError>> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(self.missing)
        }
    }
}
