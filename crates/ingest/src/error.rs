// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the ingest layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The input source a record set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// The referee roster.
    Roster,
    /// The per-match-day competition extract.
    Matches,
    /// The score report text.
    Scores,
    /// The unavailability sheet.
    Unavailability,
}

impl InputKind {
    /// Returns the lowercase name used in messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Roster => "roster",
            Self::Matches => "matches",
            Self::Scores => "scores",
            Self::Unavailability => "unavailability",
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conditions raised while turning raw input into records.
///
/// Every variant names the input it belongs to. None of them abort a run:
/// row-level problems skip the row, source-level problems degrade the
/// source to an empty record set.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestError {
    /// A required column or marker is absent from the input.
    #[error("{input}: required field '{field}' not found (expected {column})")]
    MissingField {
        /// The input missing the field.
        input: InputKind,
        /// The logical field name.
        field: String,
        /// Where the field was expected.
        column: String,
    },

    /// An optional input was not supplied.
    #[error("{input}: input not supplied")]
    EmptyInput {
        /// The absent input.
        input: InputKind,
    },

    /// A single row or line could not be read and was skipped.
    #[error("{input}: line {line}: {reason}")]
    UnparseableValue {
        /// The input containing the row.
        input: InputKind,
        /// 1-based line number in the source.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// A record repeated a key already seen; the later record was ignored.
    #[error("{input}: duplicate key '{key}' ignored")]
    DuplicateKey {
        /// The input containing the duplicate.
        input: InputKind,
        /// The repeated key.
        key: String,
    },

    /// The input could not be read as a table at all.
    #[error("{input}: malformed input: {reason}")]
    MalformedInput {
        /// The unreadable input.
        input: InputKind,
        /// Why reading failed.
        reason: String,
    },
}

impl IngestError {
    /// Returns the input this condition belongs to.
    #[must_use]
    pub const fn input(&self) -> InputKind {
        match self {
            Self::MissingField { input, .. }
            | Self::EmptyInput { input }
            | Self::UnparseableValue { input, .. }
            | Self::DuplicateKey { input, .. }
            | Self::MalformedInput { input, .. } => *input,
        }
    }
}
