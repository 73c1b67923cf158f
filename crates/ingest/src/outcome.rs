// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{IngestError, InputKind};
use serde::Serialize;
use tracing::{debug, info, warn};

/// The result of parsing one input source.
///
/// Parsing never fails as a whole. Rows that cannot be read land in
/// `skipped`; source-level problems land in `conditions` and usually leave
/// `records` empty. A match extract that lacks only its match id column is
/// the exception: its records are kept, unkeyed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parsed<T> {
    /// The source these records came from.
    pub input: InputKind,
    /// Successfully parsed records, in source order.
    pub records: Vec<T>,
    /// Row-level problems (`UnparseableValue`).
    pub skipped: Vec<IngestError>,
    /// Source-level conditions (`MissingField`, `EmptyInput`, `DuplicateKey`, ...).
    pub conditions: Vec<IngestError>,
}

impl<T> Parsed<T> {
    /// Creates an empty, healthy result.
    #[must_use]
    pub const fn new(input: InputKind) -> Self {
        Self {
            input,
            records: Vec::new(),
            skipped: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Creates the result for an input that was not supplied.
    #[must_use]
    pub fn not_supplied(input: InputKind) -> Self {
        debug!(input = %input, "Input not supplied; treating as empty");
        let mut parsed: Self = Self::new(input);
        parsed.conditions.push(IngestError::EmptyInput { input });
        parsed
    }

    /// Creates the result for an input that could not be used at all.
    #[must_use]
    pub fn degraded(input: InputKind, conditions: Vec<IngestError>) -> Self {
        for condition in &conditions {
            warn!(input = %input, "{condition}");
        }
        let mut parsed: Self = Self::new(input);
        parsed.conditions = conditions;
        parsed
    }

    /// Returns whether the input was supplied.
    #[must_use]
    pub fn is_supplied(&self) -> bool {
        !self
            .conditions
            .iter()
            .any(|c| matches!(c, IngestError::EmptyInput { .. }))
    }

    /// Returns whether the named required field was missing.
    #[must_use]
    pub fn is_missing_field(&self, name: &str) -> bool {
        self.conditions
            .iter()
            .any(|c| matches!(c, IngestError::MissingField { field, .. } if field == name))
    }

    /// Returns whether a source-level failure disabled all or part of the input.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.conditions.iter().any(|c| {
            matches!(
                c,
                IngestError::MissingField { .. } | IngestError::MalformedInput { .. }
            )
        })
    }

    pub(crate) fn skip(&mut self, line: usize, reason: impl Into<String>) {
        let reason: String = reason.into();
        debug!(input = %self.input, line, reason = %reason, "Skipping row");
        self.skipped.push(IngestError::UnparseableValue {
            input: self.input,
            line,
            reason,
        });
    }

    pub(crate) fn duplicate(&mut self, key: impl Into<String>) {
        let key: String = key.into();
        warn!(input = %self.input, key = %key, "Duplicate key ignored");
        self.conditions.push(IngestError::DuplicateKey {
            input: self.input,
            key,
        });
    }

    pub(crate) fn log_summary(&self) {
        info!(
            input = %self.input,
            records = self.records.len(),
            skipped = self.skipped.len(),
            conditions = self.conditions.len(),
            "Parsed input"
        );
    }
}
