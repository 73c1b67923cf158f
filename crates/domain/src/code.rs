// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Referee code normalization.
//!
//! Referee codes travel through spreadsheets, delimited exports and PDF
//! reports, and each source serializes them differently: as text, as
//! zero-padded text, or as a float (`"123.0"`). Every source is normalized
//! through the same [`CodeNormalization`] rule before codes are compared.
//!
//! ## Invariants
//!
//! - Normalization is idempotent: `apply(apply(x)) == apply(x)`
//! - A normalized code never contains whitespace
//! - A normalized code is never empty

use crate::cell::clean_cell;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Fixed-width adjustment applied after cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeWidth {
    /// Leave the code length as-is.
    #[default]
    Unchanged,
    /// Left-pad with zeros up to the given width.
    PadTo(usize),
    /// Keep only the trailing characters up to the given width.
    LastDigits(usize),
    /// Pad, then truncate, so the code is exactly the given width.
    Exact(usize),
}

impl CodeWidth {
    const fn rule_name(self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::PadTo(_) => "pad_to",
            Self::LastDigits(_) => "last_digits",
            Self::Exact(_) => "exact",
        }
    }

    const fn width(self) -> Option<usize> {
        match self {
            Self::Unchanged => None,
            Self::PadTo(n) | Self::LastDigits(n) | Self::Exact(n) => Some(n),
        }
    }
}

/// The rule used to canonicalize referee codes across all inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeNormalization {
    /// Remove float decoration such as the `.0` in `"123.0"`.
    pub strip_float_suffix: bool,
    /// Fixed-width adjustment.
    pub width: CodeWidth,
}

impl Default for CodeNormalization {
    fn default() -> Self {
        Self {
            strip_float_suffix: true,
            width: CodeWidth::Unchanged,
        }
    }
}

impl CodeNormalization {
    /// Checks that the configured width is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if a width rule is configured with a width of zero.
    pub const fn validate(&self) -> Result<(), DomainError> {
        if let Some(0) = self.width.width() {
            return Err(DomainError::InvalidWidth {
                rule: self.width.rule_name(),
            });
        }
        Ok(())
    }

    /// Normalizes a raw code.
    ///
    /// Returns `None` when nothing usable remains (blank cells, null
    /// markers, or a bare float suffix).
    #[must_use]
    pub fn apply(&self, raw: &str) -> Option<String> {
        let cleaned: &str = clean_cell(raw)?;
        let mut value: String = cleaned.chars().filter(|c| !c.is_whitespace()).collect();

        if self.strip_float_suffix {
            strip_float_suffix(&mut value);
        }

        match self.width {
            CodeWidth::Unchanged => {}
            CodeWidth::PadTo(width) => pad_left(&mut value, width),
            CodeWidth::LastDigits(width) => keep_last(&mut value, width),
            CodeWidth::Exact(width) => {
                pad_left(&mut value, width);
                keep_last(&mut value, width);
            }
        }

        // Width rules can expose a null marker such as the tail of "xnan"
        clean_cell(&value)?;
        Some(value)
    }
}

/// Removes trailing `.0`, `.00`, ... groups until none remain.
fn strip_float_suffix(value: &mut String) {
    while let Some(idx) = value.rfind('.') {
        let fraction: &str = &value[idx + 1..];
        if fraction.is_empty() || !fraction.bytes().all(|b| b == b'0') {
            break;
        }
        value.truncate(idx);
    }
}

fn pad_left(value: &mut String, width: usize) {
    let len: usize = value.chars().count();
    if len < width {
        let mut padded: String = "0".repeat(width - len);
        padded.push_str(value);
        *value = padded;
    }
}

fn keep_last(value: &mut String, width: usize) {
    let len: usize = value.chars().count();
    if len > width {
        *value = value.chars().skip(len - width).collect();
    }
}

/// A normalized referee code.
///
/// Built through a [`CodeNormalization`] so that codes read from different
/// sources compare equal when they name the same referee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefereeCode(String);

impl RefereeCode {
    /// Normalizes `raw` into a code, if anything usable remains.
    #[must_use]
    pub fn parse(raw: &str, rule: &CodeNormalization) -> Option<Self> {
        rule.apply(raw).map(Self)
    }

    /// Returns the normalized code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefereeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
