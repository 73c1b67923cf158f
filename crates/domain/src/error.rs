// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur while building domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The test period ends before it starts.
    InvalidPeriod {
        /// The requested first day.
        start: Date,
        /// The requested last day.
        end: Date,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A code width rule was configured with a zero width.
    InvalidWidth {
        /// The name of the width rule.
        rule: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPeriod { start, end } => {
                write!(
                    f,
                    "Invalid test period: end date {end} is before start date {start}"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidWidth { rule } => {
                write!(f, "Invalid code width for rule '{rule}': must be greater than 0")
            }
        }
    }
}

impl std::error::Error for DomainError {}
