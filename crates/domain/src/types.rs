// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::code::{CodeNormalization, CodeWidth, RefereeCode};
use crate::week::WeekBucket;
use serde::{Deserialize, Serialize};
use time::Date;

/// Match identifiers only get whitespace and float cleanup, never width rules.
const MATCH_ID_RULE: CodeNormalization = CodeNormalization {
    strip_float_suffix: true,
    width: CodeWidth::Unchanged,
};

/// A normalized match identifier.
///
/// This is the join key between match assignments and score reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    /// Normalizes a raw match identifier.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        MATCH_ID_RULE.apply(raw).map(Self)
    }

    /// Returns the normalized identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns whether the identifier is made only of ASCII digits.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A referee as listed in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefereeIdentity {
    /// The normalized referee code.
    pub code: RefereeCode,
    /// Family name.
    pub surname: String,
    /// Given name.
    pub given_name: String,
    /// Referee section (local association). Empty when not provided.
    pub section: String,
    /// Age in years, when the roster provides a readable one.
    pub age: Option<u16>,
}

impl RefereeIdentity {
    /// Returns `"Surname Given"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        match (self.surname.is_empty(), self.given_name.is_empty()) {
            (false, false) => format!("{} {}", self.surname, self.given_name),
            (false, true) => self.surname.clone(),
            (true, _) => self.given_name.clone(),
        }
    }
}

/// A single match assignment for one referee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The match identifier. `None` when the extract has no match id column,
    /// in which case the assignment can never be scored.
    pub match_id: Option<MatchId>,
    /// Competition category (for example `U17`).
    pub category: String,
    /// Group within the category.
    pub group: String,
    /// Match date. `None` when the source date was unreadable.
    #[serde(with = "crate::iso_date::option")]
    pub date: Option<Date>,
    /// The referee's function in this match.
    pub role: String,
    /// The assigned referee.
    pub referee_code: RefereeCode,
}

/// Evaluation marks extracted from a score report.
///
/// Scores carry no referee code: they reach a referee only through the
/// match they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// The match identifier.
    pub match_id: MatchId,
    /// First mark (OA).
    pub score_a: Option<f64>,
    /// Second mark (OT).
    pub score_b: Option<f64>,
}

/// A declared unavailability range for one referee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailabilityRecord {
    /// The unavailable referee.
    pub referee_code: RefereeCode,
    /// First unavailable day (inclusive).
    #[serde(with = "crate::iso_date")]
    pub start: Date,
    /// Last unavailable day (inclusive).
    #[serde(with = "crate::iso_date")]
    pub end: Date,
    /// Free-text reason.
    pub reason: String,
}

impl UnavailabilityRecord {
    /// Returns whether this range touches `week` (both ends inclusive).
    #[must_use]
    pub fn overlaps(&self, week: &WeekBucket) -> bool {
        week.overlaps(self.start, self.end)
    }
}

/// A match assignment together with its scores, if any were reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchWithScore {
    /// The underlying assignment.
    pub assignment: MatchRecord,
    /// First mark (OA), absent when no score was reported.
    pub score_a: Option<f64>,
    /// Second mark (OT), absent when no score was reported.
    pub score_b: Option<f64>,
}

impl MatchWithScore {
    /// Wraps an assignment with no score.
    #[must_use]
    pub const fn unscored(assignment: MatchRecord) -> Self {
        Self {
            assignment,
            score_a: None,
            score_b: None,
        }
    }

    /// Returns whether any score is attached.
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.score_a.is_some() || self.score_b.is_some()
    }
}
