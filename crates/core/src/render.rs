// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text conventions for grid cells.
//!
//! The grid carries only what a renderer needs to lay it out: match lines,
//! unavailability annotations and referee labels. Scores always use two
//! decimals; a missing score renders as the configured marker, never as zero.

use refgrid_domain::{MatchRecord, MatchWithScore, RefereeIdentity, UnavailabilityRecord};
use serde::{Deserialize, Serialize};

/// Field separator within a match line.
const SEPARATOR: &str = " – ";

/// Shown when an unavailability range carries no reason.
const UNNAMED_REASON: &str = "Unavailable";

/// How the group of a match is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLabel {
    /// The group exactly as read.
    Full,
    /// Only the final character (`"Girone A"` becomes `"A"`).
    #[default]
    LastCharacter,
}

/// Text conventions applied while building cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// How groups are labeled.
    pub group_label: GroupLabel,
    /// Text of a cell with nothing in it.
    pub empty_marker: String,
    /// Text of an absent score.
    pub missing_score: String,
    /// Prepended to every unavailability annotation.
    pub unavailable_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            group_label: GroupLabel::LastCharacter,
            empty_marker: String::from("-"),
            missing_score: String::from("n/a"),
            unavailable_prefix: String::from("🚫 "),
        }
    }
}

impl RenderOptions {
    /// Applies the group label rule.
    #[must_use]
    pub fn group(&self, group: &str) -> String {
        match self.group_label {
            GroupLabel::Full => String::from(group.trim()),
            GroupLabel::LastCharacter => group
                .trim()
                .chars()
                .last()
                .map(String::from)
                .unwrap_or_default(),
        }
    }

    fn score(&self, value: Option<f64>) -> String {
        value.map_or_else(|| self.missing_score.clone(), |v| format!("{v:.2}"))
    }

    /// Formats one assignment, for example `U17 – A – Referee – OA: 7.50 OT: 7.00`.
    #[must_use]
    pub fn match_line(&self, entry: &MatchWithScore) -> String {
        let assignment: &MatchRecord = &entry.assignment;
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}OA: {} OT: {}",
            assignment.category,
            self.group(&assignment.group),
            assignment.role,
            self.score(entry.score_a),
            self.score(entry.score_b),
        )
    }

    /// Formats one unavailability annotation.
    #[must_use]
    pub fn unavailability_line(&self, record: &UnavailabilityRecord) -> String {
        let reason: &str = if record.reason.is_empty() {
            UNNAMED_REASON
        } else {
            &record.reason
        };
        format!("{}{reason}", self.unavailable_prefix)
    }
}

/// Returns a referee row label such as `ROSSI Mario (123)`.
#[must_use]
pub fn referee_label(referee: &RefereeIdentity) -> String {
    let mut name: String = referee.surname.to_uppercase();
    if !referee.given_name.is_empty() {
        if !name.is_empty() {
            name.push(' ');
        }
        name.push_str(&referee.given_name);
    }
    format!("{name} ({})", referee.code)
}

/// Returns the secondary referee details (section and age), if any.
#[must_use]
pub fn referee_details(referee: &RefereeIdentity) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if !referee.section.is_empty() {
        parts.push(referee.section.clone());
    }
    if let Some(age) = referee.age {
        parts.push(format!("age {age}"));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}
