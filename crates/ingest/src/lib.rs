// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Record parsers for the four reconciliation inputs.
//!
//! Each parser takes raw cells or text plus an injected column mapping and
//! returns a [`Parsed`] record set. Parsers never fail as a whole: bad rows
//! are skipped and reported, and a source missing a required column
//! degrades to an empty set with a `MissingField` condition.

mod columns;
mod error;
mod hash;
mod matches;
mod outcome;
mod roster;
mod scores;
mod settings;
mod table;
mod unavailability;

#[cfg(test)]
mod tests;

pub use columns::ColumnRef;
pub use error::{IngestError, InputKind};
pub use hash::{ContentHash, Fingerprint};
pub use matches::{MATCH_ID_FIELD, MatchColumns, parse_matches};
pub use outcome::Parsed;
pub use roster::{RosterColumns, parse_roster};
pub use scores::{ExtractionStrategy, LineMatch, ScoreExtraction, parse_scores};
pub use settings::ParseSettings;
pub use table::{DelimitedFormat, Delimiter, RawTable, RawText};
pub use unavailability::{UnavailabilityColumns, parse_unavailability};
