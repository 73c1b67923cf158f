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

mod cell;
mod code;
mod dates;
mod decimal;
mod error;
mod types;
mod week;

#[cfg(test)]
mod tests;

use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub use cell::clean_cell;
pub use code::{CodeNormalization, CodeWidth, RefereeCode};
pub use dates::{DateOrder, parse_date};
pub use decimal::{DecimalSeparator, parse_decimal};
pub use error::DomainError;
pub use types::{
    MatchId, MatchRecord, MatchWithScore, RefereeIdentity, ScoreRecord, UnavailabilityRecord,
};
pub use week::{PeriodBounds, TestPeriod, WEEK_DAYS, WeekBucket};
