// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test period and weekly buckets.
//!
//! A test period is a closed date range `[start, end]`. It is tiled by
//! 7-day week buckets starting on `start`.
//!
//! ## Invariants
//!
//! - Buckets are contiguous, non-overlapping and in chronological order
//! - The first bucket starts on the period start date
//! - The final bucket may extend past the period end date
//! - The bucket count is `ceil((end - start + 1 day) / 7 days)`

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::macros::date;
use time::{Date, Duration};

/// Days per bucket.
pub const WEEK_DAYS: i64 = 7;

/// Unvalidated period bounds as they appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBounds {
    /// First day of the period (inclusive).
    #[serde(with = "crate::iso_date")]
    pub start: Date,
    /// Last day of the period (inclusive).
    #[serde(with = "crate::iso_date")]
    pub end: Date,
}

/// The date range covered by a weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PeriodBounds", into = "PeriodBounds")]
pub struct TestPeriod {
    /// First day of the period (inclusive).
    start: Date,
    /// Last day of the period (inclusive).
    end: Date,
}

impl TryFrom<PeriodBounds> for TestPeriod {
    type Error = DomainError;

    fn try_from(bounds: PeriodBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl From<TestPeriod> for PeriodBounds {
    fn from(period: TestPeriod) -> Self {
        Self {
            start: period.start,
            end: period.end,
        }
    }
}

impl Default for TestPeriod {
    /// The 2025 spring test season, 1 May to 30 June.
    fn default() -> Self {
        Self {
            start: date!(2025 - 05 - 01),
            end: date!(2025 - 06 - 30),
        }
    }
}

impl TestPeriod {
    /// Creates a new `TestPeriod`.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is before `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the first day (inclusive).
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day (inclusive).
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns the number of days in the period, both ends included.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    /// Returns the number of week buckets needed to cover the period.
    #[must_use]
    pub fn week_count(&self) -> usize {
        let days: i64 = self.duration_days();
        usize::try_from((days + WEEK_DAYS - 1) / WEEK_DAYS).unwrap_or(0)
    }

    /// Derives the week buckets tiling this period.
    ///
    /// # Errors
    ///
    /// Returns an error if date arithmetic overflows.
    pub fn weeks(&self) -> Result<Vec<WeekBucket>, DomainError> {
        let count: usize = self.week_count();
        let mut weeks: Vec<WeekBucket> = Vec::with_capacity(count);

        for index in 0..count {
            weeks.push(self.derive_week(index)?);
        }

        Ok(weeks)
    }

    fn derive_week(&self, index: usize) -> Result<WeekBucket, DomainError> {
        let offset: i64 = i64::try_from(index)
            .ok()
            .and_then(|i| i.checked_mul(WEEK_DAYS))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("calculating week {index} offset"),
            })?;

        let start: Date = self
            .start
            .checked_add(Duration::days(offset))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("calculating week {index} start date"),
            })?;

        let end: Date = start
            .checked_add(Duration::days(WEEK_DAYS - 1))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("calculating week {index} end date"),
            })?;

        Ok(WeekBucket { index, start, end })
    }

    /// Returns the 0-based index of the bucket containing `date`.
    ///
    /// Dates before the period, or after the last bucket, have no bucket.
    #[must_use]
    pub fn week_index(&self, date: Date) -> Option<usize> {
        if date < self.start {
            return None;
        }
        let offset: i64 = (date - self.start).whole_days() / WEEK_DAYS;
        let index: usize = usize::try_from(offset).ok()?;
        (index < self.week_count()).then_some(index)
    }
}

/// A fixed 7-day aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBucket {
    /// The 0-based position of this bucket within the period.
    index: usize,
    /// First day (inclusive).
    #[serde(with = "crate::iso_date")]
    start: Date,
    /// Last day (inclusive).
    #[serde(with = "crate::iso_date")]
    end: Date,
}

impl WeekBucket {
    /// Returns the 0-based bucket index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the first day (inclusive).
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day (inclusive).
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether `date` falls inside this bucket.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns whether the inclusive range `[start, end]` touches this bucket.
    #[must_use]
    pub fn overlaps(&self, start: Date, end: Date) -> bool {
        start <= self.end && end >= self.start
    }

    /// Returns a display label such as `Week 1 (01/05 - 07/05)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "Week {} ({} - {})",
            self.index + 1,
            day_month(self.start),
            day_month(self.end)
        )
    }
}

fn day_month(date: Date) -> String {
    format!("{:02}/{:02}", date.day(), u8::from(date.month()))
}
