// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Permissive date parsing.
//!
//! Competition extracts and unavailability sheets carry dates in whatever
//! format the exporting tool chose. This module accepts the common ones and
//! never fails loudly: anything it cannot read is `None`.
//!
//! Accepted shapes:
//! - ISO dates and date-times (`2025-05-03`, `2025-05-03 00:00:00`, `2025-05-03T10:30`)
//! - Compact ISO (`20250503`)
//! - Numeric dates with `/`, `-` or `.` separators and two- or four-digit years,
//!   read day-first or month-first per [`DateOrder`]
//! - Spreadsheet serial day numbers (`45780`, `45780.0`)

use crate::cell::clean_cell;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Duration, Month};

/// Largest serial day number a spreadsheet can represent (9999-12-31).
const MAX_SERIAL_DAY: i64 = 2_958_465;

/// Two-digit years below this pivot belong to the 2000s.
const TWO_DIGIT_YEAR_PIVOT: i32 = 70;

/// Field order for ambiguous numeric dates such as `03/05/2025`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `dd/mm/yyyy`.
    #[default]
    DayFirst,
    /// `mm/dd/yyyy`.
    MonthFirst,
}

/// Parses a date cell, returning `None` for anything unreadable.
#[must_use]
pub fn parse_date(raw: &str, order: DateOrder) -> Option<Date> {
    let cleaned: &str = clean_cell(raw)?;

    // Drop any time-of-day component
    let date_part: &str = cleaned.split_whitespace().next()?;
    let date_part: &str = match date_part.split_once('T') {
        Some((head, _)) if head.len() == 10 => head,
        _ => date_part,
    };

    if let Ok(date) = Date::parse(date_part, format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }

    if date_part.len() == 8 && date_part.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = date_part[..4].parse().ok()?;
        let month: Month = Month::try_from(date_part[4..6].parse::<u8>().ok()?).ok()?;
        let day: u8 = date_part[6..].parse().ok()?;
        return Date::from_calendar_date(year, month, day).ok();
    }

    if let Some(date) = parse_serial_day(date_part) {
        return Some(date);
    }

    parse_separated(date_part, order)
}

/// Reads a spreadsheet serial day number (days since 1899-12-30).
fn parse_serial_day(value: &str) -> Option<Date> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let days: i64 = whole.parse().ok()?;
    if !(1..=MAX_SERIAL_DAY).contains(&days) {
        return None;
    }

    let epoch: Date = Date::from_calendar_date(1899, Month::December, 30).ok()?;
    epoch.checked_add(Duration::days(days))
}

/// Reads `a/b/c` style dates with `/`, `-` or `.` separators.
fn parse_separated(value: &str, order: DateOrder) -> Option<Date> {
    let parts: Vec<&str> = value.split(['/', '-', '.']).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let (year, month, day): (&str, &str, &str) = if first.len() == 4 {
        (first, second, third)
    } else {
        match order {
            DateOrder::DayFirst => (third, second, first),
            DateOrder::MonthFirst => (third, first, second),
        }
    };

    let year: i32 = match year.len() {
        2 => {
            let short: i32 = year.parse().ok()?;
            if short < TWO_DIGIT_YEAR_PIVOT {
                2000 + short
            } else {
                1900 + short
            }
        }
        4 => year.parse().ok()?,
        _ => return None,
    };
    let month: Month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
    let day: u8 = day.parse().ok()?;

    Date::from_calendar_date(year, month, day).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_iso_dates() {
        assert_eq!(
            parse_date("2025-05-03", DateOrder::DayFirst),
            Some(date!(2025 - 05 - 03))
        );
        assert_eq!(
            parse_date("2025-05-03 00:00:00", DateOrder::DayFirst),
            Some(date!(2025 - 05 - 03))
        );
        assert_eq!(
            parse_date("2025-05-03T18:30:00", DateOrder::MonthFirst),
            Some(date!(2025 - 05 - 03))
        );
        assert_eq!(
            parse_date("20250503", DateOrder::DayFirst),
            Some(date!(2025 - 05 - 03))
        );
    }

    #[test]
    fn test_day_first_and_month_first() {
        assert_eq!(
            parse_date("03/05/2025", DateOrder::DayFirst),
            Some(date!(2025 - 05 - 03))
        );
        assert_eq!(
            parse_date("03/05/2025", DateOrder::MonthFirst),
            Some(date!(2025 - 03 - 05))
        );
        assert_eq!(
            parse_date("3.5.25", DateOrder::DayFirst),
            Some(date!(2025 - 05 - 03))
        );
        assert_eq!(
            parse_date("31-12-99", DateOrder::DayFirst),
            Some(date!(1999 - 12 - 31))
        );
    }

    #[test]
    fn test_serial_day_numbers() {
        assert_eq!(
            parse_date("45780", DateOrder::DayFirst),
            Some(date!(2025 - 05 - 03))
        );
        assert_eq!(
            parse_date("45780.0", DateOrder::DayFirst),
            Some(date!(2025 - 05 - 03))
        );
    }

    #[test]
    fn test_unparseable_dates_are_none() {
        assert_eq!(parse_date("", DateOrder::DayFirst), None);
        assert_eq!(parse_date("NaT", DateOrder::DayFirst), None);
        assert_eq!(parse_date("not a date", DateOrder::DayFirst), None);
        assert_eq!(parse_date("31/02/2025", DateOrder::DayFirst), None);
        assert_eq!(parse_date("13/13/2025", DateOrder::DayFirst), None);
        assert_eq!(parse_date("1/2/3/4", DateOrder::DayFirst), None);
        assert_eq!(parse_date("0", DateOrder::DayFirst), None);
    }
}
