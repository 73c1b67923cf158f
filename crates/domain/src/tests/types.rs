// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CodeNormalization, MatchId, MatchRecord, MatchWithScore, RefereeCode, RefereeIdentity,
    TestPeriod, UnavailabilityRecord, WeekBucket,
};
use time::macros::date;

fn code(raw: &str) -> RefereeCode {
    RefereeCode::parse(raw, &CodeNormalization::default()).expect("valid code")
}

fn create_test_match() -> MatchRecord {
    MatchRecord {
        match_id: Some(MatchId::parse("4567").expect("valid id")),
        category: String::from("U17"),
        group: String::from("A"),
        date: Some(date!(2025 - 05 - 03)),
        role: String::from("Referee"),
        referee_code: code("123"),
    }
}

#[test]
fn test_full_name() {
    let mut referee: RefereeIdentity = RefereeIdentity {
        code: code("123"),
        surname: String::from("Rossi"),
        given_name: String::from("Mario"),
        section: String::from("Roma 1"),
        age: Some(24),
    };
    assert_eq!(referee.full_name(), "Rossi Mario");

    referee.given_name = String::new();
    assert_eq!(referee.full_name(), "Rossi");
}

#[test]
fn test_unscored_match_has_no_scores() {
    let joined: MatchWithScore = MatchWithScore::unscored(create_test_match());
    assert!(joined.score_a.is_none());
    assert!(joined.score_b.is_none());
    assert!(!joined.is_scored());
}

#[test]
fn test_unavailability_overlaps_only_touching_weeks() {
    let period: TestPeriod =
        TestPeriod::new(date!(2025 - 05 - 01), date!(2025 - 06 - 30)).expect("valid period");
    let weeks: Vec<WeekBucket> = period.weeks().expect("weeks");

    let record: UnavailabilityRecord = UnavailabilityRecord {
        referee_code: code("123"),
        start: date!(2025 - 05 - 10),
        end: date!(2025 - 05 - 12),
        reason: String::from("injury"),
    };

    let overlapping: Vec<usize> = weeks
        .iter()
        .filter(|w| record.overlaps(w))
        .map(WeekBucket::index)
        .collect();
    assert_eq!(overlapping, vec![1]);
}

#[test]
fn test_single_day_range_on_last_day_of_week() {
    let period: TestPeriod =
        TestPeriod::new(date!(2025 - 05 - 01), date!(2025 - 05 - 31)).expect("valid period");
    let weeks: Vec<WeekBucket> = period.weeks().expect("weeks");

    let record: UnavailabilityRecord = UnavailabilityRecord {
        referee_code: code("123"),
        start: date!(2025 - 05 - 07),
        end: date!(2025 - 05 - 07),
        reason: String::from("exam"),
    };
    assert!(record.overlaps(&weeks[0]));
    assert!(!record.overlaps(&weeks[1]));
}

#[test]
fn test_match_record_serializes_date_as_iso() {
    let json: String = serde_json::to_string(&create_test_match()).expect("serialize");
    assert!(json.contains(r#""date":"2025-05-03""#));
    assert!(json.contains(r#""referee_code":"123""#));
}
