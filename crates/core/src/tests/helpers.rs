// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::RawInputs;
use refgrid_domain::{
    CodeNormalization, MatchId, MatchRecord, MatchWithScore, RefereeCode, RefereeIdentity,
    UnavailabilityRecord,
};
use refgrid_ingest::{DelimitedFormat, InputKind, RawTable, RawText};
use time::Date;

pub const ROSTER_CSV: &str = "Cod.Mecc.;Cognome;Nome;Sezione;Età
123.0;Rossi;Mario;Roma 1;24
456;Bianchi;Luca;Roma 2;31
";

pub const SCORE_REPORT: &str = "Relazione osservatori
4567 U17 A ROSSI MARIO 7,5 7
4600 U15 B BIANCHI LUCA x 7
";

pub const UNAVAILABILITY_CSV: &str = "Cod.Mecc.,Inizio,Fine,Motivo
123,10/05/2025,12/05/2025,injury
";

pub fn code(raw: &str) -> RefereeCode {
    RefereeCode::parse(raw, &CodeNormalization::default()).expect("valid code")
}

pub fn table(text: &str, input: InputKind) -> RawTable {
    RawTable::from_delimited(text, &DelimitedFormat::default(), input).expect("readable fixture")
}

/// A headerless extract row with the default column layout.
pub fn extract_row(
    match_id: &str,
    category: &str,
    group: &str,
    date: &str,
    code: &str,
) -> Vec<String> {
    let mut row: Vec<String> = vec![String::new(); 18];
    row[1] = String::from(match_id);
    row[2] = String::from(category);
    row[3] = String::from(group);
    row[6] = String::from(date);
    row[16] = String::from("Referee");
    row[17] = String::from(code);
    row
}

pub fn extract() -> RawTable {
    RawTable::new(
        None,
        vec![
            extract_row("4567", "U17", "Girone A", "03/05/2025", "123.0"),
            extract_row("4600", "U15", "Girone B", "15/05/2025", "456"),
            extract_row("4700", "U19", "Girone C", "15/05/2025", "999"),
        ],
    )
}

pub fn full_inputs() -> RawInputs {
    RawInputs {
        roster: Some(table(ROSTER_CSV, InputKind::Roster)),
        matches: Some(extract()),
        scores: Some(RawText::from_form_feed(SCORE_REPORT)),
        unavailability: Some(table(UNAVAILABILITY_CSV, InputKind::Unavailability)),
    }
}

pub fn referee(raw_code: &str, surname: &str) -> RefereeIdentity {
    RefereeIdentity {
        code: code(raw_code),
        surname: String::from(surname),
        given_name: String::from("Test"),
        section: String::new(),
        age: None,
    }
}

pub fn scored(
    match_id: &str,
    raw_code: &str,
    date: Option<Date>,
    role: &str,
    scores: Option<(f64, f64)>,
) -> MatchWithScore {
    MatchWithScore {
        assignment: MatchRecord {
            match_id: Some(MatchId::parse(match_id).expect("valid id")),
            category: String::from("U17"),
            group: String::from("A"),
            date,
            role: String::from(role),
            referee_code: code(raw_code),
        },
        score_a: scores.map(|(a, _)| a),
        score_b: scores.map(|(_, b)| b),
    }
}

pub fn unavailable(raw_code: &str, start: Date, end: Date, reason: &str) -> UnavailabilityRecord {
    UnavailabilityRecord {
        referee_code: code(raw_code),
        start,
        end,
        reason: String::from(reason),
    }
}
