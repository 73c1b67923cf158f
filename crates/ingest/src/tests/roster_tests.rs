// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::delimited;
use crate::{
    ColumnRef, IngestError, InputKind, ParseSettings, Parsed, RawTable, RosterColumns,
    parse_roster,
};
use refgrid_domain::RefereeIdentity;

const ROSTER: &str = "Cod.Mecc.;Cognome;Nome;Sezione;Età
123.0;Rossi;Mario;Roma 1;24
 123 ;Doppio;Carlo;Roma 2;30
;Senzacodice;Anna;;
456;Bianchi;Luca;;nan
";

#[test]
fn test_parse_roster_normalizes_codes() {
    let table: RawTable = delimited(ROSTER, InputKind::Roster);
    let parsed: Parsed<RefereeIdentity> =
        parse_roster(&table, &RosterColumns::default(), &ParseSettings::default());

    let codes: Vec<&str> = parsed.records.iter().map(|r| r.code.value()).collect();
    assert_eq!(codes, vec!["123", "456"]);

    let first: &RefereeIdentity = &parsed.records[0];
    assert_eq!(first.full_name(), "Rossi Mario");
    assert_eq!(first.section, "Roma 1");
    assert_eq!(first.age, Some(24));

    let second: &RefereeIdentity = &parsed.records[1];
    assert_eq!(second.section, "");
    assert_eq!(second.age, None);
}

#[test]
fn test_parse_roster_first_duplicate_wins() {
    let table: RawTable = delimited(ROSTER, InputKind::Roster);
    let parsed: Parsed<RefereeIdentity> =
        parse_roster(&table, &RosterColumns::default(), &ParseSettings::default());

    assert_eq!(parsed.records[0].surname, "Rossi");
    assert_eq!(
        parsed.conditions,
        vec![IngestError::DuplicateKey {
            input: InputKind::Roster,
            key: String::from("123"),
        }]
    );
}

#[test]
fn test_parse_roster_skips_row_without_code() {
    let table: RawTable = delimited(ROSTER, InputKind::Roster);
    let parsed: Parsed<RefereeIdentity> =
        parse_roster(&table, &RosterColumns::default(), &ParseSettings::default());

    assert_eq!(parsed.skipped.len(), 1);
    assert!(matches!(
        &parsed.skipped[0],
        IngestError::UnparseableValue { line: 4, .. }
    ));
}

#[test]
fn test_parse_roster_missing_code_column_degrades() {
    let table: RawTable = delimited("Codice;Cognome;Nome\n123;Rossi;Mario\n", InputKind::Roster);
    let parsed: Parsed<RefereeIdentity> =
        parse_roster(&table, &RosterColumns::default(), &ParseSettings::default());

    assert!(parsed.records.is_empty());
    assert!(parsed.is_missing_field("code"));
    assert!(parsed.is_degraded());
    assert!(parsed.is_supplied());
}

#[test]
fn test_parse_roster_optional_columns_may_be_absent() {
    let table: RawTable = delimited("Cod.Mecc.;Cognome;Nome\n123;Rossi;Mario\n", InputKind::Roster);
    let parsed: Parsed<RefereeIdentity> =
        parse_roster(&table, &RosterColumns::default(), &ParseSettings::default());

    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].section, "");
    assert_eq!(parsed.records[0].age, None);
    assert!(parsed.conditions.is_empty());
}

#[test]
fn test_parse_roster_custom_mapping_by_position() {
    let table: RawTable = RawTable::new(
        None,
        vec![vec![
            String::from("Verdi"),
            String::from("Anna"),
            String::from("00789"),
        ]],
    );
    let columns: RosterColumns = RosterColumns {
        code: ColumnRef::Position(2),
        surname: ColumnRef::Position(0),
        given_name: ColumnRef::Position(1),
        section: None,
        age: None,
    };
    let parsed: Parsed<RefereeIdentity> =
        parse_roster(&table, &columns, &ParseSettings::default());

    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].code.value(), "00789");
    assert_eq!(parsed.records[0].full_name(), "Verdi Anna");
}

#[test]
fn test_not_supplied_roster() {
    let parsed: Parsed<RefereeIdentity> = Parsed::not_supplied(InputKind::Roster);
    assert!(!parsed.is_supplied());
    assert!(!parsed.is_degraded());
    assert_eq!(
        parsed.conditions[0].to_string(),
        "roster: input not supplied"
    );
}
