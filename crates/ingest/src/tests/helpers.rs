// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DelimitedFormat, InputKind, RawTable};

/// Width of a competition extract row; the default mapping reads up to column 17.
pub const EXTRACT_WIDTH: usize = 18;

pub fn delimited(text: &str, input: InputKind) -> RawTable {
    RawTable::from_delimited(text, &DelimitedFormat::default(), input).expect("readable fixture")
}

/// Builds one headerless extract row with the default column layout.
pub fn extract_row(
    match_id: &str,
    category: &str,
    group: &str,
    date: &str,
    role: &str,
    code: &str,
) -> Vec<String> {
    let mut row: Vec<String> = vec![String::new(); EXTRACT_WIDTH];
    row[0] = String::from("Serie");
    row[1] = String::from(match_id);
    row[2] = String::from(category);
    row[3] = String::from(group);
    row[6] = String::from(date);
    row[16] = String::from(role);
    row[17] = String::from(code);
    row
}

pub fn extract(rows: Vec<Vec<String>>) -> RawTable {
    RawTable::new(None, rows)
}
