// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Spellings that spreadsheet exports use for an empty cell.
const NULL_MARKERS: &[&str] = &["nan", "nat", "none", "null"];

/// Trims a raw cell and filters out empty and null-marker cells.
///
/// Spreadsheet exports often write missing values as `nan` or `None`
/// instead of leaving the cell blank.
#[must_use]
pub fn clean_cell(raw: &str) -> Option<&str> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty()
        || NULL_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return None;
    }
    Some(trimmed)
}
