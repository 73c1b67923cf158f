// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Raw input shapes handed to the parsers.
//!
//! The parsers never touch files. Spreadsheet loaders hand over rows of
//! string cells, delimited exports are read with [`RawTable::from_delimited`],
//! and score reports arrive as extracted text, one string per page.

use crate::error::{IngestError, InputKind};
use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// Candidate delimiters tried when sniffing, in tie-break order.
const SNIFF_CANDIDATES: &[u8] = b";,\t|";

/// Rows of string cells, with an optional header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    /// Source line of each data row, when read from text.
    source_lines: Vec<usize>,
}

impl RawTable {
    /// Creates a table from already-extracted cells.
    #[must_use]
    pub const fn new(headers: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows,
            source_lines: Vec::new(),
        }
    }

    /// Reads delimited text into a table.
    ///
    /// Rows may have differing lengths; short rows are handled by the parsers.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::MalformedInput` if the text cannot be read as
    /// delimited records (for example, invalid quoting).
    pub fn from_delimited(
        text: &str,
        format: &DelimitedFormat,
        input: InputKind,
    ) -> Result<Self, IngestError> {
        let delimiter: u8 = format.delimiter.resolve(text);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(text.as_bytes());

        let mut records: Vec<(usize, Vec<String>)> = Vec::new();
        for result in reader.records() {
            let record: StringRecord = result.map_err(|e| IngestError::MalformedInput {
                input,
                reason: format!("failed to read delimited record: {e}"),
            })?;
            let line: usize = record
                .position()
                .and_then(|position| record_start_line(text, position))
                .unwrap_or(records.len() + 1);
            records.push((line, record.iter().map(String::from).collect()));
        }

        let mut records = records.into_iter();
        let headers: Option<Vec<String>> = if format.has_headers {
            records.next().map(|(_, cells)| cells)
        } else {
            None
        };
        let (source_lines, rows): (Vec<usize>, Vec<Vec<String>>) = records.unzip();

        Ok(Self {
            headers,
            rows,
            source_lines,
        })
    }

    /// Returns the header row, if the table has one.
    #[must_use]
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Returns the data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of addressable columns.
    ///
    /// For headed tables this is the header width; otherwise the widest row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.as_ref().map_or_else(
            || self.rows.iter().map(Vec::len).max().unwrap_or(0),
            Vec::len,
        )
    }

    /// Returns the 1-based source line of the data row at `index`.
    ///
    /// Tables read from text report the line the record started on. Tables
    /// built from cells count one line per row, after the header.
    #[must_use]
    pub fn line_number(&self, index: usize) -> usize {
        self.source_lines.get(index).copied().unwrap_or_else(|| {
            if self.headers.is_some() {
                index + 2
            } else {
                index + 1
            }
        })
    }

    pub(crate) fn source_lines(&self) -> &[usize] {
        &self.source_lines
    }
}

/// Returns the 1-based line a record starts on.
///
/// The reader reports where it stood before the record, which is ahead of
/// any empty lines it skipped. Quoted cells may also span lines, so row
/// indices alone cannot give the line.
fn record_start_line(text: &str, position: &csv::Position) -> Option<usize> {
    let byte: usize = usize::try_from(position.byte()).ok()?;
    let line: usize = usize::try_from(position.line()).ok()?;
    let skipped: usize = text
        .as_bytes()
        .get(byte..)?
        .iter()
        .take_while(|b| matches!(b, b'\r' | b'\n'))
        .filter(|&&b| b == b'\n')
        .count();
    Some(line + skipped)
}

/// Returns the cell at `idx`, or an empty string for short rows.
pub(crate) fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", String::as_str)
}

/// Returns whether every cell of a row is blank.
pub(crate) fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// Field delimiter for delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// Pick the most frequent candidate on the first non-empty line.
    #[default]
    Auto,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// Tab.
    Tab,
    /// `|`
    Pipe,
}

impl Delimiter {
    /// Resolves the delimiter byte for `text`.
    #[must_use]
    pub fn resolve(self, text: &str) -> u8 {
        match self {
            Self::Auto => sniff_delimiter(text),
            Self::Comma => b',',
            Self::Semicolon => b';',
            Self::Tab => b'\t',
            Self::Pipe => b'|',
        }
    }
}

fn sniff_delimiter(text: &str) -> u8 {
    let Some(first_line) = text.lines().find(|l| !l.trim().is_empty()) else {
        return b',';
    };

    let mut best: (u8, usize) = (b',', 0);
    for &candidate in SNIFF_CANDIDATES {
        let count: usize = first_line.bytes().filter(|&b| b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

/// How a delimited text input is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimitedFormat {
    /// Field delimiter.
    pub delimiter: Delimiter,
    /// Whether the first record is a header row.
    pub has_headers: bool,
}

impl Default for DelimitedFormat {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Auto,
            has_headers: true,
        }
    }
}

/// Text extracted from a score report, one string per page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawText {
    pages: Vec<String>,
}

impl RawText {
    /// Creates a report from extracted pages, in page order.
    #[must_use]
    pub const fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Splits a single extracted text on form feeds, as `pdftotext` emits them.
    #[must_use]
    pub fn from_form_feed(text: &str) -> Self {
        Self {
            pages: text.split('\u{c}').map(String::from).collect(),
        }
    }

    /// Returns the pages.
    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Iterates over every line of every page with a 1-based running line number.
    ///
    /// Pages are never joined, so the last line of one page cannot merge
    /// with the first line of the next.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.pages
            .iter()
            .flat_map(|page| page.lines())
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
    }

    /// Returns whether the report contains no visible text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_semicolon() {
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3\n"), b';');
        assert_eq!(sniff_delimiter("a\tb\n"), b'\t');
        assert_eq!(sniff_delimiter("single\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_from_delimited_with_headers() {
        let table: RawTable = RawTable::from_delimited(
            "Cod.Mecc.;Cognome\n123;Rossi\n456;Bianchi;extra\n",
            &DelimitedFormat::default(),
            InputKind::Roster,
        )
        .unwrap();

        assert_eq!(
            table.headers(),
            Some(&[String::from("Cod.Mecc."), String::from("Cognome")][..])
        );
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.line_number(0), 2);
        assert_eq!(cell(&table.rows()[1], 2), "extra");
        assert_eq!(cell(&table.rows()[0], 5), "");
    }

    #[test]
    fn test_from_delimited_headerless() {
        let format: DelimitedFormat = DelimitedFormat {
            delimiter: Delimiter::Comma,
            has_headers: false,
        };
        let table: RawTable =
            RawTable::from_delimited("1,2\n3,4,5\n", &format, InputKind::Matches).unwrap();
        assert!(table.headers().is_none());
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.line_number(0), 1);
    }

    #[test]
    fn test_line_numbers_follow_source_text() {
        let table: RawTable = RawTable::from_delimited(
            "Cod.Mecc.;Note\r\n\r\n123;\"two\nlines\"\n\n\n456;plain\n",
            &DelimitedFormat::default(),
            InputKind::Roster,
        )
        .unwrap();

        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0][1], "two\nlines");
        assert_eq!(table.line_number(0), 3);
        assert_eq!(table.line_number(1), 7);
    }

    #[test]
    fn test_raw_text_lines_span_pages() {
        let text: RawText = RawText::from_form_feed("a\nb\u{c}c\n");
        let lines: Vec<(usize, &str)> = text.lines().collect();
        assert_eq!(lines, vec![(1, "a"), (2, "b"), (3, "c")]);
        assert!(!text.is_blank());
        assert!(RawText::from_pages(vec![String::from("  \n")]).is_blank());
    }
}
