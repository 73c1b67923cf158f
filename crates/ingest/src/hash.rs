// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Content hashing for parse memoization.
//!
//! A parse result depends on the raw input and on the settings used to read
//! it, so both go into the hash. Every string is length-prefixed, which keeps
//! `["ab", "c"]` and `["a", "bc"]` apart.

use crate::table::{RawTable, RawText};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// A SHA-256 digest identifying one raw input read with one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Hashes `input` together with the serialized `settings`.
    #[must_use]
    pub fn of<I, S>(input: &I, settings: &S) -> Self
    where
        I: Fingerprint + ?Sized,
        S: Serialize + ?Sized,
    {
        let mut hasher: Sha256 = Sha256::new();
        let settings_bytes: Vec<u8> = serde_json::to_vec(settings).unwrap_or_default();
        feed_bytes(&mut hasher, &settings_bytes);
        input.feed(&mut hasher);
        Self(hex::encode(hasher.finalize()))
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short form is enough to tell inputs apart in logs
        f.write_str(self.0.get(..12).unwrap_or(&self.0))
    }
}

/// Raw inputs that can be fed to a content hash.
pub trait Fingerprint {
    /// Feeds every byte that affects parsing into `hasher`.
    fn feed(&self, hasher: &mut Sha256);
}

fn feed_len(hasher: &mut Sha256, len: usize) {
    hasher.update(u64::try_from(len).unwrap_or(u64::MAX).to_le_bytes());
}

fn feed_bytes(hasher: &mut Sha256, bytes: &[u8]) {
    feed_len(hasher, bytes.len());
    hasher.update(bytes);
}

fn feed_row(hasher: &mut Sha256, row: &[String]) {
    feed_len(hasher, row.len());
    for value in row {
        feed_bytes(hasher, value.as_bytes());
    }
}

impl Fingerprint for RawTable {
    fn feed(&self, hasher: &mut Sha256) {
        match self.headers() {
            Some(headers) => {
                hasher.update([1_u8]);
                feed_row(hasher, headers);
            }
            None => hasher.update([0_u8]),
        }
        feed_len(hasher, self.rows().len());
        for row in self.rows() {
            feed_row(hasher, row);
        }
        // Line numbers end up in skipped-row reports
        feed_len(hasher, self.source_lines().len());
        for line in self.source_lines() {
            feed_len(hasher, *line);
        }
    }
}

impl Fingerprint for RawText {
    fn feed(&self, hasher: &mut Sha256) {
        feed_row(hasher, self.pages());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            None,
            rows.iter()
                .map(|r| r.iter().map(|c| String::from(*c)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_identical_input_same_hash() {
        let a: ContentHash = ContentHash::of(&table(&[&["1", "2"]]), "settings");
        let b: ContentHash = ContentHash::of(&table(&[&["1", "2"]]), "settings");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_cell_boundaries_are_significant() {
        let a: ContentHash = ContentHash::of(&table(&[&["ab", "c"]]), "s");
        let b: ContentHash = ContentHash::of(&table(&[&["a", "bc"]]), "s");
        assert_ne!(a, b);
    }

    #[test]
    fn test_settings_change_hash() {
        let text: RawText = RawText::from_pages(vec![String::from("4567 a b c 7 7")]);
        let a: ContentHash = ContentHash::of(&text, &6_usize);
        let b: ContentHash = ContentHash::of(&text, &4_usize);
        assert_ne!(a, b);
    }

    #[test]
    fn test_headers_are_significant() {
        let headed: RawTable = RawTable::new(Some(vec![String::from("1")]), vec![]);
        let plain: RawTable = table(&[&["1"]]);
        assert_ne!(
            ContentHash::of(&headed, "s"),
            ContentHash::of(&plain, "s")
        );
    }
}
