// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use refgrid_ingest::ContentHash;
use std::sync::Arc;
use tracing::debug;

/// A single-slot cache keyed by content hash.
///
/// Holds the most recent value only. A different key replaces the slot; an
/// equal key returns the stored value without recomputing it. Stored values
/// are never mutated.
#[derive(Debug)]
pub struct Memo<T> {
    slot: Option<(ContentHash, Arc<T>)>,
    hits: usize,
}

impl<T> Memo<T> {
    /// Creates an empty memo.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: None,
            hits: 0,
        }
    }

    /// Returns the value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, key: ContentHash, compute: impl FnOnce() -> T) -> Arc<T> {
        let cached: Option<Arc<T>> = self
            .slot
            .as_ref()
            .filter(|(stored, _)| *stored == key)
            .map(|(_, value)| Arc::clone(value));
        if let Some(value) = cached {
            self.hits += 1;
            debug!(key = %key, "Reusing parse result for unchanged input");
            return value;
        }

        let value: Arc<T> = Arc::new(compute());
        self.slot = Some((key, Arc::clone(&value)));
        value
    }

    /// Returns the key of the stored value, if any.
    #[must_use]
    pub fn key(&self) -> Option<&ContentHash> {
        self.slot.as_ref().map(|(key, _)| key)
    }

    /// Returns how many lookups were served from the slot.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use refgrid_ingest::RawText;

    fn key(text: &str) -> ContentHash {
        ContentHash::of(&RawText::from_pages(vec![String::from(text)]), "settings")
    }

    #[test]
    fn test_same_key_reuses_value() {
        let mut memo: Memo<String> = Memo::new();
        let mut computed: usize = 0;

        let first: Arc<String> = memo.get_or_insert_with(key("a"), || {
            computed += 1;
            String::from("parsed")
        });
        let second: Arc<String> = memo.get_or_insert_with(key("a"), || {
            computed += 1;
            String::from("parsed again")
        });

        assert_eq!(computed, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(memo.hits(), 1);
    }

    #[test]
    fn test_new_key_replaces_slot() {
        let mut memo: Memo<usize> = Memo::new();
        memo.get_or_insert_with(key("a"), || 1);
        let replaced: Arc<usize> = memo.get_or_insert_with(key("b"), || 2);

        assert_eq!(*replaced, 2);
        assert_eq!(memo.key(), Some(&key("b")));
        assert_eq!(memo.hits(), 0);

        // The old value is gone
        let recomputed: Arc<usize> = memo.get_or_insert_with(key("a"), || 3);
        assert_eq!(*recomputed, 3);
    }
}
