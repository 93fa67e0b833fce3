//! Bounded transposition cache.
//!
//! Maps a canonical position key (side to move included, per the adapter's
//! key contract) to the last exact search result computed for it. The
//! capacity is a hard ceiling: once full, inserts of new keys are silently
//! dropped and the search degrades to recomputation. There is no eviction.

use std::collections::HashMap;

use game_core::Move;

/// One cached search result. Valid only for lookups at depth <= `depth`;
/// a shallower cached result can never satisfy a deeper query.
#[derive(Debug, Clone)]
pub struct TranspositionEntry {
    pub depth: u8,
    pub score: i32,
    pub mv: Option<Move>,
}

#[derive(Debug)]
pub struct TranspositionTable {
    entries: HashMap<String, TranspositionEntry>,
    capacity: usize,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(1 << 16)),
            capacity,
        }
    }

    /// Returns the cached entry only when it was computed at least as deep
    /// as the request; anything shallower is a miss.
    pub fn lookup(&self, key: &str, depth: u8) -> Option<&TranspositionEntry> {
        self.entries.get(key).filter(|e| e.depth >= depth)
    }

    /// Stores an entry. Known keys are refreshed in place; new keys are
    /// dropped once the table is at capacity.
    pub fn insert(&mut self, key: String, entry: TranspositionEntry) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            return;
        }
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
