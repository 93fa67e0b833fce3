//! Opening book: canonical position key -> ranked named candidate moves.
//!
//! The book is static data, read-only at runtime, loaded from JSON. Every
//! lookup is filtered against the live legal-move list: a listed move that
//! is no longer legal (the game deviated earlier) is never played. When
//! several candidates sit within a small priority band of the best one,
//! the choice among them is uniform for opening variety.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use game_core::{Move, Square};

/// Candidates within this many priority points of the best legal entry are
/// considered interchangeable.
const PRIORITY_BAND: i32 = 10;

/// One book line: a move by coordinates, its priority, and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub from: Square,
    pub to: Square,
    pub priority: i32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningBook {
    lines: HashMap<String, Vec<BookEntry>>,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert_line(&mut self, key: impl Into<String>, entries: Vec<BookEntry>) {
        self.lines.insert(key.into(), entries);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Picks a book move for the position, or None when the key is absent
    /// or none of its listed moves is currently legal. The returned move is
    /// taken from the legal-move list, so its piece and capture annotations
    /// are authoritative.
    pub fn pick<R: Rng>(
        &self,
        key: &str,
        legal: &[Move],
        rng: &mut R,
    ) -> Option<(Move, &BookEntry)> {
        let entries = self.lines.get(key)?;

        let mut playable: Vec<(Move, &BookEntry)> = entries
            .iter()
            .filter_map(|entry| {
                legal
                    .iter()
                    .find(|m| m.from == entry.from && m.to == entry.to)
                    .map(|m| (*m, entry))
            })
            .collect();
        if playable.is_empty() {
            return None;
        }

        playable.sort_by_key(|(_, entry)| std::cmp::Reverse(entry.priority));
        let best = playable[0].1.priority;
        let band = playable
            .iter()
            .take_while(|(_, entry)| entry.priority >= best - PRIORITY_BAND)
            .count();
        Some(playable[rng.gen_range(0..band)])
    }
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
