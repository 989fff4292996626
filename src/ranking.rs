//! Per-level high score leaderboards
//!
//! Top 5 name+score entries per level, sorted best-first. Storage is a
//! collaborator concern; this is just the ordering logic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept per level
pub const MAX_ENTRIES: usize = 5;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

/// One level's leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelRanking {
    entries: Vec<ScoreEntry>,
}

impl LevelRanking {
    /// Check if a score belongs on the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score if it qualifies. Returns the rank achieved (1-indexed).
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreEntry {
            name: name.to_string(),
            score,
        };

        // Insertion point: after any equal scores already on the board
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// All leaderboards, keyed by level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingBook {
    levels: BTreeMap<u32, LevelRanking>,
}

impl RankingBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Would this score make the level's top 5?
    pub fn is_new_record(&self, level: u32, score: u64) -> bool {
        self.levels
            .get(&level)
            .map(|r| r.qualifies(score))
            .unwrap_or(score > 0)
    }

    /// Record a score. Returns the rank achieved (1-indexed).
    pub fn add_score(&mut self, level: u32, name: &str, score: u64) -> Option<usize> {
        let rank = self.levels.entry(level).or_default().add_score(name, score);
        if let Some(rank) = rank {
            log::info!("new level {level} record: {name} at rank {rank} with {score}");
        }
        rank
    }

    /// Entries for a level, best first (empty if nobody scored yet)
    pub fn high_scores(&self, level: u32) -> &[ScoreEntry] {
        self.levels
            .get(&level)
            .map(|r| r.entries())
            .unwrap_or_default()
    }
}
