//! High score leaderboard system
//!
//! Persisted through platform storage, tracks the player's top 10 matches.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u32,
    /// Whether the player won that match
    pub won: bool,
    /// Match length in seconds
    pub secs: f32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    const STORAGE_KEY: &'static str = "hex_arena_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u32, won: bool, secs: f32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            won,
            secs,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
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

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Number of recorded wins
    pub fn wins(&self) -> usize {
        self.entries.iter().filter(|e| e.won).count()
    }

    /// Load high scores from storage
    pub fn load() -> Self {
        match storage::load_json::<HighScores>(Self::STORAGE_KEY) {
            Ok(Some(scores)) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("High scores unreadable, starting fresh: {}", e);
                Self::new()
            }
        }
    }

    /// Save high scores to storage
    pub fn save(&self) {
        match storage::save_json(Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }
}

/// Format a match length as `m:ss`
pub fn format_duration(secs: f32) -> String {
    let total = secs.max(0.0).round() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_add_keeps_descending_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(40, false, 90.0, 1.0), Some(1));
        assert_eq!(scores.add_score(100, true, 60.0, 2.0), Some(1));
        assert_eq!(scores.add_score(70, false, 180.0, 3.0), Some(2));

        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![100, 70, 40]);
        assert_eq!(scores.top_score(), Some(100));
        assert_eq!(scores.wins(), 1);
    }

    #[test]
    fn test_full_board_trims_and_rejects() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(s * 10, false, 30.0, s as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);

        // Lower than the lowest entry
        assert_eq!(scores.add_score(5, false, 30.0, 0.0), None);
        // Beats the lowest; the old lowest falls off
        assert_eq!(scores.potential_rank(15), Some(MAX_HIGH_SCORES));
        assert_eq!(scores.add_score(15, true, 30.0, 0.0), Some(MAX_HIGH_SCORES));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(15));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(65.4), "1:05");
        assert_eq!(format_duration(180.0), "3:00");
    }
}
