//! Best-catch leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 sessions by catch count.

use serde::{Deserialize, Serialize};

/// Maximum number of entries to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Catches in the session
    pub catches: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Catch-count leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sky_chase_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a catch count qualifies for the leaderboard
    pub fn qualifies(&self, catches: u32) -> bool {
        if catches == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|e| catches > e.catches)
            .unwrap_or(true)
    }

    /// Add a session result (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, catches: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(catches) {
            return None;
        }

        let entry = HighScoreEntry { catches, timestamp };

        // Insertion point, sorted descending by catches
        let pos = self.entries.iter().position(|e| catches > e.catches);
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

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best catch count so far (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.catches)
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(scores) = serde_json::from_str::<HighScores>(&json) {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_catches_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn entries_stay_sorted_and_capped() {
        let mut scores = HighScores::new();
        for n in 1..=12u32 {
            scores.add_score(n, n as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(12));
        // Lowest surviving entry is 3: 1 and 2 were pushed out
        assert_eq!(scores.entries.last().unwrap().catches, 3);
    }

    #[test]
    fn rank_is_one_indexed() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, 0.0), Some(1));
        assert_eq!(scores.add_score(10, 1.0), Some(1));
        assert_eq!(scores.add_score(7, 2.0), Some(2));
        assert_eq!(scores.add_score(1, 3.0), Some(4));
    }
}
