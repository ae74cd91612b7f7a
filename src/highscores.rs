//! High score leaderboard system
//!
//! A descending, capped list of scores persisted as a JSON array under a
//! fixed key. Persistence is best-effort: failures are logged and the game
//! keeps going.

use serde::{Deserialize, Serialize};

use crate::consts::LEADERBOARD_MAX_ENTRIES;
use crate::platform::storage::{Storage, StorageError};

/// Top-N scores, highest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<u32>,
    max_entries: usize,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new(LEADERBOARD_MAX_ENTRIES)
    }
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Build from arbitrary scores (sorted and trimmed)
    pub fn from_scores(scores: impl IntoIterator<Item = u32>, max_entries: usize) -> Self {
        let mut entries: Vec<u32> = scores.into_iter().collect();
        entries.sort_unstable_by(|a, b| b.cmp(a));
        entries.truncate(max_entries);
        Self {
            entries,
            max_entries,
        }
    }

    /// Check if a score would make the list
    pub fn qualifies(&self, score: u32) -> bool {
        if self.max_entries == 0 {
            return false;
        }
        if self.entries.len() < self.max_entries {
            return true;
        }
        self.entries.last().map(|&lowest| score > lowest).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|&e| score > e);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score, keeping the list sorted and capped.
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(rank - 1, score);
        self.entries.truncate(self.max_entries);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().copied()
    }
}

/// Leaderboard bound to a storage backend
pub struct Leaderboard {
    key: String,
    max_entries: usize,
    storage: Box<dyn Storage>,
    scores: HighScores,
}

impl Leaderboard {
    /// Open the leaderboard stored under `key`, loading whatever is there
    pub fn open(storage: Box<dyn Storage>, key: impl Into<String>, max_entries: usize) -> Self {
        let mut leaderboard = Self {
            key: key.into(),
            max_entries,
            storage,
            scores: HighScores::new(max_entries),
        };
        leaderboard.scores = leaderboard.load();
        leaderboard
    }

    /// Scores as of the last load/save, highest first
    pub fn top_scores(&self) -> &[u32] {
        &self.scores.entries
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Record a finished game's score. Returns the rank if it made the list.
    pub fn save_score(&mut self, score: u32) -> Option<usize> {
        // Re-read so writes from elsewhere (another tab) aren't clobbered
        self.scores = self.load();
        let rank = self.scores.add_score(score);

        if let Err(e) = self.persist() {
            log::error!("Could not save score: {}", e);
        } else {
            log::info!("High scores saved ({} entries)", self.scores.entries.len());
        }
        rank
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.scores.entries)?;
        self.storage.set_item(&self.key, &json)
    }

    fn load(&self) -> HighScores {
        match self.read_stored() {
            Ok(scores) => scores,
            Err(e) => {
                log::error!("Could not retrieve scores: {}", e);
                HighScores::new(self.max_entries)
            }
        }
    }

    fn read_stored(&self) -> Result<HighScores, StorageError> {
        let Some(json) = self.storage.get_item(&self.key)? else {
            return Ok(HighScores::new(self.max_entries));
        };

        let raw: Vec<serde_json::Value> = serde_json::from_str(&json)?;
        let total = raw.len();
        let valid: Vec<u32> = raw
            .into_iter()
            .filter_map(|v| v.as_u64().and_then(|n| u32::try_from(n).ok()))
            .collect();
        if valid.len() != total {
            log::warn!("Discarded {} invalid stored score(s)", total - valid.len());
        }
        Ok(HighScores::from_scores(valid, self.max_entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStorage;

    const KEY: &str = "scores";

    /// Backend that always fails
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".into()))
        }
    }

    fn storage_with(json: &str) -> Box<dyn Storage> {
        let mut storage = MemoryStorage::new();
        storage.set_item(KEY, json).unwrap();
        Box::new(storage)
    }

    #[test]
    fn test_add_score_sorted_descending() {
        let mut scores = HighScores::new(10);
        assert_eq!(scores.add_score(3), Some(1));
        assert_eq!(scores.add_score(7), Some(1));
        assert_eq!(scores.add_score(5), Some(2));
        assert_eq!(scores.entries, vec![7, 5, 3]);
        assert_eq!(scores.top_score(), Some(7));
    }

    #[test]
    fn test_capped_at_max_entries() {
        let mut scores = HighScores::new(3);
        for s in [1, 2, 3, 4, 5] {
            scores.add_score(s);
        }
        assert_eq!(scores.entries, vec![5, 4, 3]);
        assert!(!scores.qualifies(3));
        assert_eq!(scores.add_score(2), None);
        assert_eq!(scores.potential_rank(4), Some(2));
    }

    #[test]
    fn test_zero_score_recorded() {
        let mut scores = HighScores::new(10);
        assert_eq!(scores.add_score(0), Some(1));
        assert_eq!(scores.entries, vec![0]);
    }

    #[test]
    fn test_leaderboard_persists() {
        let mut board = Leaderboard::open(Box::new(MemoryStorage::new()), KEY, 10);
        assert!(board.scores().is_empty());
        board.save_score(4);
        board.save_score(9);
        assert_eq!(board.top_scores(), &[9, 4]);
        assert!(!board.scores().is_empty());
        assert_eq!(board.scores().top_score(), Some(9));
    }

    #[test]
    fn test_leaderboard_loads_existing_and_filters_garbage() {
        let board = Leaderboard::open(storage_with(r#"[2, "x", 8, -1, 3.5, null, 5]"#), KEY, 10);
        assert_eq!(board.top_scores(), &[8, 5, 2]);
    }

    #[test]
    fn test_leaderboard_corrupt_json_starts_empty() {
        let mut board = Leaderboard::open(storage_with("not json"), KEY, 10);
        assert!(board.top_scores().is_empty());
        board.save_score(1);
        assert_eq!(board.top_scores(), &[1]);
    }

    #[test]
    fn test_leaderboard_survives_broken_storage() {
        let mut board = Leaderboard::open(Box::new(BrokenStorage), KEY, 10);
        assert!(board.top_scores().is_empty());
        assert_eq!(board.save_score(3), Some(1));
    }
}
