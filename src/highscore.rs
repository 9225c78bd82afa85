//! Highscore list kept between sessions
//!
//! Entries are stored as a JSON array of `{ player_label, score }` objects,
//! best score first.

use anyhow::{Context, Result};
use std::path::Path;

use crate::game::ScoreEntry;

/// Default number of listed entries
pub const DEFAULT_MAX_ENTRIES: usize = 5;

/// Bounded list of the best scores, highest first
#[derive(Debug, Clone, PartialEq)]
pub struct HighscoreList {
    max_entries: usize,
    entries: Vec<ScoreEntry>,
}

impl HighscoreList {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            entries: Vec::new(),
        }
    }

    /// Load the list from `path`; a missing file gives an empty list
    pub fn load(path: &Path, max_entries: usize) -> Result<Self> {
        let mut list = Self::new(max_entries);
        if !path.exists() {
            return Ok(list);
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read highscores from {:?}", path))?;
        let entries: Vec<ScoreEntry> =
            serde_json::from_str(&json).context("Failed to deserialize highscores")?;
        for entry in entries {
            list.add(entry);
        }
        Ok(list)
    }

    /// Write the list to `path`, creating parent directories if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize highscores")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write highscores to {:?}", path))?;
        Ok(())
    }

    /// Insert `entry` if the list has room or it beats the lowest listed
    /// score. Returns whether the entry made the list.
    pub fn add(&mut self, entry: ScoreEntry) -> bool {
        if self.max_entries == 0 {
            return false;
        }

        if self.entries.len() >= self.max_entries {
            match self.entries.last() {
                Some(last) if last.score < entry.score => {
                    self.entries.pop();
                }
                _ => return false,
            }
        }

        // Ties keep the earlier entry ahead
        let index = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(index, entry);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HighscoreList {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(label: &str, score: u32) -> ScoreEntry {
        ScoreEntry {
            player_label: label.to_string(),
            score,
        }
    }

    #[test]
    fn test_entries_sorted_best_first() {
        let mut list = HighscoreList::default();
        list.add(entry("snakePlayer1", 3));
        list.add(entry("snakePlayer2", 9));
        list.add(entry("snakePlayer1", 5));

        let scores: Vec<u32> = list.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 5, 3]);
    }

    #[test]
    fn test_full_list_only_takes_better_scores() {
        let mut list = HighscoreList::new(2);
        assert!(list.add(entry("a", 4)));
        assert!(list.add(entry("b", 6)));

        assert!(!list.add(entry("c", 4)));
        assert!(!list.add(entry("d", 1)));
        assert!(list.add(entry("e", 5)));

        assert_eq!(list.entries(), &[entry("b", 6), entry("e", 5)]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut list = HighscoreList::default();
        list.add(entry("first", 2));
        list.add(entry("second", 2));

        assert_eq!(list.entries()[0].player_label, "first");
    }

    #[test]
    fn test_clear() {
        let mut list = HighscoreList::default();
        list.add(entry("a", 1));
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores").join("highscores.json");

        let mut list = HighscoreList::default();
        list.add(entry("snakePlayer1", 7));
        list.add(entry("snakePlayer2", 2));
        list.save(&path).unwrap();

        let loaded = HighscoreList::load(&path, DEFAULT_MAX_ENTRIES).unwrap();
        assert_eq!(loaded, list);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = HighscoreList::load(&dir.path().join("none.json"), 5).unwrap();
        assert!(loaded.is_empty());
    }
}
