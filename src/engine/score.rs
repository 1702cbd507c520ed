//! High-score persistence.
//!
//! The store is injected into the tick loop so the engine never touches the
//! filesystem directly. The file format is a single decimal number; anything
//! unreadable loads as zero so a corrupt file never blocks play.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::utils::get_data_dir;

pub trait ScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32);
}

/// In-memory store for tests. Keeps every value ever saved so tests can
/// assert how many writes happened, not just the latest value.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    saved: Vec<u32>,
}

impl MemoryScoreStore {
    pub fn history(&self) -> &[u32] {
        &self.saved
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.saved.last().copied().unwrap_or(0)
    }

    fn save(&mut self, score: u32) {
        self.saved.push(score);
    }
}

/// Store backed by a plain file in the user data directory.
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new() -> Self {
        Self { path: get_data_dir().join("high_score") }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse().unwrap_or_else(|_| {
                warn!("Unreadable high score in {:?}, starting from 0", self.path);
                0
            }),
            Err(_) => 0,
        }
    }

    // A failed write is logged and dropped. Losing one high score is better
    // than killing the game mid-run.
    fn save(&mut self, score: u32) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create data directory {:?}: {e}", parent);
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, score.to_string()) {
            warn!("Failed to save high score to {:?}: {e}", self.path);
        }
    }
}
