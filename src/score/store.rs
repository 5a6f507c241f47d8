use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File the high score lives in, next to the executable's working directory
pub const HIGH_SCORE_FILE: &str = "highscore.txt";

/// Reads and writes the persisted high score: a single decimal integer,
/// overwritten in place whenever it is beaten.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored high score, or `None` when the file is missing or its
    /// contents do not parse as an integer. Never an error: an unreadable
    /// file just means no high score yet.
    pub fn load(&self) -> Option<u32> {
        let contents = fs::read_to_string(&self.path).ok()?;
        contents.trim().parse().ok()
    }

    /// Overwrite the file with a new high score
    pub fn save(&self, score: u32) -> Result<()> {
        fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(HIGH_SCORE_FILE)
    }
}
