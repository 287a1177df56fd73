//! High score persistence
//!
//! The best score is a single 4-byte native-endian integer on disk. A
//! missing or unreadable file means "no high score yet" and reads as 0.

use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Default file name next to the executable's working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.dat";

/// Where the best score lives between runs
pub trait ScoreStore {
    /// Stored best score (0 when nothing is stored yet)
    fn load(&self) -> u32;

    /// Replace the stored best score
    fn save(&mut self, score: u32) -> Result<(), StorageError>;
}

/// Decode the on-disk representation
pub fn decode_score(bytes: &[u8]) -> Result<u32, StorageError> {
    let raw: [u8; 4] = bytes
        .try_into()
        .map_err(|_| StorageError::BadLength(bytes.len()))?;
    Ok(i32::from_ne_bytes(raw).max(0) as u32)
}

/// Encode for disk; scores past `i32::MAX` saturate
pub fn encode_score(score: u32) -> [u8; 4] {
    i32::try_from(score).unwrap_or(i32::MAX).to_ne_bytes()
}

/// High score kept in a small binary file
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score, reporting why it could not be read
    pub fn try_load(&self) -> Result<u32, StorageError> {
        let bytes = std::fs::read(&self.path)?;
        decode_score(&bytes)
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => {
                log::info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score file yet, starting from 0");
                0
            }
            Err(e) => {
                log::warn!("Ignoring high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        // Write-then-rename so a crash never leaves a truncated file behind
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, encode_score(score))?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub score: u32,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryScoreStore {
    pub fn with_score(score: u32) -> Self {
        Self { score, saves: 0 }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        self.score = score;
        self.saves += 1;
        Ok(())
    }
}
