//! Per-game best scores
//!
//! Each game keeps a single integer in local storage. Values are written as
//! plain JSON numbers, so records left by older builds (which stored the same
//! bare integer) keep loading.

use crate::platform::{KeyValueStore, StorageError};

/// The two embedded games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Snake,
    Pong,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Snake, GameKind::Pong];

    /// Local storage key
    pub fn storage_key(&self) -> &'static str {
        match self {
            GameKind::Snake => "snakeHighScore",
            GameKind::Pong => "pongHighScore",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Snake => "Snake",
            GameKind::Pong => "Pong",
        }
    }
}

/// Best score for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScore {
    pub game: GameKind,
    pub best: u32,
}

impl HighScore {
    pub fn new(game: GameKind) -> Self {
        Self { game, best: 0 }
    }

    /// Load from storage. Missing, garbled or negative values read as 0.
    pub fn load(store: &dyn KeyValueStore, game: GameKind) -> Self {
        let best = match store.get(game.storage_key()) {
            Ok(Some(raw)) => parse_score(&raw),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not read {} high score: {}", game.as_str(), e);
                0
            }
        };
        log::info!("{} high score: {}", game.as_str(), best);
        Self { game, best }
    }

    /// Record a finished round. Returns true if it set a new best.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.best)?;
        store.set(self.game.storage_key(), &json)?;
        log::info!("{} high score saved ({})", self.game.as_str(), self.best);
        Ok(())
    }

    /// Record and persist in one go. Storage failures are logged, not fatal.
    pub fn submit(&mut self, store: &dyn KeyValueStore, score: u32) -> bool {
        if !self.record(score) {
            return false;
        }
        if let Err(e) = self.save(store) {
            log::warn!("Could not save {} high score: {}", self.game.as_str(), e);
        }
        true
    }
}

/// Lenient numeric parse: accepts any JSON number, floors fractions
fn parse_score(raw: &str) -> u32 {
    match serde_json::from_str::<f64>(raw.trim()) {
        Ok(value) if value.is_finite() && value > 0.0 => value.floor().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}
