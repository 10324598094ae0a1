//! Game selector inside the Games section

use crate::highscores::GameKind;

/// Which game (if any) is mounted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSelector {
    pub selected: Option<GameKind>,
}

impl GameSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a game. Returns the game that has to be torn down, if any.
    pub fn select(&mut self, game: GameKind) -> Option<GameKind> {
        match self.selected.replace(game) {
            Some(previous) if previous != game => Some(previous),
            _ => None,
        }
    }

    /// "Back to Game Selection". Returns the game to tear down.
    pub fn back(&mut self) -> Option<GameKind> {
        self.selected.take()
    }

    /// The picker grid shows only when nothing is mounted
    pub fn showing_picker(&self) -> bool {
        self.selected.is_none()
    }

    pub fn is_selected(&self, game: GameKind) -> bool {
        self.selected == Some(game)
    }
}
