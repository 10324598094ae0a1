//! Keyboard input mapping
//!
//! Translates DOM `KeyboardEvent.key` values into game/menu commands.

/// A keyboard command understood by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    /// Space: pause toggle, restart after game over, activate menu item
    Space,
    /// Enter: activate menu item
    Enter,
    /// Escape: close the open section
    Escape,
    /// Toggle sound on/off
    ToggleMute,
}

impl Command {
    /// Parse a DOM key name
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Command::Up),
            "ArrowDown" => Some(Command::Down),
            "ArrowLeft" => Some(Command::Left),
            "ArrowRight" => Some(Command::Right),
            " " | "Spacebar" => Some(Command::Space),
            "Enter" => Some(Command::Enter),
            "Escape" | "Esc" => Some(Command::Escape),
            "m" | "M" => Some(Command::ToggleMute),
            _ => None,
        }
    }

    /// Arrow keys scroll the page unless their default action is prevented
    pub fn scrolls_page(&self) -> bool {
        matches!(
            self,
            Command::Up | Command::Down | Command::Left | Command::Right
        )
    }

    /// Keys that activate a focused menu item
    pub fn activates(&self) -> bool {
        matches!(self, Command::Enter | Command::Space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(Command::from_key("ArrowUp"), Some(Command::Up));
        assert_eq!(Command::from_key("ArrowLeft"), Some(Command::Left));
        assert_eq!(Command::from_key(" "), Some(Command::Space));
        assert_eq!(Command::from_key("M"), Some(Command::ToggleMute));
        assert_eq!(Command::from_key("q"), None);
        assert_eq!(Command::from_key("Shift"), None);
    }

    #[test]
    fn test_scroll_keys() {
        assert!(Command::Down.scrolls_page());
        assert!(!Command::Space.scrolls_page());
        assert!(Command::Enter.activates());
        assert!(Command::Space.activates());
        assert!(!Command::Escape.activates());
    }
}
