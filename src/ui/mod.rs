//! Navigation state
//!
//! Pure state machines behind the DOM: which section is open, which menu
//! star is hovered or focused, and which game is mounted.

pub mod content;
pub mod menu;
pub mod selector;

pub use content::SectionContent;
pub use menu::{GalaxyMenu, Section};
pub use selector::GameSelector;
