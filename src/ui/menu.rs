//! Galaxy menu: one clickable star cluster per section, opening a modal

use crate::platform::Command;

/// Top-level site sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Projects,
    Games,
    Contact,
}

impl Section {
    /// Menu order
    pub const ALL: [Section; 4] = [
        Section::About,
        Section::Projects,
        Section::Games,
        Section::Contact,
    ];

    /// Stable identifier used for DOM ids
    pub fn key(&self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Projects => "projects",
            Section::Games => "games",
            Section::Contact => "contact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Projects => "Projects",
            Section::Games => "Games",
            Section::Contact => "Contact",
        }
    }

    /// Accessible name / tooltip for the menu star
    pub fn tooltip(&self) -> &'static str {
        match self {
            Section::About => "Learn more about this site",
            Section::Projects => "See what I've been building",
            Section::Games => "Play the arcade games!",
            Section::Contact => "Contact me",
        }
    }

    /// Fixed menu position as (left %, top %)
    pub fn position(&self) -> (f32, f32) {
        match self {
            Section::About => (70.0, 10.0),
            Section::Projects => (15.0, 35.0),
            Section::Games => (15.0, 65.0),
            Section::Contact => (65.0, 75.0),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Menu interaction state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalaxyMenu {
    pub open: Option<Section>,
    pub hovered: Option<Section>,
    pub focused: Option<Section>,
}

impl GalaxyMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mouse enter (`Some`) / leave (`None`)
    pub fn hover(&mut self, section: Option<Section>) {
        self.hovered = section;
    }

    /// Focus (`Some`) / blur (`None`)
    pub fn focus(&mut self, section: Option<Section>) {
        self.focused = section;
    }

    /// Open a section's modal. Returns the section that was open before.
    pub fn click(&mut self, section: Section) -> Option<Section> {
        self.open.replace(section)
    }

    /// Key press on a focused menu star; Enter and Space open it
    pub fn key(&mut self, section: Section, command: Command) -> bool {
        if command.activates() {
            self.click(section);
            true
        } else {
            false
        }
    }

    /// Close button, backdrop click or Escape
    pub fn close(&mut self) -> Option<Section> {
        self.open.take()
    }

    /// The line and label next to a star show while hovered or focused
    pub fn label_visible(&self, section: Section) -> bool {
        self.hovered == Some(section) || self.focused == Some(section)
    }

    /// `aria-pressed` / active class
    pub fn is_pressed(&self, section: Section) -> bool {
        self.open == Some(section)
    }
}
