//! Static copy for each section's modal

use super::menu::Section;

/// A hyperlink inside a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub text: &'static str,
    pub href: &'static str,
}

/// Text shown in a section modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionContent {
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
    pub links: &'static [Link],
    /// The Games section hosts the game selector below its text
    pub hosts_games: bool,
}

impl SectionContent {
    pub fn for_section(section: Section) -> Self {
        match section {
            Section::About => SectionContent {
                title: "About",
                paragraphs: &[
                    "Hi! I'm prototyping a website. This is a working environment where I can share my progress.",
                ],
                links: &[],
                hosts_games: false,
            },
            Section::Projects => SectionContent {
                title: "Projects",
                paragraphs: &[
                    "This site itself: a starfield, a galaxy menu and two arcade games, all compiled to WebAssembly and drawn with WebGPU.",
                ],
                links: &[],
                hosts_games: false,
            },
            Section::Games => SectionContent {
                title: "Arcade Games",
                paragraphs: &["Two small arcade games. Best scores are kept in this browser."],
                links: &[],
                hosts_games: true,
            },
            Section::Contact => SectionContent {
                title: "Contact",
                paragraphs: &["Want to get in touch? Email me at"],
                links: &[Link {
                    text: "hello@example.com",
                    href: "mailto:hello@example.com",
                }],
                hosts_games: false,
            },
        }
    }
}

/// Footer line
pub const FOOTER: &str = "\u{a9} 2024 Your Name. All rights reserved.";
