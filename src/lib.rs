//! Galaxy Portfolio - a starfield portfolio site with two arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulations (Snake, Pong, starfield animations)
//! - `ui`: Navigation state (galaxy menu, game selector, section copy)
//! - `renderer`: WebGPU triangle pipeline and scene builders
//! - `platform`: Browser/native platform abstraction (storage, input, time)
//! - `highscores` / `settings`: Per-browser persisted records
//! - `audio`: Procedural sound effects

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::{GameKind, HighScore};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Site-wide configuration constants
pub mod consts {
    /// Fixed Pong timestep (one 60 Hz animation frame)
    pub const PONG_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed to the simulations (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Screen flash after a Snake game over (ms)
    pub const GAME_OVER_FLASH_MS: f64 = 400.0;

    /// Focus outline colour for game containers
    pub const FOCUS_OUTLINE: &str = "2px solid #6c63ff";
}

/// Point on a circle of radius `r` around `center`
#[inline]
pub fn polar_offset(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}
