//! Deterministic simulation module
//!
//! All gameplay and animation logic lives here. This module must stay pure:
//! - Caller-driven time (fixed steps or millisecond deltas)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod pong;
pub mod sky;
pub mod snake;

pub use pong::{PongEvent, PongInput, PongPhase, PongState};
pub use sky::{ShootingStar, ShootingStars, Star, StarCluster, Starfield};
pub use snake::{Cell, CellKind, Direction, SnakeEvent, SnakePhase, SnakeState};
