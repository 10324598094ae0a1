//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Input events (DOM key names to commands)
//! - Time (frame deltas, fixed steps, interval timers)

pub mod input;
pub mod storage;
pub mod time;

pub use input::Command;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use time::{FixedStep, FrameClock, IntervalTimer};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
