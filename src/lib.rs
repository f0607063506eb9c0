//! Maze Runner - A side-scrolling platformer with a pursuing chaser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, player, chaser, game state)
//! - `tuning`: Data-driven game balance
//! - `levels`: Level-pack loading and validation

pub mod levels;
pub mod sim;
pub mod tuning;

pub use levels::{LevelError, LevelPack};
pub use sim::Rect;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Wall-clock milliseconds per tick at the fixed rate
    pub const TICK_MS: u64 = 1000 / SIM_HZ as u64;

    /// Platform motion reverses once |move_counter| exceeds this
    pub const PLATFORM_TRAVEL_TICKS: i32 = 50;
    /// Highest initial move_counter a platform can spawn with
    pub const PLATFORM_MAX_PHASE: i32 = 40;

    /// Gravity added to vertical velocity every tick
    pub const GRAVITY: f32 = 1.0;
    /// Terminal fall speed (units/tick)
    pub const MAX_FALL_SPEED: f32 = 10.0;
}

