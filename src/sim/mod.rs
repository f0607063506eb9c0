//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time comes in through `TickInput`, never from the system clock
//! - No rendering or platform dependencies

pub mod chaser;
pub mod clock;
pub mod collision;
pub mod platform;
pub mod player;
pub mod policy;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;
pub mod tiles;

pub use chaser::{Chaser, ChaserStep, DirectPursuit, MovementPolicy};
pub use clock::{LevelTimer, PauseClock};
pub use collision::{Resolution, resolve};
pub use platform::MovingPlatform;
pub use player::{Animation, Facing, PlayerController};
pub use policy::{DensePolicy, PolicyError, select_policy};
pub use rect::Rect;
pub use score::{Rank, ScoreAward, ScoreGate, Tier};
pub use state::{GameEvent, GameOverReason, GamePhase, GameState};
pub use tick::{Buttons, MenuAction, TickInput, tick};
pub use tiles::{Axis, TileCode, TileWorld};
