//! Game balance values
//!
//! Every number the simulation reads lives here so a level designer can
//! override it from a JSON file without a rebuild. Defaults match the game
//! at its 0.85 display scale.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Points awarded for a correct answer, per difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsTable {
    pub tier_1: u32,
    pub tier_2: u32,
    pub tier_3: u32,
    /// Tier 3 answered with the assistant's hint
    pub tier_3_assisted: u32,
    /// Question without a recognised tier
    pub untiered: u32,
    pub untiered_assisted: u32,
}

impl Default for PointsTable {
    fn default() -> Self {
        Self {
            tier_1: 3,
            tier_2: 5,
            tier_3: 8,
            tier_3_assisted: 6,
            untiered: 5,
            untiered_assisted: 3,
        }
    }
}

/// Minimum points for each summary rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankCutoffs {
    pub legend: u32,
    pub gladiator: u32,
    pub warrior: u32,
}

impl Default for RankCutoffs {
    fn default() -> Self {
        Self {
            legend: 30,
            gladiator: 24,
            warrior: 20,
        }
    }
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub tile_size: f32,
    /// Vertical offset applied to grass decorations
    pub decoration_offset: f32,
    /// Checkpoint sign is tile_size / this divisor on each side
    pub checkpoint_divisor: f32,
    /// Checkpoint sign sits this far below its grid cell origin
    pub checkpoint_offset: f32,

    // === Player ===
    pub player_spawn: Vec2,
    pub player_size: f32,
    pub run_speed: f32,
    /// Vertical velocity set on jump (negative is up)
    pub jump_velocity: f32,
    /// Allowed range for the player's left edge
    pub min_x: f32,
    pub max_x: f32,
    /// Falling to or past this y is fatal
    pub world_floor: f32,
    /// Frames in the death animation before game over
    pub death_frames: u32,

    // === Moving platforms ===
    /// Distance used to tell "landed on top" from "bumped underneath"
    pub platform_tolerance: f32,
    /// Landing tolerance for quiz triggers
    pub quiz_landing_tolerance: f32,
    /// Horizontal margin from the platform edge for quiz triggers
    pub quiz_edge_margin: f32,

    // === Chaser ===
    pub chaser_spawn: Vec2,
    pub chaser_size: f32,
    pub chaser_base_speed: f32,
    pub chaser_delay_ms: u64,
    /// Speed multiplier added per level index
    pub chaser_growth: f32,

    // === Scoring / timing ===
    pub level_time_secs: u32,
    pub points_threshold: u32,
    pub points: PointsTable,
    pub ranks: RankCutoffs,
}

/// Height of the 0.85-scale play field
const SCREEN_HEIGHT: f32 = 765.0;

impl Default for Tuning {
    fn default() -> Self {
        // Both actors start just above the bottom ground row
        let spawn = Vec2::new(0.0, SCREEN_HEIGHT - 130.0);
        Self {
            tile_size: 42.0,
            decoration_offset: 50.0,
            checkpoint_divisor: 1.3,
            checkpoint_offset: 63.0,

            player_spawn: spawn,
            player_size: 42.0,
            run_speed: 4.25,
            jump_velocity: -12.75,
            min_x: -25.0,
            max_x: 977.0,
            world_floor: 1000.0,
            death_frames: 12,

            platform_tolerance: 20.0,
            quiz_landing_tolerance: 2.0,
            quiz_edge_margin: 5.0,

            chaser_spawn: spawn,
            chaser_size: 34.0,
            chaser_base_speed: 0.51,
            chaser_delay_ms: 20_000,
            chaser_growth: 0.16,

            level_time_secs: 30,
            points_threshold: 20,
            points: PointsTable::default(),
            ranks: RankCutoffs::default(),
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file; absent fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&text)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Parse tuning from JSON text and validate it
    pub fn from_json(text: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.tile_size > 0.0) {
            return Err(TuningError::Invalid {
                field: "tile_size",
                reason: "must be positive",
            });
        }
        if !(self.player_size > 0.0) || !(self.chaser_size > 0.0) {
            return Err(TuningError::Invalid {
                field: "player_size/chaser_size",
                reason: "must be positive",
            });
        }
        if self.min_x > self.max_x {
            return Err(TuningError::Invalid {
                field: "min_x",
                reason: "must not exceed max_x",
            });
        }
        if self.checkpoint_divisor <= 0.0 {
            return Err(TuningError::Invalid {
                field: "checkpoint_divisor",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Level time limit in milliseconds
    pub fn level_time_ms(&self) -> u64 {
        u64::from(self.level_time_secs) * 1000
    }
}
