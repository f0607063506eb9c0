//! Oscillating platforms

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::tiles::{Axis, PlatformSpawn};
use crate::consts::{PLATFORM_MAX_PHASE, PLATFORM_TRAVEL_TICKS};

/// A platform moving back and forth one unit per tick along a single axis
#[derive(Debug, Clone, PartialEq)]
pub struct MovingPlatform {
    pub rect: Rect,
    pub axis: Axis,
    /// +1 or -1
    pub move_direction: i32,
    /// Ticks travelled in the current leg (sign flips at each reversal)
    pub move_counter: i32,
    /// Whether this platform has already triggered a quiz this attempt
    pub quiz_shown: bool,
}

impl MovingPlatform {
    /// Platform of `tile_size` x `tile_size / 2` at `pos`
    pub fn new(pos: Vec2, axis: Axis, tile_size: f32, move_counter: i32) -> Self {
        Self {
            rect: Rect {
                pos,
                size: Vec2::new(tile_size, (tile_size / 2.0).floor()),
            },
            axis,
            move_direction: 1,
            move_counter,
            quiz_shown: false,
        }
    }

    /// Spawn with a random phase so neighbouring platforms drift apart
    pub fn spawn(spawn: &PlatformSpawn, tile_size: f32, rng: &mut impl Rng) -> Self {
        let phase = rng.random_range(0..=PLATFORM_MAX_PHASE);
        Self::new(spawn.pos, spawn.axis, tile_size, phase)
    }

    /// Displacement applied by the next `advance`
    pub fn velocity(&self) -> Vec2 {
        let step = self.move_direction as f32;
        match self.axis {
            Axis::Horizontal => Vec2::new(step, 0.0),
            Axis::Vertical => Vec2::new(0.0, step),
        }
    }

    /// Move one tick and reverse once the leg is complete
    pub fn advance(&mut self) {
        self.rect.pos += self.velocity();
        self.move_counter += 1;
        if self.move_counter.abs() > PLATFORM_TRAVEL_TICKS {
            self.move_direction = -self.move_direction;
            self.move_counter = -self.move_counter;
        }
    }
}
