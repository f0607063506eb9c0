//! Player kinematic controller
//!
//! The controller proposes a displacement from input and gravity, the
//! collision resolver adjusts it, and the controller applies the result and
//! picks an animation from what actually happened.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Resolution;
use super::rect::Rect;
use super::tick::Buttons;
use crate::consts::{GRAVITY, MAX_FALL_SPEED};
use crate::tuning::Tuning;

/// Which way the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Animation track, chosen once per tick from the physics outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    Idle(Facing),
    Running(Facing),
    Jumping(Facing),
    Falling(Facing),
    /// Death sequence at the given frame
    Dying(u32),
}

impl Default for Animation {
    fn default() -> Self {
        Animation::Idle(Facing::Right)
    }
}

/// What the controller wants to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Proposal {
    pub delta: Vec2,
    /// A jump was launched this tick
    pub jumped: bool,
}

/// Outcome of applying a resolved displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Moved,
    /// Would have dropped below the world floor
    FellOut,
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerController {
    pub rect: Rect,
    pub vel_y: f32,
    /// Jump button is still held from a previous launch
    pub jumped: bool,
    /// No supporting surface was found on the last resolved tick
    pub in_air: bool,
    /// -1, 0 or 1; last horizontal input direction
    pub direction: i32,
    pub animation: Animation,
    /// Horizontal input on the last proposal
    intent: i32,
}

impl PlayerController {
    pub fn new(spawn: Vec2, size: f32) -> Self {
        Self {
            rect: Rect::square(spawn, size),
            vel_y: 0.0,
            jumped: false,
            in_air: false,
            direction: 0,
            animation: Animation::default(),
            intent: 0,
        }
    }

    pub fn facing(&self) -> Facing {
        if self.direction < 0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.animation, Animation::Dying(_))
    }

    /// Read input and gravity into a proposed displacement
    ///
    /// Inert while paused or dying: nothing changes and the proposal is zero.
    pub fn propose(&mut self, buttons: Buttons, paused: bool, tuning: &Tuning) -> Proposal {
        if paused || self.is_dying() {
            return Proposal::default();
        }

        let mut proposal = Proposal::default();
        let jump = buttons.contains(Buttons::JUMP);

        if jump && !self.jumped && !self.in_air {
            self.vel_y = tuning.jump_velocity;
            self.jumped = true;
            proposal.jumped = true;
        }
        if !jump {
            self.jumped = false;
        }

        self.intent = 0;
        if buttons.contains(Buttons::RIGHT) {
            proposal.delta.x += tuning.run_speed;
            self.direction = 1;
            self.intent = 1;
        }
        if buttons.contains(Buttons::LEFT) {
            proposal.delta.x -= tuning.run_speed;
            self.direction = -1;
            self.intent = -1;
        }

        self.vel_y = (self.vel_y + GRAVITY).min(MAX_FALL_SPEED);
        proposal.delta.y += self.vel_y;
        proposal
    }

    /// Apply the resolver's displacement, clamp to level bounds and refresh the animation
    pub fn apply(&mut self, resolution: &Resolution, tuning: &Tuning) -> Applied {
        // Riding a platform moves the player regardless of input
        self.rect.pos.x += resolution.carry_x;
        self.rect.pos.x = (self.rect.pos.x + resolution.delta.x).clamp(tuning.min_x, tuning.max_x);

        let outcome = if self.rect.pos.y + resolution.delta.y >= tuning.world_floor {
            Applied::FellOut
        } else {
            self.rect.pos.y += resolution.delta.y;
            Applied::Moved
        };

        self.animation = self.pick_animation();
        outcome
    }

    fn pick_animation(&self) -> Animation {
        let facing = self.facing();
        if self.in_air {
            if self.vel_y < 0.0 {
                Animation::Jumping(facing)
            } else {
                Animation::Falling(facing)
            }
        } else if self.intent != 0 {
            Animation::Running(facing)
        } else {
            Animation::Idle(facing)
        }
    }

    /// Start the death sequence; repeated contact does not restart it
    pub fn begin_dying(&mut self) {
        if !self.is_dying() {
            self.animation = Animation::Dying(0);
        }
    }

    /// Step the death sequence; true once the last frame has played
    pub fn advance_death(&mut self, frames: u32) -> bool {
        match self.animation {
            Animation::Dying(frame) => {
                let next = frame + 1;
                self.animation = Animation::Dying(next);
                next >= frames
            }
            _ => false,
        }
    }
}
