//! Collision resolution for the player
//!
//! Axis-separated: X is resolved first against the player's current row,
//! then Y against the column the player will occupy after the X move. Each
//! axis tests the whole region swept during the tick, so a fast proposal
//! cannot skip over a thin tile.
//!
//! Trigger zones (checkpoints, hazards) never block; they only report
//! overlap. They are re-reported every tick the player stays inside.

use glam::Vec2;

use super::platform::MovingPlatform;
use super::player::PlayerController;
use super::tiles::{Axis, TileWorld};

/// Result of resolving one tick of player motion
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    /// Displacement the player may actually take
    pub delta: Vec2,
    /// Sideways carry from a horizontal platform the player rides
    pub carry_x: f32,
    /// Index of the platform the player is riding, if any
    pub riding: Option<usize>,
    /// Player overlaps a checkpoint (level-clear request)
    pub checkpoint: bool,
    /// Player overlaps a hazard (death request)
    pub hazard: bool,
}

/// Resolve the proposed displacement against the level
///
/// Updates the player's vertical velocity and airborne flag as surfaces are
/// found. `in_air` is set at the start and only cleared when something
/// supports the player this tick.
///
/// Every X check (tiles, then platforms) runs before any Y check, and both
/// Y passes test the column the player ends up in. Riding snaps the player
/// one unit above the platform top and keeps `vel_y`, so a platform moving
/// one unit per tick never ends up inside the rider and the next tick's
/// sweep finds it again.
pub fn resolve(
    player: &mut PlayerController,
    proposal: Vec2,
    world: &TileWorld,
    platforms: &[MovingPlatform],
    platform_tolerance: f32,
) -> Resolution {
    let rect = player.rect;
    let mut dx = proposal.x;
    let mut dy = proposal.y;
    let mut carry_x = 0.0;
    let mut riding = None;

    player.in_air = true;
    let rising = player.vel_y < 0.0;

    if dx != 0.0 {
        let sweep = rect.swept_x(dx);
        let blocked = world.solid_boxes().any(|tile| tile.overlaps(&sweep))
            || platforms.iter().any(|p| p.rect.overlaps(&sweep));
        if blocked {
            dx = 0.0;
        }
    }
    let column = rect.offset(Vec2::new(dx, 0.0));

    for tile in world.solid_boxes() {
        if dy != 0.0 && tile.overlaps(&column.swept_y(dy)) {
            if rising {
                // Head hit the underside
                dy = tile.bottom() - rect.top();
            } else {
                dy = tile.top() - rect.bottom();
                player.in_air = false;
            }
            player.vel_y = 0.0;
        }
    }
    let static_dy = dy;
    let static_support = !player.in_air;

    for (index, platform) in platforms.iter().enumerate() {
        let body = &platform.rect;
        if dy == 0.0 || !body.overlaps(&column.swept_y(dy)) {
            continue;
        }
        if (rect.top() + dy - body.bottom()).abs() < platform_tolerance {
            player.vel_y = 0.0;
            dy = body.bottom() - rect.top();
        } else if (rect.bottom() + dy - body.top()).abs() < platform_tolerance {
            player.in_air = false;
            dy = body.top() - 1.0 - rect.bottom();
            riding = Some(index);
            if platform.axis == Axis::Horizontal {
                carry_x += platform.velocity().x;
            }
        }
    }

    // Static geometry always wins over a platform snap
    let landed = column.offset(Vec2::new(0.0, dy));
    if world.solid_boxes().any(|tile| tile.overlaps(&landed)) {
        dy = static_dy;
        riding = None;
        carry_x = 0.0;
        player.in_air = !static_support;
    }

    // A platform cannot push its rider into a wall
    if carry_x != 0.0 {
        let pushed = column.offset(Vec2::new(0.0, dy)).swept_x(carry_x);
        if world.solid_boxes().any(|tile| tile.overlaps(&pushed)) {
            carry_x = 0.0;
        }
    }

    Resolution {
        delta: Vec2::new(dx, dy),
        carry_x,
        riding,
        checkpoint: world.checkpoints.iter().any(|c| c.overlaps(&rect)),
        hazard: world.hazards.iter().any(|h| h.overlaps(&rect)),
    }
}
