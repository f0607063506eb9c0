//! Level geometry built from a numeric grid
//!
//! A level is a grid of codes. Each code becomes a solid tile, a decoration,
//! a spawner (moving platform) or a trigger zone (checkpoint, hazard). The
//! resulting `TileWorld` is immutable; a level (re)load builds a new one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Axis a moving platform oscillates along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// What a single grid code means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileCode {
    Empty,
    /// Solid terrain variant 1..=11
    Ground(u8),
    /// Grass strip 1..=5, drawn lower than its cell
    Grass(u8),
    /// Bush, tree or rock; purely visual
    Prop(u8),
    MovingPlatform(Axis),
    Checkpoint,
    Hazard,
}

impl TileCode {
    /// Classify a raw grid value; `None` for codes the game does not know
    pub fn from_raw(raw: f32) -> Option<Self> {
        if !raw.is_finite() {
            return None;
        }
        // Codes are whole numbers except the two platform spawners (2.1, 2.2)
        let tenths = (raw * 10.0).round();
        if (tenths - raw * 10.0).abs() > 1e-3 {
            return None;
        }
        let tenths = tenths as i64;
        match tenths {
            0 => Some(TileCode::Empty),
            21 => Some(TileCode::MovingPlatform(Axis::Horizontal)),
            22 => Some(TileCode::MovingPlatform(Axis::Vertical)),
            t if t % 10 != 0 => None,
            t => match t / 10 {
                n @ 1..=11 => Some(TileCode::Ground(n as u8)),
                n @ 12..=16 => Some(TileCode::Grass((n - 11) as u8)),
                n @ 17..=22 => Some(TileCode::Prop((n - 16) as u8)),
                23 => Some(TileCode::Checkpoint),
                24 => Some(TileCode::Hazard),
                _ => None,
            },
        }
    }
}

/// A static solid box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub rect: Rect,
    /// Terrain variant, for the renderer
    pub variant: u8,
}

/// Non-colliding scenery
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub rect: Rect,
    pub code: TileCode,
}

/// Where a moving platform starts and how it moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpawn {
    pub pos: Vec2,
    pub axis: Axis,
}

/// Immutable level geometry
#[derive(Debug, Clone, Default)]
pub struct TileWorld {
    pub tiles: Vec<Tile>,
    pub decorations: Vec<Decoration>,
    pub checkpoints: Vec<Rect>,
    pub hazards: Vec<Rect>,
    pub platform_spawns: Vec<PlatformSpawn>,
    /// Grid dimensions (rows, cols)
    pub rows: usize,
    pub cols: usize,
}

impl TileWorld {
    /// Build level geometry from a grid of codes
    pub fn build(grid: &[Vec<f32>], tuning: &Tuning) -> Self {
        let ts = tuning.tile_size;
        let mut world = TileWorld {
            rows: grid.len(),
            cols: grid.iter().map(Vec::len).max().unwrap_or(0),
            ..Default::default()
        };
        let mut unknown: Vec<f32> = Vec::new();

        for (row, codes) in grid.iter().enumerate() {
            for (col, &raw) in codes.iter().enumerate() {
                let origin = Vec2::new(col as f32 * ts, row as f32 * ts);
                let Some(code) = TileCode::from_raw(raw) else {
                    if !unknown.iter().any(|&u| u == raw || (u.is_nan() && raw.is_nan())) {
                        unknown.push(raw);
                    }
                    continue;
                };
                match code {
                    TileCode::Empty => {}
                    TileCode::Ground(variant) => world.tiles.push(Tile {
                        rect: Rect::square(origin, ts),
                        variant,
                    }),
                    TileCode::Grass(_) => world.decorations.push(Decoration {
                        rect: Rect::square(origin + Vec2::new(0.0, tuning.decoration_offset), ts),
                        code,
                    }),
                    TileCode::Prop(_) => world.decorations.push(Decoration {
                        rect: Rect::square(origin, ts),
                        code,
                    }),
                    TileCode::MovingPlatform(axis) => {
                        world.platform_spawns.push(PlatformSpawn { pos: origin, axis })
                    }
                    TileCode::Checkpoint => world.checkpoints.push(Rect::square(
                        origin + Vec2::new(0.0, tuning.checkpoint_offset),
                        (ts / tuning.checkpoint_divisor).floor(),
                    )),
                    TileCode::Hazard => world.hazards.push(Rect::square(origin, ts)),
                }
            }
        }

        for raw in unknown {
            log::warn!("Ignoring unknown tile code {raw}");
        }

        log::debug!(
            "Built {}x{} level: {} tiles, {} platforms, {} checkpoints, {} hazards",
            world.rows,
            world.cols,
            world.tiles.len(),
            world.platform_spawns.len(),
            world.checkpoints.len(),
            world.hazards.len()
        );
        world
    }

    /// Iterate the collision boxes of every solid tile
    pub fn solid_boxes(&self) -> impl Iterator<Item = &Rect> {
        self.tiles.iter().map(|t| &t.rect)
    }
}
