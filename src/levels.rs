//! Level packs
//!
//! A pack is a JSON document holding one grid of tile codes per level:
//!
//! ```json
//! { "levels": [ [[0, 0, 2.1], [1, 1, 1]], ... ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a level pack
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level pack: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed level pack: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level pack contains no levels")]
    Empty,
    #[error("level {level} has no tiles")]
    EmptyLevel { level: usize },
    #[error("level {level} row {row} has {found} columns, expected {expected}")]
    Ragged {
        level: usize,
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("level {level} has a non-finite code at row {row}, column {col}")]
    NonFinite { level: usize, row: usize, col: usize },
}

/// Ordered list of level grids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPack {
    pub levels: Vec<Vec<Vec<f32>>>,
}

impl LevelPack {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let pack = Self::from_json(&text)?;
        log::info!(
            "Loaded {} levels from {}",
            pack.len(),
            path.as_ref().display()
        );
        Ok(pack)
    }

    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let pack: LevelPack = serde_json::from_str(text)?;
        pack.validate()?;
        Ok(pack)
    }

    /// Grids must be non-empty, rectangular and hold finite codes
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for (level, grid) in self.levels.iter().enumerate() {
            let expected = grid.first().map_or(0, Vec::len);
            if expected == 0 {
                return Err(LevelError::EmptyLevel { level });
            }
            for (row, codes) in grid.iter().enumerate() {
                if codes.len() != expected {
                    return Err(LevelError::Ragged {
                        level,
                        row,
                        found: codes.len(),
                        expected,
                    });
                }
                if let Some(col) = codes.iter().position(|c| !c.is_finite()) {
                    return Err(LevelError::NonFinite { level, row, col });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[Vec<f32>]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    /// Single meadow level used when no pack is supplied
    ///
    /// 18 x 20 cells: ground along the bottom row, grass on top of it, six
    /// quiz platforms, one hazard and the checkpoint at the far right.
    pub fn builtin() -> Self {
        const ROWS: usize = 18;
        const COLS: usize = 20;
        let mut grid = vec![vec![0.0f32; COLS]; ROWS];

        grid[ROWS - 1].fill(1.0);
        for col in [2, 3, 7, 11, 16] {
            grid[ROWS - 2][col] = 12.0;
        }
        grid[ROWS - 2][9] = 17.0;

        let platforms = [
            (14, 4, 2.1),
            (12, 7, 2.2),
            (14, 10, 2.1),
            (11, 12, 2.2),
            (13, 14, 2.1),
            (10, 17, 2.1),
        ];
        for (row, col, code) in platforms {
            grid[row][col] = code;
        }

        grid[ROWS - 2][13] = 24.0;
        grid[ROWS - 3][19] = 23.0;

        Self { levels: vec![grid] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tiles::TileWorld;
    use crate::tuning::Tuning;

    #[test]
    fn test_builtin_is_valid() {
        let pack = LevelPack::builtin();
        pack.validate().unwrap();
        assert_eq!(pack.len(), 1);

        let tuning = Tuning::default();
        let world = TileWorld::build(&pack.levels[0], &tuning);
        assert_eq!(world.platform_spawns.len(), 6);
        assert_eq!(world.checkpoints.len(), 1);
        assert_eq!(world.hazards.len(), 1);

        // The spawn point drops straight onto the ground row
        let floor = world
            .solid_boxes()
            .filter(|t| t.left() <= tuning.player_spawn.x)
            .map(|t| t.top())
            .fold(f32::INFINITY, f32::min);
        assert!(floor > tuning.player_spawn.y + tuning.player_size);
        assert!(floor < tuning.world_floor);
    }

    #[test]
    fn test_parse_pack() {
        let pack = LevelPack::from_json(r#"{ "levels": [ [[0, 2.1], [1, 1]] ] }"#).unwrap();
        assert_eq!(pack.get(0).map(|g| g.len()), Some(2));
        assert!(pack.get(1).is_none());
    }

    #[test]
    fn test_rejects_malformed_packs() {
        assert!(matches!(
            LevelPack::from_json(r#"{ "levels": [] }"#),
            Err(LevelError::Empty)
        ));
        assert!(matches!(
            LevelPack::from_json(r#"{ "levels": [ [] ] }"#),
            Err(LevelError::EmptyLevel { level: 0 })
        ));
        assert!(matches!(
            LevelPack::from_json(r#"{ "levels": [ [[0, 0], [1]] ] }"#),
            Err(LevelError::Ragged {
                row: 1,
                found: 1,
                expected: 2,
                ..
            })
        ));
        assert!(matches!(
            LevelPack::from_json("not json"),
            Err(LevelError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_codes() {
        let pack = LevelPack {
            levels: vec![vec![vec![0.0, f32::NAN]]],
        };
        assert!(matches!(
            pack.validate(),
            Err(LevelError::NonFinite { row: 0, col: 1, .. })
        ));
    }
}
