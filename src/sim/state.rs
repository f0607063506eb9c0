//! Game state and core simulation types
//!
//! `GameState` owns everything that lives for one level attempt. Level
//! geometry and entities are rebuilt from scratch on every (re)load.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::chaser::{Chaser, MovementPolicy};
use super::clock::LevelTimer;
use super::platform::MovingPlatform;
use super::player::PlayerController;
use super::rect::Rect;
use super::score::{ScoreGate, Tier};
use super::tiles::TileWorld;
use crate::levels::LevelPack;
use crate::tuning::Tuning;

/// Why an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The active chaser reached the player
    Caught,
    /// Death sequence after touching a hazard finished
    Hazard,
    /// Dropped below the world floor
    Fell,
    /// Level timer ran out
    TimeUp,
    /// Reached the checkpoint without enough points
    InsufficientPoints { points: u32, threshold: u32 },
    /// The quiz overlay reported an unanswered question
    QuizTimedOut,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Menu,
    LevelSelect,
    /// Active gameplay
    Playing,
    /// Quiz overlay is up; physics and timers frozen
    Paused,
    LevelComplete,
    GameOver { reason: GameOverReason },
    /// Every level cleared
    Finished,
    /// Quit was chosen; nothing more happens
    Exited,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self == GamePhase::Exited
    }
}

/// Notable things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    LevelLoaded { index: usize },
    Jumped,
    /// Player touched a hazard and the death sequence began
    PlayerDying,
    ChaserActivated { speed: f32 },
    /// Player landed on a quiz platform for the first time this attempt
    QuizTriggered {
        platform: usize,
        tier: Tier,
        assist_offered: bool,
    },
    PointsAwarded { tier: Tier, points: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub level_index: usize,
    pub levels: LevelPack,
    pub tuning: Tuning,
    pub world: TileWorld,
    pub platforms: Vec<MovingPlatform>,
    pub player: PlayerController,
    pub chaser: Chaser,
    pub score: ScoreGate,
    pub timer: LevelTimer,
    policy: Arc<dyn MovementPolicy>,
    /// Simulated (unpaused) ticks this attempt
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session at the main menu
    pub fn new(
        seed: u64,
        levels: LevelPack,
        tuning: Tuning,
        policy: Arc<dyn MovementPolicy>,
    ) -> Self {
        let player = PlayerController::new(tuning.player_spawn, tuning.player_size);
        let chaser = Self::spawn_chaser(&tuning, 0, 0, Arc::clone(&policy));
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            level_index: 0,
            levels,
            world: TileWorld::default(),
            platforms: Vec::new(),
            player,
            chaser,
            score: ScoreGate::new(tuning.points_threshold),
            timer: LevelTimer::new(0, tuning.level_time_ms()),
            tuning,
            policy,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    fn spawn_chaser(
        tuning: &Tuning,
        level_index: usize,
        now: u64,
        policy: Arc<dyn MovementPolicy>,
    ) -> Chaser {
        Chaser::new(
            Rect::square(tuning.chaser_spawn, tuning.chaser_size),
            tuning.chaser_base_speed,
            tuning.chaser_delay_ms,
            1.0 + level_index as f32 * tuning.chaser_growth,
            now,
            policy,
        )
    }

    /// Build a fresh attempt at level `index`
    ///
    /// Geometry, platforms, player, chaser and timer are all recreated and
    /// the attempt's points are cleared. The platform RNG is re-seeded from
    /// the session seed and level index, so a restart replays the same
    /// platform phases. Returns false (and changes nothing) if no such
    /// level exists.
    pub fn load_level(&mut self, index: usize, now: u64) -> bool {
        let Some(grid) = self.levels.get(index) else {
            log::warn!(
                "Level {index} does not exist ({} available)",
                self.levels.len()
            );
            return false;
        };

        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(index as u64));
        self.world = TileWorld::build(grid, &self.tuning);
        let ts = self.tuning.tile_size;
        self.platforms = self
            .world
            .platform_spawns
            .iter()
            .map(|spawn| MovingPlatform::spawn(spawn, ts, &mut self.rng))
            .collect();

        self.level_index = index;
        self.player = PlayerController::new(self.tuning.player_spawn, self.tuning.player_size);
        self.chaser = Self::spawn_chaser(&self.tuning, index, now, Arc::clone(&self.policy));
        self.timer = LevelTimer::new(now, self.tuning.level_time_ms());
        self.score.threshold = self.tuning.points_threshold;
        self.score.reset_attempt();
        self.time_ticks = 0;

        log::info!(
            "Loaded level {} ({} platforms, chaser speed x{:.2})",
            index + 1,
            self.platforms.len(),
            self.chaser.speed_multiplier
        );
        self.events.push(GameEvent::LevelLoaded { index });
        true
    }

    pub fn has_next_level(&self) -> bool {
        self.level_index + 1 < self.levels.len()
    }

    /// Change phase, logging and recording the transition
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {from:?} -> {to:?}");
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    pub fn game_over(&mut self, reason: GameOverReason) {
        self.set_phase(GamePhase::GameOver { reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::chaser::DirectPursuit;

    fn state_with(levels: Vec<Vec<Vec<f32>>>, seed: u64) -> GameState {
        GameState::new(
            seed,
            LevelPack { levels },
            Tuning::default(),
            Arc::new(DirectPursuit),
        )
    }

    fn platform_grid() -> Vec<Vec<f32>> {
        vec![vec![2.1, 0.0, 2.2, 0.0, 2.1, 2.1], vec![1.0; 6]]
    }

    #[test]
    fn test_new_state_starts_at_menu() {
        let state = state_with(vec![platform_grid()], 1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.platforms.is_empty());
        assert_eq!(state.score.points, 0);
    }

    #[test]
    fn test_load_level_builds_attempt() {
        let mut state = state_with(vec![platform_grid(), platform_grid()], 7);
        assert!(state.load_level(1, 500));
        assert_eq!(state.level_index, 1);
        assert_eq!(state.platforms.len(), 4);
        assert_eq!(state.world.tiles.len(), 6);
        assert!((state.chaser.speed_multiplier - 1.16).abs() < 1e-6);
        assert_eq!(state.timer.clock.start_time(), 500);
        assert!(!state.has_next_level());
        assert_eq!(state.events, vec![GameEvent::LevelLoaded { index: 1 }]);
    }

    #[test]
    fn test_missing_level_changes_nothing() {
        let mut state = state_with(vec![platform_grid()], 7);
        state.load_level(0, 0);
        state.score.points = 9;
        assert!(!state.load_level(3, 100));
        assert_eq!(state.level_index, 0);
        assert_eq!(state.score.points, 9);
    }

    #[test]
    fn test_reload_replays_platform_phases() {
        let mut state = state_with(vec![platform_grid()], 42);
        state.load_level(0, 0);
        let first: Vec<i32> = state.platforms.iter().map(|p| p.move_counter).collect();
        for p in &mut state.platforms {
            p.advance();
        }
        state.load_level(0, 1_000);
        let second: Vec<i32> = state.platforms.iter().map(|p| p.move_counter).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|c| (0..=40).contains(c)));
    }

    #[test]
    fn test_set_phase_records_transition_once() {
        let mut state = state_with(vec![platform_grid()], 1);
        state.set_phase(GamePhase::LevelSelect);
        state.set_phase(GamePhase::LevelSelect);
        assert_eq!(
            state.events,
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Menu,
                to: GamePhase::LevelSelect
            }]
        );
    }
}
