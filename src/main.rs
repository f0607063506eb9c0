//! Maze Runner headless driver
//!
//! Runs one autopilot session at the fixed tick rate without a window:
//! `maze-runner [levels.json] [tuning.json] [policy.json]`. The autopilot
//! runs right, hops periodically and answers every quiz correctly after a
//! short think. Set `RUST_LOG=info` (or `debug`) to follow the session.

use std::path::PathBuf;

use anyhow::{Context, Result};

use maze_runner::consts::{SIM_HZ, TICK_MS};
use maze_runner::sim::{
    Buttons, GameEvent, GamePhase, GameState, MenuAction, Rank, ScoreAward, TickInput,
    select_policy, tick,
};
use maze_runner::{LevelPack, Tuning};

/// Simulated ticks between autopilot hops
const JUMP_PERIOD: u64 = 45;
/// Ticks the autopilot spends on each question
const QUIZ_THINK_TICKS: u32 = 90;
/// Give up after ten simulated minutes
const MAX_TICKS: u64 = 10 * 60 * SIM_HZ as u64;

/// Scripted stand-in for a human player and the quiz overlay
#[derive(Default)]
struct Autopilot {
    /// Open question: ticks left to think and the award to submit
    quiz: Option<(u32, ScoreAward)>,
}

impl Autopilot {
    fn next_input(&mut self, state: &GameState) -> TickInput {
        let menu = match state.phase {
            GamePhase::Menu => Some(MenuAction::Play),
            GamePhase::LevelSelect => Some(MenuAction::SelectLevel(0)),
            GamePhase::LevelComplete => Some(MenuAction::Continue),
            GamePhase::GameOver { .. } | GamePhase::Finished => Some(MenuAction::Quit),
            _ => None,
        };
        if menu.is_some() {
            self.quiz = None;
            return TickInput {
                menu,
                ..Default::default()
            };
        }

        for event in &state.events {
            if let GameEvent::QuizTriggered {
                tier,
                assist_offered,
                ..
            } = *event
            {
                let award = ScoreAward {
                    tier,
                    assisted: assist_offered,
                    correct: true,
                };
                self.quiz = Some((QUIZ_THINK_TICKS, award));
            }
        }

        match self.quiz.take() {
            Some((0, award)) => TickInput {
                awards: vec![award],
                ..Default::default()
            },
            Some((left, award)) => {
                self.quiz = Some((left - 1, award));
                TickInput {
                    paused: true,
                    ..Default::default()
                }
            }
            None => {
                let mut buttons = Buttons::RIGHT;
                if state.time_ticks % JUMP_PERIOD == 0 {
                    buttons |= Buttons::JUMP;
                }
                TickInput {
                    buttons,
                    ..Default::default()
                }
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Maze Runner (headless) starting...");

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let levels_path = args.next();
    let tuning_path = args.next();
    let policy_path = args.next();

    let levels = match &levels_path {
        Some(path) => LevelPack::load(path)
            .with_context(|| format!("loading levels from {}", path.display()))?,
        None => LevelPack::builtin(),
    };
    let tuning = match &tuning_path {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let policy = select_policy(policy_path.as_deref());
    let ranks = tuning.ranks;

    let mut state = GameState::new(0x5eed, levels, tuning, policy);
    let mut pilot = Autopilot::default();
    let mut now = 0u64;
    let mut tick_no = 0u64;

    while !state.phase.is_terminal() {
        if tick_no >= MAX_TICKS {
            anyhow::bail!("session did not finish within {MAX_TICKS} ticks");
        }
        let mut input = pilot.next_input(&state);
        input.now_ms = now;
        let before = state.phase;
        tick(&mut state, &input);

        if before != state.phase {
            if let GamePhase::GameOver { reason } = state.phase {
                log::info!("Game over: {reason:?}");
            }
        }

        tick_no += 1;
        now += TICK_MS;
    }

    let total = state.score.total();
    let rank = Rank::for_points(total, &ranks).map_or("Unranked", Rank::title);
    log::info!(
        "Session over after {tick_no} ticks: level {}, {total} points ({rank})",
        state.level_index + 1
    );
    Ok(())
}
