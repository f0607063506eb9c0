//! Fixed timestep simulation tick
//!
//! One call advances the session by one 60 Hz step. Within a playing tick
//! the order is fixed: input, player proposal, collision resolution, player
//! apply, platform advance, chaser advance, trigger evaluation, phase
//! transition.

use bitflags::bitflags;

use super::chaser::ChaserStep;
use super::collision::{Resolution, resolve};
use super::player::Applied;
use super::score::{ScoreAward, Tier};
use super::state::{GameEvent, GameOverReason, GamePhase, GameState};

bitflags! {
    /// Held controls for a single tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP = 1 << 2;
    }
}

/// Menu and summary-screen choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    SelectLevel(usize),
    /// Leave the level-complete screen
    Continue,
    Restart,
    Quit,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Host monotonic clock, milliseconds
    pub now_ms: u64,
    pub buttons: Buttons,
    /// Pause signal from the quiz overlay
    pub paused: bool,
    pub menu: Option<MenuAction>,
    /// Answers submitted since the last tick
    pub awards: Vec<ScoreAward>,
    /// The overlay's question ran out of time
    pub quiz_timed_out: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    let now = input.now_ms;

    match state.phase {
        GamePhase::Menu => match input.menu {
            Some(MenuAction::Play) => {
                // New run
                state.score.banked = 0;
                state.score.reset_attempt();
                if state.levels.len() == 1 {
                    enter_level(state, 0, now);
                } else {
                    state.set_phase(GamePhase::LevelSelect);
                }
            }
            Some(MenuAction::Quit) => state.set_phase(GamePhase::Exited),
            _ => {}
        },
        GamePhase::LevelSelect => match input.menu {
            Some(MenuAction::SelectLevel(index)) => enter_level(state, index, now),
            Some(MenuAction::Quit) => state.set_phase(GamePhase::Exited),
            _ => {}
        },
        GamePhase::Playing | GamePhase::Paused => tick_level(state, input),
        GamePhase::LevelComplete => match input.menu {
            Some(MenuAction::Continue) => {
                state.score.bank();
                if state.has_next_level() {
                    let next = state.level_index + 1;
                    enter_level(state, next, now);
                } else {
                    state.set_phase(GamePhase::Finished);
                }
            }
            Some(MenuAction::Quit) => state.set_phase(GamePhase::Exited),
            _ => {}
        },
        GamePhase::GameOver { .. } => match input.menu {
            Some(MenuAction::Restart) => {
                let index = state.level_index;
                enter_level(state, index, now);
            }
            Some(MenuAction::Quit) => state.set_phase(GamePhase::Exited),
            _ => {}
        },
        GamePhase::Finished => {
            if input.menu == Some(MenuAction::Quit) {
                state.set_phase(GamePhase::Exited);
            }
        }
        GamePhase::Exited => {}
    }
}

fn enter_level(state: &mut GameState, index: usize, now: u64) {
    if state.load_level(index, now) {
        state.set_phase(GamePhase::Playing);
    }
}

/// Playing or Paused
fn tick_level(state: &mut GameState, input: &TickInput) {
    let now = input.now_ms;

    for award in &input.awards {
        let points = state.score.award(award, &state.tuning.points);
        log::debug!("Awarded {points} points for {:?}", award.tier);
        state.events.push(GameEvent::PointsAwarded {
            tier: award.tier,
            points,
        });
    }

    if input.quiz_timed_out {
        state.game_over(GameOverReason::QuizTimedOut);
        return;
    }

    if input.paused {
        state.timer.clock.enter_pause(now);
        state.chaser.update(&state.player.rect, true, now);
        state.set_phase(GamePhase::Paused);
        return;
    }
    if state.phase == GamePhase::Paused {
        state.timer.clock.exit_pause(now);
        state.set_phase(GamePhase::Playing);
    }

    simulate(state, input.buttons, now);
}

fn simulate(state: &mut GameState, buttons: Buttons, now: u64) {
    state.time_ticks += 1;
    let tuning = &state.tuning;

    let mut resolution = Resolution::default();
    let mut fell = false;
    let mut death_done = false;

    if state.player.is_dying() {
        death_done = state.player.advance_death(tuning.death_frames);
    } else {
        let proposal = state.player.propose(buttons, false, tuning);
        if proposal.jumped {
            state.events.push(GameEvent::Jumped);
        }
        resolution = resolve(
            &mut state.player,
            proposal.delta,
            &state.world,
            &state.platforms,
            tuning.platform_tolerance,
        );
        fell = state.player.apply(&resolution, tuning) == Applied::FellOut;
    }

    for platform in &mut state.platforms {
        platform.advance();
    }

    if let ChaserStep::Activated { speed } = state.chaser.update(&state.player.rect, false, now) {
        log::info!("Chaser activated at speed {speed:.2}");
        state.events.push(GameEvent::ChaserActivated { speed });
    }

    check_quiz_platforms(state);

    if resolution.hazard && !state.player.is_dying() {
        state.player.begin_dying();
        state.events.push(GameEvent::PlayerDying);
    }

    // Reaching the checkpoint wins over a timer expiring on the same tick
    if resolution.checkpoint {
        if state.score.passes() {
            state.set_phase(GamePhase::LevelComplete);
        } else {
            state.game_over(GameOverReason::InsufficientPoints {
                points: state.score.points,
                threshold: state.score.threshold,
            });
        }
    } else if fell {
        state.game_over(GameOverReason::Fell);
    } else if state.chaser.is_active()
        && !state.player.is_dying()
        && state.chaser.catches(&state.player.rect)
    {
        state.game_over(GameOverReason::Caught);
    } else if death_done {
        state.game_over(GameOverReason::Hazard);
    } else if state.timer.expired(now) {
        state.game_over(GameOverReason::TimeUp);
    }
}

/// Raise a quiz the first time the player stands squarely on a platform
fn check_quiz_platforms(state: &mut GameState) {
    if state.player.in_air {
        return;
    }
    let body = state.player.rect;
    let tolerance = state.tuning.quiz_landing_tolerance;
    let margin = state.tuning.quiz_edge_margin;

    for (index, platform) in state.platforms.iter_mut().enumerate() {
        if platform.quiz_shown {
            continue;
        }
        let top = platform.rect.top();
        let landed = (body.bottom() - top).abs() <= tolerance
            && body.right() > platform.rect.left() + margin
            && body.left() < platform.rect.right() - margin;
        if landed {
            platform.quiz_shown = true;
            let tier = Tier::for_platform(index);
            log::debug!("Quiz triggered on platform {index} ({tier:?})");
            state.events.push(GameEvent::QuizTriggered {
                platform: index,
                tier,
                assist_offered: tier.assist_offered(),
            });
        }
    }
}
