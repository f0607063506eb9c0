//! The pursuing chaser
//!
//! Dormant for `activation_delay` of live (unpaused) time, then homes in on
//! the player every unpaused tick. Steering comes from a pluggable
//! `MovementPolicy`; the heuristic `DirectPursuit` is used when no learned
//! policy was injected.

use std::fmt;
use std::sync::Arc;

use glam::Vec2;

use super::clock::PauseClock;
use super::rect::Rect;

/// Steering capability: maps the chaser's view of the player to an action
///
/// Inputs are the Chebyshev-normalised offset to the player and the
/// Chebyshev distance. The returned action is clamped to [-1, 1] per axis
/// by the caller.
pub trait MovementPolicy: fmt::Debug + Send + Sync {
    fn infer(&self, dx_norm: f32, dy_norm: f32, distance: f32) -> Vec2;

    fn name(&self) -> &str;
}

/// Straight-line pursuit along the normalised offset
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPursuit;

impl MovementPolicy for DirectPursuit {
    fn infer(&self, dx_norm: f32, dy_norm: f32, _distance: f32) -> Vec2 {
        Vec2::new(dx_norm, dy_norm)
    }

    fn name(&self) -> &str {
        "direct"
    }
}

/// What happened on a chaser update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChaserStep {
    /// Paused or still waiting out the delay
    Dormant,
    /// Became active this tick, at the given speed
    Activated { speed: f32 },
    Moved,
}

/// A pursuit agent
#[derive(Debug, Clone)]
pub struct Chaser {
    pub rect: Rect,
    pub base_speed: f32,
    /// Speed once active (fixed at activation)
    pub speed: f32,
    /// Live milliseconds before the chaser wakes up
    pub activation_delay: u64,
    /// 1 + level_index * growth
    pub speed_multiplier: f32,
    clock: PauseClock,
    is_active: bool,
    policy: Arc<dyn MovementPolicy>,
}

impl Chaser {
    pub fn new(
        rect: Rect,
        base_speed: f32,
        activation_delay: u64,
        speed_multiplier: f32,
        now: u64,
        policy: Arc<dyn MovementPolicy>,
    ) -> Self {
        Self {
            rect,
            base_speed,
            speed: base_speed,
            activation_delay,
            speed_multiplier,
            clock: PauseClock::new(now),
            is_active: false,
            policy,
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn clock(&self) -> &PauseClock {
        &self.clock
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    /// Advance one tick toward `target`
    ///
    /// While paused nothing moves and the activation clock is frozen;
    /// leaving the pause credits the paused span back to the delay.
    pub fn update(&mut self, target: &Rect, paused: bool, now: u64) -> ChaserStep {
        if paused {
            self.clock.enter_pause(now);
            return ChaserStep::Dormant;
        }
        self.clock.exit_pause(now);

        let mut step = ChaserStep::Moved;
        if !self.is_active {
            if self.clock.effective_elapsed(now) < self.activation_delay {
                return ChaserStep::Dormant;
            }
            self.is_active = true;
            self.speed = self.base_speed * self.speed_multiplier;
            step = ChaserStep::Activated { speed: self.speed };
        }

        let offset = target.pos - self.rect.pos;
        let distance = offset.x.abs().max(offset.y.abs());
        let direction = if distance > 0.0 {
            offset / distance
        } else {
            Vec2::ZERO
        };

        let action = self
            .policy
            .infer(direction.x, direction.y, distance)
            .clamp(Vec2::NEG_ONE, Vec2::ONE);
        self.rect.pos += action * self.speed;
        step
    }

    /// Simple box overlap with the player
    pub fn catches(&self, player: &Rect) -> bool {
        self.rect.overlaps(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chaser(delay: u64, now: u64) -> Chaser {
        Chaser::new(
            Rect::new(0.0, 0.0, 34.0, 34.0),
            0.5,
            delay,
            1.0,
            now,
            Arc::new(DirectPursuit),
        )
    }

    #[derive(Debug)]
    struct Sideways;

    impl MovementPolicy for Sideways {
        fn infer(&self, _dx: f32, _dy: f32, _distance: f32) -> Vec2 {
            Vec2::new(3.0, -0.5)
        }

        fn name(&self) -> &str {
            "sideways"
        }
    }

    #[test]
    fn test_dormant_until_delay() {
        let mut c = chaser(1_000, 0);
        let target = Rect::new(100.0, 0.0, 10.0, 10.0);
        assert_eq!(c.update(&target, false, 999), ChaserStep::Dormant);
        assert_eq!(c.rect.pos, Vec2::ZERO);
        assert!(matches!(c.update(&target, false, 1_000), ChaserStep::Activated { .. }));
        assert!(c.is_active());
        assert_eq!(c.rect.pos, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_speed_scales_with_level() {
        let mut c = chaser(0, 0);
        c.speed_multiplier = 1.0 + 2.0 * 0.16;
        let step = c.update(&Rect::new(0.0, 100.0, 1.0, 1.0), false, 0);
        let ChaserStep::Activated { speed } = step else {
            panic!("expected activation, got {step:?}");
        };
        assert!((speed - 0.66).abs() < 1e-6);
        assert!((c.rect.pos.y - 0.66).abs() < 1e-6);
    }

    #[test]
    fn test_chebyshev_normalisation() {
        let mut c = chaser(0, 0);
        c.update(&Rect::new(-200.0, 100.0, 1.0, 1.0), false, 0);
        // Dominant axis moves at full speed, the other proportionally
        assert_eq!(c.rect.pos, Vec2::new(-0.5, 0.25));
    }

    #[test]
    fn test_no_motion_when_on_target() {
        let mut c = chaser(0, 0);
        let here = c.rect;
        c.update(&here, false, 0);
        assert_eq!(c.rect.pos, Vec2::ZERO);
    }

    #[test]
    fn test_policy_action_is_clamped() {
        let mut c = Chaser::new(Rect::new(0.0, 0.0, 34.0, 34.0), 2.0, 0, 1.0, 0, Arc::new(Sideways));
        c.update(&Rect::new(0.0, 0.0, 1.0, 1.0), false, 0);
        assert_eq!(c.rect.pos, Vec2::new(2.0, -1.0));
        assert_eq!(c.policy_name(), "sideways");
    }

    #[test]
    fn test_paused_chaser_does_not_move() {
        let mut c = chaser(0, 0);
        let target = Rect::new(100.0, 0.0, 10.0, 10.0);
        c.update(&target, false, 0);
        let pos = c.rect.pos;
        for t in 1..10 {
            assert_eq!(c.update(&target, true, t), ChaserStep::Dormant);
        }
        assert_eq!(c.rect.pos, pos);
    }

    #[test]
    fn test_activation_is_monotonic() {
        let mut c = chaser(100, 0);
        let target = Rect::new(100.0, 0.0, 10.0, 10.0);
        c.update(&target, false, 100);
        assert!(c.is_active());
        c.update(&target, true, 200);
        c.update(&target, false, 10_000);
        assert!(c.is_active());
    }

    proptest! {
        /// Activation lands at start + delay + total paused time, however
        /// the pauses are split up.
        #[test]
        fn activation_time_ignores_pause_distribution(
            start in 0u64..10_000,
            delay in 1u64..400,
            segments in proptest::collection::vec((0u64..60, 1u64..120), 0..6),
        ) {
            // Live gaps must finish before the delay runs out
            let live_total: u64 = segments.iter().map(|(live, _)| live).sum();
            prop_assume!(live_total < delay);
            let paused_total: u64 = segments.iter().map(|(_, paused)| paused).sum();

            let mut c = chaser(delay, start);
            let target = Rect::new(500.0, 500.0, 10.0, 10.0);
            let mut now = start;
            for &(live, paused) in &segments {
                for _ in 0..live {
                    prop_assert_eq!(c.update(&target, false, now), ChaserStep::Dormant);
                    now += 1;
                }
                for _ in 0..paused {
                    prop_assert_eq!(c.update(&target, true, now), ChaserStep::Dormant);
                    now += 1;
                }
            }

            let expected = start + delay + paused_total;
            while now < expected {
                prop_assert_eq!(c.update(&target, false, now), ChaserStep::Dormant);
                now += 1;
            }
            let activated = matches!(c.update(&target, false, now), ChaserStep::Activated { .. });
            prop_assert!(activated);
            prop_assert_eq!(c.clock().accumulated_paused(), paused_total);
        }
    }
}
