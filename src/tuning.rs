//! Data-driven game balance
//!
//! Everything that shapes how the game *feels* lives here rather than being
//! scattered through the physics as magic numbers. Hosts can ship alternate
//! tunings without touching simulation code.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game-feel parameters, all hot-tunable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Multiplicative ball speed boost on every paddle hit
    pub paddle_boost: f32,
    /// Fraction of the paddle's own velocity fed into the bounce speed
    pub paddle_transfer: f32,
    /// Maximum bounce deflection off a paddle face (radians from horizontal)
    pub max_deflection: f32,
    /// Per-tick velocity damping (<1, very close to 1)
    pub drag: f32,
    /// Seconds the ball stays parked off-screen after a goal
    pub serve_delay: f32,
    /// Serve launch cone half-angle around the horizontal (radians)
    pub serve_cone: f32,
    /// Maximum ball travel per sub-step (pixels); bounds tunneling risk
    pub step_distance: f32,
    /// Sub-step count ceiling per tick
    pub max_substeps: u32,
    /// Fraction of the side wall that is open goal mouth, centered
    pub goal_opening: f32,
    /// Random vertical kick on a goal-mouth wall bounce (pixels/s)
    pub goal_bounce_jitter: f32,
    /// Ball speed floor
    pub min_speed: f32,
    /// Ball speed at serve
    pub start_speed: f32,
    /// Absolute ball speed ceiling
    pub speed_cap: f32,
    /// Speed ceiling gain per rally streak step (pixels/s)
    pub streak_ramp: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_boost: 1.08,
            paddle_transfer: 0.1,
            max_deflection: std::f32::consts::FRAC_PI_4,
            drag: 0.9995,
            serve_delay: 2.0,
            serve_cone: 0.5,
            step_distance: 8.0,
            max_substeps: 20,
            goal_opening: 0.5,
            goal_bounce_jitter: 40.0,
            min_speed: BALL_MIN_SPEED,
            start_speed: BALL_START_SPEED,
            speed_cap: BALL_MAX_SPEED,
            streak_ramp: 40.0,
        }
    }
}

impl Tuning {
    /// Current ball speed ceiling for a rally streak. Grows with the streak,
    /// never past the absolute cap.
    pub fn speed_cap_for_streak(&self, streak: u32) -> f32 {
        (self.start_speed + streak as f32 * self.streak_ramp).min(self.speed_cap)
    }

    /// Half-height of the goal mouth for a given arena height
    pub fn goal_half_opening(&self, arena_height: f32) -> f32 {
        arena_height * self.goal_opening * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_ramps_speed_cap() {
        let tuning = Tuning::default();
        assert_eq!(tuning.speed_cap_for_streak(0), tuning.start_speed);
        assert!(tuning.speed_cap_for_streak(5) > tuning.speed_cap_for_streak(1));
        // Ramp saturates at the absolute ceiling
        assert_eq!(tuning.speed_cap_for_streak(10_000), tuning.speed_cap);
    }

    #[test]
    fn test_goal_opening_is_centered_fraction() {
        let tuning = Tuning::default();
        let half = tuning.goal_half_opening(720.0);
        assert!(half > 0.0 && half < 360.0);
        assert_eq!(half * 2.0, 720.0 * tuning.goal_opening);
    }
}
