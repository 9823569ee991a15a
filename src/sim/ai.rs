//! AI opponent
//!
//! Tracks a linear extrapolation of the ball rather than the ball itself,
//! with a dead-zone so the paddle does not jitter around the target. The
//! difficulty profile is read-only during simulation.

use glam::Vec2;

use super::state::{Ball, Paddle};
use crate::consts::SIM_DT;
use crate::settings::Difficulty;

/// Behavior parameters for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
    /// Simulation steps of look-ahead along the ball's current velocity
    pub lead_factor: f32,
    /// Positional error tolerated before the paddle repositions (pixels)
    pub error_margin: f32,
    /// Movement per tick toward the target (pixels/frame)
    pub speed: f32,
}

impl AiProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                lead_factor: 6.0,
                error_margin: 48.0,
                speed: 3.0,
            },
            Difficulty::Normal => Self {
                lead_factor: 12.0,
                error_margin: 28.0,
                speed: 5.0,
            },
            Difficulty::Hard => Self {
                lead_factor: 20.0,
                error_margin: 12.0,
                speed: 8.0,
            },
            Difficulty::Impossible => Self {
                lead_factor: 30.0,
                error_margin: 4.0,
                speed: 14.0,
            },
        }
    }
}

/// Predicted ball position `lead_factor` simulation steps ahead
pub fn predict_target(ball: &Ball, profile: &AiProfile) -> Vec2 {
    ball.pos + ball.vel * SIM_DT * profile.lead_factor
}

/// One axis of dead-zoned tracking: no movement inside the margin, at most
/// one speed increment toward the target outside it
fn step_axis(current: f32, target: f32, profile: &AiProfile) -> f32 {
    let error = target - current;
    if error.abs() <= profile.error_margin {
        0.0
    } else {
        error.clamp(-profile.speed, profile.speed)
    }
}

/// Drive the paddle one tick toward the predicted ball position.
///
/// The caller is responsible for only invoking this while the ball is
/// active and two-player mode is off; the paddle is re-clamped to its own
/// half and the vertical bounds afterwards.
pub fn drive_paddle(paddle: &mut Paddle, ball: &Ball, profile: &AiProfile, arena: Vec2) {
    let target = predict_target(ball, profile);
    paddle.pos.x += step_axis(paddle.pos.x, target.x, profile);
    paddle.pos.y += step_axis(paddle.pos.y, target.y, profile);
    paddle.clamp_to_court(arena);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Side;

    fn arena() -> Vec2 {
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT)
    }

    fn still_ball_at(pos: Vec2) -> Ball {
        let mut ball = Ball::new();
        ball.pos = pos;
        ball.last_pos = pos;
        ball.active = true;
        ball
    }

    #[test]
    fn test_dead_zone_boundary() {
        let profile = AiProfile::for_difficulty(Difficulty::Normal);
        let mut paddle = Paddle::new(Side::Right, 180.0, arena());
        let y0 = paddle.pos.y;

        // Offset exactly at the margin: no movement
        let ball = still_ball_at(Vec2::new(paddle.pos.x, y0 + profile.error_margin));
        drive_paddle(&mut paddle, &ball, &profile, arena());
        assert_eq!(paddle.pos.y, y0);

        // One pixel past the margin: exactly one speed increment
        let ball = still_ball_at(Vec2::new(paddle.pos.x, y0 + profile.error_margin + 1.0));
        drive_paddle(&mut paddle, &ball, &profile, arena());
        assert_eq!(paddle.pos.y, y0 + profile.speed);
    }

    #[test]
    fn test_leads_the_ball() {
        let profile = AiProfile::for_difficulty(Difficulty::Hard);
        let mut ball = still_ball_at(Vec2::new(600.0, 300.0));
        ball.vel = Vec2::new(480.0, 240.0);
        let target = predict_target(&ball, &profile);
        assert!(target.x > ball.pos.x);
        assert!(target.y > ball.pos.y);
        let expected = ball.pos + ball.vel * SIM_DT * profile.lead_factor;
        assert_eq!(target, expected);
    }

    #[test]
    fn test_paddle_stays_in_own_half() {
        let profile = AiProfile::for_difficulty(Difficulty::Impossible);
        let mut paddle = Paddle::new(Side::Right, 180.0, arena());
        // Ball deep in the player's half; the paddle may roam but never
        // crosses the center line
        let ball = still_ball_at(Vec2::new(100.0, 80.0));
        for _ in 0..2000 {
            drive_paddle(&mut paddle, &ball, &profile, arena());
        }
        assert!(paddle.pos.x >= ARENA_WIDTH * 0.5 + paddle.size.x * 0.5);
        assert!(paddle.pos.y >= paddle.size.y * 0.5);
    }

    #[test]
    fn test_harder_profiles_track_tighter() {
        let easy = AiProfile::for_difficulty(Difficulty::Easy);
        let hard = AiProfile::for_difficulty(Difficulty::Impossible);
        assert!(hard.error_margin < easy.error_margin);
        assert!(hard.speed > easy.speed);
        assert!(hard.lead_factor > easy.lead_factor);
    }
}
