//! Collision detection and response
//!
//! The tricky part of Rally Pong: both the ball and the paddles can cover
//! a lot of ground in one step, so paddle-vs-ball contact is detected
//! against the *swept* paddle region rather than end-of-step rectangles,
//! then resolved with a velocity-based bounce.

use glam::Vec2;

use super::geom::swept_quad_intersects_segment;
use super::state::{Ball, Paddle};
use crate::tuning::Tuning;

/// Safety margin when repositioning the ball outside a struck face
const SKIN: f32 = 1.0;

/// Which paddle face the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// Resolved bounce: where the ball goes and how fast
#[derive(Debug, Clone, Copy)]
pub struct Bounce {
    pub pos: Vec2,
    pub vel: Vec2,
    pub face: CollisionSide,
}

/// Axis-aligned box covering a body's previous and current positions
fn swept_box(prev: Vec2, curr: Vec2, half: Vec2) -> (Vec2, Vec2) {
    (prev.min(curr) - half, prev.max(curr) + half)
}

/// Does the ball's travel segment intersect the paddle's swept region
/// for this sub-step?
pub fn swept_paddle_hit(paddle: &Paddle, ball: &Ball) -> bool {
    let half = paddle.size * 0.5;

    // Common case: plain overlap at the end of the step
    let d = (ball.pos - paddle.pos).abs();
    if d.x <= half.x + ball.radius && d.y <= half.y + ball.radius {
        return true;
    }

    // Travel segment vs the quad swept by the paddle, inflated by the
    // ball radius
    let inflated = paddle.size + Vec2::splat(ball.radius * 2.0);
    if swept_quad_intersects_segment(paddle.last_pos, paddle.pos, inflated, ball.last_pos, ball.pos)
    {
        return true;
    }

    // A slow ball fully inside the swept region crosses no quad edge
    let (min, max) = swept_box(
        paddle.last_pos,
        paddle.pos,
        half + Vec2::splat(ball.radius),
    );
    ball.pos.cmpge(min).all() && ball.pos.cmple(max).all()
}

/// Classify which face was struck by comparing overlap depth per axis
/// between the swept bounding boxes (minimum-translation-vector
/// heuristic). Returns `None` when the boxes do not actually overlap.
pub fn classify_face(paddle: &Paddle, ball: &Ball) -> Option<CollisionSide> {
    let (pmin, pmax) = swept_box(paddle.last_pos, paddle.pos, paddle.size * 0.5);
    let (bmin, bmax) = swept_box(ball.last_pos, ball.pos, Vec2::splat(ball.radius));

    let overlap_x = bmax.x.min(pmax.x) - bmin.x.max(pmin.x);
    let overlap_y = bmax.y.min(pmax.y) - bmin.y.max(pmin.y);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    // Smaller overlap picks the axis; the approach side at the start of
    // the step picks the face
    if overlap_x < overlap_y {
        if ball.last_pos.x < paddle.last_pos.x {
            Some(CollisionSide::Left)
        } else {
            Some(CollisionSide::Right)
        }
    } else if ball.last_pos.y < paddle.last_pos.y {
        Some(CollisionSide::Top)
    } else {
        Some(CollisionSide::Bottom)
    }
}

/// Full paddle-vs-ball test and response for one sub-step.
///
/// Returns `None` when the sweep misses, or when it flags but no axis
/// overlap can be found - in that case the ball must not be touched.
pub fn paddle_bounce(
    paddle: &Paddle,
    ball: &Ball,
    dt: f32,
    tuning: &Tuning,
    speed_cap: f32,
) -> Option<Bounce> {
    if !swept_paddle_hit(paddle, ball) {
        return None;
    }
    let face = classify_face(paddle, ball)?;

    let half = paddle.size * 0.5;

    // Contact offset along the paddle's long axis, -1 at the top edge to
    // +1 at the bottom, scaled to the maximum deflection angle
    let offset = ((ball.pos.y - paddle.pos.y) / half.y).clamp(-1.0, 1.0);
    let angle = offset * tuning.max_deflection;

    // New speed: multiplicative boost plus a small cut of the paddle's
    // own movement, clamped into the legal band
    let paddle_vel = paddle.velocity(dt);
    let new_speed = (ball.speed() * tuning.paddle_boost
        + paddle_vel.y.abs() * tuning.paddle_transfer)
        .clamp(tuning.min_speed, speed_cap.max(tuning.min_speed));

    let (pos, vel) = match face {
        CollisionSide::Left => (
            Vec2::new(paddle.pos.x - half.x - ball.radius - SKIN, ball.pos.y),
            Vec2::new(-angle.cos(), angle.sin()) * new_speed,
        ),
        CollisionSide::Right => (
            Vec2::new(paddle.pos.x + half.x + ball.radius + SKIN, ball.pos.y),
            Vec2::new(angle.cos(), angle.sin()) * new_speed,
        ),
        CollisionSide::Top => {
            let mut dir = Vec2::new(ball.vel.x, -ball.vel.y.abs()).normalize_or_zero();
            if dir == Vec2::ZERO {
                dir = Vec2::NEG_Y;
            }
            (
                Vec2::new(ball.pos.x, paddle.pos.y - half.y - ball.radius - SKIN),
                dir * new_speed,
            )
        }
        CollisionSide::Bottom => {
            let mut dir = Vec2::new(ball.vel.x, ball.vel.y.abs()).normalize_or_zero();
            if dir == Vec2::ZERO {
                dir = Vec2::Y;
            }
            (
                Vec2::new(ball.pos.x, paddle.pos.y + half.y + ball.radius + SKIN),
                dir * new_speed,
            )
        }
    };

    Some(Bounce { pos, vel, face })
}
