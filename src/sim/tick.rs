//! Fixed timestep simulation tick
//!
//! Core loop that advances a match deterministically: commands, paddle
//! movement, sub-stepped ball integration, scoring, and the serve/pause
//! state machine. Input intent is sampled once at the start of the tick;
//! collaborators react to the events collected during it.

use glam::Vec2;
use rand::Rng;

use super::ai::{self, AiProfile};
use super::collision;
use super::state::{GameEvent, MatchPhase, MatchState, Side};
use crate::settings::{Difficulty, PaddleSize};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keyboard intent for the left paddle, -1 (up) to 1 (down)
    pub player_axis: f32,
    /// Pointer/touch delta for the left paddle (pixels)
    pub player_pointer: Vec2,
    /// Keyboard intent for the right paddle (two-player mode)
    pub opponent_axis: f32,
    /// Pointer/touch delta for the right paddle (two-player mode)
    pub opponent_pointer: Vec2,
    /// Pause/resume toggle
    pub pause: bool,
    /// Reset the match to a fresh serve
    pub restart: bool,
    pub set_difficulty: Option<Difficulty>,
    pub set_paddle_size: Option<PaddleSize>,
    pub toggle_two_player: bool,
    pub toggle_mute: bool,
}

/// Advance the match by one tick of `dt` seconds
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) {
    state.events.clear();

    apply_commands(state, input);

    if state.phase.is_paused() || state.phase.is_game_over() {
        return;
    }

    state.time_ticks += 1;

    // Decay the cosmetic hit pulse
    state.hit_flash *= 0.9;
    if state.hit_flash < 0.01 {
        state.hit_flash = 0.0;
    }

    // Malformed-state guard: never integrate NaN kinematics
    if !state.ball.is_finite() {
        log::warn!(
            "non-finite ball kinematics at tick {}, forcing reset",
            state.time_ticks
        );
        force_reset(state);
    }

    move_paddles(state, input, dt);

    match state.phase {
        MatchPhase::Serving { timer } => {
            let timer = timer - dt;
            if timer <= 0.0 {
                serve(state);
            } else {
                state.phase = MatchPhase::Serving { timer };
            }
        }
        MatchPhase::Active => move_ball(state, dt),
        MatchPhase::Paused { .. } | MatchPhase::GameOver => {}
    }
}

/// Discrete command handling; invalid transitions are rejected
fn apply_commands(state: &mut MatchState, input: &TickInput) {
    if input.restart {
        state.restart();
    }
    if input.toggle_mute {
        state.settings.muted = !state.settings.muted;
    }
    if input.toggle_two_player {
        state.settings.two_player = !state.settings.two_player;
    }
    if let Some(difficulty) = input.set_difficulty {
        state.settings.difficulty = difficulty;
    }
    if let Some(size) = input.set_paddle_size {
        state.set_paddle_size(size);
    }
    if input.pause {
        state.phase = match state.phase {
            MatchPhase::Active => MatchPhase::Paused { serve_timer: None },
            MatchPhase::Serving { timer } => MatchPhase::Paused {
                serve_timer: Some(timer),
            },
            MatchPhase::Paused {
                serve_timer: Some(timer),
            } => MatchPhase::Serving { timer },
            MatchPhase::Paused { serve_timer: None } => MatchPhase::Active,
            // Pausing a finished match is not a legal transition
            MatchPhase::GameOver => MatchPhase::GameOver,
        };
    }
}

fn move_paddles(state: &mut MatchState, input: &TickInput, dt: f32) {
    let arena = state.arena;
    let sensitivity = state.settings.sensitivity;

    state.player.begin_tick();
    state.player.pos.y += input.player_axis.clamp(-1.0, 1.0) * state.player.max_speed * dt;
    state.player.pos += input.player_pointer * sensitivity;
    state.player.clamp_to_court(arena);

    state.opponent.begin_tick();
    if state.settings.two_player {
        state.opponent.pos.y +=
            input.opponent_axis.clamp(-1.0, 1.0) * state.opponent.max_speed * dt;
        state.opponent.pos += input.opponent_pointer * sensitivity;
        state.opponent.clamp_to_court(arena);
    } else if state.phase == MatchPhase::Active && state.ball.active {
        let profile = AiProfile::for_difficulty(state.settings.difficulty);
        ai::drive_paddle(&mut state.opponent, &state.ball, &profile, arena);
    }
}

/// Sub-stepped ball integration for one tick
fn move_ball(state: &mut MatchState, dt: f32) {
    if !state.ball.active {
        return;
    }

    // Drag, then keep speed inside the legal band
    state.ball.vel *= state.tuning.drag;
    clamp_speed(state);

    let speed = state.ball.speed();
    let steps = ((speed * dt / state.tuning.step_distance).ceil() as u32)
        .clamp(1, state.tuning.max_substeps);
    let step_dt = dt / steps as f32;

    for _ in 0..steps {
        state.ball.last_pos = state.ball.pos;
        state.ball.pos += state.ball.vel * step_dt;

        // Priority order per sub-step: near paddle, far paddle, top/bottom
        // walls, side walls. The first hit ends this sub-step's checks.
        let (near, far) = if state.ball.vel.x < 0.0 {
            (Side::Left, Side::Right)
        } else {
            (Side::Right, Side::Left)
        };
        if collide_paddle(state, near, dt) || collide_paddle(state, far, dt) {
            continue;
        }
        if bounce_walls(state) {
            continue;
        }
        if side_walls(state) {
            // Goal: the ball is parked, nothing left to integrate
            break;
        }
    }

    if state.ball.active {
        state.ball.record_trail();
    }
}

/// Paddle-vs-ball for one sub-step; applies the bounce and its side effects
fn collide_paddle(state: &mut MatchState, side: Side, dt: f32) -> bool {
    let Some(bounce) = collision::paddle_bounce(
        state.paddle(side),
        &state.ball,
        dt,
        &state.tuning,
        state.speed_cap(),
    ) else {
        return false;
    };

    state.ball.pos = bounce.pos;
    state.ball.vel = bounce.vel;
    state.ball.last_hit_by = Some(side);
    if side == Side::Left || state.settings.two_player {
        state.streak += 1;
    }
    state.hit_flash = 1.0;
    state.events.push(GameEvent::PaddleHit { side });
    true
}

/// Top/bottom wall bounce: reflect vertical velocity, clamp to bounds
fn bounce_walls(state: &mut MatchState) -> bool {
    let r = state.ball.radius;
    let ball = &mut state.ball;
    if ball.pos.y - r <= 0.0 && ball.vel.y < 0.0 {
        ball.pos.y = r;
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::WallBounce);
        return true;
    }
    if ball.pos.y + r >= state.arena.y && ball.vel.y > 0.0 {
        ball.pos.y = state.arena.y - r;
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::WallBounce);
        return true;
    }
    false
}

/// Side walls: the open goal mouth scores, the closed band bounces with a
/// small random vertical kick. Returns true when a goal ended play.
fn side_walls(state: &mut MatchState) -> bool {
    let r = state.ball.radius;
    let (scorer, wall_x, inward) = if state.ball.pos.x - r <= 0.0 && state.ball.vel.x < 0.0 {
        (Side::Right, r, 1.0)
    } else if state.ball.pos.x + r >= state.arena.x && state.ball.vel.x > 0.0 {
        (Side::Left, state.arena.x - r, -1.0)
    } else {
        return false;
    };

    let half_open = state.tuning.goal_half_opening(state.arena.y);
    if (state.ball.pos.y - state.arena.y * 0.5).abs() <= half_open {
        score_goal(state, scorer);
        true
    } else {
        state.ball.pos.x = wall_x;
        state.ball.vel.x = inward * state.ball.vel.x.abs();
        let jitter = state.tuning.goal_bounce_jitter;
        state.ball.vel.y += state.rng.random_range(-jitter..=jitter);
        clamp_speed(state);
        state.events.push(GameEvent::WallBounce);
        false
    }
}

fn score_goal(state: &mut MatchState, scorer: Side) {
    state.score.add(scorer);
    state.streak = 0;
    state.ball.park(state.arena);
    state.events.push(GameEvent::Goal { scorer });
    log::debug!(
        "goal for {scorer:?}, score {}-{}",
        state.score.player,
        state.score.opponent
    );

    if let Some(winner) = state.score.winner(state.settings.winning_score) {
        state.phase = MatchPhase::GameOver;
        state.events.push(GameEvent::MatchOver { winner });
        log::info!(
            "match over, {winner:?} wins {}-{}",
            state.score.player,
            state.score.opponent
        );
    } else {
        state.phase = MatchPhase::Serving {
            timer: state.tuning.serve_delay,
        };
    }
}

/// Re-center the ball and launch it inside a bounded cone around the
/// horizontal, direction chosen at the moment of launch
fn serve(state: &mut MatchState) {
    let cone = state.tuning.serve_cone;
    let angle: f32 = state.rng.random_range(-cone..=cone);
    let toward_player = state.rng.random_bool(0.5);
    let x = if toward_player {
        -angle.cos()
    } else {
        angle.cos()
    };
    let dir = Vec2::new(x, angle.sin());

    let center = state.arena * 0.5;
    let ball = &mut state.ball;
    ball.pos = center;
    ball.last_pos = center;
    ball.vel = dir * state.tuning.start_speed;
    ball.active = true;
    ball.last_hit_by = None;
    ball.clear_trail();

    state.events.push(GameEvent::Serve);
    state.phase = MatchPhase::Active;
}

/// Recovery from non-finite kinematics: park the ball and schedule a
/// fresh serve. Scores and streak are untouched.
fn force_reset(state: &mut MatchState) {
    state.ball.park(state.arena);
    state.phase = MatchPhase::Serving {
        timer: state.tuning.serve_delay,
    };
    state.events.push(GameEvent::BallReset);
}

/// Clamp ball speed into `[min_speed, speed_cap(streak)]`, preserving
/// direction
fn clamp_speed(state: &mut MatchState) {
    let cap = state.speed_cap().max(state.tuning.min_speed);
    let speed = state.ball.vel.length();
    if speed <= f32::EPSILON {
        return;
    }
    let clamped = speed.clamp(state.tuning.min_speed, cap);
    if (clamped - speed).abs() > f32::EPSILON {
        state.ball.vel = state.ball.vel / speed * clamped;
    }
}
