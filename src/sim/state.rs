//! Match state and core simulation types
//!
//! All state that must be persisted for save/continue and determinism lives
//! here. The [`MatchState`] struct is the single match context: no
//! process-wide singletons, and collaborators (renderer, audio, HUD) read
//! its public fields as their snapshot.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::{PaddleSize, Settings};
use crate::tuning::Tuning;

/// Which half of the court an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The human player's half
    Left,
    /// The AI (or second player) half
    Right,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Current phase of the match
///
/// Transitions are only performed by [`super::tick`]; anything not listed
/// there is rejected (e.g. pausing a finished match).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Ball parked off-screen, serve fires when the timer runs out
    Serving { timer: f32 },
    /// Active gameplay
    Active,
    /// Frozen; `serve_timer` remembers an interrupted serve wait
    Paused { serve_timer: Option<f32> },
    /// Match ended; only restart leaves this phase
    GameOver,
}

impl MatchPhase {
    pub fn is_paused(&self) -> bool {
        matches!(self, MatchPhase::Paused { .. })
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, MatchPhase::GameOver)
    }
}

/// Signals for host collaborators (audio cues, flashes, HUD)
///
/// Fire-and-forget: collected during one tick, cleared at the start of the
/// next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off a paddle; audio cue + flash pulse
    PaddleHit { side: Side },
    /// Ball bounced off a wall or the closed part of a goal mouth
    WallBounce,
    /// A goal was scored by `scorer`
    Goal { scorer: Side },
    /// Ball re-entered play after the serve delay
    Serve,
    /// Match ended
    MatchOver { winner: Side },
    /// Ball kinematics went non-finite and were forcibly reset
    BallReset,
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Render opacity, 1.0 at the head decaying toward 0
    pub life: f32,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 20;

/// Per-tick decay applied to every trail point
const TRAIL_DECAY: f32 = 0.92;

/// A paddle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position
    pub pos: Vec2,
    /// Full extents (width, height)
    pub size: Vec2,
    /// Position at the previous tick; drives sweep geometry and the
    /// derived paddle velocity
    pub last_pos: Vec2,
    /// Court half this paddle is confined to
    pub side: Side,
    /// Movement speed cap (pixels/s)
    pub max_speed: f32,
}

impl Paddle {
    pub fn new(side: Side, height: f32, arena: Vec2) -> Self {
        let x = match side {
            Side::Left => PADDLE_INSET,
            Side::Right => arena.x - PADDLE_INSET,
        };
        let pos = Vec2::new(x, arena.y * 0.5);
        Self {
            pos,
            size: Vec2::new(PADDLE_WIDTH, height),
            last_pos: pos,
            side,
            max_speed: PADDLE_SPEED,
        }
    }

    /// Velocity derived from the position delta over the last tick
    pub fn velocity(&self, dt: f32) -> Vec2 {
        if dt > 0.0 {
            (self.pos - self.last_pos) / dt
        } else {
            Vec2::ZERO
        }
    }

    /// Record the current position before this tick's movement
    pub fn begin_tick(&mut self) {
        self.last_pos = self.pos;
    }

    /// Clamp to vertical bounds and to this paddle's half of the court
    pub fn clamp_to_court(&mut self, arena: Vec2) {
        let half = self.size * 0.5;
        self.pos.y = self.pos.y.clamp(half.y, arena.y - half.y);
        let mid = arena.x * 0.5;
        self.pos.x = match self.side {
            Side::Left => self.pos.x.clamp(half.x, mid - half.x),
            Side::Right => self.pos.x.clamp(mid + half.x, arena.x - half.x),
        };
    }

    /// Re-center on the own goal line (restart / new serve)
    pub fn reset(&mut self, arena: Vec2) {
        let x = match self.side {
            Side::Left => PADDLE_INSET,
            Side::Right => arena.x - PADDLE_INSET,
        };
        self.pos = Vec2::new(x, arena.y * 0.5);
        self.last_pos = self.pos;
    }
}

/// The ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity vector; its magnitude is the ball speed
    pub vel: Vec2,
    /// Position at the start of the current sub-step (sweep geometry)
    pub last_pos: Vec2,
    pub radius: f32,
    /// False while parked during the serve-delay window
    pub active: bool,
    /// Which paddle touched the ball last, if any
    pub last_hit_by: Option<Side>,
    /// Trail history for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            last_pos: Vec2::ZERO,
            radius: BALL_RADIUS,
            active: false,
            last_hit_by: None,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Park off-screen and deactivate (serve-delay window)
    pub fn park(&mut self, arena: Vec2) {
        self.pos = Vec2::new(arena.x * 0.5, -4.0 * arena.y);
        self.last_pos = self.pos;
        self.vel = Vec2::ZERO;
        self.active = false;
        self.last_hit_by = None;
        self.clear_trail();
    }

    /// Record current position to trail (call once per tick when active)
    pub fn record_trail(&mut self) {
        for point in &mut self.trail {
            point.life *= TRAIL_DECAY;
        }
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos,
                life: 1.0,
            },
        );
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// True when position and velocity are both finite
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// Match score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn for_side(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.player,
            Side::Right => self.opponent,
        }
    }

    pub fn add(&mut self, side: Side) {
        match side {
            Side::Left => self.player += 1,
            Side::Right => self.opponent += 1,
        }
    }

    pub fn winner(&self, winning_score: u32) -> Option<Side> {
        if self.player >= winning_score {
            Some(Side::Left)
        } else if self.opponent >= winning_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Seed for reproducibility
    pub seed: u64,
    /// User configuration (difficulty, mode, paddle size, ...)
    pub settings: Settings,
    /// Game-feel parameters
    pub tuning: Tuning,
    /// Playfield extents
    pub arena: Vec2,
    /// Left (player) paddle
    pub player: Paddle,
    /// Right (AI or second player) paddle
    pub opponent: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Consecutive returns since the last goal; drives the speed ramp
    pub streak: u32,
    pub phase: MatchPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Cosmetic hit pulse, 1.0 on paddle contact decaying to 0
    pub hit_flash: f32,
    /// Signals collected during the current tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl MatchState {
    /// Create a fresh match waiting on its first serve
    pub fn new(settings: Settings, seed: u64) -> Self {
        let tuning = Tuning::default();
        Self::with_tuning(settings, tuning, seed)
    }

    pub fn with_tuning(settings: Settings, tuning: Tuning, seed: u64) -> Self {
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let height = settings.paddle_size.height();
        let mut ball = Ball::new();
        ball.park(arena);
        Self {
            seed,
            player: Paddle::new(Side::Left, height, arena),
            opponent: Paddle::new(Side::Right, height, arena),
            ball,
            score: Score::default(),
            streak: 0,
            phase: MatchPhase::Serving {
                timer: tuning.serve_delay,
            },
            time_ticks: 0,
            hit_flash: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            settings,
            tuning,
            arena,
        }
    }

    /// Reset to the fresh-serve state: scores 0-0, streak 0, entities
    /// centered. Idempotent - calling it again yields the same state.
    pub fn restart(&mut self) {
        self.score = Score::default();
        self.streak = 0;
        self.player.reset(self.arena);
        self.opponent.reset(self.arena);
        self.ball.park(self.arena);
        self.hit_flash = 0.0;
        self.phase = MatchPhase::Serving {
            timer: self.tuning.serve_delay,
        };
        log::info!("match restarted");
    }

    /// Apply a paddle-size change to both paddles immediately
    pub fn set_paddle_size(&mut self, size: PaddleSize) {
        self.settings.paddle_size = size;
        let height = size.height();
        self.player.size.y = height;
        self.opponent.size.y = height;
        self.player.clamp_to_court(self.arena);
        self.opponent.clamp_to_court(self.arena);
    }

    /// Speed ceiling currently in force (streak ramp applied)
    pub fn speed_cap(&self) -> f32 {
        self.tuning.speed_cap_for_streak(self.streak)
    }

    pub(crate) fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.player,
            Side::Right => &self.opponent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_waits_on_serve() {
        let state = MatchState::new(Settings::default(), 7);
        assert!(matches!(state.phase, MatchPhase::Serving { .. }));
        assert!(!state.ball.active);
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_paddle_clamps_to_own_half() {
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let mut paddle = Paddle::new(Side::Left, 180.0, arena);
        paddle.pos = Vec2::new(ARENA_WIDTH, -500.0);
        paddle.clamp_to_court(arena);
        assert!(paddle.pos.x <= ARENA_WIDTH * 0.5 - paddle.size.x * 0.5);
        assert_eq!(paddle.pos.y, paddle.size.y * 0.5);

        let mut right = Paddle::new(Side::Right, 180.0, arena);
        right.pos = Vec2::new(0.0, ARENA_HEIGHT * 2.0);
        right.clamp_to_court(arena);
        assert!(right.pos.x >= ARENA_WIDTH * 0.5 + right.size.x * 0.5);
        assert_eq!(right.pos.y, ARENA_HEIGHT - right.size.y * 0.5);
    }

    #[test]
    fn test_paddle_velocity_from_position_delta() {
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let mut paddle = Paddle::new(Side::Left, 180.0, arena);
        paddle.begin_tick();
        paddle.pos.y += 5.0;
        let vel = paddle.velocity(0.01);
        assert!((vel.y - 500.0).abs() < 0.001);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_trail_is_bounded_and_decays() {
        let mut ball = Ball::new();
        for i in 0..(TRAIL_LENGTH + 10) {
            ball.pos = Vec2::new(i as f32, 0.0);
            ball.record_trail();
        }
        assert_eq!(ball.trail.len(), TRAIL_LENGTH);
        assert_eq!(ball.trail[0].life, 1.0);
        assert!(ball.trail[1].life < ball.trail[0].life);
        assert!(ball.trail.last().unwrap().life < 0.5);
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut state = MatchState::new(Settings::default(), 42);
        state.score.player = 9;
        state.streak = 4;
        state.phase = MatchPhase::GameOver;
        state.restart();
        let snapshot = format!("{:?}", (&state.score, &state.streak, &state.phase));
        state.restart();
        let again = format!("{:?}", (&state.score, &state.streak, &state.phase));
        assert_eq!(snapshot, again);
        assert_eq!(state.score, Score::default());
        assert!(matches!(state.phase, MatchPhase::Serving { .. }));
    }

    #[test]
    fn test_state_survives_serde_round_trip() {
        let mut state = MatchState::new(Settings::default(), 11);
        state.score.player = 3;
        state.streak = 2;
        let json = serde_json::to_string(&state).expect("serialize");
        let restored: MatchState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.score, state.score);
        assert_eq!(restored.streak, state.streak);
        assert_eq!(restored.phase, state.phase);
        assert_eq!(restored.ball.pos, state.ball.pos);
    }
}
