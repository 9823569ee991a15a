//! Rally Pong - a two-paddle arcade duel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, match state, AI)
//! - `settings`: User-facing configuration with string-keyed presets
//! - `tuning`: Data-driven game balance
//!
//! The crate is a pure simulation core. Rendering, audio playback, input
//! devices, and storage are host collaborators: they feed [`sim::TickInput`]
//! into [`sim::tick`] and read [`sim::MatchState`] fields and
//! [`sim::GameEvent`]s back out.

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Difficulty, PaddleSize, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Arena dimensions (logical pixels)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Paddle defaults - face width and distance of the center from the wall
    pub const PADDLE_WIDTH: f32 = 24.0;
    pub const PADDLE_INSET: f32 = 36.0;
    /// Paddle speed cap for keyboard movement (pixels/s)
    pub const PADDLE_SPEED: f32 = 900.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_START_SPEED: f32 = 360.0;
    /// Minimum ball speed (drag can't slow it below this)
    pub const BALL_MIN_SPEED: f32 = 240.0;
    /// Hard ceiling on ball speed, streak ramp included
    pub const BALL_MAX_SPEED: f32 = 1080.0;
}
