//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod geom;
pub mod state;
pub mod tick;

pub use ai::AiProfile;
pub use collision::{Bounce, CollisionSide};
pub use geom::{segments_intersect, swept_quad_intersects_segment};
pub use state::{
    Ball, GameEvent, MatchPhase, MatchState, Paddle, Score, Side, TrailPoint, TRAIL_LENGTH,
};
pub use tick::{TickInput, tick};
