//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod effects;
pub mod state;
pub mod tick;

pub use bricks::{BrickGrid, Layout};
pub use collision::{Rect, bounce_off_walls, circle_box_overlap, paddle_hit};
pub use effects::{Effect, Particle, ScorePopup, Star, TrailSegment, update_effects};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, tick};
