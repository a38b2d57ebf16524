//! Brick Breaker - a single-screen arcade brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, bricks, effects, game state)
//! - `renderer`: Scene building and the WebGPU pipeline
//! - `platform`: Input collection, fixed-step frame loop
//! - `audio`: Sound effects and background music
//! - `ui`: Pause menu layout and hit-testing

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Rates are per second; one tick at `SIM_DT` matches one classic 60 Hz frame.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical playfield size
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Distance from the paddle's top edge to the bottom of the field
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;
    pub const PADDLE_KEY_SPEED: f32 = 360.0;
    /// Fraction of the cursor distance covered per pointer update
    pub const PADDLE_POINTER_FOLLOW: f32 = 0.2;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 180.0;
    /// Horizontal speed when hitting the very edge of the paddle
    pub const BALL_ENGLISH: f32 = 300.0;
    /// Distance from the ball spawn point to the bottom of the field
    pub const BALL_SPAWN_OFFSET: f32 = 100.0;

    /// Brick geometry
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_GAP: f32 = 5.0;
    pub const BRICK_TOP: f32 = 50.0;
    pub const BRICK_POINTS: u64 = 10;

    /// Run rules
    pub const START_LIVES: u8 = 3;
    pub const MAX_LEVEL: u32 = 3;

    /// Effects
    pub const PARTICLES_PER_BRICK: usize = 15;
    pub const PARTICLE_MAX_SPEED: f32 = 120.0;
    pub const PARTICLE_DECAY: f32 = 1.8;
    pub const TRAIL_DECAY: f32 = 3.0;
    pub const TRAIL_EXTRA_DIAMETER: f32 = 6.0;
    pub const POPUP_RISE_SPEED: f32 = 30.0;
    pub const POPUP_DECAY: f32 = 1.8;

    /// Starfield
    pub const STAR_COUNT: usize = 150;
    pub const STAR_MIN_SPEED: f32 = 30.0;
    pub const STAR_MAX_SPEED: f32 = 90.0;
    /// Brightness random walk step per 60 Hz frame
    pub const STAR_TWINKLE: f32 = 0.05;

    /// Brick hue rotation (degrees per second)
    pub const HUE_SPEED: f32 = 60.0;
    /// Pause overlay gradient drift (cycles per second)
    pub const OVERLAY_DRIFT: f32 = 0.18;
}

/// Field size as a vector
#[inline]
pub fn default_field() -> Vec2 {
    Vec2::new(consts::FIELD_WIDTH, consts::FIELD_HEIGHT)
}

/// Wrap a value into [0, 1)
#[inline]
pub fn wrap_unit(value: f32) -> f32 {
    value.rem_euclid(1.0)
}
