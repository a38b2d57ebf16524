//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bricks::BrickGrid;
use super::collision::Rect;
use super::effects::{Particle, ScorePopup, Star, TrailSegment};
use crate::consts::*;
use crate::ui::MenuButton;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for Enter
    MainMenu,
    /// Active gameplay
    Playing,
    /// Pause menu is open
    Paused,
    /// Out of lives
    GameOver,
    /// Last level cleared
    Won,
}

/// Something that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    PaddleHit,
    BrickBroken { row: usize, col: usize, points: u64 },
    BallLost { lives_left: u8 },
    LevelCleared { next_level: u32 },
    GameWon,
    GameOver,
    Paused,
    Resumed,
    ReturnedToMenu,
    MuteToggled(bool),
    QuitRequested,
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Horizontal centre
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(field: Vec2) -> Self {
        Self {
            x: field.x / 2.0,
            y: field.y - PADDLE_BOTTOM_OFFSET,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x - self.width / 2.0, self.y, self.width, self.height)
    }

    /// Keep the paddle fully inside the field
    pub fn clamp_to(&mut self, field_width: f32) {
        let half = self.width / 2.0;
        self.x = self.x.clamp(half, (field_width - half).max(half));
    }

    pub fn move_by(&mut self, dx: f32, field_width: f32) {
        self.x += dx;
        self.clamp_to(field_width);
    }

    /// Ease toward a cursor x position (one pointer update)
    pub fn steer_toward(&mut self, target_x: f32, field_width: f32) {
        self.x += (target_x - self.x) * PADDLE_POINTER_FOLLOW;
        self.clamp_to(field_width);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(field: Vec2) -> Self {
        Self {
            pos: Self::spawn_point(field),
            vel: Vec2::new(BALL_SPEED, -BALL_SPEED),
            radius: BALL_RADIUS,
        }
    }

    fn spawn_point(field: Vec2) -> Vec2 {
        Vec2::new(field.x / 2.0, field.y - BALL_SPAWN_OFFSET)
    }

    /// Back to the spawn point, heading up at a random horizontal direction
    pub fn reset(&mut self, field: Vec2, rng: &mut impl Rng) {
        self.pos = Self::spawn_point(field);
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(BALL_SPEED * dir, -BALL_SPEED);
    }

    pub fn is_below(&self, field: Vec2) -> bool {
        self.pos.y - self.radius > field.y
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation RNG (effects, ball direction, stars)
    pub rng: Pcg32,
    /// Logical playfield size
    pub field: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// 1-based level number
    pub level: u32,
    pub muted: bool,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// Brick colour cycle (degrees)
    pub hue_angle: f32,
    /// Pause veil gradient offset in [0, 1)
    pub overlay_offset: f32,
    /// Pause menu button under the cursor
    pub hovered: Option<MenuButton>,
    pub particles: Vec<Particle>,
    pub trail: Vec<TrailSegment>,
    pub popups: Vec<ScorePopup>,
    pub stars: Vec<Star>,
    /// Events produced since the last `take_events`
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

/// Maximum live particles
pub const MAX_PARTICLES: usize = 600;

impl GameState {
    /// Fresh game sitting on the main menu
    pub fn new(seed: u64, field: Vec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT).map(|_| Star::spawn(field, &mut rng)).collect();

        Self {
            seed,
            rng,
            field,
            phase: GamePhase::MainMenu,
            score: 0,
            lives: START_LIVES,
            level: 1,
            muted: false,
            paddle: Paddle::new(field),
            ball: Ball::new(field),
            bricks: BrickGrid::for_level(1),
            hue_angle: 0.0,
            overlay_offset: 0.0,
            hovered: None,
            particles: Vec::new(),
            trail: Vec::new(),
            popups: Vec::new(),
            stars,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Leave the main menu and start playing
    pub fn start_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.ball.reset(self.field, &mut self.rng);
        self.events.push(GameEvent::GameStarted);
        log::info!("Run started on level {}", self.level);
    }

    /// Back to a fresh main menu; stars, paddle position and mute survive
    pub fn reset_to_menu(&mut self) {
        self.lives = START_LIVES;
        self.score = 0;
        self.level = 1;
        self.paddle.width = PADDLE_WIDTH;
        self.phase = GamePhase::MainMenu;
        self.hovered = None;
        self.particles.clear();
        self.trail.clear();
        self.popups.clear();
        self.load_level();
        self.ball.reset(self.field, &mut self.rng);
        self.events.push(GameEvent::ReturnedToMenu);
    }

    /// Lay out the bricks for the current level
    pub fn load_level(&mut self) {
        self.bricks = BrickGrid::for_level(self.level);
        log::debug!(
            "Level {} layout: {:?} ({} bricks)",
            self.level,
            super::Layout::for_level(self.level),
            self.bricks.remaining()
        );
    }

    /// Append particles, dropping the oldest beyond the cap
    pub fn push_particles(&mut self, center: Vec2, count: usize) {
        for _ in 0..count {
            let particle = Particle::spawn(center, &mut self.rng);
            self.particles.push(particle);
        }
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_field;

    #[test]
    fn test_new_state_on_main_menu() {
        let state = GameState::new(42, default_field());
        assert_eq!(state.phase, GamePhase::MainMenu);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert_eq!(state.bricks.remaining(), 12);
        assert_eq!(state.paddle.x, FIELD_WIDTH / 2.0);
        assert_eq!(state.paddle.y, FIELD_HEIGHT - PADDLE_BOTTOM_OFFSET);
    }

    #[test]
    fn test_ball_reset() {
        let field = default_field();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut ball = Ball::new(field);
        ball.pos = Vec2::new(3.0, 4.0);

        let mut saw_left = false;
        let mut saw_right = false;
        for _ in 0..32 {
            ball.reset(field, &mut rng);
            assert_eq!(ball.pos, Vec2::new(field.x / 2.0, field.y - BALL_SPAWN_OFFSET));
            assert_eq!(ball.vel.y, -BALL_SPEED);
            assert_eq!(ball.vel.x.abs(), BALL_SPEED);
            saw_left |= ball.vel.x < 0.0;
            saw_right |= ball.vel.x > 0.0;
        }
        assert!(saw_left && saw_right);
    }

    #[test]
    fn test_paddle_clamped() {
        let mut paddle = Paddle::new(Vec2::new(800.0, 600.0));
        paddle.move_by(-10_000.0, 800.0);
        assert_eq!(paddle.x, 50.0);
        paddle.move_by(10_000.0, 800.0);
        assert_eq!(paddle.x, 750.0);
    }

    #[test]
    fn test_paddle_steer_eases() {
        let mut paddle = Paddle::new(Vec2::new(800.0, 600.0));
        paddle.steer_toward(500.0, 800.0);
        assert!((paddle.x - 420.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_to_menu_keeps_mute_and_stars() {
        let mut state = GameState::new(1, default_field());
        state.muted = true;
        state.score = 120;
        state.lives = 1;
        state.level = 3;
        state.load_level();
        state.push_particles(Vec2::new(10.0, 10.0), 15);
        let star_pos = state.stars[0].pos;

        state.reset_to_menu();

        assert!(state.muted);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.bricks, BrickGrid::for_level(1));
        assert!(state.particles.is_empty());
        assert_eq!(state.stars[0].pos, star_pos);
        assert_eq!(state.take_events(), vec![GameEvent::ReturnedToMenu]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_particle_cap_drops_oldest() {
        let mut state = GameState::new(1, default_field());
        state.push_particles(Vec2::new(1.0, 1.0), MAX_PARTICLES);
        state.push_particles(Vec2::new(2.0, 2.0), 10);
        assert_eq!(state.particles.len(), MAX_PARTICLES);
        assert_eq!(state.particles.last().map(|p| p.pos), Some(Vec2::new(2.0, 2.0)));
    }
}
