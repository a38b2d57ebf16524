//! Short-lived visual effects and the background starfield
//!
//! None of this affects gameplay, but it is driven by the simulation RNG so a
//! run stays reproducible from its seed.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Something that fades out and is then dropped from its list
pub trait Effect {
    /// Advance by `dt` seconds
    fn update(&mut self, dt: f32);
    /// False once fully faded
    fn is_alive(&self) -> bool;
}

/// Update every effect in the list, dropping the ones that expired
pub fn update_effects<E: Effect>(list: &mut Vec<E>, dt: f32) {
    list.retain_mut(|effect| {
        effect.update(dt);
        effect.is_alive()
    });
}

/// Spark thrown out of a broken brick
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Hue in degrees
    pub hue: f32,
    /// 1 at spawn, 0 when gone
    pub life: f32,
}

impl Particle {
    /// Random direction and hue, starting at `pos`
    pub fn spawn(pos: Vec2, rng: &mut impl Rng) -> Self {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_MAX_SPEED,
            (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_MAX_SPEED,
        );
        Self {
            pos,
            vel,
            hue: rng.random::<f32>() * 360.0,
            life: 1.0,
        }
    }
}

impl Effect for Particle {
    fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life = (self.life - PARTICLE_DECAY * dt).max(0.0);
    }

    fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Ghost disc left behind by the ball each tick
#[derive(Debug, Clone)]
pub struct TrailSegment {
    pub pos: Vec2,
    pub diameter: f32,
    pub hue: f32,
    pub alpha: f32,
}

impl TrailSegment {
    pub fn spawn(pos: Vec2, ball_radius: f32, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            diameter: ball_radius + rng.random::<f32>() * TRAIL_EXTRA_DIAMETER,
            hue: rng.random::<f32>() * 360.0,
            alpha: 1.0,
        }
    }
}

impl Effect for TrailSegment {
    fn update(&mut self, dt: f32) {
        self.alpha = (self.alpha - TRAIL_DECAY * dt).max(0.0);
    }

    fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }
}

/// Floating "+N" over a broken brick
#[derive(Debug, Clone)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub value: u64,
    pub alpha: f32,
}

impl ScorePopup {
    pub fn new(pos: Vec2, value: u64) -> Self {
        Self {
            pos,
            value,
            alpha: 1.0,
        }
    }
}

impl Effect for ScorePopup {
    fn update(&mut self, dt: f32) {
        self.pos.y -= POPUP_RISE_SPEED * dt;
        self.alpha = (self.alpha - POPUP_DECAY * dt).max(0.0);
    }

    fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }
}

/// Background star, falls forever and wraps around
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub diameter: f32,
    pub speed: f32,
    pub brightness: f32,
}

impl Star {
    pub fn spawn(field: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(rng.random::<f32>() * field.x, rng.random::<f32>() * field.y),
            diameter: rng.random::<f32>() * 2.0 + 1.0,
            speed: STAR_MIN_SPEED + rng.random::<f32>() * (STAR_MAX_SPEED - STAR_MIN_SPEED),
            brightness: rng.random::<f32>(),
        }
    }

    pub fn update(&mut self, dt: f32, field: Vec2, rng: &mut impl Rng) {
        self.pos.y += self.speed * dt;
        if self.pos.y > field.y {
            self.pos.y = 0.0;
            self.pos.x = rng.random::<f32>() * field.x;
        }

        // Twinkle: random walk scaled to 60 Hz frames
        let frames = dt * 60.0;
        let step = (rng.random::<f32>() - 0.5) * STAR_TWINKLE * frames;
        self.brightness = (self.brightness + step).clamp(0.0, 1.0);
    }
}
