//! Collision detection and response for axis-aligned geometry
//!
//! Everything in the field is a box except the ball, and the ball is tested
//! through its bounding square. Crude, but it is what gives the game its feel.

use glam::Vec2;

use super::state::Paddle;

/// Axis-aligned rectangle (top-left corner + size, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Point containment, edges inclusive
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.right() && p.y >= self.min.y && p.y <= self.bottom()
    }

    /// Grow the rectangle by `amount` on every side
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            size: self.size + Vec2::splat(amount * 2.0),
        }
    }
}

/// Whether the ball's bounding square overlaps the rectangle (touching is not overlap)
pub fn circle_box_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x + radius > rect.min.x
        && center.x - radius < rect.right()
        && center.y + radius > rect.min.y
        && center.y - radius < rect.bottom()
}

/// Which wall the ball bounced off, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// Reflect velocity off the side and top walls
///
/// The reflected component always points back into the field, so a ball that
/// stays overlapped with a wall for several ticks keeps heading inward instead
/// of flipping every tick. The bottom is open.
pub fn bounce_off_walls(pos: Vec2, vel: Vec2, radius: f32, field: Vec2) -> (Vec2, Option<Wall>) {
    let mut vel = vel;
    let mut wall = None;

    if pos.x - radius < 0.0 {
        vel.x = vel.x.abs();
        wall = Some(Wall::Left);
    } else if pos.x + radius > field.x {
        vel.x = -vel.x.abs();
        wall = Some(Wall::Right);
    }

    if pos.y - radius < 0.0 {
        vel.y = vel.y.abs();
        wall = Some(Wall::Top);
    }

    (vel, wall)
}

/// Check the ball against the paddle's top band
///
/// Returns the normalized hit position in [-1, 1] (left edge to right edge)
/// when the ball's bottom lies within the paddle's height and its centre lies
/// over the paddle.
pub fn paddle_hit(ball_pos: Vec2, radius: f32, paddle: &Paddle) -> Option<f32> {
    let ball_bottom = ball_pos.y + radius;
    let half = paddle.width / 2.0;

    let in_band = ball_bottom >= paddle.y && ball_bottom <= paddle.y + paddle.height;
    let over_paddle = ball_pos.x >= paddle.x - half && ball_pos.x <= paddle.x + half;

    if in_band && over_paddle {
        Some(((ball_pos.x - paddle.x) / half).clamp(-1.0, 1.0))
    } else {
        None
    }
}
