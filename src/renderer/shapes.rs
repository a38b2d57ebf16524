//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in field coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::color::{mix, with_alpha};
use super::vertex::Vertex;
use crate::sim::Rect;

/// Axis-aligned quad between two corners
pub fn quad(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) {
    out.push(Vertex::new(min.x, min.y, top));
    out.push(Vertex::new(max.x, min.y, top));
    out.push(Vertex::new(min.x, max.y, bottom));

    out.push(Vertex::new(max.x, min.y, top));
    out.push(Vertex::new(max.x, max.y, bottom));
    out.push(Vertex::new(min.x, max.y, bottom));
}

/// Solid rectangle
pub fn rect(out: &mut Vec<Vertex>, r: &Rect, color: [f32; 4]) {
    quad(out, r.min, r.min + r.size, color, color);
}

/// Vertical gradient through `stops` (fraction of height, colour), top to bottom.
/// Stops must be sorted; the first and last colours extend to the edges.
pub fn vertical_gradient(out: &mut Vec<Vertex>, r: &Rect, stops: &[(f32, [f32; 4])]) {
    let Some(&(first_t, first_color)) = stops.first() else {
        return;
    };

    let y_at = |t: f32| r.min.y + r.size.y * t.clamp(0.0, 1.0);
    let left = r.min.x;
    let right = r.right();

    let mut prev_y = r.min.y;
    let mut prev_color = first_color;
    if first_t > 0.0 {
        let y = y_at(first_t);
        quad(out, Vec2::new(left, prev_y), Vec2::new(right, y), first_color, first_color);
        prev_y = y;
    }

    for &(t, color) in &stops[1..] {
        let y = y_at(t);
        if y > prev_y {
            quad(out, Vec2::new(left, prev_y), Vec2::new(right, y), prev_color, color);
        }
        prev_y = y;
        prev_color = color;
    }

    if prev_y < r.bottom() {
        quad(out, Vec2::new(left, prev_y), Vec2::new(right, r.bottom()), prev_color, prev_color);
    }
}

/// Colour of a sorted gradient at fraction `t`
pub fn gradient_at(stops: &[(f32, [f32; 4])], t: f32) -> [f32; 4] {
    match stops {
        [] => [0.0; 4],
        [(_, only)] => *only,
        _ => {
            let (first_t, first) = stops[0];
            if t <= first_t {
                return first;
            }
            for pair in stops.windows(2) {
                let (t0, c0) = pair[0];
                let (t1, c1) = pair[1];
                if t <= t1 {
                    let span = (t1 - t0).max(f32::EPSILON);
                    return mix(c0, c1, (t - t0) / span);
                }
            }
            stops[stops.len() - 1].1
        }
    }
}

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: usize) {
    let segments = segments.max(3);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Soft halo: progressively larger, fainter copies of the rectangle
pub fn glow(out: &mut Vec<Vertex>, r: &Rect, color: [f32; 4], layers: u32, spread: f32) {
    for layer in (1..=layers).rev() {
        let t = layer as f32 / layers as f32;
        let alpha = 0.35 * (1.0 - t) + 0.05;
        rect(out, &r.inflate(spread * t), with_alpha(color, alpha));
    }
}
