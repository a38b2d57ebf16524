//! Scene building: turns the game state into a triangle list
//!
//! Layers are emitted back to front in field coordinates; the pipeline maps
//! them to the screen.

use glam::Vec2;

use super::color::{darker, hsb, lighter, with_alpha};
use super::font::{text, text_centered, text_height};
use super::shapes::{circle, glow, rect, vertical_gradient};
use super::vertex::{Vertex, colors};
use crate::Settings;
use crate::sim::{GamePhase, GameState, Rect};
use crate::ui::MenuButton;
use crate::wrap_unit;

const TITLE_SCALE: f32 = 6.0;
const SUBTITLE_SCALE: f32 = 3.0;
const HUD_SCALE: f32 = 2.5;
const POPUP_SCALE: f32 = 2.0;
const PAUSED_SCALE: f32 = 5.0;
const BUTTON_LABEL_SCALE: f32 = 3.0;

/// Particle sparks are small fixed discs
const PARTICLE_SIZE: f32 = 5.0;

/// Build every vertex for one frame
pub fn build_scene(state: &GameState, settings: &Settings, fps: Option<u32>) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(8192);
    let field = state.field;
    let segments = settings.quality.circle_segments();

    rect(&mut out, &Rect::new(0.0, 0.0, field.x, field.y), colors::BACKGROUND);
    if settings.effective_starfield() {
        draw_stars(&mut out, state);
    }

    // Full-screen messages replace the playfield
    match state.phase {
        GamePhase::MainMenu => {
            draw_message(
                &mut out,
                field,
                "BRICK BREAKER",
                "PRESS ENTER TO START | M TO MUTE",
                colors::TEXT,
            );
            return out;
        }
        GamePhase::GameOver => {
            draw_message(&mut out, field, "GAME OVER", "PRESS ENTER TO RESTART", colors::GAME_OVER);
            return out;
        }
        GamePhase::Won => {
            draw_message(&mut out, field, "YOU WIN!", "PRESS ENTER TO RESTART", colors::WIN);
            return out;
        }
        GamePhase::Playing | GamePhase::Paused => {}
    }

    draw_bricks(&mut out, state);

    if settings.trails {
        for segment in state.trail.iter().rev().step_by(settings.trail_stride()) {
            let color = hsb(segment.hue, 1.0, 1.0, segment.alpha);
            circle(&mut out, segment.pos, segment.diameter / 2.0, color, segments);
        }
    }

    let paddle = state.paddle.rect();
    glow(&mut out, &paddle, colors::PADDLE_GLOW, 5, 20.0);
    rect(&mut out, &paddle, colors::PADDLE);

    circle(&mut out, state.ball.pos, state.ball.radius, colors::BALL, segments);

    // Newest particles win when over the cap
    let cap = settings.max_particles();
    let skip = state.particles.len().saturating_sub(cap);
    for particle in state.particles.iter().skip(skip) {
        let half = PARTICLE_SIZE / 2.0;
        let color = hsb(particle.hue, 1.0, 1.0, particle.life);
        circle(&mut out, particle.pos + Vec2::splat(half), half, color, 6);
    }

    if settings.score_popups {
        for popup in &state.popups {
            let label = format!("+{}", popup.value);
            // Popup position is the text baseline
            let top = popup.pos.y - text_height(POPUP_SCALE);
            let color = with_alpha(colors::POPUP, popup.alpha);
            text(&mut out, &label, Vec2::new(popup.pos.x, top), POPUP_SCALE, color);
        }
    }

    draw_hud(&mut out, state, fps);

    if state.phase == GamePhase::Paused {
        draw_pause_menu(&mut out, state);
    }

    out
}

/// HUD line shown during play
pub fn hud_text(state: &GameState, fps: Option<u32>) -> String {
    let sound = if state.muted { "MUTED" } else { "SOUND ON" };
    let mut line = format!(
        "SCORE: {} | LIVES: {} | LEVEL: {} | {}",
        state.score, state.lives, state.level, sound
    );
    if let Some(fps) = fps {
        line.push_str(&format!(" | FPS: {}", fps));
    }
    line
}

fn draw_stars(out: &mut Vec<Vertex>, state: &GameState) {
    for star in &state.stars {
        // Star position is the top-left of its bounding box
        let r = star.diameter / 2.0;
        let color = hsb(60.0, 0.0, star.brightness, 1.0);
        circle(out, star.pos + Vec2::splat(r), r, color, 6);
    }
}

fn draw_message(out: &mut Vec<Vertex>, field: Vec2, title: &str, subtitle: &str, color: [f32; 4]) {
    let cx = field.x / 2.0;
    let cy = field.y / 2.0;
    text_centered(out, title, cx, cy - 80.0, TITLE_SCALE, color);
    text_centered(out, subtitle, cx, cy + 10.0, SUBTITLE_SCALE, color);
}

fn draw_bricks(out: &mut Vec<Vertex>, state: &GameState) {
    for (row, col, brick) in state.bricks.active(state.field.x) {
        let hue = state.hue_angle + col as f32 * 30.0 + row as f32 * 20.0;
        let base = hsb(hue, 1.0, 1.0, 1.0);
        vertical_gradient(out, &brick, &[(0.0, lighter(base)), (1.0, darker(base))]);
    }
}

fn draw_hud(out: &mut Vec<Vertex>, state: &GameState, fps: Option<u32>) {
    text(out, &hud_text(state, fps), Vec2::new(10.0, 10.0), HUD_SCALE, colors::TEXT);
}

/// Stops of the shimmering veil: dark at `offset`, lightest half a cycle later
pub fn veil_stops(offset: f32) -> Vec<(f32, [f32; 4])> {
    let shade = |t: f32| {
        let phase = wrap_unit(t - offset);
        let weight = 1.0 - (2.0 * phase - 1.0).abs();
        super::color::mix(colors::VEIL_DARK, colors::VEIL_INDIGO, weight)
    };

    let mut points = vec![0.0, 1.0, wrap_unit(offset), wrap_unit(offset + 0.5)];
    points.sort_by(f32::total_cmp);
    points.dedup();
    points.into_iter().map(|t| (t, shade(t))).collect()
}

fn draw_pause_menu(out: &mut Vec<Vertex>, state: &GameState) {
    let field = state.field;
    vertical_gradient(
        out,
        &Rect::new(0.0, 0.0, field.x, field.y),
        &veil_stops(state.overlay_offset),
    );

    text_centered(out, "PAUSED", field.x / 2.0, field.y / 2.0 - 140.0, PAUSED_SCALE, colors::TEXT);

    for button in MenuButton::ALL {
        let bounds = button.rect(field);
        let fill = if state.hovered == Some(button) {
            button.hover_color()
        } else {
            colors::BUTTON
        };
        rect(out, &bounds, fill);

        let top = bounds.center().y - text_height(BUTTON_LABEL_SCALE) / 2.0;
        text_centered(
            out,
            button.label(),
            bounds.center().x,
            top,
            BUTTON_LABEL_SCALE,
            colors::TEXT,
        );
    }
}
