//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{bounce_off_walls, paddle_hit};
use super::effects::{ScorePopup, TrailSegment, update_effects};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::ui::MenuButton;
use crate::wrap_unit;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Cursor moved to this field position
    pub pointer: Option<Vec2>,
    /// Primary click at this field position
    pub click: Option<Vec2>,
    /// Enter: start from the menu, restart from the end screens
    pub confirm: bool,
    /// Pause toggle
    pub pause: bool,
    /// Mute toggle
    pub mute: bool,
    /// Leave the game
    pub quit: bool,
    /// Skip to next level (debug/testing)
    pub skip_level: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // The pause veil shimmers in every phase
    state.overlay_offset = wrap_unit(state.overlay_offset + OVERLAY_DRIFT * dt);

    if let Some(pointer) = input.pointer {
        state.hovered = MenuButton::at(state.field, pointer);
    }

    if input.mute {
        state.muted = !state.muted;
        state.events.push(GameEvent::MuteToggled(state.muted));
    }

    if input.quit {
        state.events.push(GameEvent::QuitRequested);
    }

    // Idle mode keeps the attract loop going through menus and end screens
    let confirm = input.confirm
        || (input.idle_mode
            && matches!(
                state.phase,
                GamePhase::MainMenu | GamePhase::GameOver | GamePhase::Won
            ));

    if confirm {
        match state.phase {
            GamePhase::MainMenu => state.start_run(),
            GamePhase::GameOver | GamePhase::Won => state.reset_to_menu(),
            _ => {}
        }
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    if state.phase == GamePhase::Paused {
        if let Some(click) = input.click {
            match MenuButton::at(state.field, click) {
                Some(MenuButton::Resume) => {
                    state.phase = GamePhase::Playing;
                    state.events.push(GameEvent::Resumed);
                }
                Some(MenuButton::MainMenu) => state.reset_to_menu(),
                Some(MenuButton::Quit) => state.events.push(GameEvent::QuitRequested),
                None => {}
            }
        }
    }

    // Menus, pause and end screens freeze the world
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let field = state.field;

    // Debug: skip to next level (progression below picks it up)
    if input.skip_level {
        state.bricks.clear();
    }

    // Paddle
    if input.idle_mode {
        steer_idle(state, dt);
    } else {
        if let Some(pointer) = input.pointer {
            state.paddle.steer_toward(pointer.x, field.x);
        }
        if input.left {
            state.paddle.move_by(-PADDLE_KEY_SPEED * dt, field.x);
        }
        if input.right {
            state.paddle.move_by(PADDLE_KEY_SPEED * dt, field.x);
        }
    }

    // Ball
    state.ball.pos += state.ball.vel * dt;
    let (vel, _wall) = bounce_off_walls(state.ball.pos, state.ball.vel, state.ball.radius, field);
    state.ball.vel = vel;

    if let Some(hit) = paddle_hit(state.ball.pos, state.ball.radius, &state.paddle) {
        state.ball.vel.y = -state.ball.vel.y.abs();
        state.ball.vel.x = hit * BALL_ENGLISH;
        state.events.push(GameEvent::PaddleHit);
    }

    // First brick hit wins; at most one brick breaks per tick
    if let Some((row, col, rect)) = state.bricks.first_hit(state.ball.pos, state.ball.radius, field.x) {
        state.bricks.remove(row, col);
        state.ball.vel.y = -state.ball.vel.y;
        state.score += BRICK_POINTS;

        let center = rect.center();
        state.push_particles(center, PARTICLES_PER_BRICK);
        state.popups.push(ScorePopup::new(center, BRICK_POINTS));
        state.events.push(GameEvent::BrickBroken {
            row,
            col,
            points: BRICK_POINTS,
        });
    }

    // Effects
    let segment = TrailSegment::spawn(state.ball.pos, state.ball.radius, &mut state.rng);
    state.trail.push(segment);
    update_effects(&mut state.trail, dt);
    update_effects(&mut state.particles, dt);
    update_effects(&mut state.popups, dt);

    // Ball lost
    if state.ball.is_below(field) {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver);
            log::info!("Game over with score {} on level {}", state.score, state.level);
            return;
        }
        state.ball.reset(field, &mut state.rng);
        state.events.push(GameEvent::BallLost {
            lives_left: state.lives,
        });
    }

    // Level progression
    if state.bricks.is_cleared() {
        if state.level >= MAX_LEVEL {
            state.phase = GamePhase::Won;
            state.events.push(GameEvent::GameWon);
            log::info!("All levels cleared with score {}", state.score);
            return;
        }
        state.level += 1;
        state.load_level();
        state.ball.reset(field, &mut state.rng);
        state.events.push(GameEvent::LevelCleared {
            next_level: state.level,
        });
        log::info!("Level cleared, advancing to level {}", state.level);
    }

    state.hue_angle = (state.hue_angle + HUE_SPEED * dt).rem_euclid(360.0);

    for star in &mut state.stars {
        star.update(dt, field, &mut state.rng);
    }
}

/// Demo AI: chase the ball with a slow wandering offset
fn steer_idle(state: &mut GameState, dt: f32) {
    // Oscillating offset so the ball leaves the paddle at varied angles.
    // Stays well inside half a paddle so the ball is never missed.
    let time_factor = state.time_ticks as f32 * 0.02;
    let offset = (time_factor.sin() * 0.25 + (time_factor * 0.7).sin() * 0.1) * state.paddle.width;

    let target = state.ball.pos.x + offset;

    let max_step = PADDLE_KEY_SPEED * dt;
    let delta = (target - state.paddle.x).clamp(-max_step, max_step);
    state.paddle.move_by(delta, state.field.x);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_field;
    use crate::sim::BrickGrid;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, default_field());
        tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
            SIM_DT,
        );
        state.take_events();
        state
    }

    fn step(state: &mut GameState) {
        tick(state, &TickInput::default(), SIM_DT);
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(12345, default_field());
        let ball_before = state.ball.pos;

        // Main menu - world frozen
        step(&mut state);
        assert_eq!(state.phase, GamePhase::MainMenu);
        assert_eq!(state.ball.pos, ball_before);
        assert_eq!(state.time_ticks, 0);

        let input = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.take_events().contains(&GameEvent::GameStarted));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing_state();

        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // World is frozen while paused
        let ball = state.ball.pos;
        step(&mut state);
        assert_eq!(state.ball.pos, ball);

        // Unpause
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.take_events(), vec![GameEvent::Paused, GameEvent::Resumed]);
    }

    #[test]
    fn test_pause_ignored_on_menu() {
        let mut state = GameState::new(1, default_field());
        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::MainMenu);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_overlay_drifts_while_paused() {
        let mut state = playing_state();
        state.phase = GamePhase::Paused;
        let before = state.overlay_offset;
        step(&mut state);
        assert!(state.overlay_offset > before);
    }

    #[test]
    fn test_pause_menu_clicks() {
        let field = default_field();

        let mut state = playing_state();
        state.phase = GamePhase::Paused;
        let resume = MenuButton::Resume.rect(field).center();
        tick(
            &mut state,
            &TickInput {
                click: Some(resume),
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::Playing);

        let mut state = playing_state();
        state.score = 50;
        state.phase = GamePhase::Paused;
        let menu = MenuButton::MainMenu.rect(field).center();
        tick(
            &mut state,
            &TickInput {
                click: Some(menu),
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::MainMenu);
        assert_eq!(state.score, 0);

        let mut state = playing_state();
        state.phase = GamePhase::Paused;
        let quit = MenuButton::Quit.rect(field).center();
        tick(
            &mut state,
            &TickInput {
                click: Some(quit),
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.take_events(), vec![GameEvent::QuitRequested]);
    }

    #[test]
    fn test_click_ignored_while_playing() {
        let mut state = playing_state();
        let quit = MenuButton::Quit.rect(state.field).center();
        tick(
            &mut state,
            &TickInput {
                click: Some(quit),
                ..Default::default()
            },
            SIM_DT,
        );
        assert!(!state.take_events().contains(&GameEvent::QuitRequested));
    }

    #[test]
    fn test_hover_tracks_pointer_in_any_phase() {
        let mut state = GameState::new(1, default_field());
        let resume = MenuButton::Resume.rect(state.field).center();
        tick(
            &mut state,
            &TickInput {
                pointer: Some(resume),
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.hovered, Some(MenuButton::Resume));

        tick(
            &mut state,
            &TickInput {
                pointer: Some(Vec2::ZERO),
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.hovered, None);
    }

    #[test]
    fn test_mute_toggles_anywhere() {
        let mut state = GameState::new(1, default_field());
        let input = TickInput {
            mute: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.muted);
        tick(&mut state, &input, SIM_DT);
        assert!(!state.muted);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::MuteToggled(true), GameEvent::MuteToggled(false)]
        );
    }

    #[test]
    fn test_paddle_keys() {
        let mut state = playing_state();
        let start = state.paddle.x;
        tick(
            &mut state,
            &TickInput {
                left: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert!((state.paddle.x - (start - 6.0)).abs() < 1e-3);

        for _ in 0..1000 {
            tick(
                &mut state,
                &TickInput {
                    right: true,
                    ..Default::default()
                },
                SIM_DT,
            );
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert!(state.paddle.x <= state.field.x - state.paddle.width / 2.0);
    }

    #[test]
    fn test_pointer_steering() {
        let mut state = playing_state();
        let start = state.paddle.x;
        tick(
            &mut state,
            &TickInput {
                pointer: Some(Vec2::new(start + 100.0, 400.0)),
                ..Default::default()
            },
            SIM_DT,
        );
        assert!((state.paddle.x - (start + 20.0)).abs() < 1e-3);
    }

    #[test]
    fn test_paddle_bounce() {
        let mut state = playing_state();
        let paddle_x = state.paddle.x;
        state.ball.pos = Vec2::new(paddle_x + 25.0, state.paddle.y - 12.0);
        state.ball.vel = Vec2::new(0.0, BALL_SPEED);

        step(&mut state);

        assert!(state.ball.vel.y < 0.0);
        assert!((state.ball.vel.x - 0.5 * BALL_ENGLISH).abs() < 1e-3);
        assert!(state.take_events().contains(&GameEvent::PaddleHit));
    }

    #[test]
    fn test_wall_bounce_in_tick() {
        let mut state = playing_state();
        state.ball.pos = Vec2::new(12.0, 400.0);
        state.ball.vel = Vec2::new(-BALL_SPEED, -BALL_SPEED);
        step(&mut state);
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_brick_break() {
        let mut state = playing_state();
        // Bird layout, brick (0, 2) spans x 530..600, y 50..70
        state.ball.pos = Vec2::new(565.0, 80.0);
        state.ball.vel = Vec2::new(0.0, -BALL_SPEED);

        step(&mut state);

        assert!(!state.bricks.is_active(0, 2));
        assert_eq!(state.bricks.remaining(), 11);
        assert_eq!(state.score, BRICK_POINTS);
        assert!(state.ball.vel.y > 0.0);
        assert_eq!(state.popups.len(), 1);
        assert_eq!(state.popups[0].value, BRICK_POINTS);
        assert!(!state.particles.is_empty() && state.particles.len() <= PARTICLES_PER_BRICK);
        assert!(state.take_events().contains(&GameEvent::BrickBroken {
            row: 0,
            col: 2,
            points: BRICK_POINTS
        }));
    }

    #[test]
    fn test_one_brick_per_tick() {
        let mut state = playing_state();
        // Overlaps both (1, 1) and (2, 0)
        state.ball.pos = Vec2::new(452.0, 97.0);
        state.ball.vel = Vec2::ZERO;

        step(&mut state);

        assert!(!state.bricks.is_active(1, 1));
        assert!(state.bricks.is_active(2, 0));
        assert_eq!(state.score, BRICK_POINTS);
    }

    #[test]
    fn test_ball_lost() {
        let mut state = playing_state();
        state.ball.pos = Vec2::new(640.0, state.field.y + 20.0);
        state.ball.vel = Vec2::new(0.0, BALL_SPEED);

        step(&mut state);

        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.pos.y, state.field.y - BALL_SPAWN_OFFSET);
        assert!(state.take_events().contains(&GameEvent::BallLost {
            lives_left: START_LIVES - 1
        }));
    }

    #[test]
    fn test_game_over_freezes() {
        let mut state = playing_state();
        state.lives = 1;
        state.ball.pos = Vec2::new(640.0, state.field.y + 20.0);
        state.ball.vel = Vec2::new(0.0, BALL_SPEED);

        step(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.take_events(), vec![GameEvent::GameOver]);

        // Nothing more happens until Enter
        for _ in 0..10 {
            step(&mut state);
        }
        assert_eq!(state.lives, 0);
        assert!(state.events.is_empty());

        tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::MainMenu);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.take_events(), vec![GameEvent::ReturnedToMenu]);
    }

    #[test]
    fn test_level_progression() {
        let mut state = playing_state();
        state.bricks = BrickGrid::from_pattern(&["#"]);
        // Single centred brick spans x 605..675, y 50..70
        state.ball.pos = Vec2::new(640.0, 80.0);
        state.ball.vel = Vec2::new(0.0, -BALL_SPEED);

        step(&mut state);

        assert_eq!(state.level, 2);
        assert_eq!(state.bricks, BrickGrid::for_level(2));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.take_events().contains(&GameEvent::LevelCleared { next_level: 2 }));
    }

    #[test]
    fn test_win_after_last_level() {
        let mut state = playing_state();
        state.level = MAX_LEVEL;
        state.bricks = BrickGrid::from_pattern(&["#"]);
        state.ball.pos = Vec2::new(640.0, 80.0);
        state.ball.vel = Vec2::new(0.0, -BALL_SPEED);

        step(&mut state);

        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.level, MAX_LEVEL);
        assert!(state.take_events().contains(&GameEvent::GameWon));

        // Frozen until Enter
        let score = state.score;
        step(&mut state);
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_skip_level() {
        let mut state = playing_state();
        tick(
            &mut state,
            &TickInput {
                skip_level: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_idle_mode_starts_and_plays() {
        let mut state = GameState::new(777, default_field());
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);

        // The demo AI should keep the ball alive for a while
        for _ in 0..600 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_hue_cycles() {
        let mut state = playing_state();
        state.hue_angle = 359.5;
        step(&mut state);
        assert!(state.hue_angle < 1.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, default_field());
        let mut state2 = GameState::new(99999, default_field());

        let inputs = [
            TickInput {
                confirm: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                pointer: Some(Vec2::new(300.0, 700.0)),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.paddle, state2.paddle);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.trail.len(), state2.trail.len());
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), proptest::option::of(0.0f32..1280.0)).prop_map(
            |(left, right, pointer_x)| TickInput {
                left,
                right,
                pointer: pointer_x.map(|x| Vec2::new(x, 700.0)),
                ..Default::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_paddle_and_ball_stay_in_field(
            seed in 0u64..10_000,
            inputs in proptest::collection::vec(arb_input(), 1..300),
        ) {
            let mut state = GameState::new(seed, default_field());
            state.start_run();
            let half = state.paddle.width / 2.0;
            // One tick of the fastest horizontal motion
            let slack = BALL_ENGLISH * SIM_DT;

            for input in &inputs {
                tick(&mut state, input, SIM_DT);
                prop_assert!(state.paddle.x >= half - 1e-3);
                prop_assert!(state.paddle.x <= state.field.x - half + 1e-3);
                prop_assert!(state.ball.pos.x >= -slack);
                prop_assert!(state.ball.pos.x <= state.field.x + slack);
            }
        }
    }
}
