//! One running game: state, input and frame timing
//!
//! Both entry points drive a `Session` once per animation frame and route the
//! events it returns.

use glam::Vec2;

use super::clock::{FixedStep, FpsCounter};
use super::input::InputState;
use crate::Settings;
use crate::audio::{AudioManager, AudioOutput};
use crate::consts::SIM_DT;
use crate::renderer::{Vertex, build_scene};
use crate::sim::{GameEvent, GameState, tick};

pub struct Session {
    pub state: GameState,
    pub input: InputState,
    clock: FixedStep,
    fps: FpsCounter,
}

impl Session {
    pub fn new(seed: u64, field: Vec2) -> Self {
        log::info!("Session started with seed: {}", seed);
        Self {
            state: GameState::new(seed, field),
            input: InputState::new(),
            clock: FixedStep::new(),
            fps: FpsCounter::new(),
        }
    }

    /// Carry persisted preferences into the game
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.state.muted = settings.muted;
    }

    /// Run the ticks owed for this frame; returns the events they produced
    pub fn frame(&mut self, dt: f32, now_ms: f64) -> Vec<GameEvent> {
        let steps = self.clock.advance(dt);
        for _ in 0..steps {
            let input = self.input.take_tick_input();
            tick(&mut self.state, &input, SIM_DT);
        }
        self.fps.record(now_ms);

        let events = self.state.take_events();
        for event in &events {
            log::debug!("{:?}", event);
        }
        events
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Vertices for the current state
    pub fn scene(&self, settings: &Settings) -> Vec<Vertex> {
        let fps = settings.show_fps.then(|| self.fps());
        build_scene(&self.state, settings, fps)
    }
}

/// Send events to audio and persist mute changes; true when the player asked to quit
pub fn route_events<O: AudioOutput>(
    events: &[GameEvent],
    audio: &mut AudioManager<O>,
    settings: &mut Settings,
) -> bool {
    let mut quit = false;
    for event in events {
        audio.dispatch(event);
        match event {
            GameEvent::MuteToggled(muted) => {
                settings.muted = *muted;
                settings.save();
            }
            GameEvent::QuitRequested => quit = true,
            _ => {}
        }
    }
    quit
}
