//! Web Audio backend
//!
//! Effects are short oscillator sequences; the music loop is a soft drone.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioOutput, SoundEffect};

/// Oscillators of the running music drone
struct Drone {
    oscillators: Vec<OscillatorNode>,
    gain: GainNode,
}

pub struct WebAudioOutput {
    ctx: Option<AudioContext>,
    drone: Option<Drone>,
}

impl Default for WebAudioOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioOutput {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, drone: None }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn start_drone(ctx: &AudioContext, volume: f32) -> Option<Drone> {
        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value(volume * 0.08);
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        // Root and fifth, slightly detuned for movement
        let mut oscillators = Vec::new();
        for (freq, detune) in [(110.0, 0.0), (165.0, 4.0), (220.0, -3.0)] {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(OscillatorType::Triangle);
            osc.frequency().set_value(freq);
            osc.detune().set_value(detune);
            osc.connect_with_audio_node(&gain).ok()?;
            osc.start().ok()?;
            oscillators.push(osc);
        }

        Some(Drone { oscillators, gain })
    }
}

impl AudioOutput for WebAudioOutput {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        let osc_type = match effect {
            SoundEffect::Bounce => OscillatorType::Sine,
            SoundEffect::Win => OscillatorType::Triangle,
            SoundEffect::GameOver => OscillatorType::Sine,
        };

        let mut t = ctx.current_time();
        for &(freq, duration) in effect.notes() {
            let duration = duration as f64;
            if let Some((osc, gain)) = Self::create_osc(ctx, freq, osc_type) {
                gain.gain().set_value_at_time(volume * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + duration)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + duration + 0.05).ok();
            }
            t += duration;
        }
    }

    fn start_music(&mut self, volume: f32) {
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        if let Some(drone) = &self.drone {
            // Paused drones are just silenced
            drone.gain.gain().set_value(volume * 0.08);
            return;
        }
        self.drone = Self::start_drone(ctx, volume);
        if self.drone.is_none() {
            log::warn!("Failed to start music");
        }
    }

    fn pause_music(&mut self) {
        if let Some(drone) = &self.drone {
            drone.gain.gain().set_value(0.0);
        }
    }

    fn stop_music(&mut self) {
        if let Some(drone) = self.drone.take() {
            for osc in drone.oscillators {
                osc.stop().ok();
            }
            drone.gain.disconnect().ok();
        }
    }
}
