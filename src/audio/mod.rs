//! Sound effects and background music
//!
//! Procedurally generated tones, no external files needed. The simulation
//! reports `GameEvent`s; `AudioManager` turns them into calls on an
//! `AudioOutput` backend and owns the mute and music bookkeeping.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits the paddle or a brick
    Bounce,
    /// Last level cleared
    Win,
    /// Out of lives
    GameOver,
}

impl SoundEffect {
    /// Tone sequence as (frequency Hz, duration s)
    pub fn notes(&self) -> &'static [(f32, f32)] {
        match self {
            SoundEffect::Bounce => &[(520.0, 0.07)],
            SoundEffect::Win => &[(523.25, 0.12), (659.25, 0.12), (783.99, 0.12), (1046.5, 0.3)],
            SoundEffect::GameOver => &[(400.0, 0.2), (350.0, 0.2), (300.0, 0.2), (200.0, 0.4)],
        }
    }
}

/// Background music transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    Start,
    Stop,
}

/// Looping background phrase as (frequency Hz, duration s)
pub const MUSIC_NOTES: &[(f32, f32)] = &[
    (220.0, 0.25),
    (277.18, 0.25),
    (329.63, 0.25),
    (440.0, 0.25),
    (329.63, 0.25),
    (277.18, 0.25),
];

/// Effect triggered by an event, if any
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::PaddleHit | GameEvent::BrickBroken { .. } => Some(SoundEffect::Bounce),
        GameEvent::GameWon => Some(SoundEffect::Win),
        GameEvent::GameOver => Some(SoundEffect::GameOver),
        _ => None,
    }
}

/// Music change triggered by an event, if any
pub fn music_for(event: &GameEvent) -> Option<MusicCue> {
    match event {
        GameEvent::GameStarted => Some(MusicCue::Start),
        GameEvent::GameWon | GameEvent::GameOver | GameEvent::ReturnedToMenu => {
            Some(MusicCue::Stop)
        }
        _ => None,
    }
}

/// A place sounds can be sent
pub trait AudioOutput {
    /// Fire-and-forget effect at `volume` (0.0 - 1.0)
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    /// Start the music loop, or resume it if paused
    fn start_music(&mut self, volume: f32);
    /// Pause the music loop, keeping its position
    fn pause_music(&mut self);
    /// Stop and discard the music loop
    fn stop_music(&mut self);
}

/// Audio manager for the game
pub struct AudioManager<O: AudioOutput> {
    output: O,
    muted: bool,
    /// Music should be audible when not muted
    music_wanted: bool,
    sfx_volume: f32,
    music_volume: f32,
}

impl<O: AudioOutput> AudioManager<O> {
    pub fn new(output: O, settings: &Settings) -> Self {
        Self {
            output,
            muted: settings.muted,
            music_wanted: false,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        self.muted = muted;
        if muted {
            self.output.pause_music();
        } else if self.music_wanted {
            self.output.start_music(self.music_volume);
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted || self.sfx_volume <= 0.0 {
            return;
        }
        self.output.play_effect(effect, self.sfx_volume);
    }

    pub fn music(&mut self, cue: MusicCue) {
        match cue {
            MusicCue::Start => {
                self.music_wanted = true;
                if !self.muted {
                    self.output.start_music(self.music_volume);
                }
            }
            MusicCue::Stop => {
                self.music_wanted = false;
                self.output.stop_music();
            }
        }
    }

    /// React to one simulation event
    pub fn dispatch(&mut self, event: &GameEvent) {
        if let GameEvent::MuteToggled(muted) = event {
            self.set_muted(*muted);
        }
        // Stop the loop before the jingle so they never overlap
        if let Some(cue) = music_for(event) {
            self.music(cue);
        }
        if let Some(effect) = sound_for(event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Effect(SoundEffect),
        Start,
        Pause,
        Stop,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl AudioOutput for Recorder {
        fn play_effect(&mut self, effect: SoundEffect, _volume: f32) {
            self.calls.push(Call::Effect(effect));
        }
        fn start_music(&mut self, _volume: f32) {
            self.calls.push(Call::Start);
        }
        fn pause_music(&mut self) {
            self.calls.push(Call::Pause);
        }
        fn stop_music(&mut self) {
            self.calls.push(Call::Stop);
        }
    }

    fn manager() -> AudioManager<Recorder> {
        AudioManager::new(Recorder::default(), &Settings::default())
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(sound_for(&GameEvent::PaddleHit), Some(SoundEffect::Bounce));
        assert_eq!(
            sound_for(&GameEvent::BrickBroken { row: 0, col: 0, points: 10 }),
            Some(SoundEffect::Bounce)
        );
        assert_eq!(sound_for(&GameEvent::Paused), None);
        assert_eq!(music_for(&GameEvent::GameStarted), Some(MusicCue::Start));
        assert_eq!(music_for(&GameEvent::ReturnedToMenu), Some(MusicCue::Stop));
        assert_eq!(music_for(&GameEvent::BallLost { lives_left: 2 }), None);
    }

    #[test]
    fn test_game_over_stops_music_then_plays_jingle() {
        let mut audio = manager();
        audio.dispatch(&GameEvent::GameStarted);
        audio.dispatch(&GameEvent::GameOver);
        assert_eq!(
            audio.output().calls,
            vec![Call::Start, Call::Stop, Call::Effect(SoundEffect::GameOver)]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = manager();
        audio.dispatch(&GameEvent::MuteToggled(true));
        audio.dispatch(&GameEvent::PaddleHit);
        audio.dispatch(&GameEvent::GameWon);
        assert!(!audio.output().calls.iter().any(|c| matches!(c, Call::Effect(_))));
    }

    #[test]
    fn test_unmute_resumes_only_wanted_music() {
        let mut audio = manager();
        audio.dispatch(&GameEvent::GameStarted);
        audio.dispatch(&GameEvent::MuteToggled(true));
        audio.dispatch(&GameEvent::MuteToggled(false));
        assert_eq!(audio.output().calls, vec![Call::Start, Call::Pause, Call::Start]);

        // On the menu there is no music to resume
        let mut audio = manager();
        audio.dispatch(&GameEvent::MuteToggled(true));
        audio.dispatch(&GameEvent::MuteToggled(false));
        assert_eq!(audio.output().calls, vec![Call::Pause]);
    }

    #[test]
    fn test_start_while_muted_waits_for_unmute() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Recorder::default(), &settings);
        assert!(audio.is_muted());
        audio.dispatch(&GameEvent::GameStarted);
        assert!(audio.output().calls.is_empty());
        audio.dispatch(&GameEvent::MuteToggled(false));
        assert_eq!(audio.output().calls, vec![Call::Start]);
    }

    #[test]
    fn test_effect_notes_are_audible() {
        for effect in [SoundEffect::Bounce, SoundEffect::Win, SoundEffect::GameOver] {
            let notes = effect.notes();
            assert!(!notes.is_empty());
            assert!(notes.iter().all(|(f, d)| *f > 20.0 && *d > 0.0));
        }
    }
}
