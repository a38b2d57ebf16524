//! rodio backend for desktop builds

use std::time::Duration;

use rodio::source::{SineWave, Source, from_iter};
use rodio::{OutputStream, OutputStreamHandle, Sink};

use super::{AudioOutput, MUSIC_NOTES, SoundEffect};

/// Build a tone sequence at `amplitude`
fn tones(notes: &'static [(f32, f32)], amplitude: f32) -> impl Source<Item = f32> + Send + 'static {
    from_iter(notes.iter().map(move |&(freq, secs)| {
        SineWave::new(freq)
            .take_duration(Duration::from_secs_f32(secs))
            .amplify(amplitude)
    }))
}

pub struct RodioOutput {
    // Dropping the stream silences every sink
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl RodioOutput {
    /// Open the default output device; `None` (with a warning) when there is none
    pub fn try_new() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                log::info!("Audio output opened");
                Some(Self {
                    _stream: stream,
                    handle,
                    music: None,
                })
            }
            Err(e) => {
                log::warn!("No audio output device ({}), audio disabled", e);
                None
            }
        }
    }
}

impl AudioOutput for RodioOutput {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        let source = tones(effect.notes(), volume * 0.3);
        if let Err(e) = self.handle.play_raw(source) {
            log::warn!("Failed to play {:?}: {}", effect, e);
        }
    }

    fn start_music(&mut self, volume: f32) {
        if let Some(sink) = &self.music {
            sink.set_volume(volume);
            sink.play();
            return;
        }

        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(volume);
                sink.append(tones(MUSIC_NOTES, 0.15).repeat_infinite());
                self.music = Some(sink);
            }
            Err(e) => log::warn!("Failed to start music: {}", e),
        }
    }

    fn pause_music(&mut self) {
        if let Some(sink) = &self.music {
            sink.pause();
        }
    }

    fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }
}

/// Audio disabled: every call is a no-op
#[derive(Debug, Default)]
pub struct SilentOutput;

impl AudioOutput for SilentOutput {
    fn play_effect(&mut self, _effect: SoundEffect, _volume: f32) {}
    fn start_music(&mut self, _volume: f32) {}
    fn pause_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Whatever the machine offers
pub enum NativeOutput {
    Rodio(RodioOutput),
    Silent(SilentOutput),
}

impl NativeOutput {
    pub fn open() -> Self {
        match RodioOutput::try_new() {
            Some(output) => NativeOutput::Rodio(output),
            None => NativeOutput::Silent(SilentOutput),
        }
    }

    fn inner(&mut self) -> &mut dyn AudioOutput {
        match self {
            NativeOutput::Rodio(output) => output,
            NativeOutput::Silent(output) => output,
        }
    }
}

impl AudioOutput for NativeOutput {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        self.inner().play_effect(effect, volume);
    }
    fn start_music(&mut self, volume: f32) {
        self.inner().start_music(volume);
    }
    fn pause_music(&mut self) {
        self.inner().pause_music();
    }
    fn stop_music(&mut self) {
        self.inner().stop_music();
    }
}
