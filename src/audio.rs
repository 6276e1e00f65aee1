//! Audio cue collaborator.
//!
//! The trainer never synthesizes sound. It asks an [`AudioCues`]
//! implementation to play short cues and moves on without waiting.

use crate::config::Settings;
use crate::pitch::Pitch;

/// Sound cues the trainer asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Note(Pitch),
    Correct,
    Incorrect,
    LevelComplete,
}

/// Fire-and-forget audio sink
///
/// `volume` is already clamped to 0.0-1.0.
pub trait AudioCues {
    fn play_note(&mut self, pitch: &Pitch, volume: f32);
    fn play_correct(&mut self, volume: f32);
    fn play_incorrect(&mut self, volume: f32);
    fn play_level_complete(&mut self, volume: f32);
}

/// Applies the sound settings before forwarding cues
#[derive(Debug)]
pub struct GatedAudio<A> {
    inner: A,
    settings: Settings,
}

impl<A: AudioCues> GatedAudio<A> {
    pub fn new(inner: A, settings: Settings) -> Self {
        Self {
            inner,
            settings: settings.sanitized(),
        }
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn play(&mut self, cue: Cue) {
        if !self.settings.sound_effects {
            return;
        }
        let volume = self.settings.volume;
        match cue {
            Cue::Note(pitch) => self.inner.play_note(&pitch, volume),
            Cue::Correct => self.inner.play_correct(volume),
            Cue::Incorrect => self.inner.play_incorrect(volume),
            Cue::LevelComplete => self.inner.play_level_complete(volume),
        }
    }
}

/// Plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioCues for SilentAudio {
    fn play_note(&mut self, _pitch: &Pitch, _volume: f32) {}
    fn play_correct(&mut self, _volume: f32) {}
    fn play_incorrect(&mut self, _volume: f32) {}
    fn play_level_complete(&mut self, _volume: f32) {}
}

/// Writes cues to the log instead of a sound device
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioCues for LogAudio {
    fn play_note(&mut self, pitch: &Pitch, volume: f32) {
        log::debug!("cue: note {} at volume {:.2}", pitch, volume);
    }

    fn play_correct(&mut self, volume: f32) {
        log::debug!("cue: correct at volume {:.2}", volume);
    }

    fn play_incorrect(&mut self, volume: f32) {
        log::debug!("cue: incorrect at volume {:.2}", volume);
    }

    fn play_level_complete(&mut self, volume: f32) {
        log::debug!("cue: level complete at volume {:.2}", volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(Cue, f32)>);

    impl AudioCues for Recorder {
        fn play_note(&mut self, pitch: &Pitch, volume: f32) {
            self.0.push((Cue::Note(*pitch), volume));
        }
        fn play_correct(&mut self, volume: f32) {
            self.0.push((Cue::Correct, volume));
        }
        fn play_incorrect(&mut self, volume: f32) {
            self.0.push((Cue::Incorrect, volume));
        }
        fn play_level_complete(&mut self, volume: f32) {
            self.0.push((Cue::LevelComplete, volume));
        }
    }

    #[test]
    fn test_forwards_with_volume() {
        let settings = Settings {
            volume: 0.25,
            ..Settings::default()
        };
        let mut audio = GatedAudio::new(Recorder::default(), settings);
        audio.play(Cue::Correct);
        audio.play(Cue::Note("A4".parse().unwrap()));
        assert_eq!(
            audio.inner().0,
            vec![(Cue::Correct, 0.25), (Cue::Note("A4".parse().unwrap()), 0.25)]
        );
    }

    #[test]
    fn test_muted_when_sound_effects_off() {
        let mut audio = GatedAudio::new(Recorder::default(), Settings::default());
        audio.update_settings(Settings {
            sound_effects: false,
            ..Settings::default()
        });
        audio.play(Cue::LevelComplete);
        assert!(audio.inner().0.is_empty());
    }

    #[test]
    fn test_volume_clamped() {
        let settings = Settings {
            volume: 4.0,
            ..Settings::default()
        };
        let mut audio = GatedAudio::new(Recorder::default(), settings);
        audio.play(Cue::Incorrect);
        assert_eq!(audio.inner().0, vec![(Cue::Incorrect, 1.0)]);
    }
}
