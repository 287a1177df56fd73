//! Sound effect dispatch
//!
//! The simulation emits [`GameEvent`]s; the manager maps them to sound
//! handles and hands them to whatever backend the host plugs in.

use crate::assets::{SoundHandles, SoundId};
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Meteor hit the ground
    MeteorImpact,
    /// Player died
    GameOver,
    /// Boss defeated
    Win,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::MeteorImpact => Some(SoundEffect::MeteorImpact),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::Won => Some(SoundEffect::Win),
            GameEvent::BossAppeared => None,
        }
    }

    pub fn handle(self, sounds: &SoundHandles) -> SoundId {
        match self {
            SoundEffect::Jump => sounds.jump,
            SoundEffect::MeteorImpact => sounds.meteor_impact,
            SoundEffect::GameOver => sounds.game_over,
            SoundEffect::Win => sounds.win,
        }
    }
}

/// Host audio device
pub trait AudioBackend {
    /// Start playing a loaded sound at `gain` (0.0 - 1.0)
    fn play(&mut self, sound: SoundId, gain: f32);
    /// Silence everything currently playing
    fn stop_all(&mut self);
}

/// Backend that drops every request (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&mut self, _sound: SoundId, _gain: f32) {}
    fn stop_all(&mut self) {}
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    sounds: SoundHandles,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, sounds: SoundHandles) -> Self {
        Self {
            backend,
            sounds,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Pick up volume and mute from the player's settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::trace!("Playing {:?}", effect);
        self.backend.play(effect.handle(&self.sounds), vol);
    }

    /// React to one simulation event
    pub fn handle_event(&mut self, event: GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    pub fn stop_all(&mut self) {
        self.backend.stop_all();
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Remembers every request it receives
    #[derive(Default)]
    struct Recorder {
        played: Vec<(SoundId, f32)>,
        stops: usize,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, sound: SoundId, gain: f32) {
            self.played.push((sound, gain));
        }

        fn stop_all(&mut self) {
            self.stops += 1;
        }
    }

    fn manager() -> AudioManager<Recorder> {
        AudioManager::new(Recorder::default(), SoundHandles::default())
    }

    #[test]
    fn test_events_map_to_sounds() {
        let sounds = SoundHandles::default();
        let mut audio = manager();
        audio.handle_event(GameEvent::Jumped);
        audio.handle_event(GameEvent::BossAppeared);
        audio.handle_event(GameEvent::Won);

        let played: Vec<SoundId> = audio.backend().played.iter().map(|(id, _)| *id).collect();
        assert_eq!(played, vec![sounds.jump, sounds.win]);
    }

    #[test]
    fn test_mute_skips_backend() {
        let mut audio = manager();
        audio.set_muted(true);
        audio.play(SoundEffect::GameOver);
        assert!(audio.backend().played.is_empty());
    }

    #[test]
    fn test_volume_is_clamped_and_applied() {
        let mut audio = manager();
        audio.set_master_volume(2.0);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::MeteorImpact);
        assert_eq!(audio.backend().played[0].1, 0.5);
    }

    #[test]
    fn test_settings_drive_volume() {
        let mut audio = manager();
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        audio.apply_settings(&settings);
        audio.play(SoundEffect::Jump);
        assert!(audio.backend().played.is_empty());

        audio.stop_all();
        assert_eq!(audio.backend().stops, 1);
    }
}
