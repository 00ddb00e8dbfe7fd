//! Audio cue routing
//!
//! Maps simulation events to sound effects and forwards them to whatever
//! output backend the shell provides. The simulation never touches this;
//! the shell drains the event queue and feeds it through an [`AudioMixer`].

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Gunshot,
    /// Trigger pulled on an empty magazine
    DryClick,
    ReloadStart,
    ReloadDone,
    EnemyHit,
    EnemyDown,
    EnemyGunshot,
    PlayerGrunt,
    /// Special shot became available
    SpecialReady,
    SpecialShot,
    Explosion,
    LevelJingle,
    LevelClear,
    /// Hidden wave discovered
    SecretSting,
    FocusWhoosh,
    DefeatJingle,
    VictoryJingle,
}

/// Cue for a simulation event
pub fn sound_for(event: &GameEvent) -> SoundEffect {
    match event {
        GameEvent::ShotFired => SoundEffect::Gunshot,
        GameEvent::DryFire => SoundEffect::DryClick,
        GameEvent::ReloadStarted => SoundEffect::ReloadStart,
        GameEvent::ReloadFinished => SoundEffect::ReloadDone,
        GameEvent::TargetHit { .. } => SoundEffect::EnemyHit,
        GameEvent::TargetDestroyed { .. } => SoundEffect::EnemyDown,
        GameEvent::EnemyShot { .. } => SoundEffect::EnemyGunshot,
        GameEvent::PlayerHit => SoundEffect::PlayerGrunt,
        GameEvent::SpecialUnlocked => SoundEffect::SpecialReady,
        GameEvent::SpecialFired => SoundEffect::SpecialShot,
        GameEvent::SpecialExplosion { .. } => SoundEffect::Explosion,
        GameEvent::LevelStarted { .. } => SoundEffect::LevelJingle,
        GameEvent::LevelCompleted { .. } => SoundEffect::LevelClear,
        GameEvent::EasterEggTriggered => SoundEffect::SecretSting,
        GameEvent::EasterEggWon => SoundEffect::VictoryJingle,
        GameEvent::EasterEggLost => SoundEffect::DefeatJingle,
        GameEvent::FocusActivated => SoundEffect::FocusWhoosh,
        GameEvent::GameOver => SoundEffect::DefeatJingle,
        GameEvent::Victory => SoundEffect::VictoryJingle,
    }
}

/// Output backend. Implemented by the platform shell; a headless run uses
/// [`NullSink`].
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Volume and mute control in front of a sink
pub struct AudioMixer<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioMixer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, master_volume: 0.8, sfx_volume: 1.0, muted: false }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume * self.sfx_volume }
    }

    /// Route one frame's drained events to the sink
    pub fn handle(&mut self, events: &[GameEvent]) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        for event in events {
            self.sink.play(sound_for(event), vol);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::TargetTier;

    #[derive(Default)]
    struct RecordingSink {
        played: Vec<(SoundEffect, f32)>,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.played.push((effect, volume));
        }
    }

    #[test]
    fn test_combat_events_map_to_cues() {
        assert_eq!(sound_for(&GameEvent::ShotFired), SoundEffect::Gunshot);
        assert_eq!(
            sound_for(&GameEvent::TargetDestroyed { tier: TargetTier::Boss }),
            SoundEffect::EnemyDown
        );
        assert_eq!(sound_for(&GameEvent::EasterEggTriggered), SoundEffect::SecretSting);
        assert_eq!(sound_for(&GameEvent::GameOver), SoundEffect::DefeatJingle);
    }

    #[test]
    fn test_mixer_applies_volume() {
        let mut mixer = AudioMixer::new(RecordingSink::default());
        mixer.set_master_volume(0.5);
        mixer.set_sfx_volume(0.5);
        mixer.handle(&[GameEvent::ShotFired, GameEvent::PlayerHit]);
        assert_eq!(mixer.sink.played.len(), 2);
        assert!((mixer.sink.played[0].1 - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_mixer_mute_silences_everything() {
        let mut mixer = AudioMixer::new(RecordingSink::default());
        mixer.set_muted(true);
        mixer.handle(&[GameEvent::ShotFired]);
        assert!(mixer.sink.played.is_empty());
    }
}
