//! Simulation events for the presentation shell
//!
//! The core pushes these as they happen; the shell drains them once per
//! rendered frame and maps them to sounds, screen flashes, or HUD text.
//! Dropping an event can never change a simulation outcome.

use glam::Vec2;

use crate::presets::TargetTier;

/// One frame's worth of fire-and-forget cues
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Player fired a round (ammo already decremented)
    ShotFired,
    /// Player pulled the trigger on an empty magazine
    DryFire,
    ReloadStarted,
    ReloadFinished,
    /// Target took damage and survived (hit-flash cue)
    TargetHit { tier: TargetTier },
    TargetDestroyed { tier: TargetTier },
    /// An enemy fired at the player
    EnemyShot { tier: TargetTier },
    /// Player took damage (any source)
    PlayerHit,
    /// Combo threshold reached; special shot available
    SpecialUnlocked,
    SpecialFired,
    /// Special projectile detonated on a target (explosion overlay)
    SpecialExplosion { pos: Vec2 },
    LevelStarted { index: usize },
    LevelCompleted { index: usize },
    EasterEggTriggered,
    EasterEggWon,
    EasterEggLost,
    FocusActivated,
    GameOver,
    Victory,
}
