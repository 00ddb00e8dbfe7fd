//! Declarative per-level wave configuration
//!
//! Each level is a list of [`SpawnSpec`]s plus a handful of level-wide
//! switches. This is configuration, not simulation logic: the level
//! controller turns these into live [`Target`](crate::sim::Target)s with
//! seeded jitter. Boss variants are data presets, not subtypes; [`TargetTier`]
//! exists only so the renderer can pick a sprite.

use serde::{Deserialize, Serialize};

/// Number of regular levels in the campaign
pub const LEVEL_COUNT: usize = 3;

/// Sprite-selection tag. Has no effect on simulation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetTier {
    Grunt,
    Heavy,
    Tank,
    Boxer,
    Boss,
    EggBoss,
}

impl TargetTier {
    /// Asset name the renderer should use for this tier
    pub fn sprite(&self) -> &'static str {
        match self {
            TargetTier::Grunt => "soldier1",
            TargetTier::Heavy => "soldier2",
            TargetTier::Tank => "soldier3",
            TargetTier::Boxer => "boxer",
            TargetTier::Boss => "boss",
            TargetTier::EggBoss => "boss_easter_egg",
        }
    }
}

/// Vertical containment applied to shooter-tier (`can_shoot`) enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShooterClamp {
    /// Soft elastic bounce off a floor at `shooter_floor_frac` of field height
    SoftFloor,
    /// Hard clamp into the top third of the field (easter-egg boss)
    TopThird,
}

/// One enemy to spawn, as pure data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSpec {
    pub tier: TargetTier,
    /// Horizontal spawn slot as a fraction of field width
    pub x_frac: f32,
    /// Vertical spawn position as a fraction of field height
    pub y_frac: f32,
    /// Uniform vertical jitter applied at spawn (px, +/-)
    pub y_jitter: f32,
    pub hp: i32,
    pub radius: f32,
    pub seeks_player: bool,
    /// Contact damage in full lives; the player loses `round(touch_damage * 2)`
    /// half-lives per touch
    pub touch_damage: f32,
    pub can_shoot: bool,
    /// Spawn-protection window (ms); 0 = none
    pub invincible_ms: f64,
    /// Ranged-attack cooldown (ms); inert unless `can_shoot`
    pub shot_cooldown_ms: f64,
    /// Random multiplier range applied to the base spawn velocity
    pub vel_scale: [f32; 2],
    /// Fixed per-axis factors applied after `vel_scale` (tank/boss presets)
    pub vx_factor: f32,
    pub vy_factor: f32,
    /// Steering strength range (px/s^2); sampled per enemy when seeking
    pub steer_range: [f32; 2],
}

impl Default for SpawnSpec {
    fn default() -> Self {
        Self {
            tier: TargetTier::Grunt,
            x_frac: 0.5,
            y_frac: 1.0 / 3.0,
            y_jitter: 30.0,
            hp: 1,
            radius: 20.0,
            seeks_player: false,
            touch_damage: 0.0,
            can_shoot: false,
            invincible_ms: 0.0,
            shot_cooldown_ms: 2200.0,
            vel_scale: [1.0, 1.0],
            vx_factor: 1.0,
            vy_factor: 1.0,
            steer_range: [30.0, 50.0],
        }
    }
}

/// Level-wide configuration for one wave
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSpec {
    pub label: String,
    pub spawns: Vec<SpawnSpec>,
    /// Whether the combo/special-attack system is active
    pub combo_enabled: bool,
    /// Half-lives lost to an enemy bullet
    pub enemy_bullet_damage: i32,
    /// Remove dead targets from the list immediately instead of filtering by
    /// `alive`
    pub prune_dead: bool,
    pub shooter_clamp: ShooterClamp,
}

impl LevelSpec {
    fn base(label: &str, spawns: Vec<SpawnSpec>) -> Self {
        Self {
            label: label.to_owned(),
            spawns,
            combo_enabled: false,
            enemy_bullet_damage: 2,
            prune_dead: false,
            shooter_clamp: ShooterClamp::SoftFloor,
        }
    }
}

/// Wave configuration for a regular level. Campaign length is policed by the
/// progression tracker; indices past the end clamp to the final phase.
pub fn level_spec(index: usize) -> LevelSpec {
    match index {
        0 => phase_one(),
        1 => phase_two(),
        _ => phase_three(),
    }
}

/// Three grunts and two heavies, evenly slotted across the field
fn phase_one() -> LevelSpec {
    let mut spawns = Vec::new();
    for i in 0..3 {
        spawns.push(SpawnSpec {
            tier: TargetTier::Grunt,
            x_frac: (i + 1) as f32 / 6.0,
            hp: 1,
            radius: 28.0,
            seeks_player: true,
            touch_damage: 0.5,
            vel_scale: [0.35, 0.55],
            ..SpawnSpec::default()
        });
    }
    for i in 3..5 {
        spawns.push(SpawnSpec {
            tier: TargetTier::Heavy,
            x_frac: (i + 1) as f32 / 6.0,
            hp: 2,
            radius: 40.0,
            seeks_player: true,
            touch_damage: 0.5,
            vel_scale: [0.35, 0.55],
            ..SpawnSpec::default()
        });
    }
    LevelSpec::base("PHASE 1", spawns)
}

/// Four heavies plus one shooting tank
fn phase_two() -> LevelSpec {
    let mut spawns = Vec::new();
    for i in 0..4 {
        spawns.push(SpawnSpec {
            tier: TargetTier::Heavy,
            x_frac: (i + 1) as f32 / 6.0,
            hp: 2,
            radius: 36.0,
            seeks_player: true,
            touch_damage: 0.5,
            vel_scale: [0.35, 0.55],
            ..SpawnSpec::default()
        });
    }
    spawns.push(SpawnSpec {
        tier: TargetTier::Tank,
        x_frac: 5.0 / 6.0,
        hp: 4,
        radius: 70.0,
        can_shoot: true,
        // Tank drifts down slowly; the soft floor keeps it in the upper field
        vy_factor: 0.5,
        ..SpawnSpec::default()
    });
    LevelSpec::base("PHASE 2", spawns)
}

/// A row of boxers over a row of bosses; combo system active
fn phase_three() -> LevelSpec {
    let mut spawns = Vec::new();
    for i in 0..6 {
        spawns.push(SpawnSpec {
            tier: TargetTier::Boxer,
            x_frac: (i + 1) as f32 / 7.0,
            y_frac: 0.25,
            y_jitter: 20.0,
            hp: 10,
            radius: 40.0,
            seeks_player: true,
            touch_damage: 0.5,
            invincible_ms: 2500.0,
            vel_scale: [0.35, 0.55],
            ..SpawnSpec::default()
        });
    }
    for i in 0..3 {
        spawns.push(SpawnSpec {
            tier: TargetTier::Boss,
            x_frac: (i + 1) as f32 / 4.0,
            y_frac: 0.4,
            y_jitter: 20.0,
            hp: 25,
            radius: 75.0,
            can_shoot: true,
            invincible_ms: 2500.0,
            vx_factor: 1.5,
            vy_factor: 0.75,
            ..SpawnSpec::default()
        });
    }
    let mut spec = LevelSpec::base("PHASE 3", spawns);
    spec.combo_enabled = true;
    spec
}

/// The hidden boss wave: a single fast, seeking, shooting boss whose bullets
/// are lethal. Dead targets are pruned immediately in this wave.
pub fn easter_egg_spec() -> LevelSpec {
    let boss = SpawnSpec {
        tier: TargetTier::EggBoss,
        x_frac: 0.5,
        y_frac: 1.0 / 3.0,
        y_jitter: 0.0,
        hp: 50,
        radius: 60.0,
        seeks_player: true,
        can_shoot: true,
        shot_cooldown_ms: 800.0,
        vel_scale: [0.6, 0.9],
        steer_range: [50.0, 70.0],
        ..SpawnSpec::default()
    };
    let mut spec = LevelSpec::base("MYSTERY", vec![boss]);
    spec.enemy_bullet_damage = 6;
    spec.prune_dead = true;
    spec.shooter_clamp = ShooterClamp::TopThird;
    spec
}
