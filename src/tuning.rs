//! Data-driven game balance
//!
//! Every gameplay number that a designer might want to touch lives here,
//! with defaults matching the shipped levels. The whole struct deserializes
//! from JSON so balance passes don't need a recompile.

use serde::{Deserialize, Serialize};

/// Player avatar tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Horizontal movement speed (px/s)
    pub move_speed: f32,
    /// Starting and maximum health, in half-life units (2 = one heart)
    pub max_half_lives: i32,
    /// Magazine size
    pub max_ammo: u32,
    /// Full reload duration (seconds)
    pub reload_secs: f32,
    /// Hit-flash display duration (seconds)
    pub hit_flash_secs: f32,
    /// Sprite footprint (px); the hit circle radius derives from this
    pub sprite_size: f32,
}

impl PlayerTuning {
    /// Hit circle approximated from the sprite bounding box
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.sprite_size / 4.0
    }
}

/// Projectile tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileTuning {
    /// Player bullet speed (px/s)
    pub player_speed: f32,
    /// Enemy bullet speed (px/s)
    pub enemy_speed: f32,
    /// Bullet hit radius (px)
    pub radius: f32,
}

/// Combo / special-attack tuning (combo-enabled levels only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboTuning {
    /// Consecutive boss-tier hits required to unlock the special shot
    pub threshold: u32,
}

/// Slow-motion focus tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTuning {
    pub enabled: bool,
    /// Multiplier applied to the level-update dt while active
    pub time_scale: f32,
    /// Active duration (seconds)
    pub duration_secs: f32,
}

/// Enemy behavior tuning shared across levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTuning {
    /// Minimum interval between touch hits from one enemy (ms)
    pub touch_interval_ms: f64,
    /// Vertical floor for shooter-tier enemies, as a fraction of field height
    pub shooter_floor_frac: f32,
    /// Velocity factor applied when bouncing off that floor (soft bounce)
    pub shooter_floor_bounce: f32,
}

/// Complete gameplay tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub combo: ComboTuning,
    pub focus: FocusTuning,
    pub enemy: EnemyTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning {
                move_speed: 400.0,
                max_half_lives: 6,
                max_ammo: 30,
                reload_secs: 1.5,
                hit_flash_secs: 0.5,
                sprite_size: 128.0,
            },
            projectile: ProjectileTuning {
                player_speed: 600.0,
                enemy_speed: 300.0,
                radius: 4.0,
            },
            combo: ComboTuning { threshold: 10 },
            focus: FocusTuning {
                enabled: true,
                time_scale: 0.55,
                duration_secs: 2.0,
            },
            enemy: EnemyTuning {
                touch_interval_ms: 1000.0,
                shooter_floor_frac: 0.6,
                shooter_floor_bounce: -0.4,
            },
        }
    }
}

impl Tuning {
    /// Load tuning overrides from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
