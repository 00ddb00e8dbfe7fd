//! Sharpshot - an arcade crosshair shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collision passes, game state)
//! - `presets`: Declarative per-level wave configuration
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound-cue mapping for the (external) audio collaborator
//!
//! Rendering, asset loading, and the menu shell are external collaborators:
//! they read entity state each frame and drain the event queue. Nothing in
//! `sim` blocks or touches I/O.

pub mod audio;
pub mod presets;
pub mod sim;
pub mod tuning;

pub use presets::{LevelSpec, SpawnSpec, TargetTier};
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one logical frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Top margin reserved for the HUD; enemies bounce off it
    pub const HUD_HEIGHT: f32 = 72.0;

    /// Easter-egg trigger region: within this many pixels of the top and
    /// right edges
    pub const EGG_CORNER_SIZE: f32 = 100.0;
    /// Qualifying corner shots needed to trigger the easter egg
    pub const EGG_CORNER_SHOTS: u32 = 5;
}

/// Play-field bounds, passed explicitly into every update call.
///
/// The playable area is `x in [0, width]`, `y in [hud_height, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
    pub hud_height: f32,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            width: consts::FIELD_WIDTH,
            height: consts::FIELD_HEIGHT,
            hud_height: consts::HUD_HEIGHT,
        }
    }
}

impl FieldBounds {
    pub fn new(width: f32, height: f32, hud_height: f32) -> Self {
        Self { width, height, hud_height }
    }

    /// Whether a point lies inside the field rectangle. The HUD strip counts
    /// as inside - projectiles may fly through it, they only die past the
    /// edges.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Circle-vs-circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) <= (ra + rb) * (ra + rb)
}

/// Unit direction from `from` toward `to`, or `None` when the two points
/// coincide (zero-length aim vectors never produce a projectile)
#[inline]
pub fn aim_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    if delta.length_squared() <= f32::EPSILON {
        None
    } else {
        Some(delta.normalize())
    }
}
