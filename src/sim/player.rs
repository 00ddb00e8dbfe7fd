//! Player avatar state
//!
//! Health in half-life units, the ammo/reload state machine, the hit-flash
//! timer, and horizontal movement. The player never spawns projectiles
//! itself: `fire()` only spends ammo and reports the outcome, the level
//! controller owns the actual shot. Likewise `take_hit()` is a visual signal;
//! health changes are applied by collision resolution.

use glam::Vec2;

use crate::FieldBounds;
use crate::tuning::PlayerTuning;

/// Held-direction input sampled once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// What happened when the trigger was pulled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// A round was spent; the level controller must spawn the projectile
    Fired,
    /// Magazine empty; reload auto-started
    EmptyReloadStarted,
    /// Reloading (or empty with reload already running): no-op
    Blocked,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Horizontal center position; vertical position is pinned to the field
    /// bottom
    pub x: f32,
    pub facing_right: bool,
    /// Health in half-life units (2 = one heart). Checked, not clamped: the
    /// orchestrator runs the death transition once per frame on <= 0.
    pub half_lives: i32,
    pub max_ammo: u32,
    pub ammo: u32,
    pub reloading: bool,
    pub reload_remaining: f32,
    pub hit_flash_remaining: f32,
    tuning: PlayerTuning,
}

impl Player {
    pub fn new(tuning: &PlayerTuning, field: &FieldBounds) -> Self {
        Self {
            x: field.width / 2.0,
            facing_right: true,
            half_lives: tuning.max_half_lives,
            max_ammo: tuning.max_ammo,
            ammo: tuning.max_ammo,
            reloading: false,
            reload_remaining: 0.0,
            hit_flash_remaining: 0.0,
            tuning: tuning.clone(),
        }
    }

    /// Reset for a level (re)start, death, or easter-egg retry
    pub fn reset(&mut self, field: &FieldBounds) {
        self.half_lives = self.tuning.max_half_lives;
        self.ammo = self.max_ammo;
        self.reloading = false;
        self.reload_remaining = 0.0;
        self.hit_flash_remaining = 0.0;
        self.x = field.width / 2.0;
    }

    /// Center of the avatar sprite; shots originate here and enemy fire aims
    /// here
    pub fn center(&self, field: &FieldBounds) -> Vec2 {
        Vec2::new(self.x, field.height - self.tuning.sprite_size / 2.0)
    }

    /// Hit circle radius, approximated from the sprite bounding box
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.tuning.hit_radius()
    }

    /// Per-frame update: hit-flash countdown, held-key movement (clamped to
    /// the field), reload countdown. Runs on unscaled dt so slow-motion never
    /// affects player responsiveness.
    pub fn update(&mut self, dt: f32, held: HeldKeys, field: &FieldBounds) {
        if self.hit_flash_remaining > 0.0 {
            self.hit_flash_remaining = (self.hit_flash_remaining - dt).max(0.0);
        }

        if held.left {
            self.x -= self.tuning.move_speed * dt;
            self.facing_right = false;
        }
        if held.right {
            self.x += self.tuning.move_speed * dt;
            self.facing_right = true;
        }
        let half = self.tuning.sprite_size / 2.0;
        self.x = self.x.clamp(half, field.width - half);

        if self.reloading {
            self.reload_remaining -= dt;
            if self.reload_remaining <= 0.0 {
                self.reload_remaining = 0.0;
                self.reloading = false;
                self.ammo = self.max_ammo;
            }
        }
    }

    /// Primary trigger pull. Spends one round on success; emptying the
    /// magazine auto-starts the reload, as does the first click while empty.
    pub fn fire(&mut self) -> FireOutcome {
        if self.reloading {
            return FireOutcome::Blocked;
        }
        if self.ammo == 0 {
            // First click on an empty magazine reloads instead of firing
            return if self.start_reload() {
                FireOutcome::EmptyReloadStarted
            } else {
                FireOutcome::Blocked
            };
        }
        self.ammo -= 1;
        if self.ammo == 0 {
            self.start_reload();
        }
        FireOutcome::Fired
    }

    /// Begin a reload. No-op while already reloading or with a full
    /// magazine; returns whether a reload actually started.
    pub fn start_reload(&mut self) -> bool {
        if self.reloading || self.ammo == self.max_ammo {
            return false;
        }
        self.reloading = true;
        self.reload_remaining = self.tuning.reload_secs;
        true
    }

    /// Arm the hit flash. Health is not touched here - damage application is
    /// the caller's job, keeping "hit visual" separate from "damage".
    pub fn take_hit(&mut self) {
        self.hit_flash_remaining = self.tuning.hit_flash_secs;
    }

    #[inline]
    pub fn is_hit_flashing(&self) -> bool {
        self.hit_flash_remaining > 0.0
    }
}
