//! Enemy/target entity
//!
//! One configurable type covers every enemy in the game: grunts, heavies,
//! tanks, boxers, and both bosses are [`SpawnSpec`] presets over the same
//! struct. Behavior differences are flags (`seeks_player`, `touch_damage`,
//! `can_shoot`), never subtypes.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::presets::{SpawnSpec, TargetTier};
use crate::sim::projectile::{Owner, Payload, Projectile};
use crate::{FieldBounds, circles_overlap};

/// Base spawn velocity ranges (px/s), before per-spec scaling
const BASE_VX_RANGE: f32 = 70.0;
const BASE_VY_RANGE: f32 = 90.0;

/// Hit-flash display duration (ms)
pub const HIT_FLASH_MS: f64 = 400.0;

/// Ranged-attack sub-state. Present on every target, inert unless
/// `can_shoot` is set.
#[derive(Debug, Clone, Copy)]
pub struct RangedAttackState {
    pub cooldown_ms: f64,
    pub last_shot_ms: f64,
}

/// Hit-flash indicator state
#[derive(Debug, Clone, Copy, Default)]
pub struct HitFlash {
    pub active: bool,
    pub start_ms: f64,
}

/// Outcome of a damage application, for event emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible or already dead; nothing changed
    Ignored,
    /// Took damage and survived
    Hit,
    Killed,
}

#[derive(Debug, Clone)]
pub struct Target {
    pub tier: TargetTier,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    pub seeks_player: bool,
    pub touch_damage: f32,
    pub can_shoot: bool,
    /// Steering acceleration (px/s^2). Additive: velocity is deliberately not
    /// renormalized, so prolonged steering builds speed (homing drift).
    pub steer_strength: f32,
    pub spawn_time_ms: f64,
    pub invincible_ms: f64,
    pub last_touch_ms: f64,
    pub ranged: RangedAttackState,
    pub hit_flash: HitFlash,
}

impl Target {
    /// Build a live target from a spawn preset, with seeded jitter
    pub fn from_spec(spec: &SpawnSpec, field: &FieldBounds, rng: &mut Pcg32, now_ms: f64) -> Self {
        let x = spec.x_frac * field.width;
        let y = spec.y_frac * field.height
            + if spec.y_jitter > 0.0 {
                rng.random_range(-spec.y_jitter..=spec.y_jitter)
            } else {
                0.0
            };
        let scale = if spec.vel_scale[0] < spec.vel_scale[1] {
            rng.random_range(spec.vel_scale[0]..spec.vel_scale[1])
        } else {
            spec.vel_scale[0]
        };
        let vx = rng.random_range(-BASE_VX_RANGE..BASE_VX_RANGE) * scale * spec.vx_factor;
        let vy = rng.random_range(-BASE_VY_RANGE..BASE_VY_RANGE) * scale * spec.vy_factor;
        let steer_strength = if !spec.seeks_player {
            0.0
        } else if spec.steer_range[0] < spec.steer_range[1] {
            rng.random_range(spec.steer_range[0]..spec.steer_range[1])
        } else {
            spec.steer_range[0]
        };
        Self {
            tier: spec.tier,
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius: spec.radius,
            hp: spec.hp,
            max_hp: spec.hp,
            alive: true,
            seeks_player: spec.seeks_player,
            touch_damage: spec.touch_damage,
            can_shoot: spec.can_shoot,
            steer_strength,
            spawn_time_ms: now_ms,
            invincible_ms: spec.invincible_ms,
            last_touch_ms: 0.0,
            ranged: RangedAttackState {
                cooldown_ms: spec.shot_cooldown_ms,
                // First shot comes one full cooldown after spawn
                last_shot_ms: now_ms,
            },
            hit_flash: HitFlash::default(),
        }
    }

    /// Movement step: steering, integration, elastic boundary bounce.
    ///
    /// Bounces are perfectly elastic: position is clamped to the bound and
    /// the crossing velocity component is negated exactly, the other left
    /// unchanged. The top bound is the HUD margin, not y = 0.
    pub fn update(&mut self, dt: f32, now_ms: f64, field: &FieldBounds, player_pos: Option<Vec2>) {
        if self.seeks_player
            && let Some(target) = player_pos
        {
            let delta = target - self.pos;
            if delta.length_squared() > 0.0 {
                self.vel += delta.normalize() * self.steer_strength * dt;
            }
        }

        self.pos += self.vel * dt;

        if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
        } else if self.pos.x + self.radius > field.width {
            self.pos.x = field.width - self.radius;
            self.vel.x = -self.vel.x;
        }
        if self.pos.y - self.radius < field.hud_height {
            self.pos.y = field.hud_height + self.radius;
            self.vel.y = -self.vel.y;
        } else if self.pos.y + self.radius > field.height {
            self.pos.y = field.height - self.radius;
            self.vel.y = -self.vel.y;
        }

        if self.hit_flash.active && now_ms - self.hit_flash.start_ms >= HIT_FLASH_MS {
            self.hit_flash.active = false;
        }
    }

    /// Spawn-protection check: invincible targets take no damage but still
    /// move, steer, and render
    #[inline]
    pub fn is_invincible(&self, now_ms: f64) -> bool {
        now_ms - self.spawn_time_ms < self.invincible_ms
    }

    /// Apply projectile or melee damage.
    ///
    /// A `Special` payload bypasses `amount` and kills instantly. Damage to
    /// an invincible or dead target is a silent no-op; the dead transition is
    /// one-directional.
    pub fn apply_damage(&mut self, amount: i32, payload: Payload, now_ms: f64) -> DamageOutcome {
        if !self.alive || self.is_invincible(now_ms) {
            return DamageOutcome::Ignored;
        }
        match payload {
            Payload::Special => self.hp = 0,
            Payload::Normal => self.hp -= amount,
        }
        if self.hp <= 0 {
            self.hp = self.hp.min(0);
            self.alive = false;
            DamageOutcome::Killed
        } else {
            self.hit_flash.active = true;
            self.hit_flash.start_ms = now_ms;
            DamageOutcome::Hit
        }
    }

    /// Ranged-attack attempt. Fires at most once per cooldown, toward the
    /// player's current position, only when not invincible.
    pub fn try_fire(
        &mut self,
        now_ms: f64,
        player_pos: Option<Vec2>,
        bullet_speed: f32,
        bullet_radius: f32,
    ) -> Option<Projectile> {
        if !self.can_shoot || !self.alive || self.is_invincible(now_ms) {
            return None;
        }
        let target = player_pos?;
        if now_ms - self.ranged.last_shot_ms <= self.ranged.cooldown_ms {
            return None;
        }
        self.ranged.last_shot_ms = now_ms;
        Projectile::spawn(self.pos, target, bullet_speed, bullet_radius, Owner::Enemy, Payload::Normal)
    }

    /// Touch/melee check against the player's hit circle.
    ///
    /// Each target rate-limits its own contact hits independently; returns
    /// the half-lives to subtract when a hit lands.
    pub fn try_touch(
        &mut self,
        now_ms: f64,
        player_pos: Vec2,
        player_radius: f32,
        interval_ms: f64,
    ) -> Option<i32> {
        if !self.alive || self.touch_damage <= 0.0 {
            return None;
        }
        if !circles_overlap(self.pos, self.radius, player_pos, player_radius) {
            return None;
        }
        if now_ms - self.last_touch_ms <= interval_ms {
            return None;
        }
        self.last_touch_ms = now_ms;
        Some((self.touch_damage * 2.0).round() as i32)
    }
}
