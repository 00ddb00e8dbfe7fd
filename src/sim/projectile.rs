//! Projectile entity
//!
//! Straight-line bullets with no gravity or deceleration. Direction is fixed
//! at spawn; a projectile dies when it leaves the field or registers a hit,
//! and is pruned by the level's retain pass afterwards.

use glam::Vec2;

use crate::{FieldBounds, aim_direction, circles_overlap};

/// Who fired the projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

/// Damage payload carried by the projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Regular 1-point hit
    Normal,
    /// Combo-unlocked one-shot kill
    Special,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    /// Unit direction, fixed at spawn
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub owner: Owner,
    pub payload: Payload,
    pub alive: bool,
}

impl Projectile {
    /// Spawn a projectile aimed from `pos` toward `aim_point`.
    ///
    /// Returns `None` when the aim point coincides with the spawn position -
    /// a zero-length aim is silently skipped, never an error.
    pub fn spawn(
        pos: Vec2,
        aim_point: Vec2,
        speed: f32,
        radius: f32,
        owner: Owner,
        payload: Payload,
    ) -> Option<Self> {
        let dir = aim_direction(pos, aim_point)?;
        Some(Self { pos, dir, speed, radius, owner, payload, alive: true })
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
    }

    /// True once the projectile has left the field rectangle
    #[inline]
    pub fn is_out_of_bounds(&self, field: &FieldBounds) -> bool {
        !field.contains(self.pos)
    }

    /// Circle hit test against a target of radius `r` at `center`
    #[inline]
    pub fn hits_circle(&self, center: Vec2, r: f32) -> bool {
        circles_overlap(self.pos, self.radius, center, r)
    }
}
