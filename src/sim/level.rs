//! Live wave state and per-frame combat resolution
//!
//! A [`Level`] owns the targets and every in-flight projectile, and runs the
//! combat passes in a fixed order each frame:
//!
//! 1. enemy movement, shooter clamping, and enemy fire
//! 2. projectile integration and out-of-bounds culling
//! 3. player bullets vs targets (first overlap in list order wins)
//! 4. enemy bullets vs the player
//! 5. contact damage
//! 6. completion check, then deferred pruning
//!
//! Dead entities are flagged during the passes and removed by `retain` at the
//! end, so no list is ever mutated mid-iteration.

use glam::Vec2;
use rand_pcg::Pcg32;

use crate::FieldBounds;
use crate::presets::{LevelSpec, ShooterClamp};
use crate::sim::events::GameEvent;
use crate::sim::player::Player;
use crate::sim::projectile::{Owner, Payload, Projectile};
use crate::sim::target::{DamageOutcome, Target};
use crate::tuning::Tuning;

/// Combo tracker for the special attack. Counts consecutive hits on
/// boss-tier (shooter) targets; a hit on anything else or a wasted bullet
/// resets the count and revokes an unlocked special.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComboState {
    pub count: u32,
    pub special_ready: bool,
}

impl ComboState {
    fn register_hit(&mut self, boss_tier: bool, threshold: u32, events: &mut Vec<GameEvent>) {
        if !boss_tier {
            self.reset();
            return;
        }
        self.count += 1;
        // The count keeps running past the threshold for the HUD; only
        // use/waste/non-boss hits clear it
        if self.count >= threshold && !self.special_ready {
            self.special_ready = true;
            events.push(GameEvent::SpecialUnlocked);
        }
    }

    fn reset(&mut self) {
        self.count = 0;
        self.special_ready = false;
    }
}

#[derive(Debug, Clone)]
pub struct Level {
    pub spec: LevelSpec,
    pub targets: Vec<Target>,
    pub projectiles: Vec<Projectile>,
    pub combo: ComboState,
    pub completed: bool,
}

impl Level {
    /// Spawn the wave described by `spec`, jittered through the seeded RNG
    pub fn from_spec(spec: LevelSpec, field: &FieldBounds, rng: &mut Pcg32, now_ms: f64) -> Self {
        let targets =
            spec.spawns.iter().map(|s| Target::from_spec(s, field, rng, now_ms)).collect();
        Self { spec, targets, projectiles: Vec::new(), combo: ComboState::default(), completed: false }
    }

    /// Spawn a normal player shot from `origin` toward `aim`. Returns whether
    /// a projectile actually launched (a zero-length aim is skipped).
    pub fn fire_player_shot(&mut self, origin: Vec2, aim: Vec2, tuning: &Tuning) -> bool {
        let shot = Projectile::spawn(
            origin,
            aim,
            tuning.projectile.player_speed,
            tuning.projectile.radius,
            Owner::Player,
            Payload::Normal,
        );
        match shot {
            Some(p) => {
                self.projectiles.push(p);
                true
            }
            None => false,
        }
    }

    /// Spend the combo-unlocked special shot, if available
    pub fn fire_special(
        &mut self,
        origin: Vec2,
        aim: Vec2,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if !self.combo.special_ready {
            return false;
        }
        let shot = Projectile::spawn(
            origin,
            aim,
            tuning.projectile.player_speed,
            tuning.projectile.radius,
            Owner::Player,
            Payload::Special,
        );
        match shot {
            Some(p) => {
                self.combo.reset();
                self.projectiles.push(p);
                events.push(GameEvent::SpecialFired);
                true
            }
            None => false,
        }
    }

    /// One combat frame at the (possibly slow-motion scaled) simulation dt
    pub fn update(
        &mut self,
        dt: f32,
        now_ms: f64,
        field: &FieldBounds,
        player: &mut Player,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) {
        let player_center = player.center(field);
        let player_radius = player.hit_radius();

        // Pass 1: enemy movement, vertical containment for shooters, fire
        for t in self.targets.iter_mut() {
            if !t.alive {
                continue;
            }
            t.update(dt, now_ms, field, Some(player_center));
            if t.can_shoot {
                match self.spec.shooter_clamp {
                    ShooterClamp::SoftFloor => {
                        let floor = tuning.enemy.shooter_floor_frac * field.height;
                        if t.pos.y + t.radius > floor {
                            t.pos.y = floor - t.radius;
                            t.vel.y *= tuning.enemy.shooter_floor_bounce;
                        }
                    }
                    ShooterClamp::TopThird => {
                        let ceiling = field.height / 3.0;
                        if t.pos.y + t.radius > ceiling {
                            t.pos.y = ceiling - t.radius;
                            t.vel.y = -t.vel.y.abs();
                        }
                    }
                }
            }
            if let Some(shot) = t.try_fire(
                now_ms,
                Some(player_center),
                tuning.projectile.enemy_speed,
                tuning.projectile.radius,
            ) {
                self.projectiles.push(shot);
                events.push(GameEvent::EnemyShot { tier: t.tier });
            }
        }

        // Pass 2: projectile integration and out-of-bounds culling. A wasted
        // normal player bullet breaks the combo.
        for p in self.projectiles.iter_mut() {
            if !p.alive {
                continue;
            }
            p.update(dt);
            if p.is_out_of_bounds(field) {
                p.alive = false;
                if self.spec.combo_enabled && p.owner == Owner::Player && p.payload == Payload::Normal
                {
                    self.combo.reset();
                }
            }
        }

        // Pass 3: player bullets vs targets. Each bullet spends itself on the
        // first overlapping vulnerable target in list order; invincible
        // targets are passed through untouched.
        for p in self.projectiles.iter_mut() {
            if !p.alive || p.owner != Owner::Player {
                continue;
            }
            for t in self.targets.iter_mut() {
                if !t.alive || t.is_invincible(now_ms) || !p.hits_circle(t.pos, t.radius) {
                    continue;
                }
                p.alive = false;
                match t.apply_damage(1, p.payload, now_ms) {
                    DamageOutcome::Ignored => {}
                    DamageOutcome::Hit => {
                        events.push(GameEvent::TargetHit { tier: t.tier });
                        if self.spec.combo_enabled && p.payload == Payload::Normal {
                            self.combo.register_hit(t.can_shoot, tuning.combo.threshold, events);
                        }
                    }
                    DamageOutcome::Killed => {
                        if p.payload == Payload::Special {
                            events.push(GameEvent::SpecialExplosion { pos: t.pos });
                        }
                        events.push(GameEvent::TargetDestroyed { tier: t.tier });
                        if self.spec.combo_enabled && p.payload == Payload::Normal {
                            self.combo.register_hit(t.can_shoot, tuning.combo.threshold, events);
                        }
                    }
                }
                break;
            }
        }

        // Pass 4: enemy bullets vs the player
        for p in self.projectiles.iter_mut() {
            if !p.alive || p.owner != Owner::Enemy {
                continue;
            }
            if p.hits_circle(player_center, player_radius) {
                p.alive = false;
                player.half_lives -= self.spec.enemy_bullet_damage;
                player.take_hit();
                events.push(GameEvent::PlayerHit);
            }
        }

        // Pass 5: contact damage, rate-limited per target
        for t in self.targets.iter_mut() {
            if let Some(half_lives) =
                t.try_touch(now_ms, player_center, player_radius, tuning.enemy.touch_interval_ms)
            {
                player.half_lives -= half_lives;
                player.take_hit();
                events.push(GameEvent::PlayerHit);
            }
        }

        // Pass 6: completion, then deferred pruning
        self.completed = self.targets.iter().all(|t| !t.alive);
        self.projectiles.retain(|p| p.alive);
        if self.spec.prune_dead {
            self.targets.retain(|t| t.alive);
        }
    }

    /// Live enemies remaining, for the HUD
    pub fn remaining(&self) -> usize {
        self.targets.iter().filter(|t| t.alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{SpawnSpec, TargetTier, easter_egg_spec};
    use rand::SeedableRng;

    fn test_rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn test_player(field: &FieldBounds) -> Player {
        Player::new(&Tuning::default().player, field)
    }

    /// A bare wave with the given spawns and no combo system
    fn wave(spawns: Vec<SpawnSpec>) -> Level {
        let spec = LevelSpec {
            label: "TEST".to_owned(),
            spawns,
            combo_enabled: false,
            enemy_bullet_damage: 2,
            prune_dead: false,
            shooter_clamp: ShooterClamp::SoftFloor,
        };
        Level::from_spec(spec, &FieldBounds::default(), &mut test_rng(), 0.0)
    }

    fn combo_wave(spawns: Vec<SpawnSpec>) -> Level {
        let mut level = wave(spawns);
        level.spec.combo_enabled = true;
        level
    }

    fn still_target(tier: TargetTier, hp: i32, pos: Vec2) -> SpawnSpec {
        SpawnSpec {
            tier,
            hp,
            radius: 30.0,
            x_frac: pos.x / 960.0,
            y_frac: pos.y / 600.0,
            y_jitter: 0.0,
            vel_scale: [0.0, 0.0],
            ..SpawnSpec::default()
        }
    }

    /// A stationary boss-tier shooter whose cooldown never lapses in a test
    fn boss_target(pos: Vec2) -> SpawnSpec {
        SpawnSpec {
            can_shoot: true,
            shot_cooldown_ms: 1.0e9,
            ..still_target(TargetTier::Boss, 100, pos)
        }
    }

    fn step(level: &mut Level, player: &mut Player, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        level.update(1.0 / 60.0, now_ms, &FieldBounds::default(), player, &Tuning::default(), &mut events);
        events
    }

    /// Park a bullet directly on top of a target so the next frame resolves
    /// the hit
    fn plant_bullet(level: &mut Level, idx: usize, payload: Payload) {
        let pos = level.targets[idx].pos;
        level.projectiles.push(Projectile {
            pos,
            dir: Vec2::new(0.0, -1.0),
            speed: 0.0,
            radius: 4.0,
            owner: Owner::Player,
            payload,
            alive: true,
        });
    }

    #[test]
    fn test_completion_requires_all_dead() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level = wave(vec![
            still_target(TargetTier::Grunt, 1, Vec2::new(200.0, 300.0)),
            still_target(TargetTier::Grunt, 1, Vec2::new(700.0, 300.0)),
        ]);
        level.targets[0].alive = false;
        step(&mut level, &mut player, 0.0);
        assert!(!level.completed);
        level.targets[1].alive = false;
        step(&mut level, &mut player, 16.0);
        assert!(level.completed);
    }

    #[test]
    fn test_player_bullet_kills_and_emits() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level = wave(vec![still_target(TargetTier::Grunt, 1, Vec2::new(300.0, 300.0))]);
        plant_bullet(&mut level, 0, Payload::Normal);
        let events = step(&mut level, &mut player, 0.0);
        assert!(events.contains(&GameEvent::TargetDestroyed { tier: TargetTier::Grunt }));
        assert!(level.completed);
        // Spent bullet was pruned
        assert!(level.projectiles.is_empty());
    }

    #[test]
    fn test_bullet_spends_on_first_target_in_list_order() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        // Two targets stacked on the same spot: list order breaks the tie
        let mut level = wave(vec![
            still_target(TargetTier::Grunt, 2, Vec2::new(300.0, 300.0)),
            still_target(TargetTier::Heavy, 2, Vec2::new(300.0, 300.0)),
        ]);
        plant_bullet(&mut level, 0, Payload::Normal);
        step(&mut level, &mut player, 0.0);
        assert_eq!(level.targets[0].hp, 1);
        assert_eq!(level.targets[1].hp, 2);
    }

    #[test]
    fn test_combo_counts_boss_hits_and_unlocks() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level =
            combo_wave(vec![boss_target(Vec2::new(300.0, 300.0))]);
        let threshold = Tuning::default().combo.threshold;
        let mut unlocked = false;
        for i in 0..threshold {
            plant_bullet(&mut level, 0, Payload::Normal);
            let events = step(&mut level, &mut player, i as f64 * 16.0);
            if events.contains(&GameEvent::SpecialUnlocked) {
                unlocked = true;
            }
        }
        assert!(unlocked);
        assert!(level.combo.special_ready);
        // The running count survives the unlock for the HUD
        assert_eq!(level.combo.count, threshold);
    }

    #[test]
    fn test_combo_keeps_counting_past_threshold() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level = combo_wave(vec![boss_target(Vec2::new(300.0, 300.0))]);
        let threshold = Tuning::default().combo.threshold;
        for i in 0..threshold + 3 {
            plant_bullet(&mut level, 0, Payload::Normal);
            step(&mut level, &mut player, i as f64 * 16.0);
        }
        assert_eq!(level.combo.count, threshold + 3);
        assert!(level.combo.special_ready);
    }

    #[test]
    fn test_special_kill_does_not_feed_combo() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level = combo_wave(vec![boss_target(Vec2::new(300.0, 300.0))]);
        plant_bullet(&mut level, 0, Payload::Special);
        step(&mut level, &mut player, 0.0);
        assert!(!level.targets[0].alive);
        // The combo stays spent after the special lands
        assert_eq!(level.combo.count, 0);
        assert!(!level.combo.special_ready);
    }

    #[test]
    fn test_combo_resets_on_non_boss_hit() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level = combo_wave(vec![
            boss_target(Vec2::new(300.0, 300.0)),
            still_target(TargetTier::Boxer, 100, Vec2::new(700.0, 300.0)),
        ]);
        plant_bullet(&mut level, 0, Payload::Normal);
        step(&mut level, &mut player, 0.0);
        assert_eq!(level.combo.count, 1);
        plant_bullet(&mut level, 1, Payload::Normal);
        step(&mut level, &mut player, 16.0);
        assert_eq!(level.combo.count, 0);
        assert!(!level.combo.special_ready);
    }

    #[test]
    fn test_combo_resets_on_wasted_bullet() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level =
            combo_wave(vec![boss_target(Vec2::new(300.0, 300.0))]);
        plant_bullet(&mut level, 0, Payload::Normal);
        step(&mut level, &mut player, 0.0);
        assert_eq!(level.combo.count, 1);
        // A shot that flies off the top of the field breaks the streak
        level.projectiles.push(Projectile {
            pos: Vec2::new(480.0, 1.0),
            dir: Vec2::new(0.0, -1.0),
            speed: 600.0,
            radius: 4.0,
            owner: Owner::Player,
            payload: Payload::Normal,
            alive: true,
        });
        step(&mut level, &mut player, 16.0);
        assert_eq!(level.combo.count, 0);
        assert!(!level.combo.special_ready);
    }

    #[test]
    fn test_wasted_bullet_revokes_unlocked_special() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level = combo_wave(vec![boss_target(Vec2::new(300.0, 300.0))]);
        level.combo.special_ready = true;
        level.projectiles.push(Projectile {
            pos: Vec2::new(480.0, 1.0),
            dir: Vec2::new(0.0, -1.0),
            speed: 600.0,
            radius: 4.0,
            owner: Owner::Player,
            payload: Payload::Normal,
            alive: true,
        });
        step(&mut level, &mut player, 0.0);
        assert!(!level.combo.special_ready);
    }

    #[test]
    fn test_fire_special_requires_and_consumes_unlock() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level =
            combo_wave(vec![boss_target(Vec2::new(300.0, 300.0))]);
        let tuning = Tuning::default();
        let mut events = Vec::new();
        let origin = player.center(&field);
        assert!(!level.fire_special(origin, Vec2::new(300.0, 300.0), &tuning, &mut events));

        level.combo.special_ready = true;
        assert!(level.fire_special(origin, Vec2::new(300.0, 300.0), &tuning, &mut events));
        assert!(!level.combo.special_ready);
        assert!(events.contains(&GameEvent::SpecialFired));
        assert_eq!(level.projectiles.last().map(|p| p.payload), Some(Payload::Special));
    }

    #[test]
    fn test_special_one_shots_and_explodes() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level =
            combo_wave(vec![boss_target(Vec2::new(300.0, 300.0))]);
        plant_bullet(&mut level, 0, Payload::Special);
        let events = step(&mut level, &mut player, 0.0);
        assert!(!level.targets[0].alive);
        assert!(events.iter().any(|e| matches!(e, GameEvent::SpecialExplosion { .. })));
        assert!(events.contains(&GameEvent::TargetDestroyed { tier: TargetTier::Boss }));
    }

    #[test]
    fn test_enemy_bullet_damages_player() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level = wave(vec![still_target(TargetTier::Tank, 4, Vec2::new(300.0, 200.0))]);
        let center = player.center(&field);
        level.projectiles.push(Projectile {
            pos: center,
            dir: Vec2::new(0.0, 1.0),
            speed: 0.0,
            radius: 4.0,
            owner: Owner::Enemy,
            payload: Payload::Normal,
            alive: true,
        });
        let events = step(&mut level, &mut player, 0.0);
        assert_eq!(player.half_lives, 4);
        assert!(player.is_hit_flashing());
        assert!(events.contains(&GameEvent::PlayerHit));
    }

    #[test]
    fn test_lethal_bullet_damage_in_hidden_wave() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level = Level::from_spec(easter_egg_spec(), &field, &mut test_rng(), 0.0);
        let center = player.center(&field);
        level.projectiles.push(Projectile {
            pos: center,
            dir: Vec2::new(0.0, 1.0),
            speed: 0.0,
            radius: 4.0,
            owner: Owner::Enemy,
            payload: Payload::Normal,
            alive: true,
        });
        step(&mut level, &mut player, 0.0);
        assert_eq!(player.half_lives, 0);
    }

    #[test]
    fn test_touch_damage_applied_through_pass() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let center = player.center(&field);
        let mut spawn = still_target(TargetTier::Grunt, 1, center);
        spawn.touch_damage = 0.5;
        let mut level = wave(vec![spawn]);
        level.targets[0].pos = center;
        let events = step(&mut level, &mut player, 1500.0);
        assert_eq!(player.half_lives, 5);
        assert!(events.contains(&GameEvent::PlayerHit));
        // Second frame inside the touch window: no further damage
        level.targets[0].pos = center;
        step(&mut level, &mut player, 1516.0);
        assert_eq!(player.half_lives, 5);
    }

    #[test]
    fn test_soft_floor_clamps_shooters() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut spawn = still_target(TargetTier::Boss, 25, Vec2::new(300.0, 200.0));
        spawn.can_shoot = true;
        spawn.shot_cooldown_ms = 1.0e9;
        let mut level = wave(vec![spawn]);
        level.targets[0].pos = Vec2::new(300.0, 400.0);
        level.targets[0].vel = Vec2::new(0.0, 100.0);
        step(&mut level, &mut player, 0.0);
        let t = &level.targets[0];
        // floor at 0.6 * 600 = 360; bounce dampened to -0.4x
        assert!((t.pos.y - (360.0 - t.radius)).abs() < 1e-3);
        assert!((t.vel.y - (-40.0)).abs() < 1e-3);
    }

    #[test]
    fn test_top_third_clamp_in_hidden_wave() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level = Level::from_spec(easter_egg_spec(), &field, &mut test_rng(), 0.0);
        level.targets[0].seeks_player = false;
        level.targets[0].pos = Vec2::new(480.0, 190.0);
        level.targets[0].vel = Vec2::new(0.0, 80.0);
        step(&mut level, &mut player, 0.0);
        let t = &level.targets[0];
        assert!(t.pos.y + t.radius <= field.height / 3.0 + 1e-3);
        assert!(t.vel.y < 0.0);
    }

    #[test]
    fn test_dead_targets_pruned_when_configured() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut level = Level::from_spec(easter_egg_spec(), &field, &mut test_rng(), 0.0);
        level.targets[0].alive = false;
        step(&mut level, &mut player, 0.0);
        assert!(level.targets.is_empty());
        assert!(level.completed);
    }

    #[test]
    fn test_invincible_target_passed_through_by_bullets() {
        let field = FieldBounds::default();
        let mut player = test_player(&field);
        let mut spawn = still_target(TargetTier::Boxer, 10, Vec2::new(300.0, 300.0));
        spawn.invincible_ms = 2500.0;
        let mut level = wave(vec![spawn]);
        plant_bullet(&mut level, 0, Payload::Normal);
        let events = step(&mut level, &mut player, 100.0);
        assert_eq!(level.targets[0].hp, 10);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::TargetHit { .. })));
        // The bullet flies on instead of spending itself
        assert_eq!(level.projectiles.len(), 1);
        assert!(level.projectiles[0].alive);
    }
}
