//! Fixed timestep simulation tick
//!
//! Top-level orchestration: input edges, the slow-motion clock, level
//! transitions, and the win/lose state machine. The shell calls [`tick`] once
//! per fixed step and never mutates state directly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::sim::events::GameEvent;
use crate::sim::level::Level;
use crate::sim::player::{FireOutcome, HeldKeys, Player};
use crate::sim::progression::Progression;
use crate::tuning::{FocusTuning, Tuning};
use crate::FieldBounds;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Paused,
    GameOver,
    Victory,
}

/// Input commands for a single tick (deterministic). Movement keys are
/// held-state; everything else is a pressed-this-frame edge the shell has
/// already debounced.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Fire toward `aim`
    pub fire: bool,
    pub reload: bool,
    /// Fire the combo-unlocked special shot toward `aim`
    pub fire_special: bool,
    /// Activate slow motion
    pub focus: bool,
    /// Pause toggle
    pub pause: bool,
    /// Aim point in field coordinates (cursor position)
    pub aim: Vec2,
}

/// Slow-motion window. Decays in real time, scales only the combat clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusState {
    pub remaining: f32,
}

impl FocusState {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn time_scale(&self, tuning: &FocusTuning) -> f32 {
        if self.is_active() { tuning.time_scale } else { 1.0 }
    }

    fn advance(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }
}

/// Complete game state. Deterministic for a given seed and input sequence.
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Combat clock in ms. Advances at the focus-scaled rate, so every
    /// ms-based timer (cooldowns, invincibility, touch windows) slows with
    /// the rest of the combat.
    pub clock_ms: f64,
    pub field: FieldBounds,
    pub tuning: Tuning,
    pub player: Player,
    pub level: Level,
    pub progression: Progression,
    pub focus: FocusState,
    /// Pending cues; the shell drains these once per rendered frame
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl GameState {
    /// New run with default tuning and field
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), FieldBounds::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, field: FieldBounds) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let progression = Progression::new();
        let player = Player::new(&tuning.player, &field);
        let level = Level::from_spec(progression.current_spec(), &field, &mut rng, 0.0);
        Self {
            seed,
            phase: GamePhase::Playing,
            time_ticks: 0,
            clock_ms: 0.0,
            field,
            tuning,
            player,
            level,
            progression,
            focus: FocusState::default(),
            events: vec![GameEvent::LevelStarted { index: 0 }],
            rng,
        }
    }

    /// Hand the queued cues to the shell
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rebuild the level for wherever progression points now, with a fresh
    /// player
    fn enter_wave(&mut self) {
        let spec = self.progression.current_spec();
        log::info!("entering wave {} ({} targets)", spec.label, spec.spawns.len());
        self.level = Level::from_spec(spec, &self.field, &mut self.rng, self.clock_ms);
        self.player.reset(&self.field);
        if !self.progression.in_easter_egg {
            self.events
                .push(GameEvent::LevelStarted { index: self.progression.current_index });
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver | GamePhase::Victory => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Slow motion: the scale applies from the activation frame; the window
    // itself runs down in real time
    if input.focus && state.tuning.focus.enabled && !state.focus.is_active() {
        state.focus.remaining = state.tuning.focus.duration_secs;
        state.events.push(GameEvent::FocusActivated);
    }
    let sim_dt = dt * state.focus.time_scale(&state.tuning.focus);
    state.focus.advance(dt);
    state.clock_ms += f64::from(sim_dt) * 1000.0;

    // The player runs on unscaled dt: slow motion never blunts responsiveness
    let was_reloading = state.player.reloading;
    let held = HeldKeys { left: input.move_left, right: input.move_right };
    state.player.update(dt, held, &state.field);
    if was_reloading && !state.player.reloading {
        state.events.push(GameEvent::ReloadFinished);
    }

    if input.reload && state.player.start_reload() {
        state.events.push(GameEvent::ReloadStarted);
    }

    if input.fire {
        match state.player.fire() {
            FireOutcome::Fired => {
                state.events.push(GameEvent::ShotFired);
                // Emptying the magazine auto-starts the reload
                if state.player.reloading {
                    state.events.push(GameEvent::ReloadStarted);
                }
                let origin = state.player.center(&state.field);
                if state.level.fire_player_shot(origin, input.aim, &state.tuning)
                    && state.progression.record_shot(input.aim, &state.field)
                {
                    log::info!("hidden wave triggered at tick {}", state.time_ticks);
                    state.events.push(GameEvent::EasterEggTriggered);
                    state.enter_wave();
                }
            }
            FireOutcome::EmptyReloadStarted => {
                state.events.push(GameEvent::DryFire);
                state.events.push(GameEvent::ReloadStarted);
            }
            FireOutcome::Blocked => {}
        }
    }

    if input.fire_special {
        let origin = state.player.center(&state.field);
        state.level.fire_special(origin, input.aim, &state.tuning, &mut state.events);
    }

    let clock_ms = state.clock_ms;
    state.level.update(
        sim_dt,
        clock_ms,
        &state.field,
        &mut state.player,
        &state.tuning,
        &mut state.events,
    );

    // Death transition, at most once per run of the wave
    if state.player.half_lives <= 0 {
        if state.progression.in_easter_egg {
            state.events.push(GameEvent::EasterEggLost);
            state.progression.resolve_easter_egg(false);
            state.enter_wave();
        } else {
            log::info!("player down at tick {}, game over", state.time_ticks);
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver);
        }
        return;
    }

    if state.level.completed {
        if state.progression.in_easter_egg {
            state.events.push(GameEvent::EasterEggWon);
            state.progression.resolve_easter_egg(true);
            state.enter_wave();
        } else {
            let index = state.progression.current_index;
            state.progression.mark_completed(index);
            state.events.push(GameEvent::LevelCompleted { index });
            if state.progression.advance().is_some() {
                state.enter_wave();
            } else {
                log::info!("campaign cleared at tick {}", state.time_ticks);
                state.phase = GamePhase::Victory;
                state.events.push(GameEvent::Victory);
            }
        }
    }
}
