//! Headless demo shell
//!
//! Runs the simulation with a simple autoplay bot and logs the event stream.
//! Pass a seed as the first argument to reproduce a run.

use glam::Vec2;

use sharpshot::audio::sound_for;
use sharpshot::consts::SIM_DT;
use sharpshot::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Ten minutes of simulated time
const MAX_TICKS: u64 = 60 * 600;

fn parse_seed() -> u64 {
    std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    })
}

/// Chase the first live target, fire on a fixed cadence, spend the special
/// shot as soon as it unlocks
fn bot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let Some(target) = state.level.targets.iter().find(|t| t.alive) else {
        return input;
    };
    input.aim = Vec2::new(target.pos.x, target.pos.y);
    let dx = target.pos.x - state.player.x;
    input.move_left = dx < -20.0;
    input.move_right = dx > 20.0;
    input.fire = state.time_ticks % 12 == 0;
    input.fire_special = state.level.combo.special_ready;
    input
}

fn main() {
    env_logger::init();
    let seed = parse_seed();
    log::info!("demo run starting, seed {seed}");

    let mut state = GameState::new(seed);
    while state.time_ticks < MAX_TICKS {
        let input = bot_input(&state);
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::LevelStarted { index } => {
                    log::info!("level {} started: {}", index + 1, state.level.spec.label);
                }
                GameEvent::LevelCompleted { index } => {
                    log::info!("level {} cleared at tick {}", index + 1, state.time_ticks);
                }
                GameEvent::EasterEggTriggered => log::info!("hidden wave discovered"),
                GameEvent::GameOver | GameEvent::Victory => log::info!("{event:?}"),
                _ => log::debug!("{event:?} -> {:?}", sound_for(&event)),
            }
        }

        if matches!(state.phase, GamePhase::GameOver | GamePhase::Victory) {
            break;
        }
    }

    log::info!(
        "run finished: {:?} after {} ticks ({:.1}s simulated)",
        state.phase,
        state.time_ticks,
        state.time_ticks as f32 * SIM_DT
    );
}
