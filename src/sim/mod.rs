//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order; collision ties break by list order)
//! - No rendering or platform dependencies

pub mod events;
pub mod level;
pub mod player;
pub mod progression;
pub mod projectile;
pub mod target;
pub mod tick;

pub use events::GameEvent;
pub use level::{ComboState, Level};
pub use player::{FireOutcome, HeldKeys, Player};
pub use progression::Progression;
pub use projectile::{Owner, Payload, Projectile};
pub use target::{RangedAttackState, Target};
pub use tick::{GamePhase, GameState, TickInput, tick};
