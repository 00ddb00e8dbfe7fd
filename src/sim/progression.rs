//! Campaign progression and the hidden-wave trigger
//!
//! Tracks which level is active, which have been cleared, and the secret
//! corner-shot counter that opens the hidden boss wave. The hidden wave is an
//! alternate edge in the level graph, not a numbered level: winning it skips
//! ahead to the third level, losing it replays the second.

use std::collections::BTreeSet;

use glam::Vec2;

use crate::consts::{EGG_CORNER_SHOTS, EGG_CORNER_SIZE};
use crate::presets::{LEVEL_COUNT, LevelSpec, easter_egg_spec, level_spec};
use crate::FieldBounds;

/// Level index during which the corner trigger is armed (the second level)
const EGG_TRIGGER_LEVEL: usize = 1;

/// Where the hidden wave drops the player afterwards. A loss replays the
/// trigger level rather than restarting the campaign.
const EGG_WIN_LEVEL: usize = 2;
const EGG_LOSS_LEVEL: usize = 1;

#[derive(Debug, Clone, Default)]
pub struct Progression {
    pub current_index: usize,
    pub completed: BTreeSet<usize>,
    pub in_easter_egg: bool,
    corner_shots: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wave configuration for whatever should be running right now
    pub fn current_spec(&self) -> LevelSpec {
        if self.in_easter_egg { easter_egg_spec() } else { level_spec(self.current_index) }
    }

    /// Record a successful player shot aimed at `aim`. Returns `true` when
    /// this shot arms the hidden wave: the fifth shot into the top-right
    /// corner square, counted only during the trigger level.
    pub fn record_shot(&mut self, aim: Vec2, field: &FieldBounds) -> bool {
        if self.in_easter_egg || self.current_index != EGG_TRIGGER_LEVEL {
            return false;
        }
        let in_corner = aim.x >= field.width - EGG_CORNER_SIZE && aim.y <= EGG_CORNER_SIZE;
        if !in_corner {
            // Stray shots do not reset the count; only corner shots advance it
            return false;
        }
        self.corner_shots += 1;
        if self.corner_shots >= EGG_CORNER_SHOTS {
            self.corner_shots = 0;
            self.in_easter_egg = true;
            true
        } else {
            false
        }
    }

    /// Leave the hidden wave, routing by outcome
    pub fn resolve_easter_egg(&mut self, won: bool) {
        self.in_easter_egg = false;
        self.corner_shots = 0;
        self.current_index = if won { EGG_WIN_LEVEL } else { EGG_LOSS_LEVEL };
    }

    /// Mark a regular level cleared. Idempotent.
    pub fn mark_completed(&mut self, index: usize) {
        self.completed.insert(index);
    }

    /// Advance past the current level; `None` once the campaign is over
    pub fn advance(&mut self) -> Option<usize> {
        let next = self.current_index + 1;
        if next >= LEVEL_COUNT {
            return None;
        }
        self.current_index = next;
        Some(next)
    }

    pub fn is_campaign_complete(&self) -> bool {
        (0..LEVEL_COUNT).all(|i| self.completed.contains(&i))
    }
}
