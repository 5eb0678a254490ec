//! AI pacing
//!
//! The host calls `tick()` from whatever loop it runs. The AI acts on
//! every Nth tick of its own turn and never more than once per tick.

use crate::battle::ai::{AiStep, BattleAI};
use crate::battle::engine::BattleEngine;
use crate::core::config::AiConfig;

/// Fires once every `cadence` ticks
#[derive(Debug, Clone)]
pub struct AiScheduler {
    cadence: u32,
    elapsed: u32,
}

impl AiScheduler {
    /// A cadence of 0 is treated as 1
    pub fn new(cadence: u32) -> Self {
        Self {
            cadence: cadence.max(1),
            elapsed: 0,
        }
    }

    pub fn cadence(&self) -> u32 {
        self.cadence
    }

    /// Advance one tick; true when the AI may act
    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.cadence {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }
}

/// Scheduler plus the AI it paces
pub struct AiDriver {
    scheduler: AiScheduler,
    ai: Box<dyn BattleAI>,
}

impl AiDriver {
    pub fn new(ai: Box<dyn BattleAI>, cadence: u32) -> Self {
        Self {
            scheduler: AiScheduler::new(cadence),
            ai,
        }
    }

    pub fn from_config(ai: Box<dyn BattleAI>, config: &AiConfig) -> Self {
        Self::new(ai, config.cadence_ticks)
    }

    pub fn ai(&self) -> &dyn BattleAI {
        self.ai.as_ref()
    }

    /// One host tick: `Some(step)` when the AI took a decision
    ///
    /// Ticks only count while it is the AI's turn.
    pub fn on_tick(&mut self, engine: &mut BattleEngine) -> Option<AiStep> {
        if engine.is_game_over() || engine.active_side() != self.ai.side() {
            self.scheduler.reset();
            return None;
        }
        if !self.scheduler.tick() {
            return None;
        }
        Some(self.ai.step(engine))
    }
}
