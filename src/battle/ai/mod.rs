//! AI controller for the computer-driven side
//!
//! Architecture: Trait + scheduler
//! - BattleAI trait defines interface for swappable implementations
//! - AiCommander is the heuristic implementation
//! - AiScheduler paces decisions independently of any render loop

mod commander;
mod scheduler;

pub use commander::{AiCommander, AiDecision};
pub use scheduler::{AiDriver, AiScheduler};

use serde::{Deserialize, Serialize};

use crate::battle::engine::BattleEngine;
use crate::battle::hex::HexCoord;
use crate::battle::units::UnitId;
use crate::core::config::Difficulty;
use crate::core::types::Side;

/// What a single AI invocation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiStep {
    /// Not this AI's turn, or the game is over
    Idle,
    Attacked { unit: UnitId, target: UnitId },
    Moved { unit: UnitId, to: HexCoord },
    Held { unit: UnitId },
    EndedTurn,
}

/// Trait for battle AI implementations
pub trait BattleAI {
    /// Side this AI plays
    fn side(&self) -> Side;

    fn difficulty(&self) -> Difficulty;

    /// Take at most one decision through the engine's action API
    fn step(&mut self, engine: &mut BattleEngine) -> AiStep;
}
