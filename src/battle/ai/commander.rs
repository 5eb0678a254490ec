//! AI Commander - heuristic battle AI
//!
//! One decision per invocation, for the first un-acted unit in roster
//! order: strike the weakest adjacent enemy, else advance on the nearest
//! objective the side does not hold, else stand fast.

use crate::battle::ai::{AiStep, BattleAI};
use crate::battle::constants::AI_ADVANCE_ENTRENCHMENT_CAP;
use crate::battle::engine::BattleEngine;
use crate::battle::hex::HexCoord;
use crate::battle::units::{Unit, UnitId};
use crate::core::config::Difficulty;
use crate::core::types::Side;

/// A decision the commander wants to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiDecision {
    /// Not our turn, or nothing can happen
    Wait,
    Attack { unit: UnitId, target: UnitId },
    Move { unit: UnitId, dest: HexCoord },
    Hold { unit: UnitId },
    EndTurn,
}

/// AI Commander implementing BattleAI trait
#[derive(Debug, Clone)]
pub struct AiCommander {
    side: Side,
    difficulty: Difficulty,
}

impl AiCommander {
    pub fn new(side: Side, difficulty: Difficulty) -> Self {
        Self { side, difficulty }
    }

    /// Pick the next decision without touching the engine
    pub fn decide(&self, engine: &BattleEngine) -> AiDecision {
        if engine.is_game_over() || engine.active_side() != self.side {
            return AiDecision::Wait;
        }
        let Some(unit) = engine.roster().living_of(self.side).find(|u| !u.acted) else {
            return AiDecision::EndTurn;
        };

        if let Some(target) = self.weakest_adjacent_enemy(engine, unit) {
            return AiDecision::Attack {
                unit: unit.id,
                target,
            };
        }

        if let Some(dest) = self.advance_hex(engine, unit) {
            return AiDecision::Move {
                unit: unit.id,
                dest,
            };
        }

        AiDecision::Hold { unit: unit.id }
    }

    /// Lowest-hp adjacent enemy; ties go to the earlier roster entry
    fn weakest_adjacent_enemy(&self, engine: &BattleEngine, unit: &Unit) -> Option<UnitId> {
        engine
            .roster()
            .living_of(self.side.opponent())
            .filter(|enemy| enemy.pos.is_adjacent(&unit.pos))
            .min_by_key(|enemy| enemy.hp)
            .map(|enemy| enemy.id)
    }

    /// Nearest objective not held by this side
    fn target_objective(&self, engine: &BattleEngine, from: HexCoord) -> Option<HexCoord> {
        engine
            .objectives()
            .iter()
            .filter(|o| o.owner != Some(self.side))
            .min_by_key(|o| o.coord.distance(&from))
            .map(|o| o.coord)
    }

    /// Free reachable hex closest to the target objective
    fn advance_hex(&self, engine: &BattleEngine, unit: &Unit) -> Option<HexCoord> {
        let objective = self.target_objective(engine, unit.pos)?;
        engine
            .reachable(unit.id)
            .into_iter()
            .filter(|h| engine.unit_at(h.coord).is_none())
            .min_by_key(|h| h.coord.distance(&objective))
            .map(|h| h.coord)
    }

    fn hold(&self, engine: &mut BattleEngine, unit: UnitId) -> AiStep {
        match engine.request_hold(unit) {
            Ok(()) => AiStep::Held { unit },
            Err(e) => {
                tracing::warn!(?unit, error = %e, "AI hold rejected");
                AiStep::Idle
            }
        }
    }
}

impl BattleAI for AiCommander {
    fn side(&self) -> Side {
        self.side
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn step(&mut self, engine: &mut BattleEngine) -> AiStep {
        let decision = self.decide(engine);
        tracing::debug!(side = %self.side, ?decision, "AI decision");

        match decision {
            AiDecision::Wait => AiStep::Idle,
            AiDecision::Attack { unit, target } => match engine.request_attack(unit, target) {
                Ok(_) => AiStep::Attacked { unit, target },
                Err(e) => {
                    tracing::warn!(?unit, error = %e, "AI attack rejected, holding");
                    self.hold(engine, unit)
                }
            },
            AiDecision::Move { unit, dest } => match engine.request_move(unit, dest) {
                Ok(_) => {
                    if self.difficulty.entrenches_on_advance() {
                        if let Err(e) = engine.request_dig_in(unit, AI_ADVANCE_ENTRENCHMENT_CAP) {
                            tracing::debug!(?unit, error = %e, "AI could not dig in");
                        }
                    }
                    AiStep::Moved { unit, to: dest }
                }
                Err(e) => {
                    tracing::warn!(?unit, error = %e, "AI move rejected, holding");
                    self.hold(engine, unit)
                }
            },
            AiDecision::Hold { unit } => self.hold(engine, unit),
            AiDecision::EndTurn => match engine.end_turn() {
                Ok(_) => AiStep::EndedTurn,
                Err(_) => AiStep::Idle,
            },
        }
    }
}
