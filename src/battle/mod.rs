//! Battle system - turn-based hex tactics
//!
//! Two sides alternate turns moving and fighting over point-valued
//! objectives under a turn limit.
//!
//! Layout, leaf first:
//! - hex math and the terrain catalog
//! - battlefield and unit roster
//! - movement, supply, combat and objective rules
//! - the engine, which owns all state and exposes the action API
//! - the AI controller, which drives one side through that same API

pub mod ai;
pub mod battlefield;
pub mod combat;
pub mod constants;
pub mod dice;
pub mod engine;
pub mod events;
pub mod hex;
pub mod morale;
pub mod movement;
pub mod objectives;
pub mod supply;
pub mod support;
pub mod terrain;
pub mod turn;
pub mod units;

// Re-exports for convenient access
pub use ai::{AiCommander, AiDecision, AiDriver, AiScheduler, AiStep, BattleAI};
pub use battlefield::{Battlefield, Tile};
pub use combat::{
    bombard_hits, effective_attack, effective_defense, melee_exchange, AttackOutcome,
    BombardOutcome, SupportAsset,
};
pub use constants::*;
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use engine::{
    BattleEngine, BattleSetup, FortifyOutcome, MoveOutcome, ResupplyOutcome, TurnOutcome,
};
pub use events::{BattleEvent, BattleEventLog, BattleEventType};
pub use hex::{HexCoord, HexDirection};
pub use movement::{reachable, ReachKey, ReachableHex};
pub use objectives::{Objective, ObjectiveTemplate, ObjectiveTracker};
pub use supply::is_supplied;
pub use support::{ArtilleryBonus, SideRules, SupplyEdge, SupportPool};
pub use terrain::Terrain;
pub use turn::{GameOutcome, TurnState};
pub use units::{Unit, UnitId, UnitRoster, UnitTemplate};
