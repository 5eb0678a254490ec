//! Battle event log for the UI and log layer

use serde::{Deserialize, Serialize};

use crate::battle::hex::HexCoord;
use crate::battle::units::UnitId;
use crate::core::types::{Side, Turn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleEvent {
    pub turn: Turn,
    pub side: Side,
    pub event_type: BattleEventType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEventType {
    Moved {
        unit_id: UnitId,
        from: HexCoord,
        to: HexCoord,
    },
    Attacked {
        attacker: UnitId,
        defender: UnitId,
        damage: i32,
        counter: i32,
    },
    Bombarded { target: UnitId, hit: bool },
    Fortified { unit_id: UnitId, entrenchment: i32 },
    Resupplied { unit_id: UnitId },
    Held { unit_id: UnitId },
    UnitDestroyed { unit_id: UnitId, was_selected: bool },
    ObjectiveCaptured { objective: String, owner: Side },
    OutOfSupply { unit_id: UnitId },
    TurnEnded { next_side: Side, turn: Turn },
    GameOver { winner: Option<Side> },
}

/// Ordered log of everything that happened in a battle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleEventLog {
    pub events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        turn: Turn,
        side: Side,
        event_type: BattleEventType,
        description: String,
    ) {
        self.events.push(BattleEvent {
            turn,
            side,
            event_type,
            description,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&BattleEvent> {
        self.events.last()
    }

    /// Events appended after the first `since`
    pub fn since(&self, since: usize) -> &[BattleEvent] {
        self.events.get(since..).unwrap_or(&[])
    }
}
