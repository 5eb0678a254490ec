//! Support pools and per-side scripted turn rules
//!
//! Each side draws artillery, air and supply actions from a pool that is
//! rebuilt from scenario base values whenever that side's turn begins.

use serde::{Deserialize, Serialize};

use crate::battle::constants::SUPPLY_EDGE_INSET;
use crate::core::types::{PerSide, Side, Turn};

/// Off-map support available to one side this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportPool {
    pub artillery: u32,
    pub air: u32,
    pub supply: u32,
}

impl SupportPool {
    pub fn new(artillery: u32, air: u32, supply: u32) -> Self {
        Self {
            artillery,
            air,
            supply,
        }
    }

    pub fn has_fire_support(&self) -> bool {
        self.artillery > 0 || self.air > 0
    }
}

impl PerSide<SupportPool> {
    /// Base pools: GER {arty 1, air 1, supply 1}, SOV {arty 1, air 0, supply 1}
    pub fn default_support() -> Self {
        PerSide::new(SupportPool::new(1, 1, 1), SupportPool::new(1, 0, 1))
    }
}

/// Map edge a side draws supply from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyEdge {
    West,
    East,
}

impl SupplyEdge {
    /// Column holding the supply source on a map `cols` wide
    pub fn column(&self, cols: u32) -> i32 {
        match self {
            SupplyEdge::West => SUPPLY_EDGE_INSET,
            SupplyEdge::East => cols as i32 - 1 - SUPPLY_EDGE_INSET,
        }
    }
}

/// Artillery reinforcement arriving from a given turn onward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtilleryBonus {
    pub from_turn: Turn,
    pub amount: u32,
}

/// Scripted per-side turn rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRules {
    pub supply_edge: SupplyEdge,
    /// May spend air support when bombarding
    #[serde(default)]
    pub air_qualified: bool,
    /// MP lost by every unit on even turns
    #[serde(default)]
    pub even_turn_mp_penalty: u32,
    /// Air lost from the base pool on even turns
    #[serde(default)]
    pub even_turn_air_loss: u32,
    #[serde(default)]
    pub artillery_bonus: Option<ArtilleryBonus>,
}

impl SideRules {
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Ger => Self {
                supply_edge: SupplyEdge::West,
                air_qualified: true,
                even_turn_mp_penalty: 1,
                even_turn_air_loss: 1,
                artillery_bonus: None,
            },
            Side::Sov => Self {
                supply_edge: SupplyEdge::East,
                air_qualified: false,
                even_turn_mp_penalty: 0,
                even_turn_air_loss: 0,
                artillery_bonus: Some(ArtilleryBonus {
                    from_turn: 4,
                    amount: 1,
                }),
            },
        }
    }

    /// MP a unit with `mp_max` starts `turn` with
    pub fn mp_for_turn(&self, mp_max: u32, turn: Turn) -> u32 {
        let penalty = if turn % 2 == 0 {
            self.even_turn_mp_penalty
        } else {
            0
        };
        mp_max.saturating_sub(penalty)
    }

    /// Rebuild this side's pool for `turn` from its base values
    pub fn pool_for_turn(&self, base: SupportPool, turn: Turn) -> SupportPool {
        let bonus = self
            .artillery_bonus
            .filter(|b| turn >= b.from_turn)
            .map_or(0, |b| b.amount);
        let air_loss = if turn % 2 == 0 {
            self.even_turn_air_loss
        } else {
            0
        };
        SupportPool {
            artillery: base.artillery + bonus,
            air: base.air.saturating_sub(air_loss),
            supply: base.supply,
        }
    }
}

impl PerSide<SideRules> {
    pub fn default_rules() -> Self {
        PerSide::new(
            SideRules::for_side(Side::Ger),
            SideRules::for_side(Side::Sov),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_edge_columns() {
        assert_eq!(SupplyEdge::West.column(28), 1);
        assert_eq!(SupplyEdge::East.column(28), 26);
    }

    #[test]
    fn test_ger_even_turn_penalties() {
        let rules = SideRules::for_side(Side::Ger);
        let base = SupportPool::new(1, 1, 1);
        assert_eq!(rules.mp_for_turn(4, 1), 4);
        assert_eq!(rules.mp_for_turn(4, 2), 3);
        assert_eq!(rules.pool_for_turn(base, 1).air, 1);
        assert_eq!(rules.pool_for_turn(base, 2).air, 0);
    }

    #[test]
    fn test_mp_penalty_saturates() {
        let rules = SideRules::for_side(Side::Ger);
        assert_eq!(rules.mp_for_turn(0, 2), 0);
    }

    #[test]
    fn test_sov_artillery_from_turn_four() {
        let rules = SideRules::for_side(Side::Sov);
        let base = SupportPool::new(1, 0, 1);
        assert_eq!(rules.pool_for_turn(base, 3).artillery, 1);
        assert_eq!(rules.pool_for_turn(base, 4).artillery, 2);
        assert_eq!(rules.pool_for_turn(base, 9).artillery, 2);
        assert_eq!(rules.mp_for_turn(5, 2), 5);
    }

    #[test]
    fn test_fire_support() {
        assert!(!SupportPool::new(0, 0, 3).has_fire_support());
        assert!(SupportPool::new(0, 1, 0).has_fire_support());
    }
}
