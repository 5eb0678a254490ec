//! Movement engine: cost-bounded reachability
//!
//! Dijkstra over the hex graph with terrain entry costs and a zone-of-control
//! surcharge. Only minimum costs are kept, never routes.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::battle::battlefield::Battlefield;
use crate::battle::constants::ZOC_STEP_PENALTY;
use crate::battle::hex::HexCoord;
use crate::battle::units::{Unit, UnitId, UnitRoster};
use crate::core::types::{Side, Turn};

/// A hex a unit can reach this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachableHex {
    pub coord: HexCoord,
    /// Minimum MP spent to get here
    pub cost: u32,
    /// MP left on arrival
    pub mp_remaining: u32,
}

/// Node in the Dijkstra frontier
#[derive(Debug, Clone, Copy)]
struct FrontierNode {
    coord: HexCoord,
    cost: u32,
    seq: u64, // insertion order, keeps equal-cost pops deterministic
}

impl PartialEq for FrontierNode {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for FrontierNode {}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Hexes adjacent to any living unit hostile to `side`
pub fn enemy_zoc(roster: &UnitRoster, side: Side) -> AHashSet<HexCoord> {
    roster
        .living()
        .filter(|u| u.side != side)
        .flat_map(|u| u.pos.neighbors())
        .collect()
}

/// Cost of a single step from `from` into the adjacent hex `to`
///
/// `None` if `to` is off-map, impassable, or held by an enemy.
pub fn step_cost(
    field: &Battlefield,
    roster: &UnitRoster,
    zoc: &AHashSet<HexCoord>,
    side: Side,
    from: HexCoord,
    to: HexCoord,
) -> Option<u32> {
    let terrain_cost = field.movement_cost_at(to)?;
    if roster.enemy_at(to, side) {
        return None;
    }
    let zoc_cost = if zoc.contains(&to) || zoc.contains(&from) {
        ZOC_STEP_PENALTY
    } else {
        0
    };
    Some(terrain_cost + zoc_cost)
}

/// Every hex `unit` can reach with its remaining MP, start hex included
///
/// Results come in the order hexes were finalized, cheapest first.
pub fn reachable(field: &Battlefield, roster: &UnitRoster, unit: &Unit) -> Vec<ReachableHex> {
    let budget = unit.mp_left;
    let zoc = enemy_zoc(roster, unit.side);

    let mut best: AHashMap<HexCoord, u32> = AHashMap::new();
    let mut settled: AHashSet<HexCoord> = AHashSet::new();
    let mut frontier = BinaryHeap::new();
    let mut results = Vec::new();
    let mut seq = 0u64;

    best.insert(unit.pos, 0);
    frontier.push(FrontierNode {
        coord: unit.pos,
        cost: 0,
        seq,
    });

    while let Some(current) = frontier.pop() {
        if !settled.insert(current.coord) {
            continue; // stale entry
        }
        results.push(ReachableHex {
            coord: current.coord,
            cost: current.cost,
            mp_remaining: budget - current.cost,
        });

        let here = current.coord;
        for neighbor in here.neighbors() {
            if settled.contains(&neighbor) {
                continue;
            }
            let Some(step) = step_cost(field, roster, &zoc, unit.side, here, neighbor) else {
                continue;
            };
            let tentative = current.cost + step;
            if tentative > budget {
                continue;
            }
            if best.get(&neighbor).map_or(true, |&known| tentative < known) {
                best.insert(neighbor, tentative);
                seq += 1;
                frontier.push(FrontierNode {
                    coord: neighbor,
                    cost: tentative,
                    seq,
                });
            }
        }
    }

    results
}

/// Memo key: anything that changes the reachable set of one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReachKey {
    pub unit: UnitId,
    pub pos: HexCoord,
    pub mp_left: u32,
    pub acted: bool,
    pub active_side: Side,
    pub turn: Turn,
}

impl ReachKey {
    pub fn for_unit(unit: &Unit, active_side: Side, turn: Turn) -> Self {
        Self {
            unit: unit.id,
            pos: unit.pos,
            mp_left: unit.mp_left,
            acted: unit.acted,
            active_side,
            turn,
        }
    }
}

/// Memoized reachable sets, dropped wholesale on any state mutation
#[derive(Debug, Clone, Default)]
pub struct ReachCache {
    entries: RefCell<AHashMap<ReachKey, Vec<ReachableHex>>>,
}

impl ReachCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &self,
        key: ReachKey,
        compute: impl FnOnce() -> Vec<ReachableHex>,
    ) -> Vec<ReachableHex> {
        if let Some(hit) = self.entries.borrow().get(&key) {
            return hit.clone();
        }
        let fresh = compute();
        self.entries.borrow_mut().insert(key, fresh.clone());
        fresh
    }

    pub fn invalidate(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
