//! Supply network: can a unit trace a line back to its side's edge?
//!
//! Plain breadth-first flood fill. Impassable terrain and enemy-held hexes
//! block the trace.

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::battle::battlefield::Battlefield;
use crate::battle::constants::SUPPLY_EDGE_REACH;
use crate::battle::support::SupplyEdge;
use crate::battle::units::{Unit, UnitRoster};

/// Does `unit` connect to its supply edge?
pub fn is_supplied(
    field: &Battlefield,
    roster: &UnitRoster,
    unit: &Unit,
    edge: SupplyEdge,
) -> bool {
    let source_col = edge.column(field.cols());
    let mut visited = AHashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(unit.pos);
    queue.push_back(unit.pos);

    while let Some(coord) = queue.pop_front() {
        if (coord.q - source_col).unsigned_abs() <= SUPPLY_EDGE_REACH {
            return true;
        }
        for neighbor in coord.neighbors() {
            if visited.contains(&neighbor)
                || !field.is_passable(neighbor)
                || roster.enemy_at(neighbor, unit.side)
            {
                continue;
            }
            visited.insert(neighbor);
            queue.push_back(neighbor);
        }
    }

    false
}
