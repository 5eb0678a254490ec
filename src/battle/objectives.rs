//! Objective tracker: hex ownership and victory points
//!
//! An objective changes hands only when one side is its sole living
//! occupant. Contested or empty objectives keep their last owner.

use serde::{Deserialize, Serialize};

use crate::battle::hex::HexCoord;
use crate::battle::units::UnitRoster;
use crate::core::types::{PerSide, Side};

/// Objective as listed in a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub q: i32,
    pub r: i32,
    pub vp: u32,
}

impl ObjectiveTemplate {
    pub fn new(id: &str, coord: HexCoord, vp: u32) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            q: coord.q,
            r: coord.r,
            vp,
        }
    }

    pub fn coord(&self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }
}

/// A point-valued objective hex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub name: String,
    pub coord: HexCoord,
    pub vp: u32,
    pub owner: Option<Side>,
}

impl From<&ObjectiveTemplate> for Objective {
    fn from(template: &ObjectiveTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            coord: template.coord(),
            vp: template.vp,
            owner: None,
        }
    }
}

/// Ownership change produced by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub objective: String,
    pub previous: Option<Side>,
    pub owner: Side,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveTracker {
    objectives: Vec<Objective>,
    victory_points: PerSide<u32>,
}

impl ObjectiveTracker {
    pub fn new(templates: &[ObjectiveTemplate]) -> Self {
        Self {
            objectives: templates.iter().map(Objective::from).collect(),
            victory_points: PerSide::default(),
        }
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn victory_points(&self, side: Side) -> u32 {
        *self.victory_points.get(side)
    }

    pub fn objective_at(&self, coord: HexCoord) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.coord == coord)
    }

    /// Re-derive ownership from occupancy, then recount victory points
    pub fn update(&mut self, roster: &UnitRoster) -> Vec<Capture> {
        let mut captures = Vec::new();
        for objective in &mut self.objectives {
            let ger = roster
                .living_of(Side::Ger)
                .any(|u| u.pos == objective.coord);
            let sov = roster
                .living_of(Side::Sov)
                .any(|u| u.pos == objective.coord);
            let sole = match (ger, sov) {
                (true, false) => Some(Side::Ger),
                (false, true) => Some(Side::Sov),
                _ => None,
            };
            if let Some(side) = sole {
                if objective.owner != Some(side) {
                    captures.push(Capture {
                        objective: objective.id.clone(),
                        previous: objective.owner,
                        owner: side,
                    });
                    objective.owner = Some(side);
                }
            }
        }
        self.recount();
        captures
    }

    fn recount(&mut self) {
        let mut totals = PerSide::new(0, 0);
        for objective in &self.objectives {
            if let Some(owner) = objective.owner {
                *totals.get_mut(owner) += objective.vp;
            }
        }
        self.victory_points = totals;
    }
}
