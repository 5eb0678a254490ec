//! Scenario files: battlefield, roster, objectives and side rules in TOML
//!
//! This is the boundary layer. Everything here is parsed, defaulted and
//! validated before the engine ever sees it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::battle::battlefield::Battlefield;
use crate::battle::constants::{DEFAULT_MAX_TURN, MAX_MAP_HEXES};
use crate::battle::dice::Dice;
use crate::battle::engine::{BattleEngine, BattleSetup};
use crate::battle::hex::HexCoord;
use crate::battle::objectives::ObjectiveTemplate;
use crate::battle::support::{SideRules, SupportPool};
use crate::battle::terrain::Terrain;
use crate::battle::units::UnitTemplate;
use crate::core::error::{HexfrontError, Result};
use crate::core::types::{PerSide, Turn};

/// A rectangle of one terrain kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainPatch {
    pub terrain: Terrain,
    /// Inclusive `[min, max]`
    pub q: [i32; 2],
    /// Inclusive `[min, max]`
    pub r: [i32; 2],
    #[serde(default)]
    pub district: Option<String>,
}

/// Single-hex override, applied after every patch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexOverride {
    pub q: i32,
    pub r: i32,
    #[serde(default)]
    pub terrain: Option<Terrain>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub elevation: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    pub cols: u32,
    pub rows: u32,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub paint: Vec<TerrainPatch>,
    #[serde(default)]
    pub hex: Vec<HexOverride>,
}

impl MapSpec {
    pub fn build(&self) -> Result<Battlefield> {
        if self.cols < 4 || self.rows < 1 {
            return Err(HexfrontError::InvalidScenario(format!(
                "map {}x{} is too small",
                self.cols, self.rows
            )));
        }
        match self.cols.checked_mul(self.rows) {
            Some(hexes) if hexes <= MAX_MAP_HEXES => {}
            _ => {
                return Err(HexfrontError::InvalidScenario(format!(
                    "map {}x{} exceeds {} hexes",
                    self.cols, self.rows, MAX_MAP_HEXES
                )));
            }
        }
        let mut field = Battlefield::new(self.cols, self.rows, self.terrain);
        for patch in &self.paint {
            if patch.q[0] > patch.q[1] || patch.r[0] > patch.r[1] {
                return Err(HexfrontError::InvalidScenario(format!(
                    "{:?} patch has an inverted range",
                    patch.terrain
                )));
            }
            let (qs, rs) = (patch.q[0]..=patch.q[1], patch.r[0]..=patch.r[1]);
            field.paint_rect(qs, rs, patch.terrain);
            if let Some(district) = &patch.district {
                for q in patch.q[0]..=patch.q[1] {
                    for r in patch.r[0]..=patch.r[1] {
                        field.set_district(HexCoord::new(q, r), district);
                    }
                }
            }
        }
        for hex in &self.hex {
            let coord = HexCoord::new(hex.q, hex.r);
            if !field.in_bounds(coord) {
                return Err(HexfrontError::InvalidScenario(format!(
                    "hex override ({}, {}) is off the map",
                    hex.q, hex.r
                )));
            }
            if let Some(terrain) = hex.terrain {
                field.set_terrain(coord, terrain);
            }
            if let Some(district) = &hex.district {
                field.set_district(coord, district);
            }
            if let Some(elevation) = hex.elevation {
                field.set_elevation(coord, elevation);
            }
        }
        Ok(field)
    }
}

fn default_max_turn() -> Turn {
    DEFAULT_MAX_TURN
}

fn default_support() -> PerSide<SupportPool> {
    PerSide::default_support()
}

fn default_rules() -> PerSide<SideRules> {
    PerSide::default_rules()
}

/// A complete scenario description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_max_turn")]
    pub max_turn: Turn,
    pub map: MapSpec,
    #[serde(default = "default_support")]
    pub support: PerSide<SupportPool>,
    #[serde(default = "default_rules")]
    pub rules: PerSide<SideRules>,
    #[serde(default)]
    pub objectives: Vec<ObjectiveTemplate>,
    #[serde(default)]
    pub units: Vec<UnitTemplate>,
}

impl Scenario {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(contents)?;
        scenario.to_setup()?;
        Ok(scenario)
    }

    /// Load a scenario from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), name = %scenario.name, "Scenario loaded");
        Ok(scenario)
    }

    /// Load a bundled scenario by name from `data/scenarios/`
    pub fn load_named(name: &str) -> Result<Self> {
        Self::load(scenario_path(name))
    }

    /// Build and validate the engine inputs
    pub fn to_setup(&self) -> Result<BattleSetup> {
        let mut setup = BattleSetup::new(self.map.build()?).with_max_turn(self.max_turn);
        setup.units = self.units.clone();
        setup.objectives = self.objectives.clone();
        setup.support_base = self.support;
        setup.rules = self.rules;
        setup.validate()?;
        Ok(setup)
    }

    pub fn build_engine(&self, dice: Box<dyn Dice>) -> Result<BattleEngine> {
        BattleEngine::new(self.to_setup()?, dice)
    }
}

/// Get path to a bundled scenario file
pub fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from("data/scenarios").join(format!("{}.toml", name))
}
