//! Terrain catalog
//!
//! Static lookup from terrain kind to movement cost and defense bonus.

use serde::{Deserialize, Serialize};

/// Terrain kind of a battlefield hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    /// Open ground
    #[default]
    Steppe,
    /// Low-rise housing
    Suburb,
    /// Dense blocks
    City,
    /// Rubble, excellent cover
    Ruins,
    /// Factories and works
    Industry,
    Hill,
    /// Slow to climb, strong position
    Ridge,
    Road,
    Rail,
    /// Unbridged, impassable
    River,
    Bridge,
    Port,
    /// Far bank staging ground
    EastBank,
    Woods,
    /// Slow going, poor cover
    Marsh,
    Trench,
    /// Best defensive terrain
    Bunker,
}

impl Terrain {
    /// Every terrain kind, in catalog order
    pub const ALL: [Terrain; 17] = [
        Terrain::Steppe,
        Terrain::Suburb,
        Terrain::City,
        Terrain::Ruins,
        Terrain::Industry,
        Terrain::Hill,
        Terrain::Ridge,
        Terrain::Road,
        Terrain::Rail,
        Terrain::River,
        Terrain::Bridge,
        Terrain::Port,
        Terrain::EastBank,
        Terrain::Woods,
        Terrain::Marsh,
        Terrain::Trench,
        Terrain::Bunker,
    ];

    /// MP cost to enter, or `None` if the hex can never be entered
    pub fn movement_cost(&self) -> Option<u32> {
        match self {
            Terrain::Steppe
            | Terrain::Suburb
            | Terrain::Road
            | Terrain::Rail
            | Terrain::Bridge
            | Terrain::Port
            | Terrain::EastBank => Some(1),
            Terrain::City
            | Terrain::Ruins
            | Terrain::Industry
            | Terrain::Hill
            | Terrain::Woods
            | Terrain::Trench
            | Terrain::Bunker => Some(2),
            Terrain::Ridge | Terrain::Marsh => Some(3),
            Terrain::River => None,
        }
    }

    /// Additive defense bonus for a unit standing here
    pub fn defense_bonus(&self) -> i32 {
        match self {
            Terrain::Steppe | Terrain::Road | Terrain::River | Terrain::Bridge => 0,
            Terrain::Suburb
            | Terrain::Rail
            | Terrain::Port
            | Terrain::EastBank
            | Terrain::Marsh => 1,
            Terrain::City | Terrain::Hill | Terrain::Woods | Terrain::Trench => 2,
            Terrain::Ruins | Terrain::Industry | Terrain::Ridge => 3,
            Terrain::Bunker => 4,
        }
    }

    pub fn is_passable(&self) -> bool {
        self.movement_cost().is_some()
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Terrain::Steppe => "Steppe",
            Terrain::Suburb => "Suburb",
            Terrain::City => "City",
            Terrain::Ruins => "Ruins",
            Terrain::Industry => "Industry",
            Terrain::Hill => "Hill",
            Terrain::Ridge => "Ridge",
            Terrain::Road => "Road",
            Terrain::Rail => "Rail",
            Terrain::River => "River",
            Terrain::Bridge => "Bridge",
            Terrain::Port => "Port",
            Terrain::EastBank => "East Bank",
            Terrain::Woods => "Woods",
            Terrain::Marsh => "Marsh",
            Terrain::Trench => "Trench",
            Terrain::Bunker => "Bunker",
        }
    }
}
