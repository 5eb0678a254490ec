//! Unit entity store
//!
//! Units are never removed from the roster: a destroyed unit keeps its slot
//! and id with `alive = false` and drops out of every query.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::battle::constants::STARTING_AMMO;
use crate::battle::hex::HexCoord;
use crate::battle::morale::clamp_morale;
use crate::core::types::Side;

/// Unique identifier for units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

/// Starting roster entry, as provided by a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTemplate {
    pub side: Side,
    pub name: String,
    #[serde(default)]
    pub army: String,
    pub q: i32,
    pub r: i32,
    pub atk: i32,
    pub def: i32,
    pub mp: u32,
    pub hp: i32,
    pub morale: i32,
}

impl UnitTemplate {
    /// Line infantry defaults
    pub fn new(side: Side, name: &str, pos: HexCoord) -> Self {
        Self {
            side,
            name: name.to_string(),
            army: String::new(),
            q: pos.q,
            r: pos.r,
            atk: 6,
            def: 6,
            mp: 4,
            hp: 8,
            morale: 7,
        }
    }

    pub fn with_stats(mut self, atk: i32, def: i32, mp: u32, hp: i32, morale: i32) -> Self {
        self.atk = atk;
        self.def = def;
        self.mp = mp;
        self.hp = hp;
        self.morale = morale;
        self
    }

    pub fn pos(&self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }
}

/// A unit on the battlefield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub side: Side,
    pub name: String,
    pub army: String,

    // Position
    pub pos: HexCoord,

    // Combat attributes
    pub atk: i32,
    pub def: i32,
    pub mp_max: u32,
    pub hp: i32,

    // State
    pub mp_left: u32,
    /// `MORALE_MIN..=MORALE_MAX`
    pub morale: i32,
    /// `0..=AMMO_MAX`
    pub ammo: i32,
    /// `0..=ENTRENCHMENT_MAX`
    pub entrenchment: i32,
    pub supplied: bool,
    pub acted: bool,
    pub alive: bool,
}

impl Unit {
    pub fn from_template(template: &UnitTemplate) -> Self {
        Self {
            id: UnitId::new(),
            side: template.side,
            name: template.name.clone(),
            army: template.army.clone(),
            pos: template.pos(),
            atk: template.atk,
            def: template.def,
            mp_max: template.mp,
            hp: template.hp,
            mp_left: template.mp,
            morale: clamp_morale(template.morale),
            ammo: STARTING_AMMO,
            entrenchment: 0,
            supplied: true,
            acted: false,
            alive: true,
        }
    }
}

/// Ordered roster of every unit in the battle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitRoster {
    units: Vec<Unit>,
}

impl UnitRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, template: &UnitTemplate) -> UnitId {
        let unit = Unit::from_template(template);
        let id = unit.id;
        self.units.push(unit);
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// Every unit, destroyed ones included, in roster order
    pub fn all(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.alive)
    }

    pub fn living_of(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.living().filter(move |u| u.side == side)
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.living_of(side).count()
    }

    /// Living unit standing on `coord`
    pub fn unit_at(&self, coord: HexCoord) -> Option<&Unit> {
        self.living().find(|u| u.pos == coord)
    }

    /// Is `coord` held by a living unit hostile to `side`?
    pub fn enemy_at(&self, coord: HexCoord, side: Side) -> bool {
        self.unit_at(coord).is_some_and(|u| u.side != side)
    }

    /// Mark units with `hp <= 0` as destroyed, returning their ids
    pub fn cleanup_dead(&mut self) -> Vec<UnitId> {
        let mut destroyed = Vec::new();
        for unit in self.units.iter_mut().filter(|u| u.alive && u.hp <= 0) {
            unit.alive = false;
            destroyed.push(unit.id);
        }
        destroyed
    }
}
