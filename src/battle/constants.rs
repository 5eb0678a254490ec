//! Battle rule constants - all tunable values in one place
//!
//! All modifiers are additive integers.

// Unit attribute bounds
pub const MORALE_MIN: i32 = 3;
pub const MORALE_MAX: i32 = 9;
pub const AMMO_MAX: i32 = 2;
pub const ENTRENCHMENT_MAX: i32 = 2;
pub const STARTING_AMMO: i32 = 2;

// Map size: largest scenario map, 256 x 256
pub const MAX_MAP_HEXES: u32 = 65_536;

// Movement
pub const ZOC_STEP_PENALTY: u32 = 1;

// Melee
pub const MORALE_DIVISOR: i32 = 3; // morale / 3 added to attack and defense
pub const AMMO_ATTACK_BONUS: i32 = 1;
pub const UNSUPPLIED_ATTACK_PENALTY: i32 = 2;
pub const DAMAGE_DIVISOR: i32 = 2;
pub const COUNTER_BASE: i32 = 3;
pub const COUNTER_DIVISOR: i32 = 4;

// Bombardment
pub const BOMBARD_HIT_THRESHOLD: i32 = 4;
pub const AIR_STRIKE_BONUS: i32 = 1;
pub const BOMBARD_DAMAGE: i32 = 1;

// Turns
pub const DEFAULT_MAX_TURN: u32 = 18;

// Supply edge: friendly supply column sits one hex in from the map edge
pub const SUPPLY_EDGE_INSET: i32 = 1;
pub const SUPPLY_EDGE_REACH: u32 = 1;

// AI
pub const AI_ADVANCE_ENTRENCHMENT_CAP: i32 = 1;
