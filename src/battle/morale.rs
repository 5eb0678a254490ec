//! Morale adjustments
//!
//! Morale always stays in `MORALE_MIN..=MORALE_MAX`.

use crate::battle::constants::{MORALE_MAX, MORALE_MIN};
use crate::battle::units::Unit;

/// Clamp a raw morale value into the legal band
pub fn clamp_morale(morale: i32) -> i32 {
    morale.clamp(MORALE_MIN, MORALE_MAX)
}

/// Lose one morale step, never below the floor
pub fn apply_morale_loss(unit: &mut Unit) {
    unit.morale = (unit.morale - 1).max(MORALE_MIN);
}

/// Gain one morale step, never above the ceiling
pub fn apply_morale_gain(unit: &mut Unit) {
    unit.morale = (unit.morale + 1).min(MORALE_MAX);
}
