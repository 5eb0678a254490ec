//! Combat resolution: melee and bombardment
//!
//! Stat differential plus one d6. Resolution here is pure arithmetic; the
//! engine checks legality and applies the results to the roster.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{
    AIR_STRIKE_BONUS, AMMO_ATTACK_BONUS, BOMBARD_DAMAGE, BOMBARD_HIT_THRESHOLD, COUNTER_BASE,
    COUNTER_DIVISOR, DAMAGE_DIVISOR, MORALE_DIVISOR, UNSUPPLIED_ATTACK_PENALTY,
};
use crate::battle::morale::apply_morale_loss;
use crate::battle::units::{Unit, UnitId};

/// Attack value of a unit striking in melee
pub fn effective_attack(attacker: &Unit) -> i32 {
    let ammo = if attacker.ammo > 0 {
        AMMO_ATTACK_BONUS
    } else {
        0
    };
    let supply = if attacker.supplied {
        0
    } else {
        UNSUPPLIED_ATTACK_PENALTY
    };
    attacker.atk + attacker.morale.div_euclid(MORALE_DIVISOR) + ammo - supply
}

/// Defense value of a unit holding a hex with `terrain_bonus`
pub fn effective_defense(defender: &Unit, terrain_bonus: i32) -> i32 {
    let morale = defender.morale.div_euclid(MORALE_DIVISOR);
    defender.def + terrain_bonus + defender.entrenchment + morale
}

/// Damage to the defender and counter-damage to the attacker
pub fn melee_exchange(atk: i32, def: i32, roll: i32) -> (i32, i32) {
    let damage = (atk + roll - def).div_euclid(DAMAGE_DIVISOR).max(0);
    let counter = (def + COUNTER_BASE - atk)
        .div_euclid(COUNTER_DIVISOR)
        .max(0);
    (damage, counter)
}

/// Does a bombardment roll land?
pub fn bombard_hits(roll: i32, used_air: bool, terrain_bonus: i32) -> bool {
    let air = if used_air { AIR_STRIKE_BONUS } else { 0 };
    roll + air - terrain_bonus >= BOMBARD_HIT_THRESHOLD
}

/// Take `amount` damage; any nonzero loss shakes morale
pub fn apply_damage(unit: &mut Unit, amount: i32) {
    if amount > 0 {
        unit.hp -= amount;
        apply_morale_loss(unit);
    }
}

/// Result of a melee attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub attack_value: i32,
    pub defense_value: i32,
    pub roll: i32,
    pub damage: i32,
    pub counter: i32,
    pub attacker_destroyed: bool,
    pub defender_destroyed: bool,
}

impl AttackOutcome {
    /// Neither side lost anything
    pub fn no_effect(&self) -> bool {
        self.damage == 0 && self.counter == 0
    }
}

/// Which support asset a bombardment used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportAsset {
    Artillery,
    Air,
}

/// Result of a bombardment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombardOutcome {
    pub target: UnitId,
    pub asset: SupportAsset,
    pub roll: i32,
    pub hit: bool,
    pub target_destroyed: bool,
}

impl BombardOutcome {
    pub fn used_air(&self) -> bool {
        self.asset == SupportAsset::Air
    }
}

/// Melee between two units: mutates both, returns the exchange
///
/// Destruction flags are left false; the caller settles casualties.
pub fn resolve_attack(
    attacker: &mut Unit,
    defender: &mut Unit,
    terrain_bonus: i32,
    roll: i32,
) -> AttackOutcome {
    let attack_value = effective_attack(attacker);
    let defense_value = effective_defense(defender, terrain_bonus);
    let (damage, counter) = melee_exchange(attack_value, defense_value, roll);

    apply_damage(defender, damage);
    apply_damage(attacker, counter);
    attacker.ammo = (attacker.ammo - 1).max(0);
    attacker.acted = true;

    AttackOutcome {
        attacker: attacker.id,
        defender: defender.id,
        attack_value,
        defense_value,
        roll,
        damage,
        counter,
        attacker_destroyed: false,
        defender_destroyed: false,
    }
}

/// Bombard a unit; a hit costs one hp and one morale step
pub fn resolve_bombard(
    target: &mut Unit,
    terrain_bonus: i32,
    roll: i32,
    asset: SupportAsset,
) -> BombardOutcome {
    let hit = bombard_hits(roll, asset == SupportAsset::Air, terrain_bonus);
    if hit {
        apply_damage(target, BOMBARD_DAMAGE);
    }
    BombardOutcome {
        target: target.id,
        asset,
        roll,
        hit,
        target_destroyed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::hex::HexCoord;
    use crate::battle::units::UnitTemplate;
    use crate::core::types::Side;

    fn unit(side: Side, atk: i32, def: i32, morale: i32) -> Unit {
        let template =
            UnitTemplate::new(side, "U", HexCoord::new(0, 0)).with_stats(atk, def, 4, 8, morale);
        Unit::from_template(&template)
    }

    #[test]
    fn test_effective_values() {
        let mut attacker = unit(Side::Ger, 7, 5, 7);
        attacker.ammo = 1;
        assert_eq!(effective_attack(&attacker), 10);

        let mut defender = unit(Side::Sov, 4, 6, 7);
        defender.entrenchment = 1;
        assert_eq!(effective_defense(&defender, 2), 11);
    }

    #[test]
    fn test_unsupplied_without_ammo() {
        let mut attacker = unit(Side::Ger, 7, 5, 3);
        attacker.ammo = 0;
        attacker.supplied = false;
        assert_eq!(effective_attack(&attacker), 7 + 1 - 2);
    }

    #[test]
    fn test_melee_exchange_reference() {
        assert_eq!(melee_exchange(10, 11, 4), (1, 1));
    }

    #[test]
    fn test_melee_exchange_never_negative() {
        assert_eq!(melee_exchange(2, 15, 1), (0, 4));
        assert_eq!(melee_exchange(20, 5, 6), (10, 0));
    }

    #[test]
    fn test_resolve_attack_effects() {
        let mut attacker = unit(Side::Ger, 7, 5, 7);
        attacker.ammo = 1;
        let mut defender = unit(Side::Sov, 4, 6, 7);
        defender.entrenchment = 1;

        let outcome = resolve_attack(&mut attacker, &mut defender, 2, 4);
        assert_eq!(outcome.damage, 1);
        assert_eq!(outcome.counter, 1);
        assert_eq!(defender.hp, 7);
        assert_eq!(attacker.hp, 7);
        assert_eq!(defender.morale, 6);
        assert_eq!(attacker.morale, 6);
        assert_eq!(attacker.ammo, 0);
        assert!(attacker.acted);
        assert!(!defender.acted);
    }

    #[test]
    fn test_zero_damage_keeps_morale() {
        let mut attacker = unit(Side::Ger, 20, 5, 9);
        let mut defender = unit(Side::Sov, 4, 1, 9);
        let outcome = resolve_attack(&mut attacker, &mut defender, 0, 6);
        assert_eq!(outcome.counter, 0);
        assert_eq!(attacker.morale, 9);
        assert!(defender.morale < 9);
    }

    #[test]
    fn test_ammo_floor() {
        let mut attacker = unit(Side::Ger, 6, 6, 6);
        attacker.ammo = 0;
        let mut defender = unit(Side::Sov, 6, 6, 6);
        resolve_attack(&mut attacker, &mut defender, 0, 3);
        assert_eq!(attacker.ammo, 0);
    }

    #[test]
    fn test_bombard_reference_hit() {
        let mut target = unit(Side::Sov, 5, 5, 7);
        let outcome = resolve_bombard(&mut target, 2, 5, SupportAsset::Air);
        assert!(outcome.hit);
        assert_eq!(target.hp, 7);
        assert_eq!(target.morale, 6);
    }

    #[test]
    fn test_bombard_artillery_misses_without_bonus() {
        let mut target = unit(Side::Sov, 5, 5, 7);
        let outcome = resolve_bombard(&mut target, 2, 5, SupportAsset::Artillery);
        assert!(!outcome.hit);
        assert_eq!(target.hp, 8);
        assert_eq!(target.morale, 7);
    }

    #[test]
    fn test_bunker_shrugs_off_bombardment() {
        for roll in 1..=6 {
            assert!(!bombard_hits(roll, true, 4));
        }
        assert!(bombard_hits(6, true, 3));
        assert!(!bombard_hits(6, false, 3));
    }
}
