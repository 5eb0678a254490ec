//! Combat dice
//!
//! All combat randomness flows through one `Dice` owned by the engine.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of six-sided die rolls
pub trait Dice {
    /// Uniform roll in `1..=6`
    fn roll_d6(&mut self) -> i32;
}

/// Reproducible dice seeded from a `u64`
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn roll_d6(&mut self) -> i32 {
        self.rng.gen_range(1..=6)
    }
}

/// Replays a fixed sequence of rolls, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: Vec<i32>,
    next: usize,
}

impl ScriptedDice {
    /// Rolls outside `1..=6` are clamped; an empty script always rolls 1
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        let rolls: Vec<i32> = rolls.into_iter().map(|r| r.clamp(1, 6)).collect();
        Self { rolls, next: 0 }
    }

    pub fn always(roll: i32) -> Self {
        Self::new([roll])
    }
}

impl Dice for ScriptedDice {
    fn roll_d6(&mut self) -> i32 {
        if self.rolls.is_empty() {
            return 1;
        }
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_dice_in_range() {
        let mut dice = SeededDice::new(42);
        for _ in 0..500 {
            let roll = dice.roll_d6();
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn test_seeded_dice_reproducible() {
        let mut a = SeededDice::new(7);
        let mut b = SeededDice::new(7);
        let rolls_a: Vec<_> = (0..20).map(|_| a.roll_d6()).collect();
        let rolls_b: Vec<_> = (0..20).map(|_| b.roll_d6()).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_scripted_dice_cycles() {
        let mut dice = ScriptedDice::new([4, 2, 9]);
        assert_eq!(dice.roll_d6(), 4);
        assert_eq!(dice.roll_d6(), 2);
        assert_eq!(dice.roll_d6(), 6);
        assert_eq!(dice.roll_d6(), 4);
    }

    #[test]
    fn test_empty_script_rolls_one() {
        let mut dice = ScriptedDice::new(Vec::new());
        assert_eq!(dice.roll_d6(), 1);
    }
}
