//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two opposing sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "GER")]
    Ger,
    #[serde(rename = "SOV")]
    Sov,
}

impl Side {
    /// Side that opens every round
    pub const FIRST: Side = Side::Ger;

    pub fn opponent(&self) -> Side {
        match self {
            Side::Ger => Side::Sov,
            Side::Sov => Side::Ger,
        }
    }

    pub fn all() -> [Side; 2] {
        [Side::Ger, Side::Sov]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Side::Ger => "GER",
            Side::Sov => "SOV",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A value kept once per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerSide<T> {
    #[serde(rename = "GER")]
    pub ger: T,
    #[serde(rename = "SOV")]
    pub sov: T,
}

impl<T> PerSide<T> {
    pub fn new(ger: T, sov: T) -> Self {
        Self { ger, sov }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Ger => &self.ger,
            Side::Sov => &self.sov,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Ger => &mut self.ger,
            Side::Sov => &mut self.sov,
        }
    }
}

/// Turn counter, starting at 1
pub type Turn = u32;

/// Scheduler tick counter
pub type Tick = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Ger.opponent(), Side::Sov);
        assert_eq!(Side::Sov.opponent(), Side::Ger);
    }

    #[test]
    fn test_side_serializes_as_code() {
        let json = serde_json::to_string(&Side::Sov).unwrap();
        assert_eq!(json, "\"SOV\"");
        let side: Side = serde_json::from_str("\"GER\"").unwrap();
        assert_eq!(side, Side::Ger);
    }

    #[test]
    fn test_per_side_access() {
        let mut table = PerSide::new(1, 2);
        *table.get_mut(Side::Sov) += 5;
        assert_eq!(*table.get(Side::Ger), 1);
        assert_eq!(*table.get(Side::Sov), 7);
    }
}
