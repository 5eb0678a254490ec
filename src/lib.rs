//! Hexfront - turn-based hex-grid tactical wargame engine

pub mod battle;
pub mod core;
pub mod scenario;
