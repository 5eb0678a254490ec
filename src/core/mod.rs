//! Core types, configuration and error handling

pub mod config;
pub mod error;
pub mod types;

pub use config::{AiConfig, Difficulty, EngineConfig};
pub use error::{ActionError, ActionResult, HexfrontError, RejectionKind, Result};
pub use types::{PerSide, Side, Tick, Turn};
