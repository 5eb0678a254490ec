use thiserror::Error;

use crate::battle::units::UnitId;

/// Errors raised while loading scenarios and configuration
#[derive(Error, Debug)]
pub enum HexfrontError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, HexfrontError>;

/// Broad class of a rejected action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    InvalidAction,
    InsufficientResource,
    GameOver,
}

/// Reason an action request was refused. A rejection never mutates state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("unit does not belong to the active side")]
    NotActiveSide,

    #[error("unit has already acted this turn")]
    AlreadyActed,

    #[error("destination is not reachable")]
    Unreachable,

    #[error("target is not adjacent")]
    NotAdjacent,

    #[error("no artillery or air support available")]
    NoSupportAvailable,

    #[error("no supply actions left")]
    NoSupplyActionsLeft,

    #[error("unit has no movement points left")]
    NoMovementPoints,

    #[error("the game is over")]
    GameOver,

    #[error("unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("unit has been destroyed: {0:?}")]
    UnitDestroyed(UnitId),

    #[error("destination hex is occupied")]
    DestinationOccupied,

    #[error("invalid target: {0:?}")]
    InvalidTarget(UnitId),
}

impl ActionError {
    pub fn category(&self) -> RejectionKind {
        match self {
            ActionError::NoSupportAvailable
            | ActionError::NoSupplyActionsLeft
            | ActionError::NoMovementPoints => RejectionKind::InsufficientResource,
            ActionError::GameOver => RejectionKind::GameOver,
            _ => RejectionKind::InvalidAction,
        }
    }
}

pub type ActionResult<T> = std::result::Result<T, ActionError>;
