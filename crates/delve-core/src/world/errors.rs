//! Error types for generation and configuration
//!
//! Only option problems and broken internal invariants are returned as
//! errors. A malformed move delta is a diagnostic: it is logged and
//! reported, but the move is still processed.

use thiserror::Error;

use crate::dungeon::{Coord, Rect, RoomId};

/// Errors and diagnostics raised by the dungeon generator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    #[error("invalid move delta ({dx}, {dy}): expected a unit step along exactly one axis")]
    InvalidMoveDelta { dx: i32, dy: i32 },

    #[error("tile already exists at {0}")]
    TileAlreadyExists(Coord),

    #[error("room {candidate} overlaps existing room {existing}")]
    RoomOverlapInvariantViolated { candidate: Rect, existing: RoomId },

    #[error("range [{min}, {max}) contains no odd value")]
    NonTerminatingOddDraw { min: i32, max: i32 },

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),
}

/// Errors that can occur while loading or validating options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),

    #[error("{name}: range [{min}, {max}) contains no odd value")]
    EmptyOddRange { name: &'static str, min: i32, max: i32 },

    #[error("new_room_prob must lie in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("{name} must be at least {min}, got {value}")]
    ExtentTooSmall { name: &'static str, min: i32, value: i32 },

    #[error("{name} must be at most {max}, got {value}")]
    ExtentTooLarge { name: &'static str, max: i32, value: i32 },
}
