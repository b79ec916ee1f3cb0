//! Generator configuration and error types

mod errors;
mod options;

pub use errors::{GenError, OptionsError};
pub use options::{DungeonOptions, MAX_EXTENT, SeedMode};
pub(crate) use options::check_room_sizes;
