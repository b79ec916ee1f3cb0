//! Dungeon system
//!
//! Contains grid geometry, rooms, the tile cache, and the streaming
//! generator that ties them together.

mod coord;
mod generation;
mod observer;
mod rect;
mod room;
mod tile;
mod viewport;

pub use coord::Coord;
pub use generation::{DungeonGenerator, DungeonSnapshot, MoveReport, check_move_delta};
pub use observer::{MoveEvent, Observer};
pub use rect::Rect;
pub use room::{Room, RoomId, RoomSet};
pub use tile::{HeadlessRenderer, Tile, TileCache, TileKind, TileRenderer};
pub use viewport::ViewportTracker;
