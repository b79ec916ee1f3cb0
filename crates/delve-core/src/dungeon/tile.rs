//! Tiles, the rendering boundary, and the coordinate-indexed tile cache
//!
//! A tile is created at most once per coordinate and is afterwards only
//! toggled active or inactive. Its kind is decided by the generator at
//! creation time and never recomputed.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::{Coord, Rect, RoomId};
use crate::world::GenError;

/// What a tile shows
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    Display,
)]
pub enum TileKind {
    #[default]
    Wall,
    Floor,
}

impl TileKind {
    /// ASCII glyph for text front ends
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
        }
    }
}

/// Presentation layer for tiles.
///
/// These two calls are the whole contract with whatever draws the
/// dungeon. Visuals start out inactive; `set_visual_active` is only
/// called when a tile's active flag actually changes.
pub trait TileRenderer {
    type Handle;

    fn create_visual(&mut self, at: Coord, kind: TileKind) -> Self::Handle;
    fn set_visual_active(&mut self, handle: &Self::Handle, active: bool);
}

/// Renderer with no presentation; handles are sequential ids.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    next: u32,
}

impl TileRenderer for HeadlessRenderer {
    type Handle = u32;

    fn create_visual(&mut self, _at: Coord, _kind: TileKind) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    fn set_visual_active(&mut self, _handle: &u32, _active: bool) {}
}

/// One cached tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile<H> {
    handle: H,
    at: Coord,
    kind: TileKind,
    room: Option<RoomId>,
    active: bool,
}

impl<H> Tile<H> {
    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn coord(&self) -> Coord {
        self.at
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Room this tile was classified from, if it is a floor tile
    pub fn room(&self) -> Option<RoomId> {
        self.room
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stable debug name, e.g. "Wall 3 -2"
    pub fn label(&self) -> String {
        format!("{} {} {}", self.kind, self.at.x, self.at.y)
    }
}

/// Coordinate-indexed store of every tile ever created, plus the set of
/// coordinates already evaluated for frontier room spawning.
pub struct TileCache<R: TileRenderer> {
    tiles: HashMap<Coord, Tile<R::Handle>>,
    explored: HashSet<Coord>,
    active: HashSet<Coord>,
    renderer: R,
}

impl<R: TileRenderer> core::fmt::Debug for TileCache<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TileCache")
            .field("tiles", &self.tiles.len())
            .field("explored", &self.explored.len())
            .field("active", &self.active.len())
            .finish()
    }
}

impl<R: TileRenderer> TileCache<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            tiles: HashMap::new(),
            explored: HashSet::new(),
            active: HashSet::new(),
            renderer,
        }
    }

    pub fn get(&self, at: Coord) -> Option<&Tile<R::Handle>> {
        self.tiles.get(&at)
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.tiles.contains_key(&at)
    }

    /// Create the tile for `at`. The new tile starts inactive.
    ///
    /// Fails if a tile already exists there; tiles are created exactly once.
    pub fn create(
        &mut self,
        at: Coord,
        kind: TileKind,
        room: Option<RoomId>,
    ) -> Result<&Tile<R::Handle>, GenError> {
        if self.tiles.contains_key(&at) {
            return Err(GenError::TileAlreadyExists(at));
        }
        let handle = self.renderer.create_visual(at, kind);
        let tile = self.tiles.entry(at).or_insert(Tile {
            handle,
            at,
            kind,
            room,
            active: false,
        });
        Ok(&*tile)
    }

    /// Toggle a tile. No-op if there is no tile at `at`.
    ///
    /// Returns whether the active flag changed.
    pub fn set_active(&mut self, at: Coord, active: bool) -> bool {
        let Some(tile) = self.tiles.get_mut(&at) else {
            return false;
        };
        if tile.active == active {
            return false;
        }
        tile.active = active;
        self.renderer.set_visual_active(&tile.handle, active);
        if active {
            self.active.insert(at);
        } else {
            self.active.remove(&at);
        }
        true
    }

    /// Deactivate every active tile outside `keep`; returns how many.
    ///
    /// Tiles are toggled in row-major order so the renderer sees the same
    /// call sequence on every replay.
    pub fn deactivate_outside(&mut self, keep: &Rect) -> usize {
        let mut leaving: Vec<Coord> = self
            .active
            .iter()
            .copied()
            .filter(|c| !keep.contains(*c))
            .collect();
        leaving.sort_unstable_by_key(|c| (c.y, c.x));
        for &at in &leaving {
            self.set_active(at, false);
        }
        leaving.len()
    }

    /// Mark `at` as evaluated for frontier spawning.
    ///
    /// Returns true only on the first call for a given coordinate.
    pub fn mark_explored(&mut self, at: Coord) -> bool {
        self.explored.insert(at)
    }

    pub fn is_explored(&self, at: Coord) -> bool {
        self.explored.contains(&at)
    }

    pub fn is_active(&self, at: Coord) -> bool {
        self.active.contains(&at)
    }

    /// Coordinates of all currently active tiles, in no particular order
    pub fn active_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.active.iter().copied()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn explored_count(&self) -> usize {
        self.explored.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile<R::Handle>> {
        self.tiles.values()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
