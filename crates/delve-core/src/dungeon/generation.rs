//! Dungeon generation and streaming
//!
//! Generation happens in two phases. At startup a fixed region around the
//! observer is filled with randomly placed rooms and rasterized in one go.
//! Afterwards every observer move recomputes the viewport, deactivates the
//! tiles that left it, and walks the viewport cell by cell: cells seen for
//! the first time may spawn a new room at odd/odd anchors, and cells with
//! no tile yet are classified and created.
//!
//! Once created a tile's kind is permanent. A room spawned later over
//! cells that were already rasterized as walls does not reclassify them;
//! see [`DungeonGenerator::classification_conflicts`].

use serde::{Deserialize, Serialize};

use super::{
    Coord, MoveEvent, Observer, Rect, Room, RoomId, RoomSet, TileCache, TileKind, TileRenderer,
    ViewportTracker,
};
use crate::rng::{GameRng, range_has_odd};
use crate::world::{DungeonOptions, GenError, OptionsError, check_room_sizes};

/// Check that a move is a unit step along exactly one axis.
pub fn check_move_delta(dx: i32, dy: i32) -> Result<(), GenError> {
    if (dx == 0 && dy == 0) || dx.abs() + dy.abs() > 1 {
        return Err(GenError::InvalidMoveDelta { dx, dy });
    }
    Ok(())
}

/// What one observer move did
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    /// Viewport after the move
    pub viewport: Rect,
    /// Set when the move delta was malformed; the move was processed anyway
    pub diagnostic: Option<GenError>,
    /// Rooms spawned at the frontier, in spawn order
    pub rooms_spawned: Vec<RoomId>,
    pub created: usize,
    pub activated: usize,
    pub deactivated: usize,
}

/// Serializable view of the generated layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonSnapshot {
    pub seed: u64,
    /// Rooms in discovery order
    pub rooms: Vec<Room>,
    /// Every created tile, sorted by coordinate
    pub tiles: Vec<(Coord, TileKind)>,
}

/// Generates the dungeon around the observer and streams its tiles.
///
/// The generator is the only writer of its room set and tile cache. Every
/// mutating call takes `&mut self`, so a move is always processed to
/// completion before the next one can begin.
pub struct DungeonGenerator<R: TileRenderer> {
    options: DungeonOptions,
    rng: GameRng,
    rooms: RoomSet,
    tiles: TileCache<R>,
    viewport: ViewportTracker,
    observer: Coord,
}

impl<R: TileRenderer> core::fmt::Debug for DungeonGenerator<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DungeonGenerator")
            .field("seed", &self.rng.seed())
            .field("rooms", &self.rooms.len())
            .field("tiles", &self.tiles)
            .field("observer", &self.observer)
            .finish()
    }
}

impl<R: TileRenderer> DungeonGenerator<R> {
    /// Create a generator. Options are validated and the seed is resolved
    /// here; nothing is generated until [`start`](Self::start) or
    /// [`initial_generate`](Self::initial_generate).
    pub fn new(options: DungeonOptions, renderer: R) -> Result<Self, GenError> {
        options.validate()?;
        let seed = options.seed.resolve();
        Ok(Self {
            viewport: ViewportTracker::new(options.half_extent()),
            rng: GameRng::new(seed),
            rooms: RoomSet::new(),
            tiles: TileCache::new(renderer),
            observer: Coord::ORIGIN,
            options,
        })
    }

    /// Place the observer at `origin` and generate the configured startup
    /// region around it. Returns the number of rooms placed.
    pub fn start(&mut self, origin: Coord) -> Result<usize, GenError> {
        self.observer = origin;
        let area = self.options.initial_area_around(origin);
        self.initial_generate(
            area,
            self.options.initial_attempts,
            self.options.min_room_size,
            self.options.max_room_size,
        )
    }

    /// Try `attempts` random room placements inside `area`, then rasterize
    /// every cell of `area` as an active, explored tile.
    ///
    /// Rejected placements are dropped, so the number of rooms placed
    /// (the return value) is at most `attempts`.
    pub fn initial_generate(
        &mut self,
        area: Rect,
        attempts: u32,
        min_size: i32,
        max_size: i32,
    ) -> Result<usize, GenError> {
        if attempts > 0 {
            check_room_sizes(min_size, max_size).map_err(|err| match err {
                OptionsError::EmptyOddRange { min, max, .. } => {
                    GenError::NonTerminatingOddDraw { min, max }
                }
                other => GenError::InvalidOptions(other),
            })?;
            let end = area.end();
            for (min, max) in [(area.start.x, end.x), (area.start.y, end.y)] {
                if !range_has_odd(min, max) {
                    return Err(GenError::NonTerminatingOddDraw { min, max });
                }
            }
        }

        let before = self.rooms.len();
        for _ in 0..attempts {
            let end = area.end();
            let start = Coord::new(
                self.rng.next_odd(area.start.x, end.x),
                self.rng.next_odd(area.start.y, end.y),
            );
            let size = Coord::new(
                self.rng.next_odd(min_size, max_size),
                self.rng.next_odd(min_size, max_size),
            );
            let candidate = Rect::new(start, size);
            if self.rooms.is_valid_placement(&candidate) {
                self.rooms.add(candidate);
            }
        }
        let placed = self.rooms.len() - before;

        for at in area.cells() {
            self.create_tile(at)?;
            self.tiles.set_active(at, true);
            self.tiles.mark_explored(at);
        }

        log::info!(
            "initial generation over {area}: {placed}/{attempts} rooms placed, {} tiles",
            area.area()
        );
        Ok(placed)
    }

    /// Handle one committed observer step.
    ///
    /// `new_position` must already be the observer's updated position. A
    /// malformed delta is logged and returned in
    /// [`MoveReport::diagnostic`], and the move is processed regardless.
    pub fn observer_moved(
        &mut self,
        dx: i32,
        dy: i32,
        new_position: Coord,
    ) -> Result<MoveReport, GenError> {
        let diagnostic = check_move_delta(dx, dy).err();
        if let Some(err) = &diagnostic {
            log::warn!("{err}; continuing with observer at {new_position}");
        }

        self.observer = new_position;
        let viewport = self.viewport.viewport_at(new_position);
        let deactivated = self.tiles.deactivate_outside(&viewport);

        let mut report = MoveReport {
            viewport,
            diagnostic,
            rooms_spawned: Vec::new(),
            created: 0,
            activated: 0,
            deactivated,
        };

        for at in viewport.cells() {
            if self.tiles.mark_explored(at)
                && at.is_odd_anchor()
                && self.rng.chance(self.options.new_room_prob)
                && let Some(id) = self.spawn_frontier_room(at)
            {
                report.rooms_spawned.push(id);
            }

            if !self.tiles.contains(at) {
                self.create_tile(at)?;
                report.created += 1;
            }
            if self.tiles.set_active(at, true) {
                report.activated += 1;
            }
        }

        log::trace!(
            "moved to {new_position}: viewport {viewport}, +{} -{} active, {} created, {} rooms",
            report.activated,
            report.deactivated,
            report.created,
            report.rooms_spawned.len()
        );
        Ok(report)
    }

    /// Step `observer` and, if the step was taken, stream the new viewport.
    pub fn step_observer(
        &mut self,
        observer: &mut Observer,
        dx: i32,
        dy: i32,
    ) -> Result<Option<MoveReport>, GenError> {
        match observer.step(dx, dy) {
            Some(MoveEvent { dx, dy, position }) => self.observer_moved(dx, dy, position).map(Some),
            None => Ok(None),
        }
    }

    fn spawn_frontier_room(&mut self, anchor: Coord) -> Option<RoomId> {
        let (min, max) = (self.options.min_room_size, self.options.max_room_size);
        let size = Coord::new(self.rng.next_odd(min, max), self.rng.next_odd(min, max));
        let candidate = Rect::new(anchor, size);
        if !self.rooms.is_valid_placement(&candidate) {
            return None;
        }

        let id = self.rooms.add(candidate);
        log::debug!("frontier room {id} spawned at {candidate}");

        let stale = candidate.cells().filter(|c| self.tiles.contains(*c)).count();
        if stale > 0 {
            log::debug!("frontier room {id} covers {stale} tiles that stay as created");
        }
        Some(id)
    }

    fn create_tile(&mut self, at: Coord) -> Result<(), GenError> {
        let room = self.rooms.find_room_containing(at).map(|room| room.id);
        let kind = match room {
            Some(_) => TileKind::Floor,
            None => TileKind::Wall,
        };
        self.tiles.create(at, kind, room)?;
        Ok(())
    }

    /// Coordinates whose tile kind disagrees with current room membership,
    /// sorted. Only frontier rooms spawned over existing tiles cause these.
    pub fn classification_conflicts(&self) -> Vec<Coord> {
        let mut conflicts: Vec<Coord> = self
            .tiles
            .iter()
            .filter(|tile| {
                let in_room = self.rooms.find_room_containing(tile.coord()).is_some();
                in_room != (tile.kind() == TileKind::Floor)
            })
            .map(|tile| tile.coord())
            .collect();
        conflicts.sort();
        conflicts
    }

    pub fn snapshot(&self) -> DungeonSnapshot {
        let mut tiles: Vec<(Coord, TileKind)> =
            self.tiles.iter().map(|tile| (tile.coord(), tile.kind())).collect();
        tiles.sort();
        DungeonSnapshot {
            seed: self.seed(),
            rooms: self.rooms.as_slice().to_vec(),
            tiles,
        }
    }

    /// The seed in use, after resolving [`SeedMode::Random`](crate::world::SeedMode)
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn options(&self) -> &DungeonOptions {
        &self.options
    }

    pub fn rooms(&self) -> &RoomSet {
        &self.rooms
    }

    pub fn tiles(&self) -> &TileCache<R> {
        &self.tiles
    }

    pub fn kind_at(&self, at: Coord) -> Option<TileKind> {
        self.tiles.get(at).map(|tile| tile.kind())
    }

    pub fn observer(&self) -> Coord {
        self.observer
    }

    /// Viewport around the observer's last known position
    pub fn viewport(&self) -> Rect {
        self.viewport.viewport_at(self.observer)
    }

    pub fn renderer(&self) -> &R {
        self.tiles.renderer()
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        self.tiles.renderer_mut()
    }
}
