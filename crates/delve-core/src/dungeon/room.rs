//! Rooms and the room set
//!
//! A room is a rectangle tagged with a [`RoomId`]. Rooms are anchored on
//! odd/odd coordinates with odd sizes, and never overlap one another.
//! The set is append-only; insertion order is discovery order.

use serde::{Deserialize, Serialize};

use super::{Coord, Rect};
use crate::world::GenError;

/// Identifier of a room, equal to its index in the [`RoomSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl core::fmt::Display for RoomId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub rect: Rect,
}

impl Room {
    pub fn contains(&self, p: Coord) -> bool {
        self.rect.contains(p)
    }
}

/// All rooms placed so far, in discovery order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomSet {
    rooms: Vec<Room>,
}

impl RoomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// First room (in insertion order) containing `p`.
    ///
    /// Rooms never overlap, so at most one can match. Should that ever be
    /// violated, the earliest room wins.
    pub fn find_room_containing(&self, p: Coord) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains(p))
    }

    /// True iff no cell of `candidate` lies inside an existing room.
    pub fn is_valid_placement(&self, candidate: &Rect) -> bool {
        candidate
            .cells()
            .all(|cell| self.find_room_containing(cell).is_none())
    }

    /// Append a room whose placement the caller has already validated.
    ///
    /// Placement is only re-checked in debug builds.
    pub fn add(&mut self, rect: Rect) -> RoomId {
        debug_assert!(
            self.is_valid_placement(&rect),
            "room {rect} added over an existing room"
        );
        self.push(rect)
    }

    /// Checked variant of [`RoomSet::add`].
    pub fn try_add(&mut self, rect: Rect) -> Result<RoomId, GenError> {
        if let Some(existing) = self.rooms.iter().find(|room| room.rect.intersects(&rect)) {
            return Err(GenError::RoomOverlapInvariantViolated {
                candidate: rect,
                existing: existing.id,
            });
        }
        Ok(self.push(rect))
    }

    fn push(&mut self, rect: Rect) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(Room { id, rect });
        id
    }

    /// Verify that no two rooms share a cell
    pub fn check_invariants(&self) -> Result<(), GenError> {
        for (i, a) in self.rooms.iter().enumerate() {
            if let Some(b) = self.rooms[i + 1..].iter().find(|b| a.rect.intersects(&b.rect)) {
                return Err(GenError::RoomOverlapInvariantViolated {
                    candidate: b.rect,
                    existing: a.id,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn as_slice(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(Coord::new(x, y), Coord::new(w, h))
    }

    #[test]
    fn test_find_room_containing() {
        let mut rooms = RoomSet::new();
        let id = rooms.add(rect(1, 1, 3, 3));

        let found = rooms.find_room_containing(Coord::new(2, 2)).unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.rect, rect(1, 1, 3, 3));
        assert!(rooms.find_room_containing(Coord::new(0, 0)).is_none());
        assert!(rooms.find_room_containing(Coord::new(4, 4)).is_none());
    }

    #[test]
    fn test_valid_placement() {
        let mut rooms = RoomSet::new();
        rooms.add(rect(1, 1, 3, 3));

        assert!(!rooms.is_valid_placement(&rect(3, 3, 5, 5)));
        assert!(!rooms.is_valid_placement(&rect(-1, -1, 3, 3)));
        // Adjacent rooms are allowed; only shared cells are rejected
        assert!(rooms.is_valid_placement(&rect(5, 1, 3, 3)));
        assert!(rooms.is_valid_placement(&rect(-5, -5, 3, 3)));
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut rooms = RoomSet::new();
        let a = rooms.add(rect(1, 1, 3, 3));
        let b = rooms.add(rect(7, 1, 5, 3));
        assert_eq!(a, RoomId(0));
        assert_eq!(b, RoomId(1));
        assert_eq!(rooms.get(b).unwrap().rect.start, Coord::new(7, 1));
        assert_eq!(rooms.len(), 2);
    }

    #[test]
    fn test_try_add_rejects_overlap() {
        let mut rooms = RoomSet::new();
        rooms.try_add(rect(1, 1, 3, 3)).unwrap();

        let err = rooms.try_add(rect(3, 1, 3, 3)).unwrap_err();
        assert!(matches!(
            err,
            GenError::RoomOverlapInvariantViolated { existing: RoomId(0), .. }
        ));
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn test_check_invariants() {
        let mut rooms = RoomSet::new();
        rooms.add(rect(1, 1, 3, 3));
        rooms.add(rect(5, 5, 3, 3));
        assert!(rooms.check_invariants().is_ok());

        // Bypass validation to corrupt the set
        rooms.push(rect(6, 6, 1, 1));
        assert!(rooms.check_invariants().is_err());
        // Earliest room wins the tie
        assert_eq!(rooms.find_room_containing(Coord::new(6, 6)).unwrap().id, RoomId(1));
    }
}
