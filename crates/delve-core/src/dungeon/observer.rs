//! The observer's discrete stepping
//!
//! Mirrors the input side of the engine: one cardinal step at a time,
//! with the position committed before anyone is told about the move.

use serde::{Deserialize, Serialize};

use super::Coord;

/// A committed step: the delta taken and the resulting position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub dx: i32,
    pub dy: i32,
    pub position: Coord,
}

/// The moving observer the dungeon is generated around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Observer {
    position: Coord,
}

impl Observer {
    pub fn new(position: Coord) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    /// Take one step. Zero or diagonal input is ignored.
    pub fn step(&mut self, dx: i32, dy: i32) -> Option<MoveEvent> {
        if dx == 0 && dy == 0 {
            return None;
        }
        if dx.abs() + dy.abs() > 1 {
            return None;
        }
        self.position = self.position + Coord::new(dx, dy);
        Some(MoveEvent {
            dx,
            dy,
            position: self.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_step() {
        let mut obs = Observer::default();
        let ev = obs.step(0, -1).unwrap();
        assert_eq!(ev.position, Coord::new(0, -1));
        assert_eq!(obs.position(), Coord::new(0, -1));
    }

    #[test]
    fn test_rejects_diagonal_and_zero() {
        let mut obs = Observer::new(Coord::new(5, 5));
        assert!(obs.step(1, 1).is_none());
        assert!(obs.step(0, 0).is_none());
        assert!(obs.step(2, 0).is_none());
        assert_eq!(obs.position(), Coord::new(5, 5));
    }
}
