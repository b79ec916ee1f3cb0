//! Observer-centered viewport

use serde::{Deserialize, Serialize};

use super::{Coord, Rect};

/// Computes the region of tiles eligible to be active.
///
/// The viewport for position `p` is `[p - half, p + half)` on both axes.
/// It is a pure function of `p`; nothing about it is stored between moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportTracker {
    half_extent: Coord,
}

impl ViewportTracker {
    pub fn new(half_extent: Coord) -> Self {
        Self { half_extent }
    }

    pub fn half_extent(&self) -> Coord {
        self.half_extent
    }

    pub fn viewport_at(&self, observer: Coord) -> Rect {
        Rect::from_corners(observer - self.half_extent, observer + self.half_extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_follows_observer() {
        let tracker = ViewportTracker::new(Coord::new(2, 1));
        let vp = tracker.viewport_at(Coord::new(10, -4));
        assert_eq!(vp.start, Coord::new(8, -5));
        assert_eq!(vp.end(), Coord::new(12, -3));
        assert_eq!(vp.area(), 8);
        assert!(vp.contains(Coord::new(10, -4)));
        assert!(!vp.contains(Coord::new(12, -4)));
    }

    #[test]
    fn test_zero_extent_is_empty() {
        let tracker = ViewportTracker::new(Coord::new(0, 3));
        assert!(tracker.viewport_at(Coord::ORIGIN).is_empty());
    }
}
