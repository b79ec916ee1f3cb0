//! Axis-aligned half-open rectangles
//!
//! A rectangle covers `start.x <= x < end.x` and `start.y <= y < end.y`,
//! where `end = start + size`. The end is always derived, never stored.

use serde::{Deserialize, Serialize};

use super::Coord;

/// A rectangular region of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub start: Coord,
    pub size: Coord,
}

impl Rect {
    /// Create a rectangle from its start corner and size
    pub const fn new(start: Coord, size: Coord) -> Self {
        Self { start, size }
    }

    /// Create a rectangle spanning `[start, end)`
    pub fn from_corners(start: Coord, end: Coord) -> Self {
        Self::new(start, end - start)
    }

    /// Exclusive far corner
    pub fn end(&self) -> Coord {
        self.start + self.size
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// True if the rectangle covers no cells
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Number of cells covered
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.size.x as usize * self.size.y as usize
        }
    }

    /// Half-open containment test
    pub fn contains(&self, p: Coord) -> bool {
        let end = self.end();
        self.start.x <= p.x && p.x < end.x && self.start.y <= p.y && p.y < end.y
    }

    /// Check if the two rectangles share at least one cell
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (a, b) = (self.end(), other.end());
        self.start.x < b.x && other.start.x < a.x && self.start.y < b.y && other.start.y < a.y
    }

    /// Every cell, row-major (y outer, x inner)
    pub fn cells(&self) -> impl Iterator<Item = Coord> + use<> {
        let Rect { start, .. } = *self;
        let end = self.end();
        (start.y..end.y).flat_map(move |y| (start.x..end.x).map(move |x| Coord::new(x, y)))
    }
}

impl core::fmt::Display for Rect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(Coord::new(10, 20), Coord::new(6, 4));
        assert_eq!(r.end(), Coord::new(16, 24));
        assert_eq!(r.width(), 6);
        assert_eq!(r.height(), 4);
        assert_eq!(r.area(), 24);
    }

    #[test]
    fn test_rect_contains_half_open() {
        let r = Rect::new(Coord::new(1, 1), Coord::new(3, 3));
        assert!(r.contains(Coord::new(1, 1)));
        assert!(r.contains(Coord::new(3, 3)));
        assert!(!r.contains(Coord::new(4, 2)));
        assert!(!r.contains(Coord::new(2, 4)));
        assert!(!r.contains(Coord::new(0, 0)));
    }

    #[test]
    fn test_from_corners() {
        let r = Rect::from_corners(Coord::new(-2, -2), Coord::new(2, 2));
        assert_eq!(r.size, Coord::new(4, 4));
        assert!(r.contains(Coord::new(-2, 1)));
        assert!(!r.contains(Coord::new(2, 0)));
    }

    #[test]
    fn test_rect_intersects() {
        let r1 = Rect::new(Coord::new(0, 0), Coord::new(3, 3));
        let r2 = Rect::new(Coord::new(2, 2), Coord::new(3, 3));
        let touching = Rect::new(Coord::new(3, 0), Coord::new(3, 3));

        assert!(r1.intersects(&r2));
        assert!(r2.intersects(&r1));
        assert!(!r1.intersects(&touching));
    }

    #[test]
    fn test_cells_row_major() {
        let r = Rect::new(Coord::new(5, -1), Coord::new(2, 2));
        let cells: Vec<_> = r.cells().collect();
        assert_eq!(
            cells,
            vec![
                Coord::new(5, -1),
                Coord::new(6, -1),
                Coord::new(5, 0),
                Coord::new(6, 0),
            ]
        );
        assert_eq!(cells.len(), r.area());
    }

    #[test]
    fn test_empty_rect() {
        let r = Rect::new(Coord::new(0, 0), Coord::new(0, 5));
        assert!(r.is_empty());
        assert_eq!(r.area(), 0);
        assert_eq!(r.cells().count(), 0);
        assert!(!r.intersects(&Rect::new(Coord::new(0, 0), Coord::new(9, 9))));
    }
}
