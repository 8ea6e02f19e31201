//! Pixel coordinates.

use std::fmt;

/// A pixel coordinate within an image.
///
/// Points order by column first, then row, matching the scan order used
/// everywhere a set of points is walked deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The axis-adjacent neighbours, in up, down, left, right order.
    ///
    /// Neighbours that would fall off the top or left edge are omitted;
    /// the caller bounds-checks the bottom and right edges against the
    /// image extents.
    pub fn neighbours(self) -> impl Iterator<Item = Point> {
        let up = self.y.checked_sub(1).map(|y| Point::new(self.x, y));
        let down = self.y.checked_add(1).map(|y| Point::new(self.x, y));
        let left = self.x.checked_sub(1).map(|x| Point::new(x, self.y));
        let right = self.x.checked_add(1).map(|x| Point::new(x, self.y));

        [up, down, left, right].into_iter().flatten()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
