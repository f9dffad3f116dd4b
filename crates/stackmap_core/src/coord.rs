//! Cell coordinates and rectangular regions

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Integer (column, row) address of a grid cell.
///
/// Ordering is row-major: by `y` first, then `x`. Sorted containers keyed by
/// `TileCoord` therefore iterate rows top to bottom, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const ZERO: TileCoord = TileCoord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Ord for TileCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for TileCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for TileCoord {
    type Output = TileCoord;

    fn add(self, rhs: TileCoord) -> TileCoord {
        TileCoord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for TileCoord {
    type Output = TileCoord;

    fn sub(self, rhs: TileCoord) -> TileCoord {
        TileCoord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for TileCoord {
    type Output = TileCoord;

    fn neg(self) -> TileCoord {
        TileCoord::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for TileCoord {
    fn from((x, y): (i32, i32)) -> Self {
        TileCoord::new(x, y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangle of cells: `width` x `height` starting at (`x`, `y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing both corners (inclusive)
    pub fn from_corners(a: TileCoord, b: TileCoord) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        let max_x = a.x.max(b.x);
        let max_y = a.y.max(b.y);
        Self::new(min_x, min_y, span(min_x, max_x), span(min_y, max_y))
    }

    /// Exclusive right edge, saturating at `i32::MAX`
    pub fn right(&self) -> i32 {
        edge(self.x, self.width)
    }

    /// Exclusive bottom edge, saturating at `i32::MAX`
    pub fn bottom(&self) -> i32 {
        edge(self.y, self.height)
    }

    pub fn origin(&self) -> TileCoord {
        TileCoord::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.x >= self.x && coord.y >= self.y && coord.x < self.right() && coord.y < self.bottom()
    }

    /// Overlapping part of two rectangles, `None` when they do not overlap
    pub fn intersect(&self, other: &TileRect) -> Option<TileRect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(TileRect::new(x, y, (right - x) as u32, (bottom - y) as u32))
    }

    /// Grow to include `coord`
    pub fn include(&self, coord: TileCoord) -> TileRect {
        if self.is_empty() {
            return TileRect::new(coord.x, coord.y, 1, 1);
        }
        let min = TileCoord::new(self.x.min(coord.x), self.y.min(coord.y));
        let max = TileCoord::new(
            (self.right() - 1).max(coord.x),
            (self.bottom() - 1).max(coord.y),
        );
        TileRect::from_corners(min, max)
    }

    pub fn translate(&self, offset: TileCoord) -> TileRect {
        TileRect::new(
            self.x.saturating_add(offset.x),
            self.y.saturating_add(offset.y),
            self.width,
            self.height,
        )
    }

    /// Every cell of the rectangle in row-major order
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> {
        let rect = *self;
        (rect.y..rect.bottom()).flat_map(move |y| (rect.x..rect.right()).map(move |x| TileCoord::new(x, y)))
    }
}

fn edge(start: i32, len: u32) -> i32 {
    (start as i64 + len as i64).min(i32::MAX as i64) as i32
}

/// Cell count of the inclusive range `min..=max`
fn span(min: i32, max: i32) -> u32 {
    (max as i64 - min as i64 + 1).min(u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_ordering_is_row_major() {
        let mut coords = vec![
            TileCoord::new(1, 1),
            TileCoord::new(0, 1),
            TileCoord::new(5, 0),
            TileCoord::new(0, 0),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                TileCoord::new(0, 0),
                TileCoord::new(5, 0),
                TileCoord::new(0, 1),
                TileCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_huge_rect_edges_saturate() {
        let wide = TileRect::new(0, -4, u32::MAX, u32::MAX);
        assert_eq!(wide.right(), i32::MAX);
        assert_eq!(wide.bottom(), i32::MAX);
        assert!(wide.contains(TileCoord::new(1_000_000, -4)));

        let clipped = wide.intersect(&TileRect::new(5, 5, 2, 2));
        assert_eq!(clipped, Some(TileRect::new(5, 5, 2, 2)));

        let full = TileRect::from_corners(TileCoord::new(i32::MIN, 0), TileCoord::new(i32::MAX, 0));
        assert_eq!(full.width, u32::MAX);
    }

    #[test]
    fn test_coord_arithmetic() {
        let a = TileCoord::new(2, 3);
        let b = TileCoord::new(5, 5);
        assert_eq!(a + b, TileCoord::new(7, 8));
        assert_eq!(b - a, TileCoord::new(3, 2));
        assert_eq!(-a, TileCoord::new(-2, -3));
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = TileRect::new(1, 1, 2, 2);
        assert!(rect.contains(TileCoord::new(1, 1)));
        assert!(rect.contains(TileCoord::new(2, 2)));
        assert!(!rect.contains(TileCoord::new(3, 2)));
        assert!(!rect.contains(TileCoord::new(0, 1)));
    }

    #[test]
    fn test_rect_intersect() {
        let a = TileRect::new(0, 0, 4, 4);
        let b = TileRect::new(2, 3, 4, 4);
        assert_eq!(a.intersect(&b), Some(TileRect::new(2, 3, 2, 1)));
        assert_eq!(a.intersect(&TileRect::new(4, 0, 1, 1)), None);
    }

    #[test]
    fn test_rect_from_corners_and_include() {
        let rect = TileRect::from_corners(TileCoord::new(3, 4), TileCoord::new(1, 2));
        assert_eq!(rect, TileRect::new(1, 2, 3, 3));

        let grown = TileRect::default().include(TileCoord::new(-1, 5));
        assert_eq!(grown, TileRect::new(-1, 5, 1, 1));
        let grown = grown.include(TileCoord::new(1, 4));
        assert_eq!(grown, TileRect::new(-1, 4, 3, 2));
    }

    #[test]
    fn test_rect_coords_row_major() {
        let coords: Vec<_> = TileRect::new(0, 0, 2, 2).coords().collect();
        assert_eq!(
            coords,
            vec![
                TileCoord::new(0, 0),
                TileCoord::new(1, 0),
                TileCoord::new(0, 1),
                TileCoord::new(1, 1),
            ]
        );
        assert_eq!(TileRect::new(0, 0, 0, 3).coords().count(), 0);
    }
}
