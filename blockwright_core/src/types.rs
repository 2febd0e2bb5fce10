// Core spatial types shared across the crate.
//
// Defines world positions (`BlockPos`), vertical columns (`Column`), and
// axis-aligned column rectangles (`ColumnRect`). All types derive `Serialize`
// and `Deserialize` for snapshot and template persistence, and `Ord` so they
// can key `BTreeMap`s with a stable iteration order.
//
// **Critical constraint: determinism.** Every container keyed by these types
// must iterate in a reproducible order. That is why the derives include
// `PartialOrd`/`Ord` and why callers are expected to reach for `BTreeMap`
// rather than `HashMap` wherever iteration order can leak into output.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Block positions
// ---------------------------------------------------------------------------

/// A position in the 3D block grid. Each component is in whole blocks.
///
/// The coordinate system uses right-handed conventions:
/// - X: east  (positive) / west  (negative)
/// - Y: up    (positive) / down  (negative)
/// - Z: south (positive) / north (negative)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The column this position sits in (Y discarded).
    pub const fn column(self) -> Column {
        Column::new(self.x, self.z)
    }

    /// Manhattan distance between two positions.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        ((self.x - other.x).unsigned_abs())
            + ((self.y - other.y).unsigned_abs())
            + ((self.z - other.z).unsigned_abs())
    }

    /// Component-wise minimum of two positions.
    pub fn min_corner(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum of two positions.
    pub fn max_corner(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Columns — (x, z) pairs addressing a vertical stack of blocks
// ---------------------------------------------------------------------------

/// A vertical column of the world, addressed by its X/Z coordinates.
///
/// Heightmaps and route planning operate on columns: the terrain sampler
/// assigns each column a ground elevation, and the planner moves between
/// horizontally adjacent columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Column {
    pub x: i32,
    pub z: i32,
}

impl Column {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The block position at this column's given elevation.
    pub const fn at(self, y: i32) -> BlockPos {
        BlockPos::new(self.x, y, self.z)
    }

    /// Manhattan distance between two columns.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        ((self.x - other.x).unsigned_abs()) + ((self.z - other.z).unsigned_abs())
    }

    /// Chebyshev distance between two columns (diagonal moves count as 1).
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        ((self.x - other.x).unsigned_abs()).max((self.z - other.z).unsigned_abs())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

// ---------------------------------------------------------------------------
// Column rectangles
// ---------------------------------------------------------------------------

/// An inclusive, axis-aligned rectangle of columns.
///
/// `min` and `max` are both inside the rectangle. Construction through
/// [`ColumnRect::from_corners`] normalizes corner order, so a rectangle is
/// never empty and `min <= max` holds per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRect {
    pub min: Column,
    pub max: Column,
}

impl ColumnRect {
    /// Build a rectangle from two opposite corners, in either order.
    pub fn from_corners(a: Column, b: Column) -> Self {
        Self {
            min: Column::new(a.x.min(b.x), a.z.min(b.z)),
            max: Column::new(a.x.max(b.x), a.z.max(b.z)),
        }
    }

    /// The square of columns within `radius` of `center` (Chebyshev metric).
    pub fn around(center: Column, radius: u32) -> Self {
        let r = radius as i32;
        Self {
            min: Column::new(center.x - r, center.z - r),
            max: Column::new(center.x + r, center.z + r),
        }
    }

    /// Grow the rectangle by `margin` columns on every side.
    pub fn expanded(self, margin: u32) -> Self {
        let m = margin as i32;
        Self {
            min: Column::new(self.min.x - m, self.min.z - m),
            max: Column::new(self.max.x + m, self.max.z + m),
        }
    }

    pub fn contains(&self, column: Column) -> bool {
        column.x >= self.min.x
            && column.x <= self.max.x
            && column.z >= self.min.z
            && column.z <= self.max.z
    }

    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x).unsigned_abs() + 1
    }

    pub fn depth(&self) -> u32 {
        (self.max.z - self.min.z).unsigned_abs() + 1
    }

    pub fn column_count(&self) -> usize {
        self.width() as usize * self.depth() as usize
    }

    /// Iterate all columns in the rectangle, X-major then Z.
    ///
    /// The order is part of the contract: samplers fan work out over this
    /// iterator and must reassemble results reproducibly.
    pub fn columns(self) -> impl Iterator<Item = Column> {
        (self.min.x..=self.max.x)
            .flat_map(move |x| (self.min.z..=self.max.z).map(move |z| Column::new(x, z)))
    }
}

impl fmt::Display for ColumnRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_pos_manhattan_distance() {
        let a = BlockPos::new(0, 0, 0);
        let b = BlockPos::new(3, 4, 5);
        assert_eq!(a.manhattan_distance(b), 12);
        assert_eq!(b.manhattan_distance(a), 12);
    }

    #[test]
    fn block_pos_corner_normalization() {
        let a = BlockPos::new(5, -1, 2);
        let b = BlockPos::new(-3, 4, 2);
        assert_eq!(a.min_corner(b), BlockPos::new(-3, -1, 2));
        assert_eq!(a.max_corner(b), BlockPos::new(5, 4, 2));
    }

    #[test]
    fn block_pos_ordering() {
        // Verify BlockPos has a total order (needed for BTreeMap keys).
        let a = BlockPos::new(0, 0, 0);
        let b = BlockPos::new(1, 0, 0);
        assert!(a < b);
    }

    #[test]
    fn column_distances() {
        let a = Column::new(0, 0);
        let b = Column::new(3, -4);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(a.chebyshev_distance(b), 4);
    }

    #[test]
    fn column_at_elevation() {
        let c = Column::new(7, -2);
        assert_eq!(c.at(64), BlockPos::new(7, 64, -2));
        assert_eq!(c.at(64).column(), c);
    }

    #[test]
    fn rect_from_corners_normalizes() {
        let r = ColumnRect::from_corners(Column::new(4, -1), Column::new(-2, 3));
        assert_eq!(r.min, Column::new(-2, -1));
        assert_eq!(r.max, Column::new(4, 3));
        assert_eq!(r.width(), 7);
        assert_eq!(r.depth(), 5);
        assert_eq!(r.column_count(), 35);
    }

    #[test]
    fn rect_around_is_chebyshev_disc() {
        let r = ColumnRect::around(Column::new(10, 10), 3);
        assert!(r.contains(Column::new(13, 13)));
        assert!(r.contains(Column::new(7, 10)));
        assert!(!r.contains(Column::new(14, 10)));
        assert_eq!(r.column_count(), 49);
    }

    #[test]
    fn rect_columns_iterates_in_stable_order() {
        let r = ColumnRect::from_corners(Column::new(0, 0), Column::new(1, 1));
        let cols: Vec<Column> = r.columns().collect();
        assert_eq!(
            cols,
            vec![
                Column::new(0, 0),
                Column::new(0, 1),
                Column::new(1, 0),
                Column::new(1, 1),
            ]
        );
    }

    #[test]
    fn rect_expanded_grows_every_side() {
        let r = ColumnRect::from_corners(Column::new(0, 0), Column::new(2, 2)).expanded(2);
        assert_eq!(r.min, Column::new(-2, -2));
        assert_eq!(r.max, Column::new(4, 4));
    }

    #[test]
    fn serialization_roundtrip() {
        let pos = BlockPos::new(-7, 64, 19);
        let json = serde_json::to_string(&pos).unwrap();
        let restored: BlockPos = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, restored);

        let rect = ColumnRect::from_corners(Column::new(1, 2), Column::new(3, 4));
        let json = serde_json::to_string(&rect).unwrap();
        let restored: ColumnRect = serde_json::from_str(&json).unwrap();
        assert_eq!(rect, restored);
    }
}
