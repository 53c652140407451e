/// An axis-aligned rectangle in content (scroll) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns `true` when the rectangle has no area (or a NaN extent).
    pub fn is_empty(&self) -> bool {
        self.width.is_nan() || self.height.is_nan() || self.width <= 0.0 || self.height <= 0.0
    }

    /// Standard AABB overlap test. Edge-touching rectangles intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

/// A grid cell (column, row) in row-major order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

/// Derived grid shape for a given container width and item count.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGeometry {
    /// Always `>= 1`.
    pub columns: usize,
    pub rows: usize,
    /// Horizontal space between adjacent tiles. `0.0` for a single column.
    pub gap: f32,
}

impl GridGeometry {
    /// Number of structural slots a fixed-size backing grid needs.
    pub fn slot_count(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    pub fn cell_for(&self, index: usize) -> Cell {
        Cell {
            col: index % self.columns,
            row: index / self.columns,
        }
    }

    pub fn index_for(&self, cell: Cell) -> usize {
        cell.row * self.columns + cell.col
    }
}

/// Inclusive, contiguous range of tile indexes known to intersect the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub first_index: usize,
    pub last_index: usize, // inclusive
}

impl VisibleRange {
    pub fn count(&self) -> usize {
        self.last_index - self.first_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.first_index..=self.last_index).contains(&index)
    }
}

/// A render-state transition emitted by [`crate::VisibilityTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityChange {
    /// Attach the tile's payload (and start its fade-in).
    Rendered(usize),
    /// Detach the tile's payload entirely.
    Unrendered(usize),
}

impl VisibilityChange {
    pub fn index(&self) -> usize {
        match *self {
            Self::Rendered(i) | Self::Unrendered(i) => i,
        }
    }
}
