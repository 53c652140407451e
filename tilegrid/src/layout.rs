use crate::{Bounds, Cell, GridGeometry, GridOptions};

/// Computes the grid shape for a container width.
///
/// - `columns = floor((container_width + min_gap) / (tile_width + min_gap))`, at least 1
/// - `rows = ceil(item_count / columns)` (`0` for an empty set)
/// - `gap` spreads the leftover width evenly between columns; `0.0` for a single column
///
/// Returns `None` for inputs no layout can be derived from (non-finite or non-positive
/// container width, non-positive tile size, negative gap).
pub fn compute_geometry(
    container_width: f32,
    tile_width: f32,
    tile_height: f32,
    min_gap: f32,
    item_count: usize,
) -> Option<GridGeometry> {
    if !container_width.is_finite() || container_width <= 0.0 {
        return None;
    }
    if tile_width.is_nan() || tile_width <= 0.0 || tile_height.is_nan() || tile_height <= 0.0 {
        return None;
    }
    if min_gap.is_nan() || min_gap < 0.0 {
        return None;
    }

    // Truncation is floor here: both operands are positive.
    let columns = ((container_width + min_gap) / (tile_width + min_gap)) as usize;
    let columns = columns.max(1);
    let rows = item_count.div_ceil(columns);
    let gap = if columns > 1 {
        (container_width - columns as f32 * tile_width) / (columns - 1) as f32
    } else {
        0.0
    };

    Some(GridGeometry { columns, rows, gap })
}

/// Result of a [`GridLayout::reflow`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reflow {
    /// The geometry in effect after the call (the previous one when skipped).
    pub geometry: Option<GridGeometry>,
    /// The input was rejected and nothing was recomputed.
    pub skipped: bool,
    /// The column count changed, so every tile's cell must be reassigned.
    pub columns_changed: bool,
}

/// Stateful reflow engine for a fixed-size tile grid.
///
/// It holds no tiles. Callers feed it container widths and item counts and read back the
/// geometry, cells and content-space bounds.
#[derive(Clone, Debug)]
pub struct GridLayout {
    options: GridOptions,
    container_width: f32,
    item_count: usize,
    geometry: Option<GridGeometry>,
}

impl GridLayout {
    pub fn new(options: GridOptions) -> Self {
        gdebug!(
            tile_width = options.tile_width,
            tile_height = options.tile_height,
            min_gap = options.min_gap,
            "GridLayout::new"
        );
        Self {
            options,
            container_width: 0.0,
            item_count: 0,
            geometry: None,
        }
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Replaces the options and reflows against the last accepted container width.
    pub fn set_options(&mut self, options: GridOptions) -> Reflow {
        self.options = options;
        self.geometry = None;
        self.reflow_inner(self.container_width, self.item_count, None)
    }

    /// Recomputes geometry for a new container width and item count.
    ///
    /// Widths below [`GridOptions::min_container_width`] (a container mid-resize reports
    /// transient zero/negative sizes) leave all state untouched and return the previous
    /// geometry with `skipped = true`. Retry on the next size change.
    pub fn reflow(&mut self, container_width: f32, item_count: usize) -> Reflow {
        let prev_columns = self.geometry.map(|g| g.columns);
        self.reflow_inner(container_width, item_count, prev_columns)
    }

    /// Same as `reflow`, keeping the last accepted container width.
    pub fn set_item_count(&mut self, item_count: usize) -> Reflow {
        let prev_columns = self.geometry.map(|g| g.columns);
        self.reflow_inner(self.container_width, item_count, prev_columns)
    }

    fn reflow_inner(
        &mut self,
        container_width: f32,
        item_count: usize,
        prev_columns: Option<usize>,
    ) -> Reflow {
        let skip = Reflow {
            geometry: self.geometry,
            skipped: true,
            columns_changed: false,
        };

        if container_width.is_nan() || container_width < self.options.min_container_width {
            gtrace!(container_width, "GridLayout::reflow skipped");
            if self.geometry.is_none() {
                // Nothing is laid out yet; remember the count for the first accepted width.
                self.item_count = item_count;
            }
            return skip;
        }

        let o = &self.options;
        let Some(geometry) = compute_geometry(
            container_width,
            o.tile_width,
            o.tile_height,
            o.min_gap,
            item_count,
        ) else {
            gwarn!(container_width, "GridLayout::reflow rejected options");
            return skip;
        };

        self.container_width = container_width;
        self.item_count = item_count;
        self.geometry = Some(geometry);
        let columns_changed = prev_columns != Some(geometry.columns);
        gtrace!(
            container_width,
            columns = geometry.columns,
            rows = geometry.rows,
            columns_changed,
            "GridLayout::reflow"
        );
        Reflow {
            geometry: Some(geometry),
            skipped: false,
            columns_changed,
        }
    }

    pub fn geometry(&self) -> Option<GridGeometry> {
        self.geometry
    }

    /// Last computed column count (`0` before the first accepted reflow).
    pub fn columns(&self) -> usize {
        self.geometry.map_or(0, |g| g.columns)
    }

    /// Last computed row count (`0` before the first accepted reflow).
    pub fn rows(&self) -> usize {
        self.geometry.map_or(0, |g| g.rows)
    }

    pub fn slot_count(&self) -> usize {
        self.geometry.map_or(0, |g| g.slot_count())
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn cell_for(&self, index: usize) -> Option<Cell> {
        if index >= self.item_count {
            return None;
        }
        Some(self.geometry?.cell_for(index))
    }

    pub fn index_for(&self, cell: Cell) -> Option<usize> {
        let g = self.geometry?;
        if cell.col >= g.columns {
            return None;
        }
        let index = g.index_for(cell);
        (index < self.item_count).then_some(index)
    }

    /// Visits every item's cell in row-major order.
    pub fn for_each_cell(&self, mut f: impl FnMut(usize, Cell)) {
        let Some(g) = self.geometry else {
            return;
        };
        for i in 0..self.item_count {
            f(i, g.cell_for(i));
        }
    }

    /// Content-space rectangle of the tile at `index`.
    pub fn tile_bounds(&self, index: usize) -> Option<Bounds> {
        let cell = self.cell_for(index)?;
        let g = self.geometry?;
        let o = &self.options;
        Some(Bounds {
            x: cell.col as f32 * (o.tile_width + g.gap),
            y: cell.row as f32 * o.row_pitch(),
            width: o.tile_width,
            height: o.tile_height,
        })
    }

    /// Total scrollable height of the laid-out grid.
    pub fn content_height(&self) -> f32 {
        let rows = self.rows();
        if rows == 0 {
            return 0.0;
        }
        rows as f32 * self.options.tile_height + (rows - 1) as f32 * self.options.row_gap
    }
}
