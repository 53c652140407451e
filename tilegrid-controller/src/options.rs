use std::sync::Arc;

use tilegrid::{GridOptions, SmoothScrollOptions};

use crate::ItemId;

pub type OverlayLookup<O> = Arc<dyn Fn(ItemId) -> Option<O> + Send + Sync>;

/// Configuration for [`crate::GridController`].
pub struct ControllerOptions<O> {
    pub grid: GridOptions,
    pub scroll: SmoothScrollOptions,
    /// Per-item user data (favourite, watched, rating...), looked up once per tile each time
    /// the tile set is populated.
    pub overlay_lookup: Option<OverlayLookup<O>>,
}

impl<O> ControllerOptions<O> {
    pub fn new(grid: GridOptions) -> Self {
        Self {
            grid,
            scroll: SmoothScrollOptions::default(),
            overlay_lookup: None,
        }
    }

    pub fn with_grid(mut self, grid: GridOptions) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_scroll(mut self, scroll: SmoothScrollOptions) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_overlay_lookup(
        mut self,
        lookup: Option<impl Fn(ItemId) -> Option<O> + Send + Sync + 'static>,
    ) -> Self {
        self.overlay_lookup = lookup.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn lookup_overlay(&self, id: ItemId) -> Option<O> {
        self.overlay_lookup.as_ref().and_then(|f| f(id))
    }
}

impl<O> Default for ControllerOptions<O> {
    fn default() -> Self {
        Self::new(GridOptions::default())
    }
}

impl<O> Clone for ControllerOptions<O> {
    fn clone(&self) -> Self {
        Self {
            grid: self.grid,
            scroll: self.scroll,
            overlay_lookup: self.overlay_lookup.clone(),
        }
    }
}

impl<O> core::fmt::Debug for ControllerOptions<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControllerOptions")
            .field("grid", &self.grid)
            .field("scroll", &self.scroll)
            .field("overlay_lookup", &self.overlay_lookup.is_some())
            .finish()
    }
}
