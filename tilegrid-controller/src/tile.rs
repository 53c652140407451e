use tilegrid::{Bounds, Cell};

/// Per-item view state, bound 1:1 to the item at the same arena index.
///
/// `visible` means the tile is laid out with committed bounds (it may still be scrolled out of
/// view). `rendered` means its payload is attached; a rendered tile intersected the viewport
/// at the last scan.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile<O> {
    pub index: usize,
    pub cell: Option<Cell>,
    pub bounds: Option<Bounds>,
    pub visible: bool,
    pub rendered: bool,
    /// When the payload was last attached, for the fade-in.
    pub rendered_at_ms: Option<u64>,
    /// User overlay looked up once when the tile set was populated.
    pub overlay: Option<O>,
}

impl<O> Tile<O> {
    pub(crate) fn new(index: usize, overlay: Option<O>) -> Self {
        Self {
            index,
            cell: None,
            bounds: None,
            visible: false,
            rendered: false,
            rendered_at_ms: None,
            overlay,
        }
    }

    /// Payload opacity at `now_ms` for a linear fade-in of `fade_in_ms`.
    pub fn opacity(&self, now_ms: u64, fade_in_ms: u64) -> f32 {
        let Some(start) = self.rendered_at_ms.filter(|_| self.rendered) else {
            return 0.0;
        };
        if fade_in_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(start);
        (elapsed as f32 / fade_in_ms as f32).min(1.0)
    }
}
