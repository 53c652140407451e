/// A lightweight, serializable snapshot of the smooth-scroll state.
///
/// Both values are normalized to `0.0..=1.0`. `accumulated_target` is the fused destination of
/// any overlapping wheel gestures.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub current_position: f32,
    pub accumulated_target: f32,
}

/// The selected page and the page count of a paginated result set (pages are 1-based).
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSet {
    pub selected_page: u32,
    pub total_pages: u32,
}

impl PageSet {
    /// Creates a page set, clamping `selected_page` into `1..=total_pages`.
    pub fn new(selected_page: u32, total_pages: u32) -> Self {
        Self {
            selected_page: selected_page.clamp(1, total_pages.max(1)),
            total_pages,
        }
    }

    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages.max(1))
    }
}

impl Default for PageSet {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
