use alloc::vec::Vec;

use crate::fenwick::Fenwick;

/// A `(pane, local index)` pair produced by [`PaneIndex::locate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PanePosition {
    pub pane: usize,
    pub local: usize,
}

/// Translates a flat "super-index" over several backing panes into `(pane, local)` and back.
///
/// Use this when tiles are split across independently sized containers but the visibility
/// scan wants one row-major ordering. Panes may be empty and may change size at any time;
/// lookups are `O(log panes)`.
///
/// Out-of-range lookups return `None`. Item and tile counts briefly disagree during a
/// reload, so callers should treat `None` as "nothing to do".
#[derive(Clone, Debug, Default)]
pub struct PaneIndex {
    lens: Vec<usize>,
    sums: Fenwick,
}

impl PaneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lens(lens: impl IntoIterator<Item = usize>) -> Self {
        let lens: Vec<usize> = lens.into_iter().collect();
        let mut index = Self {
            lens,
            sums: Fenwick::default(),
        };
        index.rebuild();
        index
    }

    fn rebuild(&mut self) {
        self.sums = Fenwick::from_lens(&self.lens);
    }

    /// Appends a pane and returns its pane index.
    pub fn push_pane(&mut self, len: usize) -> usize {
        self.lens.push(len);
        self.sums.push(len);
        debug_assert_eq!(self.sums.len(), self.lens.len());
        self.lens.len() - 1
    }

    /// Updates a pane's length. Returns `false` for an unknown pane.
    pub fn set_pane_len(&mut self, pane: usize, len: usize) -> bool {
        let Some(cur) = self.lens.get_mut(pane) else {
            return false;
        };
        if *cur == len {
            return true;
        }
        self.sums.replace(pane, *cur, len);
        *cur = len;
        true
    }

    /// Removes a pane, shifting later panes down by one. Returns its length.
    pub fn remove_pane(&mut self, pane: usize) -> Option<usize> {
        if pane >= self.lens.len() {
            return None;
        }
        let len = self.lens.remove(pane);
        self.rebuild();
        Some(len)
    }

    pub fn clear(&mut self) {
        self.lens.clear();
        self.sums = Fenwick::default();
    }

    pub fn pane_count(&self) -> usize {
        self.lens.len()
    }

    pub fn pane_len(&self, pane: usize) -> Option<usize> {
        self.lens.get(pane).copied()
    }

    /// Total number of tiles across all panes.
    pub fn len(&self) -> usize {
        self.sums.total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maps a flat super-index to its pane and local index.
    pub fn locate(&self, super_index: usize) -> Option<PanePosition> {
        if super_index >= self.len() {
            return None;
        }
        let pane = self.sums.panes_before(super_index);
        let start = self.sums.prefix_sum(pane);
        let local = super_index - start;
        debug_assert!(local < self.lens[pane]);
        Some(PanePosition { pane, local })
    }

    /// Maps `(pane, local)` back to the flat super-index.
    pub fn super_index(&self, pane: usize, local: usize) -> Option<usize> {
        let len = self.pane_len(pane)?;
        if local >= len {
            return None;
        }
        Some(self.sums.prefix_sum(pane) + local)
    }
}
