use alloc::vec::Vec;

use crate::{Bounds, VisibilityChange, VisibleRange};

/// Tracks which tiles intersect the viewport and toggles their expensive payload.
///
/// The tracker owns only the per-tile `rendered` flags and the current [`VisibleRange`].
/// Tile geometry is supplied on every call through `bounds_of(index)` (`None` = not laid out
/// yet), and transitions are reported through `emit`, so adapters decide what "attach" and
/// "detach" mean.
///
/// Invariants after every scan:
/// - a rendered tile intersected the viewport when it was last checked;
/// - no tile outside the visible range is rendered;
/// - the range is contiguous in row-major order.
#[derive(Clone, Debug, Default)]
pub struct VisibilityTracker {
    rendered: Vec<bool>,
    range: Option<VisibleRange>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.range
    }

    pub fn is_rendered(&self, index: usize) -> bool {
        self.rendered.get(index).copied().unwrap_or(false)
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered.iter().filter(|&&r| r).count()
    }

    /// Replaces the tile set with `count` unrendered tiles.
    ///
    /// Every tile still rendered from the previous set is reported as unrendered first, so
    /// its payload is released before the set is swapped.
    pub fn reset(&mut self, count: usize, mut emit: impl FnMut(VisibilityChange)) {
        self.clear(&mut emit);
        self.rendered.clear();
        self.rendered.resize(count, false);
        gdebug!(count, "VisibilityTracker::reset");
    }

    /// Unrenders everything and forgets the visible range.
    pub fn clear(&mut self, mut emit: impl FnMut(VisibilityChange)) {
        for (i, r) in self.rendered.iter_mut().enumerate() {
            if *r {
                *r = false;
                emit(VisibilityChange::Unrendered(i));
            }
        }
        self.range = None;
    }

    /// Seeds the scan at tile 0 (rendered unconditionally) and runs a full scan.
    ///
    /// Only call this once the tiles have committed real bounds; against stale/zero bounds the
    /// scan would immediately unrender the seed and lose the range.
    pub fn initialize(
        &mut self,
        viewport: Bounds,
        bounds_of: impl Fn(usize) -> Option<Bounds>,
        mut emit: impl FnMut(VisibilityChange),
    ) {
        if self.rendered.is_empty() {
            self.range = None;
            return;
        }
        self.set_rendered(0, true, &mut emit);
        self.range = Some(VisibleRange {
            first_index: 0,
            last_index: 0,
        });
        self.full_scan(viewport, bounds_of, emit);
    }

    /// Re-checks the current range against `viewport` and grows it in both directions.
    ///
    /// 1. Every tile in the range is rendered/unrendered to match its intersection state.
    /// 2. The range is trimmed to its first..last intersecting tile. When nothing in it
    ///    intersects anymore (a fast scroll jumped past it), a new seed is located by binary
    ///    search over the tiles' row-major tops.
    /// 3. The range extends backward from `first` and forward from `last` while the
    ///    neighbouring tile intersects, stopping at the first one that does not.
    pub fn full_scan(
        &mut self,
        viewport: Bounds,
        bounds_of: impl Fn(usize) -> Option<Bounds>,
        mut emit: impl FnMut(VisibilityChange),
    ) {
        let count = self.rendered.len();
        if count == 0 {
            self.range = None;
            return;
        }
        let hits = |i: usize| bounds_of(i).is_some_and(|b| b.intersects(&viewport));

        let mut seeded = None;
        if let Some(range) = self.range {
            let last = range.last_index.min(count - 1);
            for i in range.first_index..=last {
                self.set_rendered(i, hits(i), &mut emit);
            }

            let mut first = range.first_index;
            while first <= last && !self.rendered[first] {
                first += 1;
            }
            if first <= last {
                let mut last = last;
                while !self.rendered[last] {
                    last -= 1;
                }
                seeded = Some((first, last));
            }
        }

        let (mut first, mut last) = match seeded {
            Some(pair) => pair,
            None => {
                let Some(i) = self.seek(&viewport, &bounds_of) else {
                    gtrace!("VisibilityTracker::full_scan: viewport holds no tiles");
                    self.range = None;
                    return;
                };
                gtrace!(index = i, "VisibilityTracker::full_scan reseeded");
                self.set_rendered(i, true, &mut emit);
                (i, i)
            }
        };

        while first > 0 && hits(first - 1) {
            first -= 1;
            self.set_rendered(first, true, &mut emit);
        }
        while last + 1 < count && hits(last + 1) {
            last += 1;
            self.set_rendered(last, true, &mut emit);
        }

        gtrace!(first, last, "VisibilityTracker::full_scan");
        self.range = Some(VisibleRange {
            first_index: first,
            last_index: last,
        });
    }

    /// Finds the first intersecting tile, assuming tile tops never decrease with the index.
    fn seek(&self, viewport: &Bounds, bounds_of: &impl Fn(usize) -> Option<Bounds>) -> Option<usize> {
        let count = self.rendered.len();

        // partition point of "tile ends above the viewport"
        let mut lo = 0usize;
        let mut hi = count;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let above = bounds_of(mid).is_some_and(|b| b.bottom() < viewport.y);
            if above {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        for i in lo..count {
            let b = bounds_of(i)?;
            if b.y > viewport.bottom() {
                return None;
            }
            if b.intersects(viewport) {
                return Some(i);
            }
        }
        None
    }

    fn set_rendered(
        &mut self,
        index: usize,
        rendered: bool,
        emit: &mut impl FnMut(VisibilityChange),
    ) {
        let Some(slot) = self.rendered.get_mut(index) else {
            return;
        };
        if *slot == rendered {
            return;
        }
        *slot = rendered;
        emit(if rendered {
            VisibilityChange::Rendered(index)
        } else {
            VisibilityChange::Unrendered(index)
        });
    }
}
