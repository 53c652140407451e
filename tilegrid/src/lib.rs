//! A headless engine for responsive, virtualized tile grids.
//!
//! This crate holds the parts of a poster/tile browser that have real invariants:
//! column/row reflow as the container resizes, viewport-driven toggling of expensive tile
//! payloads (images), fused smooth-scroll transitions, and page-selector generation.
//!
//! It is UI-agnostic. A GUI layer is expected to provide:
//! - the container width and viewport height
//! - a normalized scroll position (`0.0..=1.0`) and raw wheel deltas
//! - a sink for render/unrender transitions (attach/detach the tile payload)
//!
//! For a composition root that wires these together (tile arena, reload guard, async
//! catalog fetches), see the `tilegrid-controller` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod fenwick;
mod layout;
mod options;
mod pagination;
mod pane;
mod scroll;
mod state;
mod types;
mod visibility;


pub use layout::{GridLayout, Reflow, compute_geometry};
pub use options::{Easing, GridOptions, SmoothScrollOptions};
pub use pagination::{EllipsisSide, PageControl, Paginator, build_page_controls};
pub use pane::{PaneIndex, PanePosition};
pub use scroll::{SmoothScroll, Transition};
pub use state::{PageSet, ScrollState};
pub use types::{Bounds, Cell, GridGeometry, VisibilityChange, VisibleRange};
pub use visibility::VisibilityTracker;
