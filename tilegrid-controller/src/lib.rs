//! Composition root for the `tilegrid` engine.
//!
//! `tilegrid` is headless and holds no tiles. This crate owns one grid view's worth of state
//! and wires the engine pieces together the way a poster/tile browser needs them:
//!
//! - a tile arena bound 1:1 to the current item list, with per-tile overlays
//! - resize/scroll/wheel handling that keeps the visible range and rendered payloads current
//! - a reload guard that serializes page changes and async catalog fetches
//!
//! It is framework-agnostic: payloads are attached and detached through [`TileRenderer`], and
//! fetches run on whatever executor the adapter uses via [`fetch`].
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod catalog;
mod controller;
mod error;
mod item;
mod options;
mod renderer;
mod tile;

#[cfg(test)]
mod tests;

pub use catalog::{BoxError, Catalog, ReloadOutcome, ReloadTicket, fetch};
pub use controller::{GridController, ViewSnapshot, ViewState};
pub use error::ReloadError;
pub use item::{CatalogPage, Item, ItemId};
pub use options::{ControllerOptions, OverlayLookup};
pub use renderer::{NullRenderer, TileRenderer};
pub use tile::Tile;
