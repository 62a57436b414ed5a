//! Core bouquet composition and circle-physics library.
//!
//! Main components:
//! - [`catalog`] — item and tier definitions for decorative elements.
//! - [`selection`] — the user's chosen items, variants and quantities.
//! - [`placement`] — pure polar placement of flattened instances.
//! - [`compose`] — composition generation across the style presets.
//! - [`physics`] — moving-circle world with boundary reflection.
//! - [`scheduler`] — cooperative frame pacing with synchronous stop.
//! - [`gallery`] — in-memory snapshot store (save / load).
//! - [`raster`] — software rasterizer and PNG export.
//! - [`types`] — shared type aliases and IDs.

pub mod catalog;
pub mod compose;
pub mod gallery;
pub mod physics;
pub mod placement;
pub mod raster;
pub mod scheduler;
pub mod selection;
pub mod types;
