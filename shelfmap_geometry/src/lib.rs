// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelfmap Geometry: bounding boxes and viewport fitting for warehouse layouts.
//!
//! Every storage container, area, and facility in a Shelfmap snapshot carries an axis-aligned
//! [`BoundingBox`] in facility coordinate space. This crate owns all of the numeric geometry the
//! rest of the workspace needs, so the same formulas are used everywhere:
//!
//! - [`combined_bounding_box`] merges any number of boxes into their minimal enclosing box.
//! - [`BoundingBox::center`] returns the centre point of a box.
//! - [`fit`] computes the scale and translation that fit a content box into a fixed-size
//!   viewport, returning a [`ViewportFit`].
//!
//! Values convert to and from [`kurbo`] types (`Rect`, `Point`, `Vec2`, `Affine`) so renderers
//! can feed them straight into their drawing pipeline.
//!
//! ## Degenerate input
//!
//! Empty or zero-sized input never produces an error, `NaN`, or infinity. An empty merge yields
//! [`BoundingBox::ZERO`], and fitting a zero-width or zero-height box yields the identity fit
//! (`scale == 1.0`, no translation) with [`ViewportFit::degenerate`] set.
//!
//! # Example
//!
//! ```rust
//! use shelfmap_geometry::{BoundingBox, FitOptions, combined_bounding_box, fit};
//!
//! let racks = [
//!     BoundingBox::new(0.0, 0.0, 100.0, 50.0),
//!     BoundingBox::new(150.0, 20.0, 50.0, 80.0),
//! ];
//! let content = combined_bounding_box(&racks);
//! assert_eq!(content, BoundingBox::new(0.0, 0.0, 200.0, 100.0));
//!
//! let view = fit(content, 800.0, 600.0, FitOptions::default());
//! assert_eq!(view.scale, 4.0);
//! assert_eq!(content.center().to_vec2() + view.translate, kurbo::Vec2::ZERO);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bbox;
mod viewport;

pub use bbox::{BoundingBox, combined_bounding_box};
pub use viewport::{FitOptions, ViewportFit, fit};
