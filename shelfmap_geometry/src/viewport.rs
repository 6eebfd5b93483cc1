// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting a content region into a fixed-size viewport.

use kurbo::{Affine, Point, Vec2};

use crate::BoundingBox;

/// Options for [`fit`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FitOptions {
    /// Padding in viewport units, subtracted from the viewport and added to the content.
    pub padding: f64,
    /// Never zoom in past native size (`scale <= 1.0`).
    pub cap_at_native: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: 0.0,
            cap_at_native: false,
        }
    }
}

/// Scale and translation that place a content box inside a viewport.
///
/// The content is first translated by [`translate`](Self::translate) so that its centre sits
/// on the origin, then scaled by [`scale`](Self::scale); the renderer finally moves the origin
/// to the viewport centre. [`ViewportFit::to_affine`] composes the three steps.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportFit {
    /// Uniform zoom factor. Always finite and positive.
    pub scale: f64,
    /// Translation applied before scaling: the negated content centre.
    pub translate: Vec2,
    /// Set when the content box had no area and the identity fit was returned instead.
    pub degenerate: bool,
}

impl ViewportFit {
    /// The identity fit used for degenerate content.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
        degenerate: true,
    };

    /// Affine transform from content space to viewport space.
    pub fn to_affine(&self, viewport_width: f64, viewport_height: f64) -> Affine {
        Affine::translate(Vec2::new(viewport_width / 2.0, viewport_height / 2.0))
            * Affine::scale(self.scale)
            * Affine::translate(self.translate)
    }

    /// Map a content-space point into viewport space.
    pub fn apply(&self, pt: Point, viewport_width: f64, viewport_height: f64) -> Point {
        self.to_affine(viewport_width, viewport_height) * pt
    }
}

/// Fit `content` into a `viewport_width` × `viewport_height` viewport.
///
/// ```text
/// scale_x   = (viewport_width  - padding) / (content.width  + padding)
/// scale_y   = (viewport_height - padding) / (content.height + padding)
/// scale     = min(scale_x, scale_y)          (capped at 1.0 if requested)
/// translate = -center(content)
/// ```
///
/// A content box with zero width or height, or a viewport too small to leave a positive
/// scale after padding, yields [`ViewportFit::IDENTITY`].
pub fn fit(
    content: BoundingBox,
    viewport_width: f64,
    viewport_height: f64,
    options: FitOptions,
) -> ViewportFit {
    if content.width == 0.0 || content.height == 0.0 {
        return ViewportFit::IDENTITY;
    }
    let padding = options.padding;
    let scale_x = (viewport_width - padding) / (content.width + padding);
    let scale_y = (viewport_height - padding) / (content.height + padding);
    let mut scale = scale_x.min(scale_y);
    if options.cap_at_native {
        scale = scale.min(1.0);
    }
    if !scale.is_finite() || scale <= 0.0 {
        return ViewportFit::IDENTITY;
    }
    ViewportFit {
        scale,
        translate: -content.center().to_vec2(),
        degenerate: false,
    }
}
