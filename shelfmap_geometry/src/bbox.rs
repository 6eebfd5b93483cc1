// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes in facility space.

use kurbo::{Point, Rect, Size};

/// Axis-aligned rectangle in facility coordinate space.
///
/// Stored as origin plus size, which is how layout configuration describes containers.
/// `depth` is only set for containers that are laid out along a third axis; the 2D
/// operations ignore it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Extent along x. Expected to be non-negative.
    pub width: f64,
    /// Extent along y. Expected to be non-negative.
    pub height: f64,
    /// Optional extent along the third axis.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub depth: Option<f64>,
}

impl BoundingBox {
    /// The empty box at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a flat box from origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            depth: None,
        }
    }

    /// Return a copy of this box with a depth along the third axis.
    #[must_use]
    pub const fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Centre of the box: `(x + width / 2, y + height / 2)`.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Size of the box as a [`kurbo::Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Area of the box.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True if the box has zero (or negative) width or height.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Whether the box contains `pt`.
    ///
    /// Uses the half-open convention of [`kurbo::Rect::contains`]: the left and top edges are
    /// inside, the right and bottom edges are not, so adjacent boxes never both contain a point.
    pub fn contains(&self, pt: Point) -> bool {
        self.to_rect().contains(pt)
    }

    /// Minimal box enclosing both `self` and `other`.
    ///
    /// Depth is the larger of the two depths, if either is set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let rect = self.to_rect().union(other.to_rect());
        let depth = match (self.depth, other.depth) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        Self {
            depth,
            ..Self::from_rect(rect)
        }
    }

    /// Convert to a [`kurbo::Rect`] (corner form).
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Build a flat box from a [`kurbo::Rect`].
    ///
    /// The rect is normalized first, so inverted rects produce non-negative sizes.
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl From<BoundingBox> for Rect {
    fn from(b: BoundingBox) -> Self {
        b.to_rect()
    }
}

/// Minimal box enclosing every box in `boxes`.
///
/// - Empty input returns [`BoundingBox::ZERO`].
/// - A single box is returned unchanged.
pub fn combined_bounding_box(boxes: &[BoundingBox]) -> BoundingBox {
    let mut it = boxes.iter();
    let Some(first) = it.next() else {
        return BoundingBox::ZERO;
    };
    it.fold(*first, |acc, b| acc.union(b))
}
