//! Axis-aligned rectangles in viewport coordinates.

use core::fmt;
use serde::{Deserialize, Serialize};

/// The bounding box of a rendered element, in CSS pixels.
///
/// Field names match the object produced by `Element.getBoundingClientRect()`,
/// so a serialized `DOMRect` deserializes straight into this type (the extra
/// `x`/`y`/`bottom`/`right` members are ignored and recomputed).
///
/// Width and height are non-negative for real layout but nothing here relies
/// on that.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Distance from the top of the viewport.
    pub top: f64,
    /// Distance from the left of the viewport.
    pub left: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

/// The four edges of a [`Rect`], derived on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edges {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    /// Create a rectangle from its position and size.
    #[inline]
    #[must_use]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// `top + height`.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// `left + width`.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Compute all four edges without touching `self`.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> Edges {
        Edges {
            top: self.top,
            left: self.left,
            bottom: self.bottom(),
            right: self.right(),
        }
    }

    /// True when every component and both derived edges are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.top, self.left, self.width, self.height]
            .iter()
            .all(|component| component.is_finite())
            && self.bottom().is_finite()
            && self.right().is_finite()
    }

    /// Strict, one-directional containment: `other` lies inside `self` on
    /// both axes. Shared edges count as inside.
    ///
    /// Returns `false` if either rectangle is not finite.
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        if !self.is_finite() || !other.is_finite() {
            return false;
        }
        let outer = self.edges();
        let inner = other.edges();
        outer.top <= inner.top
            && inner.bottom <= outer.bottom
            && outer.left <= inner.left
            && inner.right <= outer.right
    }
}

impl Edges {
    /// The `[start, end]` span of these edges along `axis`.
    #[inline]
    #[must_use]
    pub const fn span(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Vertical => (self.top, self.bottom),
            Axis::Horizontal => (self.left, self.right),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{{top: {}, left: {}, width: {}, height: {}}}",
            self.top, self.left, self.width, self.height
        )
    }
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Top to bottom (`top`/`bottom` edges).
    Vertical,
    /// Left to right (`left`/`right` edges).
    Horizontal,
}

impl fmt::Display for Axis {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        })
    }
}
