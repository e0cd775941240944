//! Geometry checks for layout assertions.
//!
//! Given the bounding boxes of two rendered elements, decide whether one sits
//! inside the other and whether it occupies any space at all:
//!
//! ```
//! use meme_geometry::{Rect, has_visible_area, is_contained};
//!
//! let container = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let caption = Rect::new(10.0, 10.0, 20.0, 20.0);
//!
//! assert!(is_contained(&container, &caption));
//! assert!(has_visible_area(&caption));
//! ```
//!
//! Every function here is pure and total. Rectangles are `Copy` and are never
//! modified by a check; derived edges are computed into [`Edges`].

mod containment;
mod rect;

pub use containment::{
    AxisContainment, Verdict, axis_containment, has_visible_area, is_contained, verdict,
};
pub use rect::{Axis, Edges, Rect};
