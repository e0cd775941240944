//! Containment and visible-area checks between two rectangles.
//!
//! Containment is checked per axis in either nesting direction: two boxes
//! pass on an axis when one of their spans lies within the other. Callers
//! normally pass the larger box as `background`, but nothing enforces that.

use crate::rect::{Axis, Rect};
use core::fmt;

/// How two spans nest along a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisContainment {
    /// Both spans have the same start and end.
    Coincident,
    /// The first span lies within the second.
    FirstInsideSecond,
    /// The second span lies within the first.
    SecondInsideFirst,
    /// Partial overlap, disjoint, or a non-finite edge.
    Neither,
}

impl AxisContainment {
    /// True for every variant except [`AxisContainment::Neither`].
    #[inline]
    #[must_use]
    pub const fn is_nested(self) -> bool {
        !matches!(self, Self::Neither)
    }
}

impl fmt::Display for AxisContainment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Coincident => "coincident",
            Self::FirstInsideSecond => "first inside second",
            Self::SecondInsideFirst => "second inside first",
            Self::Neither => "not nested",
        })
    }
}

/// Classify how `first` and `second` nest along `axis`.
///
/// Non-finite rectangles always classify as [`AxisContainment::Neither`].
#[must_use]
pub fn axis_containment(first: &Rect, second: &Rect, axis: Axis) -> AxisContainment {
    if !first.is_finite() || !second.is_finite() {
        return AxisContainment::Neither;
    }
    let (first_start, first_end) = first.edges().span(axis);
    let (second_start, second_end) = second.edges().span(axis);

    let second_spans_first = second_start <= first_start && first_end <= second_end;
    let first_spans_second = first_start <= second_start && second_end <= first_end;

    match (second_spans_first, first_spans_second) {
        (true, true) => AxisContainment::Coincident,
        (true, false) => AxisContainment::FirstInsideSecond,
        (false, true) => AxisContainment::SecondInsideFirst,
        (false, false) => AxisContainment::Neither,
    }
}

/// True when `background` and `forefront` nest on both axes.
///
/// Each axis passes if either span contains the other, so the result is
/// symmetric in its arguments. Edges that touch count as contained. Any
/// non-finite component yields `false`.
#[must_use]
pub fn is_contained(background: &Rect, forefront: &Rect) -> bool {
    axis_containment(background, forefront, Axis::Vertical).is_nested()
        && axis_containment(background, forefront, Axis::Horizontal).is_nested()
}

/// True when the rectangle occupies space: `right != left` and
/// `bottom != top`. Non-finite rectangles have no visible area.
#[must_use]
#[allow(
    clippy::float_cmp,
    reason = "a box is empty exactly when opposite edges coincide"
)]
pub fn has_visible_area(rect: &Rect) -> bool {
    if !rect.is_finite() {
        return false;
    }
    let edges = rect.edges();
    edges.right != edges.left && edges.bottom != edges.top
}

/// Full outcome of comparing a background box with a forefront box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Result of [`is_contained`].
    pub contained: bool,
    /// Nesting along the vertical axis, background first.
    pub vertical: AxisContainment,
    /// Nesting along the horizontal axis, background first.
    pub horizontal: AxisContainment,
    /// Result of [`has_visible_area`] for the forefront box.
    pub forefront_visible: bool,
}

impl Verdict {
    /// True when the forefront is contained and actually renders.
    #[inline]
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.contained && self.forefront_visible
    }

    /// Axes on which the boxes do not nest.
    #[must_use]
    pub fn failing_axes(&self) -> Vec<Axis> {
        [
            (Axis::Vertical, self.vertical),
            (Axis::Horizontal, self.horizontal),
        ]
        .into_iter()
        .filter_map(|(axis, nesting)| (!nesting.is_nested()).then_some(axis))
        .collect()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "vertical: {}, horizontal: {}, visible: {}",
            self.vertical, self.horizontal, self.forefront_visible
        )
    }
}

/// Compute the [`Verdict`] for a background/forefront pair.
#[must_use]
pub fn verdict(background: &Rect, forefront: &Rect) -> Verdict {
    let vertical = axis_containment(background, forefront, Axis::Vertical);
    let horizontal = axis_containment(background, forefront, Axis::Horizontal);
    Verdict {
        contained: vertical.is_nested() && horizontal.is_nested(),
        vertical,
        horizontal,
        forefront_visible: has_visible_area(forefront),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(top: f64, left: f64, width: f64, height: f64) -> Rect {
        Rect::new(top, left, width, height)
    }

    /// A small box well inside a large one is contained.
    ///
    /// # Panics
    /// Panics if nested boxes are not reported as contained.
    #[test]
    fn nested_box_is_contained() {
        let background = rect(0.0, 0.0, 100.0, 100.0);
        let forefront = rect(10.0, 10.0, 20.0, 20.0);
        assert!(is_contained(&background, &forefront));
    }

    /// Boxes that do not touch are not contained.
    ///
    /// # Panics
    /// Panics if disjoint boxes are reported as contained.
    #[test]
    fn disjoint_boxes_are_not_contained() {
        let background = rect(0.0, 0.0, 10.0, 10.0);
        let forefront = rect(50.0, 50.0, 10.0, 10.0);
        assert!(!is_contained(&background, &forefront));
    }

    /// Straddling the right edge fails even though the vertical span nests.
    ///
    /// # Panics
    /// Panics if a partial overlap is reported as contained.
    #[test]
    fn partial_overlap_is_not_contained() {
        let background = rect(0.0, 0.0, 10.0, 10.0);
        let forefront = rect(5.0, 5.0, 20.0, 5.0);
        assert!(!is_contained(&background, &forefront));

        let result = verdict(&background, &forefront);
        assert_eq!(result.vertical, AxisContainment::SecondInsideFirst);
        assert_eq!(result.horizontal, AxisContainment::Neither);
        assert_eq!(result.failing_axes(), vec![Axis::Horizontal]);
    }

    /// Swapping the arguments never changes the answer.
    ///
    /// # Panics
    /// Panics if `is_contained` is not symmetric for any sample pair.
    #[test]
    fn containment_is_symmetric() {
        let samples = [
            rect(0.0, 0.0, 100.0, 100.0),
            rect(10.0, 10.0, 20.0, 20.0),
            rect(0.0, 0.0, 10.0, 10.0),
            rect(50.0, 50.0, 10.0, 10.0),
            rect(5.0, 5.0, 20.0, 5.0),
            rect(5.0, 5.0, 0.0, 10.0),
            rect(-20.0, 40.0, 300.0, 12.5),
        ];
        for first in &samples {
            for second in &samples {
                assert_eq!(
                    is_contained(first, second),
                    is_contained(second, first),
                    "{first} vs {second}"
                );
            }
        }
    }

    /// Every finite box nests with itself on both axes.
    ///
    /// # Panics
    /// Panics if a box is not contained in itself.
    #[test]
    fn identity_is_contained() {
        let sample = rect(3.25, 7.5, 40.0, 18.0);
        assert!(is_contained(&sample, &sample));
        let result = verdict(&sample, &sample);
        assert_eq!(result.vertical, AxisContainment::Coincident);
        assert_eq!(result.horizontal, AxisContainment::Coincident);
        assert!(result.passed());
    }

    /// Sharing top and bottom edges still counts as contained vertically.
    ///
    /// # Panics
    /// Panics if touching edges break containment.
    #[test]
    fn shared_edges_are_contained() {
        let background = rect(0.0, 0.0, 100.0, 50.0);
        let forefront = rect(0.0, 25.0, 50.0, 50.0);
        assert_eq!(
            axis_containment(&background, &forefront, Axis::Vertical),
            AxisContainment::Coincident
        );
        assert!(is_contained(&background, &forefront));
    }

    /// The larger box may be passed as the forefront.
    ///
    /// # Panics
    /// Panics if reversed nesting is rejected.
    #[test]
    fn reversed_nesting_is_accepted() {
        let small = rect(10.0, 10.0, 20.0, 20.0);
        let large = rect(0.0, 0.0, 100.0, 100.0);
        assert!(is_contained(&small, &large));
        assert_eq!(
            axis_containment(&small, &large, Axis::Horizontal),
            AxisContainment::FirstInsideSecond
        );
    }

    /// A zero-width box has no visible area even when it is contained.
    ///
    /// # Panics
    /// Panics if a degenerate box is reported visible.
    #[test]
    fn zero_width_has_no_visible_area() {
        let background = rect(0.0, 0.0, 100.0, 100.0);
        let forefront = rect(5.0, 5.0, 0.0, 10.0);
        assert!(!has_visible_area(&forefront));
        assert!(is_contained(&background, &forefront));
        assert!(!verdict(&background, &forefront).passed());
        assert!(!has_visible_area(&rect(5.0, 5.0, 10.0, 0.0)));
        assert!(has_visible_area(&rect(5.0, 5.0, 10.0, 1.0)));
    }

    /// NaN or infinite input gives a defined `false` rather than a panic.
    ///
    /// # Panics
    /// Panics if non-finite input is treated as contained or visible.
    #[test]
    fn non_finite_input_is_never_contained() {
        let background = rect(0.0, 0.0, 100.0, 100.0);
        let broken = rect(f64::NAN, 10.0, 10.0, 10.0);
        assert!(!is_contained(&background, &broken));
        assert!(!is_contained(&broken, &background));
        assert!(!has_visible_area(&broken));
        assert!(!has_visible_area(&rect(0.0, 0.0, f64::INFINITY, 1.0)));
        assert_eq!(verdict(&background, &broken).failing_axes().len(), 2);
    }
}
