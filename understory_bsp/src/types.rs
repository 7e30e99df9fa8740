// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry helpers over [`kurbo::Rect`] and the split axis.
//!
//! All predicates here treat rectangles as closed sets: touching edges overlap,
//! and a rectangle contains its own boundary. Any comparison involving NaN is false.

use kurbo::{Point, Rect};

/// Axis along which a node bisects its bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Split with a vertical line at the horizontal midpoint.
    X,
    /// Split with a horizontal line at the vertical midpoint.
    Y,
}

impl Axis {
    /// The other axis. Child nodes always split on the flipped axis of their parent.
    pub const fn flip(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Bisect `rect` at its midpoint along this axis.
    ///
    /// The first half is the lower-coordinate half. The two halves share the
    /// midline and together tile `rect` exactly.
    pub fn split(self, rect: Rect) -> [Rect; 2] {
        match self {
            Self::X => {
                let mid = 0.5 * (rect.x0 + rect.x1);
                [
                    Rect::new(rect.x0, rect.y0, mid, rect.y1),
                    Rect::new(mid, rect.y0, rect.x1, rect.y1),
                ]
            }
            Self::Y => {
                let mid = 0.5 * (rect.y0 + rect.y1);
                [
                    Rect::new(rect.x0, rect.y0, rect.x1, mid),
                    Rect::new(rect.x0, mid, rect.x1, rect.y1),
                ]
            }
        }
    }
}

/// Whether `outer` fully contains `inner`, boundaries included.
#[inline]
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Whether two rectangles share at least one point.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Whether `rect` contains `pt`, boundaries included.
///
/// Unlike [`Rect::contains`], the right and bottom edges count as inside.
#[inline]
pub fn contains_point(rect: Rect, pt: Point) -> bool {
    rect.x0 <= pt.x && pt.x <= rect.x1 && rect.y0 <= pt.y && pt.y <= rect.y1
}

/// Whether `rect` can serve as the overall bounds of an index: finite, with
/// strictly positive width and height.
#[inline]
pub fn is_valid_bounds(rect: Rect) -> bool {
    rect.is_finite() && rect.width() > 0.0 && rect.height() > 0.0
}

/// Union of all rectangles, or `None` for an empty iterator.
pub(crate) fn union_all(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    let mut it = rects.into_iter();
    let first = it.next()?;
    Some(it.fold(first, |acc, r| acc.union(r)))
}
