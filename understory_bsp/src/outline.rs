// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exact-geometry shapes built from any [`kurbo::Shape`].

use kurbo::{BezPath, Line, PathEl, Point, Rect, Shape};

use crate::shape::IndexedShape;
use crate::types::{contains_point, overlaps};

/// A filled region with exact intersection tests, for [fine](crate::SearchMode::Fine) queries.
///
/// Curves are flattened to line segments once, at construction, within the
/// given tolerance. Point containment follows the non-zero winding rule over
/// the flattened, implicitly closed boundary. Regions are closed: outlines
/// whose boundaries merely touch intersect.
///
/// ```
/// use kurbo::{BezPath, Point, Rect};
/// use understory_bsp::types::overlaps;
/// use understory_bsp::{IndexedShape, Outline};
///
/// let mut tri = BezPath::new();
/// tri.move_to(Point::new(0.0, 0.0));
/// tri.line_to(Point::new(4.0, 0.0));
/// tri.line_to(Point::new(0.0, 4.0));
/// tri.close_path();
///
/// let tri = Outline::new(&tri);
/// let corner = Outline::new(&Rect::new(3.0, 3.0, 4.0, 4.0));
///
/// // The boxes overlap, the regions do not.
/// assert!(overlaps(tri.bounding_box(), corner.bounding_box()));
/// assert!(!tri.exact_intersects(&corner));
/// ```
#[derive(Clone, Debug)]
pub struct Outline {
    path: BezPath,
    edges: Vec<Line>,
    bbox: Rect,
}

impl Outline {
    /// Flattening tolerance used by [`Outline::new`].
    pub const DEFAULT_TOLERANCE: f64 = 0.1;

    /// Build an outline with [`DEFAULT_TOLERANCE`](Self::DEFAULT_TOLERANCE).
    pub fn new(shape: &impl Shape) -> Self {
        Self::with_tolerance(shape, Self::DEFAULT_TOLERANCE)
    }

    /// Build an outline, flattening curves to within `tolerance`.
    ///
    /// Open subpaths are closed implicitly, as for filling.
    pub fn with_tolerance(shape: &impl Shape, tolerance: f64) -> Self {
        let path = shape.to_path(tolerance);
        let mut edges = Vec::new();
        let mut start: Option<Point> = None;
        let mut last: Option<Point> = None;
        kurbo::flatten(path.iter(), tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                close_subpath(&mut edges, start, last);
                start = Some(p);
                last = Some(p);
            }
            PathEl::LineTo(p) => {
                if let Some(prev) = last {
                    edges.push(Line::new(prev, p));
                }
                last = Some(p);
            }
            PathEl::ClosePath => {
                close_subpath(&mut edges, start, last);
                last = start;
            }
            // Flattening only emits moves, lines and closes.
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        close_subpath(&mut edges, start, last);
        let bbox = path.bounding_box();
        Self { path, edges, bbox }
    }

    /// The source path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Number of line segments in the flattened boundary.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether `pt` lies inside the region (non-zero winding) or on its boundary.
    pub fn contains(&self, pt: Point) -> bool {
        let mut winding = 0_i32;
        for edge in &self.edges {
            let side = orient(edge.p0, edge.p1, pt);
            if side == 0.0 && contains_point(segment_box(*edge), pt) {
                return true;
            }
            if edge.p0.y <= pt.y {
                if edge.p1.y > pt.y && side > 0.0 {
                    winding += 1;
                }
            } else if edge.p1.y <= pt.y && side < 0.0 {
                winding -= 1;
            }
        }
        winding != 0
    }
}

impl IndexedShape for Outline {
    fn bounding_box(&self) -> Rect {
        self.bbox
    }

    fn exact_intersects(&self, other: &Self) -> bool {
        if self.edges.is_empty() || other.edges.is_empty() || !overlaps(self.bbox, other.bbox) {
            return false;
        }
        let shared = self.bbox.intersect(other.bbox);
        for a in &self.edges {
            let a_box = segment_box(*a);
            if !overlaps(a_box, shared) {
                continue;
            }
            for b in &other.edges {
                if overlaps(a_box, segment_box(*b)) && segments_intersect(*a, *b) {
                    return true;
                }
            }
        }
        // Boundaries are disjoint: the regions overlap only if one lies inside the other.
        other.contains(self.edges[0].p0) || self.contains(other.edges[0].p0)
    }
}

fn close_subpath(edges: &mut Vec<Line>, start: Option<Point>, last: Option<Point>) {
    if let (Some(s), Some(l)) = (start, last)
        && s != l
    {
        edges.push(Line::new(l, s));
    }
}

fn segment_box(seg: Line) -> Rect {
    Rect::from_points(seg.p0, seg.p1)
}

/// Signed area of the triangle `a b c`, doubled. Positive when counter-clockwise.
fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

/// Closed segment intersection, including touching endpoints and collinear overlap.
fn segments_intersect(a: Line, b: Line) -> bool {
    let d1 = orient(b.p0, b.p1, a.p0);
    let d2 = orient(b.p0, b.p1, a.p1);
    let d3 = orient(a.p0, a.p1, b.p0);
    let d4 = orient(a.p0, a.p1, b.p1);
    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        return true;
    }
    (d1 == 0.0 && contains_point(segment_box(b), a.p0))
        || (d2 == 0.0 && contains_point(segment_box(b), a.p1))
        || (d3 == 0.0 && contains_point(segment_box(a), b.p0))
        || (d4 == 0.0 && contains_point(segment_box(a), b.p1))
}
