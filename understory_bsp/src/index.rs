// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `SpatialIndex` API: one lock around a recursive node tree.

use std::sync::Arc;

use kurbo::{Point, Rect};
use parking_lot::Mutex;

use crate::error::Error;
use crate::node::{Node, Stats};
use crate::shape::{IndexedShape, ShapeRef, ShapeSet};
use crate::types::{Axis, contains_point, is_valid_bounds, overlaps, union_all};

/// Default depth limit below the root; see [`SpatialIndex::with_max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Largest depth limit [`SpatialIndex::with_max_depth`] accepts; larger values are clamped.
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Intersection semantics for [`SpatialIndex::find_intersecting_shapes`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Bounding boxes overlap.
    #[default]
    Coarse,
    /// Bounding boxes overlap and [`IndexedShape::exact_intersects`] holds.
    Fine,
}

/// A dynamic 2D shape index over fixed bounds.
///
/// Every operation takes `&self` and holds one internal lock for its whole
/// duration, so calls from several threads are fully serialized. The lock is
/// not reentrant: [`IndexedShape`] methods must not call back into the index
/// holding them. `Debug` formatting is the exception and never blocks.
pub struct SpatialIndex<S> {
    bounds: Rect,
    max_depth: usize,
    root: Mutex<Node<S>>,
}

impl<S> core::fmt::Debug for SpatialIndex<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("SpatialIndex");
        s.field("bounds", &self.bounds).field("max_depth", &self.max_depth);
        // Skip the tree summary rather than wait on a lock held by the caller.
        if let Some(root) = self.root.try_lock() {
            let stats = root.stats();
            s.field("nodes", &stats.nodes)
                .field("shapes", &stats.shapes)
                .field("depth", &stats.depth);
        }
        s.finish_non_exhaustive()
    }
}

impl<S> SpatialIndex<S> {
    /// Create an empty index covering `bounds`.
    ///
    /// Fails with [`Error::InvalidBounds`] if `bounds` has zero, negative, or
    /// non-finite width or height.
    pub fn new(bounds: Rect) -> Result<Self, Error> {
        Self::with_max_depth(bounds, DEFAULT_MAX_DEPTH)
    }

    /// Create an empty index whose nodes stop splitting `max_depth` levels below the root.
    ///
    /// Shapes reaching a node at the limit are stored there even if they would
    /// fit one of its halves. This bounds recursion for very small or
    /// degenerate shapes. `max_depth` is clamped to [`MAX_DEPTH_LIMIT`].
    pub fn with_max_depth(bounds: Rect, max_depth: usize) -> Result<Self, Error> {
        if !is_valid_bounds(bounds) {
            return Err(Error::InvalidBounds(bounds));
        }
        if max_depth > MAX_DEPTH_LIMIT {
            log::debug!("max_depth {max_depth} clamped to {MAX_DEPTH_LIMIT}");
        }
        let max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        Ok(Self {
            bounds,
            max_depth,
            root: Mutex::new(Node::new(bounds, Axis::X)),
        })
    }

    /// The overall bounds, fixed at construction.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The configured depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of stored entries. A shape inserted twice counts twice.
    pub fn len(&self) -> usize {
        self.root.lock().shape_count()
    }

    /// Whether no shapes are stored.
    pub fn is_empty(&self) -> bool {
        let root = self.root.lock();
        !root.has_shapes() && !root.has_sub_nodes()
    }

    /// Node and shape counts of the current tree.
    pub fn stats(&self) -> Stats {
        self.root.lock().stats()
    }

    /// Remove every shape. The index then behaves as freshly constructed.
    pub fn clear(&self) {
        self.root.lock().clear();
    }

    /// Stored shapes whose bounding box overlaps `rect`.
    pub fn query_rect(&self, rect: Rect) -> ShapeSet<S> {
        let root = self.root.lock();
        let mut out = ShapeSet::default();
        root.visit(rect, &mut |entry| {
            if overlaps(entry.bbox, rect) {
                out.insert(ShapeRef::new(Arc::clone(&entry.shape)));
            }
        });
        out
    }

    /// Stored shapes whose bounding box contains `pt`, boundary included.
    pub fn query_point(&self, pt: Point) -> ShapeSet<S> {
        let root = self.root.lock();
        let mut out = ShapeSet::default();
        root.visit(Rect::from_points(pt, pt), &mut |entry| {
            if contains_point(entry.bbox, pt) {
                out.insert(ShapeRef::new(Arc::clone(&entry.shape)));
            }
        });
        out
    }
}

impl<S: IndexedShape> SpatialIndex<S> {
    /// Build an index whose bounds are the union of all shapes' bounding boxes,
    /// then insert every shape.
    ///
    /// Fails with [`Error::NoShapes`] for an empty collection, and with
    /// [`Error::InvalidBounds`] if the union has zero width or height (for
    /// example, all shapes are points on one vertical line).
    pub fn from_shapes(shapes: impl IntoIterator<Item = Arc<S>>) -> Result<Self, Error> {
        let shapes: Vec<Arc<S>> = shapes.into_iter().collect();
        let bounds = union_all(shapes.iter().map(|s| s.bounding_box())).ok_or(Error::NoShapes)?;
        let index = Self::new(bounds)?;
        let rejected = index.add_shapes(shapes);
        if !rejected.is_empty() {
            log::debug!(
                "from_shapes: {} shape(s) with non-finite bounds were not stored",
                rejected.len()
            );
        }
        log::debug!("from_shapes: built {index:?}");
        Ok(index)
    }

    /// Insert one shape.
    ///
    /// Returns `false`, storing nothing, if the shape's bounding box is not
    /// fully inside [`bounds`](Self::bounds) (a non-finite box never is).
    pub fn add_shape(&self, shape: Arc<S>) -> bool {
        let mut root = self.root.lock();
        let added = self.insert_locked(&mut root, shape);
        root.prune();
        added
    }

    /// Insert a batch of shapes, pruning once at the end.
    ///
    /// Returns the shapes that were not stored because their bounding box is
    /// outside the index bounds.
    pub fn add_shapes(&self, shapes: impl IntoIterator<Item = Arc<S>>) -> ShapeSet<S> {
        let mut root = self.root.lock();
        let mut rejected = ShapeSet::default();
        for shape in shapes {
            if !self.insert_locked(&mut root, Arc::clone(&shape)) {
                rejected.insert(ShapeRef::new(shape));
            }
        }
        root.prune();
        rejected
    }

    /// Stored shapes intersecting `query`, excluding `query` itself by identity.
    ///
    /// With [`SearchMode::Coarse`] a shape matches when the bounding boxes
    /// overlap. With [`SearchMode::Fine`] it must also satisfy
    /// [`IndexedShape::exact_intersects`] against `query`.
    pub fn find_intersecting_shapes(&self, query: &S, mode: SearchMode) -> ShapeSet<S> {
        let root = self.root.lock();
        let mut out = ShapeSet::default();
        root.query(query, mode, &mut out);
        out
    }

    fn insert_locked(&self, root: &mut Node<S>, shape: Arc<S>) -> bool {
        let bbox = shape.bounding_box();
        let added = root.insert(shape, bbox, 0, self.max_depth);
        if !added {
            log::debug!("rejected shape with bounds {bbox:?} outside {:?}", self.bounds);
        }
        added
    }
}
