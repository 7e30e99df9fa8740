// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shape capability consumed by the index, and identity handles for results.

use core::fmt::Debug;
use core::hash::{Hash, Hasher};
use core::ops::Deref;
use std::sync::Arc;

use kurbo::{Circle, Rect};
use rustc_hash::FxHashSet;

use crate::types::overlaps;

/// A 2D shape that can be stored in a [`SpatialIndex`](crate::SpatialIndex).
///
/// The bounding box is mandatory and drives placement and coarse queries.
/// [`exact_intersects`](Self::exact_intersects) is only consulted by
/// [`SearchMode::Fine`](crate::SearchMode::Fine) queries; the provided
/// implementation falls back to bounding-box overlap, so shapes that are their
/// own bounding box (like [`Rect`]) need not override it.
pub trait IndexedShape {
    /// Axis-aligned bounding box, in the same coordinate space as the index bounds.
    fn bounding_box(&self) -> Rect;

    /// Whether the actual regions of `self` and `other` share at least one point.
    fn exact_intersects(&self, other: &Self) -> bool {
        overlaps(self.bounding_box(), other.bounding_box())
    }
}

impl IndexedShape for Rect {
    fn bounding_box(&self) -> Self {
        *self
    }
}

impl IndexedShape for Circle {
    fn bounding_box(&self) -> Rect {
        kurbo::Shape::bounding_box(self)
    }

    fn exact_intersects(&self, other: &Self) -> bool {
        (self.center - other.center).hypot() <= self.radius + other.radius
    }
}

/// Shared handle to a stored shape, compared and hashed by identity.
///
/// Two handles are equal only when they point at the same allocation, so two
/// congruent shapes inserted separately remain distinct entries.
pub struct ShapeRef<S>(Arc<S>);

impl<S> ShapeRef<S> {
    /// Wrap a shared shape.
    pub fn new(shape: Arc<S>) -> Self {
        Self(shape)
    }

    /// The underlying shared pointer.
    pub fn as_arc(&self) -> &Arc<S> {
        &self.0
    }

    /// Unwrap into the underlying shared pointer.
    pub fn into_arc(self) -> Arc<S> {
        self.0
    }

    /// Whether this handle points at `shape` (reference identity, not equality).
    pub fn is(&self, shape: &S) -> bool {
        core::ptr::eq(Arc::as_ptr(&self.0), shape)
    }
}

impl<S> Clone for ShapeRef<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S> PartialEq for ShapeRef<S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<S> Eq for ShapeRef<S> {}

impl<S> Hash for ShapeRef<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl<S> Deref for ShapeRef<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.0
    }
}

impl<S> From<Arc<S>> for ShapeRef<S> {
    fn from(shape: Arc<S>) -> Self {
        Self(shape)
    }
}

impl<S: Debug> Debug for ShapeRef<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ShapeRef").field(&*self.0).finish()
    }
}

/// Set of shapes returned by queries and bulk insertion, keyed by identity.
pub type ShapeSet<S> = FxHashSet<ShapeRef<S>>;
