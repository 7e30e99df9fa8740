// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory BSP: a self-splitting binary space partition over 2D shapes.
//!
//! Understory BSP answers "which stored shapes intersect this shape" over a fixed rectangular region.
//!
//! - Insert shapes one at a time or in batches; shapes outside the region are reported, not stored.
//! - Query by another shape with [coarse](SearchMode::Coarse) (bounding box) or
//!   [fine](SearchMode::Fine) (exact geometry) semantics, or by rectangle or point.
//! - Clear everything at once. There is no per-shape removal.
//!
//! Shapes implement [`IndexedShape`]: a mandatory bounding box and an optional exact
//! intersection test. [`kurbo::Rect`] and [`kurbo::Circle`] implement it directly, and
//! [`Outline`] wraps any [`kurbo::Shape`] with a flattened-polygon intersection test.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kurbo::Rect;
//! use understory_bsp::{SearchMode, ShapeRef, SpatialIndex};
//!
//! let index = SpatialIndex::new(Rect::new(0.0, 0.0, 4.0, 4.0)).unwrap();
//!
//! let a = Arc::new(Rect::new(0.0, 0.0, 2.0, 2.0));
//! let b = Arc::new(Rect::new(2.0, 2.0, 4.0, 4.0));
//! let c = Arc::new(Rect::new(1.0, 0.0, 3.0, 4.0));
//! let rejected = index.add_shapes([a.clone(), b.clone(), c.clone()]);
//! assert!(rejected.is_empty());
//!
//! // Shapes outside the bounds are refused.
//! assert!(!index.add_shape(Arc::new(Rect::new(3.0, 3.0, 5.0, 5.0))));
//!
//! // The query shape itself is never reported.
//! let hits = index.find_intersecting_shapes(&c, SearchMode::Coarse);
//! assert_eq!(hits.len(), 2);
//! assert!(hits.contains(&ShapeRef::new(a)));
//! assert!(hits.contains(&ShapeRef::new(b)));
//! ```
//!
//! ## How shapes are placed
//!
//! Each node covers a rectangle and splits it in half along one axis; children alternate
//! axes, starting with X at the root. A shape descends into a half while its bounding box
//! fits entirely inside it, creating child nodes on demand, and settles at the first node
//! where it straddles the split line. A box lying exactly on a split line goes to the
//! lower-coordinate half. Queries skip every subtree whose region misses the query box.
//!
//! Empty branches are pruned after each insertion call, so a tree never keeps nodes
//! without shapes below them. Descent stops at [`DEFAULT_MAX_DEPTH`] (or the depth given
//! to [`SpatialIndex::with_max_depth`], at most [`MAX_DEPTH_LIMIT`]), and at nodes that have
//! collapsed to zero extent, which bounds the tree for tiny or zero-area shapes.
//!
//! ## Threading
//!
//! [`SpatialIndex`] guards its tree with a single mutex held for the duration of each call.
//! Operations are serialized; there are no concurrent readers.
//!
//! ### Float semantics
//!
//! Rectangles are closed: touching boxes intersect and a box lying on a node's boundary is
//! inside it. Shapes with NaN or infinite bounding boxes are never stored.

pub mod types;

mod error;
mod index;
mod node;
mod outline;
mod shape;

pub use error::Error;
pub use index::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, SearchMode, SpatialIndex};
pub use node::Stats;
pub use outline::Outline;
pub use shape::{IndexedShape, ShapeRef, ShapeSet};
