// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive partition node: placement, traversal, pruning.

use std::sync::Arc;

use kurbo::Rect;

use crate::index::SearchMode;
use crate::shape::{IndexedShape, ShapeRef, ShapeSet};
use crate::types::{Axis, contains_rect, overlaps};

/// A stored shape with its bounding box cached at insertion.
pub(crate) struct Entry<S> {
    pub(crate) bbox: Rect,
    pub(crate) shape: Arc<S>,
}

/// Summary of the tree shape, from [`SpatialIndex::stats`](crate::SpatialIndex::stats).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of live nodes, root included.
    pub nodes: usize,
    /// Number of stored entries.
    pub shapes: usize,
    /// Depth of the deepest live node; the root is depth 0.
    pub depth: usize,
}

/// A rectangular region holding straddling shapes and up to two lazily created children.
///
/// `halves[0]` is the lower-coordinate half along `axis`, `children[i]` covers `halves[i]`.
pub(crate) struct Node<S> {
    bounds: Rect,
    axis: Axis,
    halves: [Rect; 2],
    children: [Option<Box<Self>>; 2],
    entries: Vec<Entry<S>>,
}

impl<S> Node<S> {
    pub(crate) fn new(bounds: Rect, axis: Axis) -> Self {
        Self {
            bounds,
            axis,
            halves: axis.split(bounds),
            children: [None, None],
            entries: Vec::new(),
        }
    }

    /// Place `shape` at the shallowest node that can hold it.
    ///
    /// Returns `false`, leaving the tree untouched, if `bbox` is not inside this
    /// node's bounds. A box fitting both halves (it lies on the midline) goes to
    /// the first half. Nodes at `max_depth`, and nodes whose halves no longer
    /// shrink (zero extent along the split axis), keep everything they receive.
    pub(crate) fn insert(
        &mut self,
        shape: Arc<S>,
        bbox: Rect,
        depth: usize,
        max_depth: usize,
    ) -> bool {
        if !contains_rect(self.bounds, bbox) {
            return false;
        }
        if depth < max_depth {
            let child_axis = self.axis.flip();
            for (half, slot) in self.halves.iter().zip(self.children.iter_mut()) {
                if *half == self.bounds {
                    break;
                }
                if contains_rect(*half, bbox) {
                    let child = slot.get_or_insert_with(|| {
                        log::trace!("split: new {child_axis:?} node {half:?} at depth {}", depth + 1);
                        Box::new(Self::new(*half, child_axis))
                    });
                    return child.insert(shape, bbox, depth + 1, max_depth);
                }
            }
        }
        self.entries.push(Entry { bbox, shape });
        true
    }

    /// Call `f` for every entry in every node whose bounds overlap `region`.
    ///
    /// Subtrees outside `region` are skipped entirely. Children are visited
    /// before local entries.
    pub(crate) fn visit<'a>(&'a self, region: Rect, f: &mut impl FnMut(&'a Entry<S>)) {
        if !overlaps(self.bounds, region) {
            return;
        }
        for child in self.children.iter().flatten() {
            child.visit(region, f);
        }
        for entry in &self.entries {
            f(entry);
        }
    }

    /// Drop every child that, once pruned itself, holds no shapes and no children.
    pub(crate) fn prune(&mut self) {
        for slot in &mut self.children {
            let empty = match slot {
                Some(child) => {
                    child.prune();
                    !child.has_shapes() && !child.has_sub_nodes()
                }
                None => false,
            };
            if empty {
                log::trace!("prune: dropping empty node {:?}", self.halves);
                *slot = None;
            }
        }
    }

    /// Discard all shapes and children of this subtree.
    pub(crate) fn clear(&mut self) {
        for slot in &mut self.children {
            if let Some(mut child) = slot.take() {
                child.clear();
            }
        }
        self.entries.clear();
    }

    pub(crate) fn has_shapes(&self) -> bool {
        !self.entries.is_empty()
    }

    pub(crate) fn has_sub_nodes(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    pub(crate) fn shape_count(&self) -> usize {
        self.entries.len()
            + self
                .children
                .iter()
                .flatten()
                .map(|c| c.shape_count())
                .sum::<usize>()
    }

    pub(crate) fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        self.collect_stats(0, &mut stats);
        stats
    }

    fn collect_stats(&self, depth: usize, stats: &mut Stats) {
        stats.nodes += 1;
        stats.shapes += self.entries.len();
        stats.depth = stats.depth.max(depth);
        for child in self.children.iter().flatten() {
            child.collect_stats(depth + 1, stats);
        }
    }
}

impl<S: IndexedShape> Node<S> {
    /// Collect stored shapes intersecting `query` into `out`.
    ///
    /// `query` itself is never reported, even if it is stored. Coarse mode
    /// compares bounding boxes only; fine mode also requires the exact regions
    /// to intersect.
    pub(crate) fn query(&self, query: &S, mode: SearchMode, out: &mut ShapeSet<S>) {
        let qbox = query.bounding_box();
        self.visit(qbox, &mut |entry| {
            if core::ptr::eq(Arc::as_ptr(&entry.shape), query) || !overlaps(entry.bbox, qbox) {
                return;
            }
            if mode == SearchMode::Fine && !entry.shape.exact_intersects(query) {
                return;
            }
            out.insert(ShapeRef::new(Arc::clone(&entry.shape)));
        });
    }
}
