// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory BSP: bulk insert, coarse and fine queries, clear.

use std::sync::Arc;

use kurbo::{BezPath, Rect};
use understory_bsp::{Outline, SearchMode, SpatialIndex};

fn main() {
    let mut tri = BezPath::new();
    tri.move_to((0.0, 0.0));
    tri.line_to((1.5, 0.0));
    tri.line_to((0.0, 1.5));
    tri.close_path();

    let a = Arc::new(Outline::new(&tri));
    let b = Arc::new(Outline::new(&Rect::new(2.0, 2.0, 4.0, 4.0)));
    let c = Arc::new(Outline::new(&Rect::new(1.0, 0.0, 3.0, 4.0)));
    let far = Arc::new(Outline::new(&Rect::new(5.0, 5.0, 6.0, 6.0)));

    let index = SpatialIndex::new(Rect::new(0.0, 0.0, 4.0, 4.0)).expect("bounds are positive");
    let rejected = index.add_shapes([a, b, c.clone(), far]);
    println!("rejected {} shape(s); {:?}", rejected.len(), index.stats());

    let coarse = index.find_intersecting_shapes(&c, SearchMode::Coarse);
    let fine = index.find_intersecting_shapes(&c, SearchMode::Fine);
    println!("coarse hits: {}, fine hits: {}", coarse.len(), fine.len());
    for hit in &fine {
        println!("  fine hit bounds: {:?}", understory_bsp::IndexedShape::bounding_box(&**hit));
    }

    index.clear();
    println!("after clear: {index:?}");
}
