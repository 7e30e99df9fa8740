// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use core::fmt::{Display, Formatter};

use kurbo::Rect;

/// Reasons a [`SpatialIndex`](crate::SpatialIndex) cannot be constructed.
///
/// Insertion and queries never fail; only the overall bounds can be rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// The overall bounds have zero, negative, or non-finite width or height.
    InvalidBounds(Rect),
    /// Bounds were to be inferred from a shape collection, but it was empty.
    NoShapes,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidBounds(r) => write!(
                f,
                "invalid index bounds {}x{} at ({}, {}): width and height must be finite and positive",
                r.width(),
                r.height(),
                r.x0,
                r.y0
            ),
            Self::NoShapes => f.write_str("cannot infer index bounds from an empty shape collection"),
        }
    }
}

impl std::error::Error for Error {}
