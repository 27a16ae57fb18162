//               Copyright John Nunley, 2022.
// Distributed under the Boost Software License, Version 1.0.
//       (See accompanying file LICENSE or copy at
//         https://www.boost.org/LICENSE_1_0.txt)

//! Geometry primitives used by `chalkboard-clip`.
//!
//! Pixel-space geometry is expressed with 32-bit integers, where a box covers the half-open range
//! `min..max` on both axes. Device-space coordinates coming from the rasterizer use [`Fixed`], a
//! 24.8 fixed-point number, and floating-point coordinates only appear while flattening paths.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod fixed;
pub use fixed::*;

mod polygon;
pub use polygon::*;

mod rect;
pub use rect::*;

mod region;
pub use region::*;

pub(crate) mod util;

pub use euclid::default::{Box2D, Point2D, Size2D, Vector2D};
pub use euclid::{point2, vec2};

/// A box in pixel space. The box covers every pixel `(x, y)` where `min.x <= x < max.x` and
/// `min.y <= y < max.y`.
pub type PixelBox = Box2D<i32>;
