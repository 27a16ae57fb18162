// BSL 1.0 License

//! Clip regions for a 2D rendering pipeline.
//!
//! A clip region is built by running a rasterizer into a [`ClipAccumulator`], which folds every
//! filled pixel rectangle into a y-x banded [`BandList`]. Finishing the accumulation produces an
//! immutable [`ClipPath`] that later drawing can be hit-tested and clipped against.
//! [`intersect`] runs one such cycle against an existing clip region.

#![forbid(unsafe_code)]

mod arena;
mod clip;
mod error;
mod intersect;

pub mod band;
pub mod device;
pub mod fill;

pub use arena::*;
pub use clip::*;
pub use error::*;
pub use intersect::*;

pub use band::{BandList, InvariantViolation};
pub use device::{ClipAccumulator, ClipFilter, RectSink};
pub use fill::{FillRule, PathFill, Rasterizer};

#[doc(inline)]
pub use chalkboard_geometry::{Fixed, PixelBox, PixelBoxExt, FULL_RANGE};
