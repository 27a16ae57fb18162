// BSL 1.0 License

//! Sinks for the pixel rectangles a rasterizer produces.

use crate::Result;
use chalkboard_geometry::{PixelBox, PixelBoxExt};

mod accum;
mod filter;

pub use accum::ClipAccumulator;
pub use filter::ClipFilter;

/// Something that filled pixel rectangles can be drawn into.
///
/// Rasterizers only ever write into a sink; they never read back from it. An error returned by a
/// sink must stop the rasterizer, which propagates it unchanged.
pub trait RectSink {
    /// Fill the `width` by `height` rectangle whose top left pixel is `(x, y)`.
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        self.fill_box(PixelBox::from_xywh(x, y, width, height))
    }

    /// Fill every pixel of a box.
    fn fill_box(&mut self, rect: PixelBox) -> Result<()>;
}

impl<'a, S: RectSink + ?Sized> RectSink for &'a mut S {
    #[inline]
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        (**self).fill_rect(x, y, width, height)
    }

    #[inline]
    fn fill_box(&mut self, rect: PixelBox) -> Result<()> {
        (**self).fill_box(rect)
    }
}

impl RectSink for Vec<PixelBox> {
    fn fill_box(&mut self, rect: PixelBox) -> Result<()> {
        if !rect.is_degenerate() {
            self.push(rect);
        }
        Ok(())
    }
}
