// BSL 1.0 License

use super::RectSink;
use crate::{ClipPath, Result};
use chalkboard_geometry::PixelBox;

/// A sink that only lets through the parts of each rectangle inside an existing clip region.
#[derive(Debug)]
pub struct ClipFilter<'c, S> {
    clip: &'c ClipPath,
    sink: S,
}

impl<'c, S: RectSink> ClipFilter<'c, S> {
    /// Filter everything drawn into `sink` through `clip`.
    pub fn new(clip: &'c ClipPath, sink: S) -> Self {
        ClipFilter { clip, sink }
    }

    /// Get the inner sink back.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<'c, S: RectSink> RectSink for ClipFilter<'c, S> {
    fn fill_box(&mut self, rect: PixelBox) -> Result<()> {
        let sink = &mut self.sink;
        self.clip
            .for_each_intersection(rect, |part| sink.fill_box(part))
    }
}
