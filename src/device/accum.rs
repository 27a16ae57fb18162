// BSL 1.0 License

use super::RectSink;
use crate::{
    band::{BandList, InvariantViolation},
    Arena, ClipPath, Error, Result,
};
use chalkboard_geometry::{
    covering_pixels, Box2D, Bounds, Fixed, PixelBox, PixelBoxExt, FULL_RANGE,
};

/// A write-only device that folds every rectangle drawn into it into a band list.
///
/// One accumulator lives for exactly one clipping cycle: it is opened with [`begin`], fed by a
/// rasterizer through [`RectSink`], and then either finalized into a [`ClipPath`] with [`end`] or
/// thrown away with [`discard`]. Dropping it has the same effect as discarding it.
///
/// When transposition is enabled, X and Y are swapped on the way in, and swapped back by every
/// accessor that reports device coordinates.
///
/// [`begin`]: ClipAccumulator::begin
/// [`end`]: ClipAccumulator::end
/// [`discard`]: ClipAccumulator::discard
#[derive(Debug)]
pub struct ClipAccumulator {
    list: BandList,
    /// Bounds of the accepted area, in list space.
    bbox: Bounds<i32>,
    /// Hard clip for every incoming rectangle, in list space.
    clip_box: PixelBox,
    transpose: bool,
    poisoned: bool,
}

impl ClipAccumulator {
    /// Open an accumulation that allocates its band list from `arena`.
    pub fn begin(arena: &Arena, transpose: bool) -> Self {
        log::debug!("Opening clip accumulation (transpose: {})", transpose);

        ClipAccumulator {
            list: BandList::new(arena),
            bbox: Bounds::new(),
            clip_box: FULL_RANGE,
            transpose,
            poisoned: false,
        }
    }

    /// Narrow the area that rectangles are clipped to, from a box in fixed-point device
    /// coordinates. The box is widened to whole pixels.
    pub fn set_clip_box(&mut self, clip_box: &Box2D<Fixed>) {
        self.set_pixel_clip_box(covering_pixels(clip_box));
    }

    /// Narrow the area that rectangles are clipped to, from a box in device pixels.
    pub fn set_pixel_clip_box(&mut self, clip_box: PixelBox) {
        self.clip_box = clip_box.transposed_if(self.transpose);
    }

    /// The area rectangles are clipped to, in device pixels.
    pub fn clip_box(&self) -> PixelBox {
        self.clip_box.transposed_if(self.transpose)
    }

    /// The bounds of everything accepted so far, in device pixels.
    pub fn bbox(&self) -> Option<PixelBox> {
        self.bbox.get().map(|bbox| bbox.transposed_if(self.transpose))
    }

    /// Whether X and Y are swapped on input.
    pub fn is_transposed(&self) -> bool {
        self.transpose
    }

    /// Whether an earlier insertion failed. A poisoned accumulator refuses further work.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// The band list built so far, in list space.
    pub fn band_list(&self) -> &BandList {
        &self.list
    }

    /// Check the invariants of the band list built so far.
    pub fn validate(&self) -> core::result::Result<(), InvariantViolation> {
        self.list.validate()
    }

    fn accept(&mut self, rect: PixelBox) -> Result<()> {
        if self.poisoned {
            return Err(Error::poisoned());
        }

        let rect = match rect
            .transposed_if(self.transpose)
            .clipped_to(&self.clip_box)
        {
            Some(rect) => rect,
            None => return Ok(()),
        };

        log::trace!("Accepting {:?}", rect);
        self.bbox.accomodate(&rect);

        self.list.insert(rect).map_err(|err| {
            log::warn!("Clip accumulation failed: {}", err);
            self.poisoned = true;
            err
        })
    }

    /// Bring the band list into its final shape.
    fn close(&mut self) -> Result<()> {
        self.list.coalesce();

        #[cfg(feature = "verify")]
        self.list.assert_valid();

        self.list.compact()
    }

    /// Finish the accumulation and hand the band list over to a new clip path.
    pub fn end(mut self) -> Result<ClipPath> {
        if self.poisoned {
            return Err(Error::poisoned());
        }

        self.close()?;

        let ClipAccumulator {
            list,
            bbox,
            transpose,
            ..
        } = self;
        let clip = ClipPath::from_parts(list, transpose, bbox.get());

        log::debug!(
            "Finished clip path {:?}: {} rectangles, outer box {:?}",
            clip.id(),
            clip.rect_count(),
            clip.outer_box()
        );
        Ok(clip)
    }

    /// Throw the accumulation away, releasing every node it allocated.
    pub fn discard(self) {
        log::debug!(
            "Discarding clip accumulation with {} rectangles",
            self.list.len()
        );
    }
}

impl RectSink for ClipAccumulator {
    fn fill_box(&mut self, rect: PixelBox) -> Result<()> {
        self.accept(rect)
    }
}
