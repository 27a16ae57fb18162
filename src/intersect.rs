// BSL 1.0 License

use crate::{fill::Rasterizer, Arena, ClipAccumulator, ClipFilter, ClipPath, Result};

/// Intersect an existing clip region with the area a rasterizer fills.
///
/// The rasterizer runs into a fresh [`ClipAccumulator`] whose clip box is narrowed to the outer
/// box of `clip`, with every rectangle filtered through `clip` first. On success the accumulation
/// is finished into a new clip path; on failure it is discarded and the error is returned as is.
/// `clip` itself is never modified.
pub fn intersect<R: Rasterizer + ?Sized>(
    arena: &Arena,
    clip: &ClipPath,
    rasterizer: &R,
    transpose: bool,
) -> Result<ClipPath> {
    let mut accum = ClipAccumulator::begin(arena, transpose);
    accum.set_pixel_clip_box(clip.outer_box());

    let result = rasterizer.rasterize(&mut ClipFilter::new(clip, &mut accum));

    match result {
        Ok(()) => accum.end(),
        Err(err) => {
            log::debug!("Intersection with clip path {:?} failed: {}", clip.id(), err);
            accum.discard();
            Err(err)
        }
    }
}
