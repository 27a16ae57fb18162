// BSL 1.0 License

//! Finished clip regions.

use crate::{band::BandList, Arena, Result};
use chalkboard_geometry::{PixelBox, PixelBoxExt};
use core::sync::atomic::{AtomicU64, Ordering};

/// Identifies one finished clip region. Every clip path gets a fresh identifier, larger than all
/// identifiers handed out before it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClipId(u64);

impl ClipId {
    fn next() -> ClipId {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        ClipId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw value of this identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// An immutable clip region, made of the band list an accumulation produced.
///
/// Every box and rectangle a clip path reports is in device pixels, even when its band list is
/// stored transposed.
#[derive(Debug)]
pub struct ClipPath {
    list: BandList,
    transpose: bool,
    bbox: PixelBox,
    inner_box: PixelBox,
    outer_box: PixelBox,
    /// `(min_x, max_x)` of the region, in device space.
    x_range: (i32, i32),
    id: ClipId,
    path_valid: bool,
}

impl ClipPath {
    /// A clip path covering a single rectangle.
    pub fn from_rect(arena: &Arena, rect: PixelBox) -> ClipPath {
        let mut list = BandList::new(arena);
        list.set_single(rect);
        ClipPath::from_parts(list, false, Some(rect).filter(|rect| !rect.is_degenerate()))
    }

    /// A clip path covering nothing.
    pub fn empty(arena: &Arena) -> ClipPath {
        ClipPath::from_parts(BandList::new(arena), false, None)
    }

    /// Wrap a closed band list. `bbox` is the bounds of the list, in list space.
    pub(crate) fn from_parts(list: BandList, transpose: bool, bbox: Option<PixelBox>) -> ClipPath {
        let bbox = bbox.map_or_else(PixelBox::zero, |bbox| bbox.transposed_if(transpose));
        let x_range = (bbox.min.x, bbox.max.x);
        let inner_box = list
            .single()
            .map_or_else(PixelBox::zero, |rect| rect.transposed_if(transpose));

        ClipPath {
            list,
            transpose,
            bbox,
            inner_box,
            outer_box: bbox,
            x_range,
            id: ClipId::next(),
            path_valid: false,
        }
    }

    /// The bounding box of the region.
    pub fn bbox(&self) -> PixelBox {
        self.bbox
    }

    /// A box every pixel of which lies in the region. Empty unless the region is a rectangle.
    pub fn inner_box(&self) -> PixelBox {
        self.inner_box
    }

    /// A box no pixel outside of which lies in the region.
    pub fn outer_box(&self) -> PixelBox {
        self.outer_box
    }

    /// The identifier of this clip path.
    pub fn id(&self) -> ClipId {
        self.id
    }

    /// Whether a cached path outline of this region is up to date. A new clip path never has one.
    pub fn path_valid(&self) -> bool {
        self.path_valid
    }

    /// Whether the band list is stored with X and Y swapped.
    pub fn is_transposed(&self) -> bool {
        self.transpose
    }

    /// The horizontal extent of the region, in device space.
    pub fn x_range(&self) -> (i32, i32) {
        self.x_range
    }

    /// The band list backing this region, in list space.
    pub fn band_list(&self) -> &BandList {
        &self.list
    }

    /// Whether the region is exactly one rectangle.
    pub fn is_rectangle(&self) -> bool {
        self.list.single().is_some()
    }

    /// The rectangle this region consists of, if it consists of exactly one.
    pub fn rectangle(&self) -> Option<PixelBox> {
        self.list
            .single()
            .map(|rect| rect.transposed_if(self.transpose))
    }

    /// Number of rectangles the region is made of.
    pub fn rect_count(&self) -> usize {
        self.list.len()
    }

    /// The rectangles of the region.
    pub fn rects(&self) -> impl Iterator<Item = PixelBox> + '_ {
        let transpose = self.transpose;
        self.list.iter().map(move |rect| rect.transposed_if(transpose))
    }

    /// Tell whether the pixel at `(x, y)` lies in the region.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        // the last row and column lie outside every box
        let pixel = PixelBox::from_xywh(x, y, 1, 1);
        if pixel.is_degenerate() {
            return false;
        }
        if self.inner_box.covers(&pixel) {
            return true;
        }
        if !self.outer_box.covers(&pixel) {
            return false;
        }

        let (x, y) = if self.transpose { (y, x) } else { (x, y) };
        for rect in self.list.iter_from(y) {
            if rect.min.y > y {
                break;
            }
            if rect.min.x <= x && x < rect.max.x {
                return true;
            }
        }

        false
    }

    /// Tell whether every pixel of `rect` lies in the region.
    pub fn contains_rect(&self, rect: PixelBox) -> bool {
        if rect.is_degenerate() || self.inner_box.covers(&rect) {
            return true;
        }
        if !self.outer_box.covers(&rect) {
            return false;
        }

        let rect = rect.transposed_if(self.transpose);
        let mut y = rect.min.y;
        let mut bands = self.list.bands_from(y);

        while y < rect.max.y {
            match bands.next() {
                Some(band)
                    if band.min_y <= y
                        && band
                            .spans
                            .iter()
                            .any(|&(min_x, max_x)| min_x <= rect.min.x && rect.max.x <= max_x) =>
                {
                    y = band.max_y;
                }
                _ => return false,
            }
        }

        true
    }

    /// Call `f` with every part of `rect` that lies in the region, top to bottom.
    pub fn for_each_intersection<F>(&self, rect: PixelBox, mut f: F) -> Result<()>
    where
        F: FnMut(PixelBox) -> Result<()>,
    {
        if rect.is_degenerate() {
            return Ok(());
        }
        if self.inner_box.covers(&rect) {
            return f(rect);
        }

        let clipped = match rect.clipped_to(&self.outer_box) {
            Some(clipped) => clipped.transposed_if(self.transpose),
            None => return Ok(()),
        };

        for piece in self.list.iter_from(clipped.min.y) {
            if piece.min.y >= clipped.max.y {
                break;
            }
            if let Some(part) = piece.clipped_to(&clipped) {
                f(part.transposed_if(self.transpose))?;
            }
        }

        Ok(())
    }
}
