// BSL 1.0 License

//! Folding one rectangle into the linked form of a band list.

use super::{Links, NodeId, HEAD, TAIL};
use crate::{Arena, Result};
use chalkboard_geometry::{PixelBox, PixelBoxExt, Point2D};

impl Links {
    /// Add the area of `rect` to the list.
    ///
    /// The rectangle is consumed from the top down. Each pass handles the part of what is left
    /// that lies above, or inside, the first band the remainder reaches; the part below that band
    /// is carried over to the next pass.
    pub(super) fn insert(&mut self, arena: &Arena, rect: PixelBox) -> Result<()> {
        let mut rest = rect;

        loop {
            let at = self.locate(rest.min.y);
            self.insert = at;
            let band = self.rect(at);

            // entirely in the gap above `at`
            if at == TAIL || band.min.y >= rest.max.y {
                return self.insert_band(arena, at, rest);
            }

            // the top of the rectangle sticks out above the band
            if band.min.y > rest.min.y {
                let upper = PixelBox::new(rest.min, Point2D::new(rest.max.x, band.min.y));
                self.insert_band(arena, at, upper)?;
                rest.min.y = band.min.y;
                continue;
            }

            if self.band_covers(at, rest.min.x, rest.max.x) {
                if rest.max.y <= band.max.y {
                    return Ok(());
                }
                rest.min.y = band.max.y;
                continue;
            }

            if band.min.y < rest.min.y {
                self.split_band(arena, at, rest.min.y)?;
                continue;
            }

            if band.max.y > rest.max.y {
                self.split_band(arena, at, rest.max.y)?;
            }

            let bottom = self.rect(at).max.y;
            self.merge_spans(arena, at, rest.min.x, rest.max.x)?;

            if rest.max.y <= bottom {
                return Ok(());
            }
            rest.min.y = bottom;
        }
    }

    /// Find the first node of the first band whose bottom lies below `y`, walking from the
    /// locality hint.
    fn locate(&self, y: i32) -> NodeId {
        let mut at = self.insert;

        if self.rect(at).max.y > y {
            loop {
                let prev = self.prev(at);
                if self.rect(prev).max.y > y {
                    at = prev;
                } else {
                    return at;
                }
            }
        }

        loop {
            at = self.next(at);
            if self.rect(at).max.y > y {
                return at;
            }
        }
    }

    /// Tell whether a node is the only rectangle in its band.
    fn is_lone(&self, id: NodeId) -> bool {
        let rect = self.rect(id);
        !self.rect(self.prev(id)).same_rows(&rect) && !self.rect(self.next(id)).same_rows(&rect)
    }

    /// Add `rect` as a band of its own, right before the band starting at `at`. The rectangle must
    /// lie in the gap between that band and the one before it.
    fn insert_band(&mut self, arena: &Arena, at: NodeId, rect: PixelBox) -> Result<()> {
        let above = self.prev(at);

        if above != HEAD && self.is_lone(above) {
            let lone = self.rect(above);
            if lone.max.y == rect.min.y && lone.same_columns(&rect) {
                log::trace!("Stretching {:?} down to {}", lone, rect.max.y);
                self.node_mut(above).rect.max.y = rect.max.y;
                self.insert = above;
                self.join_lone_bands(arena, above);
                return Ok(());
            }
        }

        if at != TAIL && self.is_lone(at) {
            let lone = self.rect(at);
            if lone.min.y == rect.max.y && lone.same_columns(&rect) {
                log::trace!("Stretching {:?} up to {}", lone, rect.min.y);
                self.node_mut(at).rect.min.y = rect.min.y;
                return Ok(());
            }
        }

        self.reserve(arena, 1)?;
        let id = self.take(rect);
        self.link_before(at, id);
        self.insert = id;
        Ok(())
    }

    /// Merge the lone rectangle following `id` into it, if both now meet with the same columns.
    fn join_lone_bands(&mut self, arena: &Arena, id: NodeId) {
        let below = self.next(id);
        if below == TAIL || !self.is_lone(below) {
            return;
        }

        let (upper, lower) = (self.rect(id), self.rect(below));
        if upper.max.y == lower.min.y && upper.same_columns(&lower) {
            self.node_mut(id).rect.max.y = lower.max.y;
            self.remove(arena, below);
        }
    }

    /// Tell whether one span of the band starting at `at` covers `x0..x1`.
    fn band_covers(&self, at: NodeId, x0: i32, x1: i32) -> bool {
        let band = self.rect(at);
        let mut id = at;

        while self.rect(id).same_rows(&band) {
            let span = self.rect(id);
            if span.max.x > x0 {
                return span.min.x <= x0 && span.max.x >= x1;
            }
            id = self.next(id);
        }

        false
    }

    /// Split the band starting at `at` into two bands at row `y`.
    ///
    /// Every node of the lower half is reserved before the first one is linked, so the band is
    /// either split entirely or left alone.
    fn split_band(&mut self, arena: &Arena, at: NodeId, y: i32) -> Result<()> {
        let band = self.rect(at);
        debug_assert!(band.min.y < y && y < band.max.y);

        let mut last = at;
        let mut width = 1;
        while self.rect(self.next(last)).same_rows(&band) {
            last = self.next(last);
            width += 1;
        }

        self.reserve(arena, width)?;
        log::trace!(
            "Splitting band {}..{} ({} rects) at {}",
            band.min.y,
            band.max.y,
            width,
            y
        );

        let mut upper = at;
        let mut after = last;
        for _ in 0..width {
            let span = self.rect(upper);
            self.node_mut(upper).rect.max.y = y;
            let lower = self.take(PixelBox::new(Point2D::new(span.min.x, y), span.max));
            self.link_after(after, lower);
            after = lower;
            upper = self.next(upper);
        }

        Ok(())
    }

    /// Merge the span `x0..x1` into the band starting at `at`.
    ///
    /// The span merges into the leftmost span it touches, which then swallows the following spans
    /// it reaches, one at a time.
    fn merge_spans(&mut self, arena: &Arena, at: NodeId, x0: i32, x1: i32) -> Result<()> {
        let band = self.rect(at);

        let mut id = at;
        while self.rect(id).same_rows(&band) && self.rect(id).max.x < x0 {
            id = self.next(id);
        }

        let target = self.rect(id);
        if !target.same_rows(&band) || target.min.x > x1 {
            self.reserve(arena, 1)?;
            let span = self.take(PixelBox::new(
                Point2D::new(x0, band.min.y),
                Point2D::new(x1, band.max.y),
            ));
            self.link_before(id, span);
            return Ok(());
        }

        {
            let rect = &mut self.node_mut(id).rect;
            rect.min.x = rect.min.x.min(x0);
            rect.max.x = rect.max.x.max(x1);
        }

        loop {
            let following = self.next(id);
            let next_span = self.rect(following);
            if !next_span.same_rows(&band) || next_span.min.x > self.rect(id).max.x {
                break;
            }

            let rect = &mut self.node_mut(id).rect;
            rect.max.x = rect.max.x.max(next_span.max.x);
            self.remove(arena, following);
        }

        Ok(())
    }
}
