// BSL 1.0 License

//! Turning filled areas into pixel rectangles.

use crate::{RectSink, Result};
use chalkboard_geometry::{point2, PixelBox, Polygon};
use lyon_path::PathEvent;
use ordered_float::OrderedFloat;
use tinyvec::TinyVec;

/// The flattening tolerance used by [`PathFill::new`].
pub const DEFAULT_TOLERANCE: f32 = 0.1;

/// Defines which areas enclosed by a path count as filled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FillRule {
    /// Filled where the winding number is not zero.
    NonZero,
    /// Filled where the winding number is odd.
    EvenOdd,
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::NonZero
    }
}

impl FillRule {
    /// Tell whether a point with the given winding number is filled.
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Something that produces filled pixel rectangles.
pub trait Rasterizer {
    /// Draw every filled rectangle into `sink`, stopping at the first error it returns.
    fn rasterize(&self, sink: &mut dyn RectSink) -> Result<()>;
}

impl Rasterizer for [PixelBox] {
    fn rasterize(&self, sink: &mut dyn RectSink) -> Result<()> {
        self.iter().try_for_each(|rect| sink.fill_box(*rect))
    }
}

impl<'a, R: Rasterizer + ?Sized> Rasterizer for &'a R {
    fn rasterize(&self, sink: &mut dyn RectSink) -> Result<()> {
        (**self).rasterize(sink)
    }
}

/// A scanline rasterizer for paths.
///
/// Every pixel row is sampled along its center line; each run between two crossings that the
/// fill rule considers inside becomes one rectangle, one pixel high. A pixel belongs to a run when
/// its center does.
#[derive(Debug, Clone)]
pub struct PathFill {
    polygon: Polygon,
    rule: FillRule,
    adjust: f32,
}

impl PathFill {
    /// Flatten a path with the default tolerance.
    pub fn new(path: impl IntoIterator<Item = PathEvent>, rule: FillRule) -> Self {
        Self::with_tolerance(path, rule, DEFAULT_TOLERANCE)
    }

    /// Flatten a path with the given tolerance.
    pub fn with_tolerance(
        path: impl IntoIterator<Item = PathEvent>,
        rule: FillRule,
        tolerance: f32,
    ) -> Self {
        Self::from_polygon(Polygon::from_events_with_tolerance(path, tolerance), rule)
    }

    /// Fill an already flattened polygon.
    pub fn from_polygon(polygon: Polygon, rule: FillRule) -> Self {
        PathFill {
            polygon,
            rule,
            adjust: 0.0,
        }
    }

    /// Widen every run by `adjust` pixels on each side. Negative values count as zero.
    pub fn with_adjust(mut self, adjust: f32) -> Self {
        self.adjust = if adjust > 0.0 { adjust } else { 0.0 };
        self
    }

    /// The fill rule in use.
    pub fn rule(&self) -> FillRule {
        self.rule
    }

    /// The widening applied to each run.
    pub fn adjust(&self) -> f32 {
        self.adjust
    }

    /// The flattened edges being filled.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    fn fill_row(&self, row: i32, sink: &mut dyn RectSink) -> Result<()> {
        let y = row as f32 + 0.5;

        let mut crossings: TinyVec<[(OrderedFloat<f32>, i32); 16]> = self
            .polygon
            .edges()
            .iter()
            .filter(|edge| edge.crosses(y))
            .map(|edge| (OrderedFloat(edge.x_at(y)), edge.winding()))
            .collect();
        crossings.sort_unstable_by_key(|&(x, _)| x);

        let mut winding = 0;
        let mut start = None;

        for &(OrderedFloat(x), direction) in crossings.iter() {
            let was_inside = self.rule.is_inside(winding);
            winding += direction;

            match (was_inside, self.rule.is_inside(winding)) {
                (false, true) => start = Some(x),
                (true, false) => {
                    if let Some(start) = start.take() {
                        self.fill_run(start, x, row, sink)?;
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn fill_run(&self, x0: f32, x1: f32, row: i32, sink: &mut dyn RectSink) -> Result<()> {
        let x0 = pixel_ceil(x0 - 0.5 - self.adjust);
        let x1 = pixel_ceil(x1 - 0.5 + self.adjust);

        if x0 < x1 {
            sink.fill_box(PixelBox::new(
                point2(x0, row),
                point2(x1, row.saturating_add(1)),
            ))?;
        }

        Ok(())
    }
}

impl Rasterizer for PathFill {
    fn rasterize(&self, sink: &mut dyn RectSink) -> Result<()> {
        let (top, bottom) = match self.polygon.vertical_extent() {
            Some(extent) => extent,
            None => return Ok(()),
        };

        // rows whose center line lies in top..bottom
        let first = pixel_ceil(top - 0.5);
        let last = pixel_ceil(bottom - 0.5);
        log::trace!(
            "Filling rows {}..{} of {} edges",
            first,
            last,
            self.polygon.edges().len()
        );

        for row in first..last {
            self.fill_row(row, sink)?;
        }

        Ok(())
    }
}

/// Round up to a pixel coordinate. Out of range values saturate.
#[inline]
fn pixel_ceil(value: f32) -> i32 {
    value.ceil() as i32
}
