//               Copyright John Nunley, 2022.
// Distributed under the Boost Software License, Version 1.0.
//       (See accompanying file LICENSE or copy at
//         https://www.boost.org/LICENSE_1_0.txt)

use super::{point2, PixelBox, Point2D};

/// The full pixel coordinate range.
pub const FULL_RANGE: PixelBox = PixelBox::new(
    Point2D::new(i32::MIN, i32::MIN),
    Point2D::new(i32::MAX, i32::MAX),
);

/// Pixel box operations used while building bands.
pub trait PixelBoxExt: Sized {
    /// Create a box from an origin and a size, saturating at the coordinate range.
    fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self;

    /// Swap the X and Y axes.
    #[must_use]
    fn transposed(&self) -> Self;

    /// Swap the X and Y axes if `transpose` is set.
    #[must_use]
    fn transposed_if(&self, transpose: bool) -> Self;

    /// Clip this box against another one. Returns `None` if nothing is left.
    fn clipped_to(&self, clip: &Self) -> Option<Self>;

    /// Tell whether this box covers no pixels.
    fn is_degenerate(&self) -> bool;

    /// Tell whether both boxes share the same X range.
    fn same_columns(&self, other: &Self) -> bool;

    /// Tell whether both boxes share the same Y range.
    fn same_rows(&self, other: &Self) -> bool;

    /// Tell whether the X ranges of both boxes overlap or touch.
    fn columns_touch(&self, other: &Self) -> bool;

    /// Tell whether the Y ranges of both boxes overlap or touch.
    fn rows_touch(&self, other: &Self) -> bool;

    /// Tell whether this box covers every pixel of another one.
    fn covers(&self, other: &Self) -> bool;

    /// Number of pixels covered by this box.
    fn pixel_area(&self) -> u64;
}

impl PixelBoxExt for PixelBox {
    #[inline]
    fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        PixelBox::new(
            point2(x, y),
            point2(x.saturating_add(width), y.saturating_add(height)),
        )
    }

    #[inline]
    fn transposed(&self) -> Self {
        PixelBox::new(
            point2(self.min.y, self.min.x),
            point2(self.max.y, self.max.x),
        )
    }

    #[inline]
    fn transposed_if(&self, transpose: bool) -> Self {
        if transpose {
            self.transposed()
        } else {
            *self
        }
    }

    #[inline]
    fn clipped_to(&self, clip: &Self) -> Option<Self> {
        let clipped = PixelBox::new(
            point2(self.min.x.max(clip.min.x), self.min.y.max(clip.min.y)),
            point2(self.max.x.min(clip.max.x), self.max.y.min(clip.max.y)),
        );

        if clipped.is_degenerate() {
            None
        } else {
            Some(clipped)
        }
    }

    #[inline]
    fn is_degenerate(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    #[inline]
    fn same_columns(&self, other: &Self) -> bool {
        self.min.x == other.min.x && self.max.x == other.max.x
    }

    #[inline]
    fn same_rows(&self, other: &Self) -> bool {
        self.min.y == other.min.y && self.max.y == other.max.y
    }

    #[inline]
    fn columns_touch(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && other.min.x <= self.max.x
    }

    #[inline]
    fn rows_touch(&self, other: &Self) -> bool {
        self.min.y <= other.max.y && other.min.y <= self.max.y
    }

    #[inline]
    fn covers(&self, other: &Self) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    #[inline]
    #[allow(clippy::cast_sign_loss)]
    fn pixel_area(&self) -> u64 {
        if self.is_degenerate() {
            return 0;
        }

        let width = (i64::from(self.max.x) - i64::from(self.min.x)) as u64;
        let height = (i64::from(self.max.y) - i64::from(self.min.y)) as u64;
        width * height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(x1: i32, y1: i32, x2: i32, y2: i32) -> PixelBox {
        PixelBox::new(point2(x1, y1), point2(x2, y2))
    }

    #[test]
    fn from_xywh_saturates() {
        assert_eq!(PixelBox::from_xywh(1, 2, 3, 4), b(1, 2, 4, 6));
        assert_eq!(
            PixelBox::from_xywh(i32::MAX - 1, 0, 10, 1),
            b(i32::MAX - 1, 0, i32::MAX, 1)
        );
    }

    #[test]
    fn clipping() {
        let clip = b(0, 0, 10, 10);
        assert_eq!(b(-5, 2, 5, 20).clipped_to(&clip), Some(b(0, 2, 5, 10)));
        assert_eq!(b(10, 0, 20, 10).clipped_to(&clip), None);
        assert_eq!(b(2, 2, 3, 3).clipped_to(&FULL_RANGE), Some(b(2, 2, 3, 3)));
    }

    #[test]
    fn touching() {
        assert!(b(0, 0, 10, 5).columns_touch(&b(10, 0, 20, 5)));
        assert!(!b(0, 0, 10, 5).columns_touch(&b(11, 0, 20, 5)));
        assert!(b(0, 0, 10, 5).rows_touch(&b(0, 5, 10, 10)));
        assert!(b(0, 0, 10, 10).covers(&b(2, 2, 10, 10)));
        assert!(!b(0, 0, 10, 10).covers(&b(2, 2, 11, 10)));
    }

    #[test]
    fn transpose_and_area() {
        assert_eq!(b(1, 2, 3, 7).transposed(), b(2, 1, 7, 3));
        assert_eq!(b(1, 2, 3, 7).transposed_if(false), b(1, 2, 3, 7));
        assert_eq!(b(1, 2, 3, 7).pixel_area(), 10);
        assert_eq!(FULL_RANGE.pixel_area(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }
}
