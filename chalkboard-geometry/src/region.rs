//               Copyright John Nunley, 2022.
// Distributed under the Boost Software License, Version 1.0.
//       (See accompanying file LICENSE or copy at
//         https://www.boost.org/LICENSE_1_0.txt)

use super::{Box2D, Point2D};
use num_traits::Bounded;

/// The running bounding box of a set of boxes.
///
/// An empty set is represented by inverted extrema: the minimum corner sits at the largest
/// representable value and the maximum corner at the smallest one, so that the first box
/// accomodated replaces both corners.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Bounds<T> {
    min: Point2D<T>,
    max: Point2D<T>,
}

impl<T: Bounded> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: Point2D::new(T::max_value(), T::max_value()),
            max: Point2D::new(T::min_value(), T::min_value()),
        }
    }
}

impl<T: Bounded> Bounds<T> {
    /// Create bounds covering nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Copy + Ord> Bounds<T> {
    /// Grow the bounds to cover a box.
    pub fn accomodate(&mut self, box_: &Box2D<T>) {
        if box_.min.x < self.min.x {
            self.min.x = box_.min.x;
        }

        if box_.min.y < self.min.y {
            self.min.y = box_.min.y;
        }

        if box_.max.x > self.max.x {
            self.max.x = box_.max.x;
        }

        if box_.max.y > self.max.y {
            self.max.y = box_.max.y;
        }
    }

    /// Tell whether no box has been accomodated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Get the bounding box, or `None` if nothing has been accomodated.
    #[must_use]
    pub fn get(&self) -> Option<Box2D<T>> {
        if self.is_empty() {
            None
        } else {
            Some(Box2D::new(self.min, self.max))
        }
    }
}

impl<T: Bounded + Copy + Ord> Extend<Box2D<T>> for Bounds<T> {
    fn extend<I: IntoIterator<Item = Box2D<T>>>(&mut self, iter: I) {
        for box_ in iter {
            self.accomodate(&box_);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point2;

    #[test]
    fn empty_bounds() {
        let bounds: Bounds<i32> = Bounds::new();
        assert!(bounds.is_empty());
        assert_eq!(bounds.get(), None);
    }

    #[test]
    fn accomodates_boxes() {
        let mut bounds = Bounds::new();
        bounds.extend(vec![
            Box2D::new(point2(0, 5), point2(10, 10)),
            Box2D::new(point2(-3, 7), point2(4, 20)),
        ]);
        assert_eq!(
            bounds.get(),
            Some(Box2D::new(point2(-3, 5), point2(10, 20)))
        );
    }
}
