//               Copyright John Nunley, 2022.
// Distributed under the Boost Software License, Version 1.0.
//       (See accompanying file LICENSE or copy at
//         https://www.boost.org/LICENSE_1_0.txt)

use crate::util::approx_eq;

use super::Point2D;
use core::iter::FromIterator;
use lyon_geom::LineSegment;
use lyon_path::{iterator::PathIterator, PathEvent};

/// One or more closed polygons, stored as their non-horizontal edges.
///
/// Open subpaths are closed implicitly, as a fill would close them.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    /// The edges for this polygon.
    edges: Vec<Edge>,
}

impl Polygon {
    /// Collect from a path event iterator with a given flattening tolerance.
    pub fn from_events_with_tolerance(
        iter: impl IntoIterator<Item = PathEvent>,
        tolerance: f32,
    ) -> Self {
        iter.into_iter()
            .flattened(tolerance)
            .filter_map(|event| match event {
                PathEvent::Begin { .. } => None,
                PathEvent::Line { from, to } => Some(Edge::new(from, to)),
                PathEvent::End { last, first, .. } => Some(Edge::new(last, first)),
                ev => unreachable!("Flattened iterator should never yield {:?}", ev),
            })
            .collect()
    }

    /// The edges of this polygon.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The topmost and bottommost Y coordinates touched by an edge.
    #[must_use]
    pub fn vertical_extent(&self) -> Option<(f32, f32)> {
        self.edges.iter().fold(None, |extent, edge| match extent {
            None => Some((edge.top, edge.bottom)),
            Some((top, bottom)) => Some((top.min(edge.top), bottom.max(edge.bottom))),
        })
    }
}

impl IntoIterator for Polygon {
    type Item = Edge;
    type IntoIter = std::vec::IntoIter<Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

impl FromIterator<Edge> for Polygon {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        Self {
            edges: iter.into_iter().filter(|edge| !edge.is_horizontal()).collect(),
        }
    }
}

/// An edge in a `Polygon`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Edge {
    /// The segment this edge runs along.
    pub segment: LineSegment<f32>,
    /// The highest point (lowest Y) on this edge.
    pub top: f32,
    /// The lowest point (highest Y) on this edge.
    pub bottom: f32,
    /// The direction this edge goes in.
    pub direction: Direction,
}

impl Edge {
    /// Create a new `Edge` from two points.
    #[must_use]
    pub fn new(p1: Point2D<f32>, p2: Point2D<f32>) -> Self {
        let (top, bottom, direction) = if p1.y <= p2.y {
            (p1.y, p2.y, Direction::Forward)
        } else {
            (p2.y, p1.y, Direction::Backwards)
        };

        Self {
            segment: LineSegment { from: p1, to: p2 },
            top,
            bottom,
            direction,
        }
    }

    /// Tell whether this edge is horizontal, and therefore never crosses a scanline.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        approx_eq(self.segment.from.y, self.segment.to.y)
    }

    /// Tell whether the horizontal line at `y` crosses this edge. The top end is included and the
    /// bottom end is not, so that a vertex shared by two edges is counted once.
    #[must_use]
    pub fn crosses(&self, y: f32) -> bool {
        self.top <= y && y < self.bottom
    }

    /// The X coordinate of this edge at a given Y coordinate.
    #[must_use]
    pub fn x_at(&self, y: f32) -> f32 {
        let LineSegment { from, to } = self.segment;
        if self.is_horizontal() {
            return from.x.min(to.x);
        }

        from.x + (y - from.y) * (to.x - from.x) / (to.y - from.y)
    }

    /// The winding contribution of this edge: `1` when it runs downward, `-1` otherwise.
    #[must_use]
    pub fn winding(&self) -> i32 {
        match self.direction {
            Direction::Forward => 1,
            Direction::Backwards => -1,
        }
    }
}

/// The direction that an `Edge` moves in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Top to bottom.
    Forward,
    /// Bottom to top.
    Backwards,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}
