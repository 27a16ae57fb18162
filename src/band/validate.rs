// BSL 1.0 License

use super::{Links, Node, HEAD, TAIL};
use chalkboard_geometry::{PixelBox, PixelBoxExt};
use std::{error::Error as StdError, fmt};

/// A broken band list invariant.
///
/// Violations are bugs in the band algorithm, not resource conditions; they are never turned
/// into recoverable errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A sentinel node holds something other than its fixed extrema.
    BadSentinel {
        /// Which sentinel is damaged.
        which: &'static str,
    },
    /// A rectangle covers no pixels.
    EmptyRect {
        /// Position of the rectangle in the list.
        index: usize,
        /// The rectangle.
        rect: PixelBox,
    },
    /// A node's back link does not point at its predecessor.
    BrokenLink {
        /// Position of the node in the list.
        index: usize,
    },
    /// The forward links never reach the tail sentinel.
    Unterminated,
    /// A rectangle sorts before its predecessor.
    OutOfOrder {
        /// Position of the second rectangle in the list.
        index: usize,
        /// The predecessor.
        first: PixelBox,
        /// The misplaced rectangle.
        second: PixelBox,
    },
    /// Two rectangles of one band overlap.
    Overlap {
        /// Position of the second rectangle in the list.
        index: usize,
        /// The predecessor.
        first: PixelBox,
        /// The overlapping rectangle.
        second: PixelBox,
    },
    /// Two different bands share rows.
    BandOverlap {
        /// Position of the first rectangle of the second band.
        index: usize,
        /// Last rectangle of the first band.
        first: PixelBox,
        /// First rectangle of the second band.
        second: PixelBox,
    },
    /// Two rectangles of one band touch without being merged.
    Touching {
        /// Position of the second rectangle in the list.
        index: usize,
        /// The predecessor.
        first: PixelBox,
        /// The touching rectangle.
        second: PixelBox,
    },
    /// The linked form holds too few rectangles to need it.
    Undemoted {
        /// The number of rectangles linked.
        count: usize,
    },
    /// The recorded rectangle count does not match the linked nodes.
    CountMismatch {
        /// The count the list recorded.
        recorded: usize,
        /// The number of nodes actually linked.
        found: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::BadSentinel { which } => {
                write!(f, "the {} sentinel was overwritten", which)
            }
            InvariantViolation::EmptyRect { index, rect } => {
                write!(f, "rectangle {} ({:?}) is empty", index, rect)
            }
            InvariantViolation::BrokenLink { index } => {
                write!(f, "node {} has a broken back link", index)
            }
            InvariantViolation::Unterminated => f.write_str("the list never reaches its tail"),
            InvariantViolation::OutOfOrder {
                index,
                first,
                second,
            } => write!(
                f,
                "rectangle {} ({:?}) sorts before its predecessor ({:?})",
                index, second, first
            ),
            InvariantViolation::Overlap {
                index,
                first,
                second,
            } => write!(
                f,
                "rectangle {} ({:?}) overlaps its predecessor ({:?})",
                index, second, first
            ),
            InvariantViolation::BandOverlap {
                index,
                first,
                second,
            } => write!(
                f,
                "band starting at rectangle {} ({:?}) shares rows with the band above ({:?})",
                index, second, first
            ),
            InvariantViolation::Touching {
                index,
                first,
                second,
            } => write!(
                f,
                "rectangle {} ({:?}) touches its predecessor ({:?})",
                index, second, first
            ),
            InvariantViolation::Undemoted { count } => {
                write!(f, "linked list holds only {} rectangles", count)
            }
            InvariantViolation::CountMismatch { recorded, found } => write!(
                f,
                "list records {} rectangles but links {}",
                recorded, found
            ),
        }
    }
}

impl StdError for InvariantViolation {}

fn is_sentinel(node: &Node, value: i32) -> bool {
    let rect = node.rect;
    rect.min.x == value && rect.min.y == value && rect.max.x == value && rect.max.y == value
}

impl Links {
    pub(super) fn validate(&self) -> Result<(), InvariantViolation> {
        match self.nodes.get(HEAD as usize) {
            Some(head) if is_sentinel(head, i32::MIN) => {}
            _ => return Err(InvariantViolation::BadSentinel { which: "head" }),
        }
        match self.nodes.get(TAIL as usize) {
            Some(tail) if is_sentinel(tail, i32::MAX) => {}
            _ => return Err(InvariantViolation::BadSentinel { which: "tail" }),
        }

        if self.count <= 1 {
            return Err(InvariantViolation::Undemoted { count: self.count });
        }

        let mut prev = HEAD;
        let mut at = self.nodes[HEAD as usize].next;
        let mut index = 0;
        let mut last: Option<PixelBox> = None;

        while at != TAIL {
            if index >= self.nodes.len() {
                return Err(InvariantViolation::Unterminated);
            }

            let node = self
                .nodes
                .get(at as usize)
                .ok_or(InvariantViolation::BrokenLink { index })?;
            if node.prev != prev {
                return Err(InvariantViolation::BrokenLink { index });
            }

            let rect = node.rect;
            if rect.is_degenerate() {
                return Err(InvariantViolation::EmptyRect { index, rect });
            }

            if let Some(first) = last {
                let second = rect;
                if first.same_rows(&second) {
                    if second.min.x < first.min.x {
                        return Err(InvariantViolation::OutOfOrder {
                            index,
                            first,
                            second,
                        });
                    }
                    if second.min.x < first.max.x {
                        return Err(InvariantViolation::Overlap {
                            index,
                            first,
                            second,
                        });
                    }
                    if second.min.x == first.max.x {
                        return Err(InvariantViolation::Touching {
                            index,
                            first,
                            second,
                        });
                    }
                } else if second.min.y < first.min.y {
                    return Err(InvariantViolation::OutOfOrder {
                        index,
                        first,
                        second,
                    });
                } else if second.min.y < first.max.y {
                    return Err(InvariantViolation::BandOverlap {
                        index,
                        first,
                        second,
                    });
                }
            }

            last = Some(rect);
            prev = at;
            at = node.next;
            index += 1;
        }

        if self.nodes[TAIL as usize].prev != prev {
            return Err(InvariantViolation::BrokenLink { index });
        }

        if index != self.count {
            return Err(InvariantViolation::CountMismatch {
                recorded: self.count,
                found: index,
            });
        }

        Ok(())
    }
}
