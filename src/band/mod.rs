// BSL 1.0 License

//! The y-x banded rectangle list a clip region is made of.
//!
//! Rectangles are kept sorted by their top edge and grouped into *bands*: runs of rectangles that
//! share the exact same vertical range. Within a band, rectangles are sorted by their left edge,
//! never overlap and never touch (touching rectangles are merged). Band vertical ranges never
//! overlap either.
//!
//! Lists with zero or one rectangle are stored inline. As soon as a second rectangle arrives, the
//! list is promoted to a doubly linked list stored in an index arena, bounded by two permanent
//! sentinel nodes, and every node is charged to the [`Arena`] the list was created with.

use crate::{Arena, Error, Result};
use chalkboard_geometry::{PixelBox, PixelBoxExt, Point2D};
use core::iter::Peekable;
use tinyvec::TinyVec;

mod insert;
mod validate;

pub use validate::InvariantViolation;

type NodeId = u32;

/// Head sentinel; every coordinate is `i32::MIN`.
const HEAD: NodeId = 0;
/// Tail sentinel; every coordinate is `i32::MAX`.
const TAIL: NodeId = 1;
const NIL: NodeId = NodeId::MAX;

#[derive(Debug, Copy, Clone)]
struct Node {
    rect: PixelBox,
    prev: NodeId,
    next: NodeId,
}

impl Node {
    fn sentinel(value: i32) -> Node {
        Node {
            rect: PixelBox::new(Point2D::new(value, value), Point2D::new(value, value)),
            prev: NIL,
            next: NIL,
        }
    }
}

#[derive(Debug)]
enum Repr {
    Empty,
    Single(PixelBox),
    Bands(Links),
}

/// The linked form of a band list.
#[derive(Debug)]
struct Links {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    /// Number of linked rectangles, sentinels excluded.
    count: usize,
    /// Nodes charged to the arena but not handed out yet.
    reserved: usize,
    /// Locality hint: a node in the band touched by the last insertion.
    insert: NodeId,
    /// Whether `nodes[2..]` holds every rectangle in list order.
    compact: bool,
}

/// The horizontal spans of a band.
pub type Spans = TinyVec<[(i32, i32); 8]>;

/// A band: every rectangle of a list sharing one vertical range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    /// Top of the band, inclusive.
    pub min_y: i32,
    /// Bottom of the band, exclusive.
    pub max_y: i32,
    /// The `(min_x, max_x)` spans of the band, left to right.
    pub spans: Spans,
}

/// An ordered, non-overlapping list of rectangles grouped into bands.
#[derive(Debug)]
pub struct BandList {
    repr: Repr,
    arena: Arena,
}

impl BandList {
    /// Create an empty band list that allocates from `arena`.
    pub fn new(arena: &Arena) -> Self {
        BandList {
            repr: Repr::Empty,
            arena: arena.clone(),
        }
    }

    /// The arena this list allocates from.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Number of rectangles in this list.
    pub fn len(&self) -> usize {
        match self.repr {
            Repr::Empty => 0,
            Repr::Single(_) => 1,
            Repr::Bands(ref links) => links.count,
        }
    }

    /// Tell whether this list covers nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The rectangle this list consists of, if it consists of exactly one.
    pub fn single(&self) -> Option<PixelBox> {
        match self.repr {
            Repr::Single(rect) => Some(rect),
            _ => None,
        }
    }

    /// Number of nodes (sentinels included) this list currently has charged to its arena.
    pub fn live_nodes(&self) -> usize {
        match self.repr {
            Repr::Bands(ref links) => links.live(),
            _ => 0,
        }
    }

    /// Add the area of a rectangle to this list.
    ///
    /// On error the list is left in a consistent state: whatever part of the rectangle was
    /// already merged stays merged, and no node is left half-linked.
    pub fn insert(&mut self, rect: PixelBox) -> Result<()> {
        if rect.is_degenerate() {
            return Ok(());
        }

        let result = match self.repr {
            Repr::Empty => {
                self.repr = Repr::Single(rect);
                Ok(())
            }
            Repr::Single(single) => self.insert_into_single(single, rect),
            Repr::Bands(ref mut links) => links.insert(&self.arena, rect),
        };

        self.demote();
        result
    }

    /// Insert next to an inline rectangle, promoting to the linked form only if the two cannot be
    /// expressed as one rectangle.
    fn insert_into_single(&mut self, single: PixelBox, rect: PixelBox) -> Result<()> {
        if single.covers(&rect) {
            return Ok(());
        }

        let merged = if rect.covers(&single) {
            Some(rect)
        } else if single.same_columns(&rect) && single.rows_touch(&rect) {
            Some(PixelBox::new(
                Point2D::new(single.min.x, single.min.y.min(rect.min.y)),
                Point2D::new(single.max.x, single.max.y.max(rect.max.y)),
            ))
        } else if single.same_rows(&rect) && single.columns_touch(&rect) {
            Some(PixelBox::new(
                Point2D::new(single.min.x.min(rect.min.x), single.min.y),
                Point2D::new(single.max.x.max(rect.max.x), single.max.y),
            ))
        } else {
            None
        };

        if let Some(merged) = merged {
            self.repr = Repr::Single(merged);
            return Ok(());
        }

        let mut links = Links::promote(&self.arena, single)?;
        log::debug!("Promoting band list to linked form");
        let result = links.insert(&self.arena, rect);
        self.repr = Repr::Bands(links);
        result
    }

    /// Fall back to the inline form once at most one rectangle is left.
    fn demote(&mut self) {
        let remaining = match self.repr {
            Repr::Bands(ref links) if links.count <= 1 => {
                self.arena.release(links.live());
                if links.count == 1 {
                    Some(links.rect(links.first()))
                } else {
                    None
                }
            }
            _ => return,
        };

        log::debug!("Demoting band list to inline form");
        self.repr = remaining.map_or(Repr::Empty, Repr::Single);
    }

    /// Replace the contents of this list with one rectangle.
    pub(crate) fn set_single(&mut self, rect: PixelBox) {
        self.clear();
        if !rect.is_degenerate() {
            self.repr = Repr::Single(rect);
        }
    }

    /// Release every rectangle and the sentinels.
    pub fn clear(&mut self) {
        if let Repr::Bands(ref links) = self.repr {
            self.arena.release(links.live());
        }
        self.repr = Repr::Empty;
    }

    /// Merge vertically adjacent bands with identical spans.
    ///
    /// Together with the merging of touching spans inside a band, this leaves the list in the one
    /// layout its pixel set admits.
    pub fn coalesce(&mut self) {
        if let Repr::Bands(ref mut links) = self.repr {
            let removed = links.coalesce(&self.arena);
            if removed > 0 {
                log::debug!("Coalescing removed {} rectangles", removed);
            }
        }
        self.demote();
    }

    /// Lay the nodes out in list order, so that bands can be looked up by binary search.
    pub fn compact(&mut self) -> Result<()> {
        match self.repr {
            Repr::Bands(ref mut links) => links.compact(),
            _ => Ok(()),
        }
    }

    /// Iterate over the rectangles of this list, band by band.
    pub fn iter(&self) -> Iter<'_> {
        let inner = match self.repr {
            Repr::Empty => IterInner::Inline(None),
            Repr::Single(rect) => IterInner::Inline(Some(rect)),
            Repr::Bands(ref links) => IterInner::Linked {
                links,
                at: links.first(),
            },
        };

        Iter { inner }
    }

    /// Iterate over the rectangles of this list, starting at the first band that ends below `y`.
    pub fn iter_from(&self, y: i32) -> Iter<'_> {
        let inner = match self.repr {
            Repr::Empty => IterInner::Inline(None),
            Repr::Single(rect) => IterInner::Inline(Some(rect).filter(|rect| rect.max.y > y)),
            Repr::Bands(ref links) => IterInner::Linked {
                links,
                at: links.first_ending_below(y),
            },
        };

        Iter { inner }
    }

    /// Iterate over the bands of this list.
    pub fn bands(&self) -> Bands<'_> {
        Bands {
            rects: self.iter().peekable(),
        }
    }

    /// Iterate over the bands of this list, starting at the first band that ends below `y`.
    pub fn bands_from(&self, y: i32) -> Bands<'_> {
        Bands {
            rects: self.iter_from(y).peekable(),
        }
    }

    /// Check every structural invariant of this list.
    pub fn validate(&self) -> core::result::Result<(), InvariantViolation> {
        match self.repr {
            Repr::Empty => Ok(()),
            Repr::Single(rect) if rect.is_degenerate() => {
                Err(InvariantViolation::EmptyRect { index: 0, rect })
            }
            Repr::Single(_) => Ok(()),
            Repr::Bands(ref links) => links.validate(),
        }
    }

    /// Panic if any structural invariant of this list is broken.
    #[cfg(feature = "verify")]
    pub(crate) fn assert_valid(&self) {
        if let Err(violation) = self.validate() {
            panic!("Clip accumulation produced a broken band list: {}", violation);
        }
    }
}

impl Drop for BandList {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a> IntoIterator for &'a BandList {
    type Item = PixelBox;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Links {
    /// Build the linked form around an existing inline rectangle.
    fn promote(arena: &Arena, single: PixelBox) -> Result<Links> {
        arena.reserve(3)?;

        let mut nodes = Vec::new();
        if nodes.try_reserve_exact(3).is_err() {
            arena.release(3);
            return Err(Error::out_of_memory(3));
        }

        let mut head = Node::sentinel(i32::MIN);
        let mut tail = Node::sentinel(i32::MAX);
        head.next = 2;
        tail.prev = 2;
        nodes.push(head);
        nodes.push(tail);
        nodes.push(Node {
            rect: single,
            prev: HEAD,
            next: TAIL,
        });

        Ok(Links {
            nodes,
            free: Vec::new(),
            count: 1,
            reserved: 0,
            insert: 2,
            compact: true,
        })
    }

    #[inline]
    fn live(&self) -> usize {
        self.count + 2
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id as usize]
    }

    #[inline]
    fn rect(&self, id: NodeId) -> PixelBox {
        self.node(id).rect
    }

    #[inline]
    fn next(&self, id: NodeId) -> NodeId {
        self.node(id).next
    }

    #[inline]
    fn prev(&self, id: NodeId) -> NodeId {
        self.node(id).prev
    }

    #[inline]
    fn first(&self) -> NodeId {
        self.next(HEAD)
    }

    /// Charge `count` nodes to the arena and make room for them, so that the following `take`
    /// calls cannot fail.
    fn reserve(&mut self, arena: &Arena, count: usize) -> Result<()> {
        arena.reserve(count)?;

        let fresh = count.saturating_sub(self.free.len());
        let fits_ids = self
            .nodes
            .len()
            .checked_add(fresh)
            .map_or(false, |len| len < NIL as usize);

        if !fits_ids || self.nodes.try_reserve(fresh).is_err() {
            arena.release(count);
            return Err(Error::out_of_memory(count));
        }

        self.reserved += count;
        Ok(())
    }

    /// Hand out a reserved node holding `rect`. The node is not linked yet.
    fn take(&mut self, rect: PixelBox) -> NodeId {
        debug_assert!(self.reserved > 0, "took a node that was never reserved");
        self.reserved -= 1;

        let node = Node {
            rect,
            prev: NIL,
            next: NIL,
        };

        match self.free.pop() {
            Some(id) => {
                *self.node_mut(id) = node;
                id
            }
            None => {
                let id = self.nodes.len() as NodeId;
                self.nodes.push(node);
                id
            }
        }
    }

    /// Link a node in front of `at`.
    fn link_before(&mut self, at: NodeId, id: NodeId) {
        let prev = self.prev(at);
        {
            let node = self.node_mut(id);
            node.prev = prev;
            node.next = at;
        }
        self.node_mut(prev).next = id;
        self.node_mut(at).prev = id;
        self.count += 1;
        self.compact = false;
    }

    /// Link a node right after `at`.
    fn link_after(&mut self, at: NodeId, id: NodeId) {
        let next = self.next(at);
        self.link_before(next, id);
    }

    /// Unlink a node and give it back to the arena.
    fn remove(&mut self, arena: &Arena, id: NodeId) {
        let Node { prev, next, .. } = *self.node(id);
        self.node_mut(prev).next = next;
        self.node_mut(next).prev = prev;

        {
            let node = self.node_mut(id);
            node.prev = NIL;
            node.next = NIL;
        }

        if self.insert == id {
            self.insert = prev;
        }

        self.free.push(id);
        self.count -= 1;
        self.compact = false;
        arena.release(1);
    }

    /// The first node of the first band whose bottom lies below `y`, or the tail sentinel.
    fn first_ending_below(&self, y: i32) -> NodeId {
        if self.compact {
            let rects = &self.nodes[2..];
            let index = rects.partition_point(|node| node.rect.max.y <= y);
            return if index == rects.len() {
                TAIL
            } else {
                (index + 2) as NodeId
            };
        }

        let mut at = self.first();
        while at != TAIL && self.rect(at).max.y <= y {
            at = self.next(at);
        }
        at
    }

    fn coalesce(&mut self, arena: &Arena) -> usize {
        let mut removed = 0;
        let mut upper = self.first();

        while upper != TAIL {
            let upper_rows = self.rect(upper);

            // find the first node of the following band
            let mut lower = upper;
            let mut width = 0;
            while self.rect(lower).same_rows(&upper_rows) {
                lower = self.next(lower);
                width += 1;
            }

            if lower == TAIL {
                break;
            }

            let lower_rows = self.rect(lower);
            if lower_rows.min.y != upper_rows.max.y || !self.same_spans(upper, lower, width) {
                upper = lower;
                continue;
            }

            let mut at = upper;
            for _ in 0..width {
                self.node_mut(at).rect.max.y = lower_rows.max.y;
                at = self.next(at);
            }

            for _ in 0..width {
                let following = self.next(at);
                self.remove(arena, at);
                at = following;
            }

            removed += width;
        }

        removed
    }

    /// Tell whether the band starting at `lower` has the same `width` spans as the band starting
    /// at `upper`.
    fn same_spans(&self, upper: NodeId, lower: NodeId, width: usize) -> bool {
        let lower_rows = self.rect(lower);
        let (mut a, mut b) = (upper, lower);

        for _ in 0..width {
            let rect = self.rect(b);
            if !rect.same_rows(&lower_rows) || !rect.same_columns(&self.rect(a)) {
                return false;
            }
            a = self.next(a);
            b = self.next(b);
        }

        !self.rect(b).same_rows(&lower_rows)
    }

    fn compact(&mut self) -> Result<()> {
        if self.compact {
            return Ok(());
        }

        let len = self.live();
        let mut nodes = Vec::new();
        if nodes.try_reserve_exact(len).is_err() {
            return Err(Error::out_of_memory(len));
        }

        nodes.push(Node::sentinel(i32::MIN));
        nodes.push(Node::sentinel(i32::MAX));

        let mut at = self.first();
        while at != TAIL {
            nodes.push(Node {
                rect: self.rect(at),
                prev: NIL,
                next: NIL,
            });
            at = self.next(at);
        }

        let last = nodes.len() - 1;
        for index in 2..nodes.len() {
            let node = &mut nodes[index];
            node.prev = if index == 2 { HEAD } else { (index - 1) as NodeId };
            node.next = if index == last {
                TAIL
            } else {
                (index + 1) as NodeId
            };
        }

        if last >= 2 {
            nodes[HEAD as usize].next = 2;
            nodes[TAIL as usize].prev = last as NodeId;
        } else {
            nodes[HEAD as usize].next = TAIL;
            nodes[TAIL as usize].prev = HEAD;
        }

        self.nodes = nodes;
        self.free.clear();
        self.insert = self.first();
        self.compact = true;
        Ok(())
    }
}

/// An iterator over the rectangles of a [`BandList`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: IterInner<'a>,
}

#[derive(Debug, Clone)]
enum IterInner<'a> {
    Inline(Option<PixelBox>),
    Linked { links: &'a Links, at: NodeId },
}

impl<'a> Iterator for Iter<'a> {
    type Item = PixelBox;

    fn next(&mut self) -> Option<PixelBox> {
        match self.inner {
            IterInner::Inline(ref mut rect) => rect.take(),
            IterInner::Linked { links, ref mut at } => {
                if *at == TAIL {
                    return None;
                }

                let rect = links.rect(*at);
                *at = links.next(*at);
                Some(rect)
            }
        }
    }
}

impl<'a> core::iter::FusedIterator for Iter<'a> {}

/// An iterator over the bands of a [`BandList`].
#[derive(Debug, Clone)]
pub struct Bands<'a> {
    rects: Peekable<Iter<'a>>,
}

impl<'a> Iterator for Bands<'a> {
    type Item = Band;

    fn next(&mut self) -> Option<Band> {
        let first = self.rects.next()?;
        let mut spans = Spans::default();
        spans.push((first.min.x, first.max.x));

        while let Some(rect) = self.rects.peek() {
            if !rect.same_rows(&first) {
                break;
            }
            spans.push((rect.min.x, rect.max.x));
            self.rects.next();
        }

        Some(Band {
            min_y: first.min.y,
            max_y: first.max.y,
            spans,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkboard_geometry::point2;

    fn b(x1: i32, y1: i32, x2: i32, y2: i32) -> PixelBox {
        PixelBox::new(point2(x1, y1), point2(x2, y2))
    }

    fn list_of(arena: &Arena, rects: &[PixelBox]) -> BandList {
        let mut list = BandList::new(arena);
        for rect in rects {
            list.insert(*rect).unwrap();
            list.validate().unwrap();
        }
        list
    }

    fn rects(list: &BandList) -> Vec<PixelBox> {
        list.iter().collect()
    }

    #[test]
    fn empty_and_single_are_inline() {
        let arena = Arena::new();
        let mut list = BandList::new(&arena);
        assert!(list.is_empty());
        assert_eq!(list.live_nodes(), 0);

        list.insert(b(0, 0, 10, 10)).unwrap();
        assert_eq!(list.single(), Some(b(0, 0, 10, 10)));
        assert_eq!(arena.live_nodes(), 0);
    }

    #[test]
    fn degenerate_rects_are_ignored() {
        let arena = Arena::new();
        let list = list_of(&arena, &[b(0, 0, 0, 10), b(5, 5, 6, 5)]);
        assert!(list.is_empty());
    }

    #[test]
    fn vertical_neighbours_merge_inline() {
        let arena = Arena::new();
        let list = list_of(&arena, &[b(0, 0, 10, 5), b(0, 5, 10, 10)]);
        assert_eq!(list.single(), Some(b(0, 0, 10, 10)));

        let list = list_of(&arena, &[b(0, 5, 10, 10), b(0, 0, 10, 5)]);
        assert_eq!(list.single(), Some(b(0, 0, 10, 10)));
        assert_eq!(arena.live_nodes(), 0);
    }

    #[test]
    fn horizontal_neighbours_merge_inline() {
        let arena = Arena::new();
        let list = list_of(&arena, &[b(0, 0, 10, 5), b(10, 0, 20, 5)]);
        assert_eq!(list.single(), Some(b(0, 0, 20, 5)));
    }

    #[test]
    fn partial_overlap_splits_into_three_bands() {
        let arena = Arena::new();
        let list = list_of(&arena, &[b(0, 0, 10, 10), b(5, 5, 15, 15)]);
        assert_eq!(
            rects(&list),
            vec![b(0, 0, 10, 5), b(0, 5, 15, 10), b(5, 10, 15, 15)]
        );
        assert_eq!(list.live_nodes(), 5);
        assert_eq!(arena.live_nodes(), 5);
    }

    #[test]
    fn disjoint_spans_in_one_band() {
        let arena = Arena::new();
        let list = list_of(&arena, &[b(20, 0, 30, 5), b(0, 0, 10, 5), b(40, 0, 50, 5)]);
        let bands: Vec<Band> = list.bands().collect();
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].min_y, 0);
        assert_eq!(bands[0].max_y, 5);
        assert_eq!(&bands[0].spans[..], &[(0, 10), (20, 30), (40, 50)]);
    }

    #[test]
    fn bridging_span_absorbs_neighbours() {
        let arena = Arena::new();
        let mut list = list_of(
            &arena,
            &[b(0, 0, 10, 5), b(20, 0, 30, 5), b(40, 0, 50, 5), b(60, 0, 70, 5)],
        );
        assert_eq!(list.len(), 4);

        list.insert(b(5, 0, 45, 5)).unwrap();
        list.validate().unwrap();
        assert_eq!(rects(&list), vec![b(0, 0, 50, 5), b(60, 0, 70, 5)]);
        assert_eq!(arena.live_nodes(), 4);

        list.insert(b(50, 0, 60, 5)).unwrap();
        assert_eq!(list.single(), Some(b(0, 0, 70, 5)));
        assert_eq!(arena.live_nodes(), 0);
    }

    #[test]
    fn duplicate_insertions_are_idempotent() {
        let arena = Arena::new();
        let input = [b(0, 0, 10, 10), b(5, 5, 15, 15), b(30, 2, 40, 8)];
        let once = list_of(&arena, &input);

        let mut twice = list_of(&arena, &input);
        for rect in &input {
            twice.insert(*rect).unwrap();
        }
        twice.validate().unwrap();
        assert_eq!(rects(&once), rects(&twice));
    }

    #[test]
    fn rect_in_gap_between_bands() {
        let arena = Arena::new();
        let list = list_of(&arena, &[b(0, 0, 10, 2), b(0, 20, 10, 22), b(5, 10, 8, 12)]);
        assert_eq!(
            rects(&list),
            vec![b(0, 0, 10, 2), b(5, 10, 8, 12), b(0, 20, 10, 22)]
        );
    }

    #[test]
    fn tall_rect_crossing_several_bands() {
        let arena = Arena::new();
        let list = list_of(
            &arena,
            &[b(0, 0, 4, 2), b(10, 4, 14, 6), b(0, 8, 4, 10), b(6, -1, 8, 11)],
        );
        assert_eq!(
            rects(&list),
            vec![
                b(6, -1, 8, 0),
                b(0, 0, 4, 2),
                b(6, 0, 8, 2),
                b(6, 2, 8, 4),
                b(6, 4, 8, 6),
                b(10, 4, 14, 6),
                b(6, 6, 8, 8),
                b(0, 8, 4, 10),
                b(6, 8, 8, 10),
                b(6, 10, 8, 11),
            ]
        );
    }

    #[test]
    fn appended_band_extends_lone_rect() {
        let arena = Arena::new();
        let list = list_of(
            &arena,
            &[b(0, 0, 10, 1), b(20, 0, 30, 1), b(0, 1, 5, 2), b(0, 2, 5, 3)],
        );
        assert_eq!(
            rects(&list),
            vec![b(0, 0, 10, 1), b(20, 0, 30, 1), b(0, 1, 5, 3)]
        );
    }

    #[test]
    fn coalesce_joins_identical_bands() {
        let arena = Arena::new();
        let mut list = list_of(
            &arena,
            &[
                b(0, 0, 2, 1),
                b(4, 0, 6, 1),
                b(0, 1, 2, 2),
                b(4, 1, 6, 2),
                b(0, 2, 2, 3),
                b(4, 2, 7, 3),
            ],
        );
        assert_eq!(list.len(), 6);

        list.coalesce();
        list.validate().unwrap();
        assert_eq!(
            rects(&list),
            vec![b(0, 0, 2, 2), b(4, 0, 6, 2), b(0, 2, 2, 3), b(4, 2, 7, 3)]
        );
        assert_eq!(arena.live_nodes(), 6);
    }

    #[test]
    fn coalesce_can_demote() {
        let arena = Arena::new();
        let mut list = list_of(&arena, &[b(0, 0, 10, 5), b(0, 5, 4, 10), b(4, 5, 10, 10)]);
        assert_eq!(rects(&list), vec![b(0, 0, 10, 5), b(0, 5, 10, 10)]);

        list.coalesce();
        assert_eq!(list.single(), Some(b(0, 0, 10, 10)));
        assert_eq!(arena.live_nodes(), 0);
    }

    #[test]
    fn compact_enables_lookup_by_row() {
        let arena = Arena::new();
        let mut list = list_of(
            &arena,
            &[b(0, 0, 10, 2), b(0, 20, 10, 22), b(5, 10, 8, 12), b(1, 10, 3, 12)],
        );
        list.compact().unwrap();
        list.validate().unwrap();

        let from_ten: Vec<PixelBox> = list.iter_from(10).collect();
        assert_eq!(from_ten, vec![b(1, 10, 3, 12), b(5, 10, 8, 12), b(0, 20, 10, 22)]);
        let from_twelve: Vec<PixelBox> = list.iter_from(12).collect();
        assert_eq!(from_twelve, vec![b(0, 20, 10, 22)]);
        assert_eq!(list.iter_from(22).count(), 0);
        assert_eq!(list.iter_from(-100).count(), 4);

        // lookups agree with the linear walk once the list changes again
        list.insert(b(0, 30, 1, 31)).unwrap();
        assert_eq!(list.iter_from(12).count(), 2);
    }

    #[test]
    fn lookup_past_the_last_row() {
        let arena = Arena::new();
        let mut list = list_of(&arena, &[b(0, 0, 10, 2), b(0, 20, 10, 22)]);
        assert_eq!(list.iter_from(i32::MAX).count(), 0);
        assert_eq!(list.bands_from(i32::MAX).count(), 0);
        assert_eq!(list.iter_from(i32::MIN).count(), 2);

        list.compact().unwrap();
        assert_eq!(list.iter_from(i32::MAX).count(), 0);

        let single = list_of(&arena, &[b(0, 0, 10, 2)]);
        assert_eq!(single.iter_from(i32::MAX).count(), 0);
    }

    #[test]
    fn allocation_failure_leaves_a_consistent_list() {
        let arena = Arena::with_limit(4);
        let mut list = BandList::new(&arena);
        list.insert(b(0, 0, 10, 10)).unwrap();
        list.insert(b(20, 0, 30, 10)).unwrap();
        assert_eq!(arena.live_nodes(), 4);

        let err = list.insert(b(0, 20, 10, 30)).unwrap_err();
        assert!(err.is_out_of_memory());
        list.validate().unwrap();
        assert_eq!(rects(&list), vec![b(0, 0, 10, 10), b(20, 0, 30, 10)]);

        // splitting needs two nodes at once and must not split half a band
        let err = list.insert(b(0, 5, 30, 6)).unwrap_err();
        assert!(err.is_out_of_memory());
        list.validate().unwrap();
        assert_eq!(rects(&list), vec![b(0, 0, 10, 10), b(20, 0, 30, 10)]);

        drop(list);
        assert_eq!(arena.live_nodes(), 0);
    }

    #[test]
    fn failed_promotion_keeps_the_inline_rect() {
        let arena = Arena::with_limit(2);
        let mut list = BandList::new(&arena);
        list.insert(b(0, 0, 10, 10)).unwrap();
        assert!(list.insert(b(20, 20, 30, 30)).is_err());
        assert_eq!(list.single(), Some(b(0, 0, 10, 10)));
        assert_eq!(arena.live_nodes(), 0);
    }

    #[test]
    fn clear_releases_everything() {
        let arena = Arena::new();
        let mut list = list_of(&arena, &[b(0, 0, 1, 1), b(2, 2, 3, 3), b(4, 4, 5, 5)]);
        assert_eq!(arena.live_nodes(), 5);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(arena.live_nodes(), 0);
    }
}
