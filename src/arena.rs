// BSL 1.0 License

use crate::{Error, Result};
use std::{cell::Cell, fmt, rc::Rc};

/// The memory arena band lists allocate their nodes from.
///
/// An `Arena` is a cheap, clonable handle. Every band list charges its nodes (sentinels included)
/// to the arena it was created with, and releases them when they are unlinked, when the list is
/// cleared, or when it is dropped. The arena can be given a node limit, past which allocations
/// fail with an out-of-memory error; the rest of the rendering pipeline keeps working.
///
/// The handle is reference counted without atomics, so an arena never leaves the thread that
/// created it.
#[derive(Clone, Default)]
pub struct Arena {
    state: Rc<ArenaState>,
}

#[derive(Default)]
struct ArenaState {
    live: Cell<usize>,
    peak: Cell<usize>,
    limit: Cell<Option<usize>>,
    failures: Cell<usize>,
}

impl Arena {
    /// Create an arena without a node limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena that refuses to hold more than `limit` live nodes.
    pub fn with_limit(limit: usize) -> Self {
        let arena = Self::default();
        arena.set_limit(Some(limit));
        arena
    }

    /// Change the node limit. Nodes already allocated are not affected.
    pub fn set_limit(&self, limit: Option<usize>) {
        self.state.limit.set(limit);
    }

    /// The node limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.state.limit.get()
    }

    /// The number of nodes currently charged to this arena.
    pub fn live_nodes(&self) -> usize {
        self.state.live.get()
    }

    /// The largest number of nodes ever live at the same time.
    pub fn peak_nodes(&self) -> usize {
        self.state.peak.get()
    }

    /// The number of allocations this arena has refused.
    pub fn failures(&self) -> usize {
        self.state.failures.get()
    }

    /// Charge `nodes` nodes to this arena.
    pub(crate) fn reserve(&self, nodes: usize) -> Result<()> {
        let live = self.state.live.get();
        let wanted = live.checked_add(nodes);

        match (wanted, self.state.limit.get()) {
            (Some(wanted), Some(limit)) if wanted <= limit => self.commit(wanted),
            (Some(wanted), None) => self.commit(wanted),
            _ => {
                self.state.failures.set(self.state.failures.get() + 1);
                log::warn!(
                    "Arena refused {} nodes ({} live, limit {:?})",
                    nodes,
                    live,
                    self.state.limit.get()
                );
                Err(Error::out_of_memory(nodes))
            }
        }
    }

    /// Return `nodes` nodes to this arena.
    pub(crate) fn release(&self, nodes: usize) {
        let live = self.state.live.get();
        debug_assert!(nodes <= live, "released more nodes than were charged");
        self.state.live.set(live.saturating_sub(nodes));
    }

    fn commit(&self, live: usize) -> Result<()> {
        self.state.live.set(live);
        if live > self.state.peak.get() {
            self.state.peak.set(live);
        }
        Ok(())
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("live", &self.live_nodes())
            .field("peak", &self.peak_nodes())
            .field("limit", &self.limit())
            .field("failures", &self.failures())
            .finish()
    }
}
