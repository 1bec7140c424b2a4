//! Breadth-first search over an [`AdjacencyGraph`].
//!
//! The [`Bfs`] state owns every scratch structure the traversal needs
//! (discovered/processed bit sets, the parent tree, the frontier queue), all
//! sized once from the graph's vertex capacity. Hooks on a [`BfsVisitor`] fire
//! as vertices are first dequeued, as edges are examined, and as vertices
//! finish; each hook receives the state so parents and flags are readable
//! mid-traversal.

use crate::alloc::pool::NIL;
use crate::collections::{FixedBitSet, FixedQueue};
use crate::error::{Error, Result};
use crate::graph::adjacency::{AdjacencyGraph, EdgeMode, VertexId};
use crate::value::Value;

/// Hooks invoked by [`Bfs::run`]. All three default to no-ops; implementors
/// carry whatever per-hook state they need.
///
/// Hooks must not mutate the graph or re-enter the running traversal (the
/// borrow checker enforces both).
pub trait BfsVisitor {
    /// Called once per vertex, when it is dequeued for processing.
    fn vertex_early(&mut self, _v: VertexId, _bfs: &Bfs) {}
    /// Called per examined edge: once per directed edge, and for undirected
    /// graphs never a second time through an already-processed neighbor.
    fn edge(&mut self, _v0: VertexId, _v1: VertexId, _bfs: &Bfs) {}
    /// Called once per vertex, after its adjacency list has been examined.
    fn vertex_late(&mut self, _v: VertexId, _bfs: &Bfs) {}
}

/// Callback-free traversal.
impl BfsVisitor for () {}

/// Reusable breadth-first-search state for one graph's dimensions.
pub struct Bfs {
    discovered: FixedBitSet,
    processed: FixedBitSet,
    parent: Box<[u32]>,
    queue: FixedQueue,
}

impl Bfs {
    /// Exact number of backing bytes [`Bfs::new`] will allocate for a graph of
    /// `graph`'s vertex capacity.
    pub fn footprint(graph: &AdjacencyGraph) -> Result<usize> {
        let v = graph.vertex_capacity();
        Ok(2 * FixedBitSet::footprint(v)?
            + v as usize * core::mem::size_of::<u32>()
            + FixedQueue::footprint(v)?)
    }

    /// Creates a cleared state sized for `graph`.
    pub fn new(graph: &AdjacencyGraph) -> Result<Self> {
        let v = graph.vertex_capacity();
        Ok(Self {
            discovered: FixedBitSet::new(v)?,
            processed: FixedBitSet::new(v)?,
            parent: vec![NIL; v as usize].into_boxed_slice(),
            queue: FixedQueue::new(v)?,
        })
    }

    /// Clears the state so one allocation serves repeated traversals.
    pub fn reset(&mut self) {
        self.discovered.clear();
        self.processed.clear();
        self.parent.fill(NIL);
        self.queue.clear();
    }

    /// Runs a breadth-first search from `root`, invoking `visitor`'s hooks.
    ///
    /// The state is cleared first, so afterwards it describes exactly this
    /// traversal: the parent links form the shortest-path tree from `root`.
    /// A dead `root` or a state sized for a different graph is
    /// [`Error::InvalidArgument`].
    pub fn run<V: BfsVisitor>(
        &mut self,
        graph: &AdjacencyGraph,
        root: VertexId,
        visitor: &mut V,
    ) -> Result<()> {
        if !graph.is_vertex_valid(root)
            || self.discovered.capacity() != graph.vertex_capacity()
        {
            return Err(Error::InvalidArgument);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(root = root.index(), "bfs");
        self.reset();

        let directed = graph.mode() == EdgeMode::Directed;
        self.queue.insert(Value::from(root))?;
        self.discovered.insert(root.raw());

        while let Ok(front) = self.queue.remove() {
            let v0 = front.as_bits();
            visitor.vertex_early(VertexId::new(v0), self);
            // Mark before the edge scan so undirected edges are not reported
            // a second time from an already-seen neighbor.
            self.processed.insert(v0);
            for v1 in graph.neighbors(VertexId::new(v0))? {
                let v1r = v1.raw();
                if !self.processed.contains(v1r) || directed {
                    visitor.edge(VertexId::new(v0), v1, self);
                }
                if !self.discovered.contains(v1r) {
                    self.discovered.insert(v1r);
                    self.queue.insert(Value::from(v1))?;
                    self.parent[v1.index()] = v0;
                }
            }
            visitor.vertex_late(VertexId::new(v0), self);
        }
        Ok(())
    }

    /// The predecessor that first discovered `v`, or `None` for roots and
    /// undiscovered vertices.
    #[inline]
    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        match self.parent.get(v.index()) {
            Some(&p) if p != NIL => Some(VertexId::new(p)),
            _ => None,
        }
    }

    /// Returns `true` if `v` has been enqueued at least once.
    #[inline]
    pub fn discovered(&self, v: VertexId) -> bool {
        v.index() < self.discovered.capacity() as usize && self.discovered.contains(v.raw())
    }

    /// Returns `true` if `v`'s adjacency list has been fully examined.
    #[inline]
    pub fn processed(&self, v: VertexId) -> bool {
        v.index() < self.processed.capacity() as usize && self.processed.contains(v.raw())
    }
}
