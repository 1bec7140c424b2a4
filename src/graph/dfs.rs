//! Iterative depth-first search with entry/exit times.
//!
//! The [`Dfs`] state carries the discovered/processed flags, the parent tree,
//! per-vertex entry/exit timestamps, and a per-vertex cursor into the
//! adjacency lists snapshotted from the graph at creation (or [`Dfs::reset`]).
//! Mutating the graph between the snapshot and the end of a traversal is
//! undefined.
//!
//! Repeated [`Dfs::run`] calls on one state accumulate a forest: vertices
//! finished by an earlier run stay processed, which is exactly what
//! [`topological_sort`](crate::graph::topo::topological_sort) needs.

use crate::alloc::pool::NIL;
use crate::collections::{FixedBitSet, FixedStack};
use crate::error::{Error, Result};
use crate::graph::adjacency::{AdjacencyGraph, EdgeMode, VertexId};
use crate::value::Value;

/// Classification of an edge `v0 → v1` against a DFS run's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// `v1` was first discovered through this edge.
    Tree,
    /// `v1` is an ancestor still being processed; the cycle indicator.
    Back,
    /// `v1` is a processed descendant (entered after `v0`).
    Forward,
    /// `v1` is processed and entered before `v0`.
    Cross,
}

/// Hooks invoked by [`Dfs::run`]. All three default to no-ops.
///
/// `vertex_early` fires once per vertex at first discovery, `vertex_late`
/// once when its adjacency cursor is exhausted, and `edge` once per directed
/// edge traversal (for undirected graphs, never on the parent-returning
/// edge). Hooks must not mutate the graph or re-enter the running traversal.
pub trait DfsVisitor {
    /// Called once per vertex, at first discovery.
    fn vertex_early(&mut self, _v: VertexId, _dfs: &Dfs) {}
    /// Called once per traversed edge, after any parent link is in place, so
    /// [`Dfs::classify_edge`] is meaningful here.
    fn edge(&mut self, _v0: VertexId, _v1: VertexId, _dfs: &Dfs) {}
    /// Called once per vertex, when its adjacency list is exhausted.
    fn vertex_late(&mut self, _v: VertexId, _dfs: &Dfs) {}
}

/// Callback-free traversal.
impl DfsVisitor for () {}

/// Reusable depth-first-search state for one graph's dimensions.
pub struct Dfs {
    discovered: FixedBitSet,
    processed: FixedBitSet,
    parent: Box<[u32]>,
    entry_time: Box<[u32]>,
    exit_time: Box<[u32]>,
    next_edge: Box<[u32]>,
    stack: FixedStack,
    time: u32,
}

impl Dfs {
    /// Exact number of backing bytes [`Dfs::new`] will allocate for a graph of
    /// `graph`'s vertex capacity.
    pub fn footprint(graph: &AdjacencyGraph) -> Result<usize> {
        let v = graph.vertex_capacity();
        Ok(2 * FixedBitSet::footprint(v)?
            + 4 * v as usize * core::mem::size_of::<u32>()
            + FixedStack::footprint(v)?)
    }

    /// Creates a cleared state sized for `graph`, with adjacency cursors
    /// snapshotted from it.
    pub fn new(graph: &AdjacencyGraph) -> Result<Self> {
        let v = graph.vertex_capacity();
        let mut state = Self {
            discovered: FixedBitSet::new(v)?,
            processed: FixedBitSet::new(v)?,
            parent: vec![NIL; v as usize].into_boxed_slice(),
            entry_time: vec![0u32; v as usize].into_boxed_slice(),
            exit_time: vec![0u32; v as usize].into_boxed_slice(),
            next_edge: vec![NIL; v as usize].into_boxed_slice(),
            stack: FixedStack::new(v)?,
            time: 0,
        };
        state.snapshot_cursors(graph);
        Ok(state)
    }

    fn snapshot_cursors(&mut self, graph: &AdjacencyGraph) {
        for slot in 0..graph.vertex_capacity() {
            self.next_edge[slot as usize] = graph.adjacency_head(slot);
        }
    }

    /// Clears the state and re-snapshots the adjacency cursors from `graph`.
    /// A graph with a different vertex capacity is [`Error::InvalidArgument`].
    pub fn reset(&mut self, graph: &AdjacencyGraph) -> Result<()> {
        if graph.vertex_capacity() != self.discovered.capacity() {
            return Err(Error::InvalidArgument);
        }
        self.discovered.clear();
        self.processed.clear();
        self.parent.fill(NIL);
        self.entry_time.fill(0);
        self.exit_time.fill(0);
        self.stack.clear();
        self.time = 0;
        self.snapshot_cursors(graph);
        Ok(())
    }

    /// Runs a depth-first search from `root`, invoking `visitor`'s hooks.
    ///
    /// Operates on the state as it stands: a fresh or [`reset`](Self::reset)
    /// state yields a single-source traversal, and further runs from
    /// still-unprocessed roots extend the forest (timestamps keep growing, so
    /// the parenthesis property holds across the whole forest). A dead `root`
    /// or a state sized for a different graph is [`Error::InvalidArgument`];
    /// a `root` already processed by this state is a no-op.
    pub fn run<V: DfsVisitor>(
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
        if self.processed.contains(root.raw()) {
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(root = root.index(), "dfs");

        let directed = graph.mode() == EdgeMode::Directed;
        self.stack.push(Value::from(root))?;

        while let Ok(top) = self.stack.pop() {
            let v0 = top.as_bits();
            if !self.discovered.contains(v0) {
                self.discovered.insert(v0);
                self.time += 1;
                self.entry_time[v0 as usize] = self.time;
                visitor.vertex_early(VertexId::new(v0), self);
            }
            let cursor = self.next_edge[v0 as usize];
            if let Some(node) = graph.edge_node(cursor) {
                let (dest, next) = (node.dest, node.next);
                self.next_edge[v0 as usize] = next;
                // Revisit v0 for its remaining edges.
                self.stack.push(Value::from_bits(v0))?;
                if !self.discovered.contains(dest) {
                    self.parent[dest as usize] = v0;
                    visitor.edge(VertexId::new(v0), VertexId::new(dest), self);
                    self.stack.push(Value::from_bits(dest))?;
                } else if (!self.processed.contains(dest) && self.parent[v0 as usize] != dest)
                    || directed
                {
                    visitor.edge(VertexId::new(v0), VertexId::new(dest), self);
                }
            } else {
                visitor.vertex_late(VertexId::new(v0), self);
                self.time += 1;
                self.exit_time[v0 as usize] = self.time;
                self.processed.insert(v0);
            }
        }
        Ok(())
    }

    /// Classifies the edge `v0 → v1` against the current state, or `None` if
    /// `v1` is untouched by the traversal (nothing to classify).
    pub fn classify_edge(&self, v0: VertexId, v1: VertexId) -> Option<EdgeKind> {
        if self.parent(v1) == Some(v0) {
            Some(EdgeKind::Tree)
        } else if self.discovered(v1) && !self.processed(v1) {
            Some(EdgeKind::Back)
        } else if self.processed(v1) && self.entry_time(v1) > self.entry_time(v0) {
            Some(EdgeKind::Forward)
        } else if self.processed(v1) && self.entry_time(v1) < self.entry_time(v0) {
            Some(EdgeKind::Cross)
        } else {
            None
        }
    }

    /// The vertex through which `v` was first discovered, or `None` for roots
    /// and undiscovered vertices.
    #[inline]
    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        match self.parent.get(v.index()) {
            Some(&p) if p != NIL => Some(VertexId::new(p)),
            _ => None,
        }
    }

    /// The timestamp at which `v` was discovered (0 if never).
    #[inline]
    pub fn entry_time(&self, v: VertexId) -> u32 {
        self.entry_time.get(v.index()).copied().unwrap_or(0)
    }

    /// The timestamp at which `v` finished (0 if not yet).
    #[inline]
    pub fn exit_time(&self, v: VertexId) -> u32 {
        self.exit_time.get(v.index()).copied().unwrap_or(0)
    }

    /// Returns `true` if `v` has been pushed and seen at least once.
    #[inline]
    pub fn discovered(&self, v: VertexId) -> bool {
        v.index() < self.discovered.capacity() as usize && self.discovered.contains(v.raw())
    }

    /// Returns `true` if `v`'s adjacency list has been fully consumed.
    #[inline]
    pub fn processed(&self, v: VertexId) -> bool {
        v.index() < self.processed.capacity() as usize && self.processed.contains(v.raw())
    }
}
