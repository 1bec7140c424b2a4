//! `AdjacencyGraph` — a directed/undirected graph over fixed vertex and edge
//! capacities.
//!
//! Vertices live in slots with stable ids; removed slots are chained through an
//! intrusive free list and reused. Each vertex's outgoing edges form a singly
//! linked list of nodes drawn from a [`FixedPool`], so every internal reference
//! is a 32-bit slot index and the whole graph is trivially movable.
//!
//! # Performance
//! - `add_vertex`: O(1)
//! - `remove_vertex`: O(degree) expected for undirected, O(V + E) for directed
//! - `add_edge`: O(degree) (duplicate scan) + O(1) insert
//! - `remove_edge`: O(degree)
//! - `neighbors`: O(1) to get the iterator

use serde::{Deserialize, Serialize};

use crate::alloc::pool::{FixedPool, NIL};
use crate::error::{Error, Result};
use crate::value::Value;

/// Whether every logical edge is stored in one direction or both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeMode {
    /// Each logical edge `u-v` is stored as `u→v` and `v→u`.
    Undirected,
    /// Each logical edge `u→v` is stored once.
    Directed,
}

/// A stable identifier for a vertex slot in a specific graph.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(u32);

impl VertexId {
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The slot index behind this id.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) const fn raw(self) -> u32 {
        self.0
    }
}

impl From<VertexId> for Value {
    #[inline]
    fn from(id: VertexId) -> Self {
        Value::from_bits(id.0)
    }
}

/// One adjacency-list node. The weight rides along for callers that want it;
/// no algorithm in this crate consults it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EdgeNode {
    pub(crate) dest: u32,
    pub(crate) weight: f32,
    pub(crate) next: u32,
}

/// A vertex slot: a live vertex with its degree and payload, or a link in the
/// free-slot chain.
#[derive(Clone, Copy, Debug)]
enum VertexSlot {
    Occupied { degree: u32, data: Value },
    Free { next: u32 },
}

/// A fixed-capacity graph with stable vertex ids and pool-backed adjacency
/// lists.
#[derive(Clone, Debug)]
pub struct AdjacencyGraph {
    mode: EdgeMode,
    edge_capacity: u32,
    vertex_count: u32,
    edge_count: u32,
    free_head: u32,
    slots: Box<[VertexSlot]>,
    heads: Box<[u32]>,
    valid_ids: Box<[u32]>,
    id_to_valid_index: Box<[u32]>,
    edges: FixedPool<EdgeNode>,
}

impl AdjacencyGraph {
    fn pool_capacity(edge_capacity: u32, mode: EdgeMode) -> u32 {
        match mode {
            EdgeMode::Directed => edge_capacity,
            // Every logical edge stores both directions.
            EdgeMode::Undirected => edge_capacity * 2,
        }
    }

    /// Exact number of backing bytes [`AdjacencyGraph::new`] will allocate for
    /// the given capacities. Zero capacity in either dimension is
    /// [`Error::InvalidArgument`].
    pub fn footprint(vertex_capacity: u32, edge_capacity: u32, mode: EdgeMode) -> Result<usize> {
        if vertex_capacity == 0
            || edge_capacity == 0
            || (mode == EdgeMode::Undirected && edge_capacity > u32::MAX / 2)
        {
            return Err(Error::InvalidArgument);
        }
        let v = vertex_capacity as usize;
        Ok(v * core::mem::size_of::<VertexSlot>()
            + 3 * v * core::mem::size_of::<u32>()
            + FixedPool::<EdgeNode>::footprint(Self::pool_capacity(edge_capacity, mode))?)
    }

    /// Creates an empty graph with room for `vertex_capacity` vertices and
    /// `edge_capacity` logical edges.
    pub fn new(vertex_capacity: u32, edge_capacity: u32, mode: EdgeMode) -> Result<Self> {
        Self::footprint(vertex_capacity, edge_capacity, mode)?;
        let slots = (0..vertex_capacity)
            .map(|i| {
                let next = if i + 1 < vertex_capacity { i + 1 } else { NIL };
                VertexSlot::Free { next }
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Self {
            mode,
            edge_capacity,
            vertex_count: 0,
            edge_count: 0,
            free_head: 0,
            slots,
            heads: vec![NIL; vertex_capacity as usize].into_boxed_slice(),
            valid_ids: vec![0u32; vertex_capacity as usize].into_boxed_slice(),
            id_to_valid_index: vec![0u32; vertex_capacity as usize].into_boxed_slice(),
            edges: FixedPool::new(Self::pool_capacity(edge_capacity, mode))?,
        })
    }

    /// The edge mode fixed at construction.
    #[inline]
    pub fn mode(&self) -> EdgeMode {
        self.mode
    }

    /// Maximum number of vertices.
    #[inline]
    pub fn vertex_capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Maximum number of logical edges.
    #[inline]
    pub fn edge_capacity(&self) -> u32 {
        self.edge_capacity
    }

    /// Number of live vertices.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of live logical edges (an undirected edge counts once).
    #[inline]
    pub fn edge_count(&self) -> u32 {
        self.edge_count
    }

    /// Returns `true` if `id` names a live vertex.
    #[inline]
    pub fn is_vertex_valid(&self, id: VertexId) -> bool {
        matches!(
            self.slots.get(id.index()),
            Some(VertexSlot::Occupied { .. })
        )
    }

    #[inline]
    fn check_vertex(&self, id: VertexId) -> Result<u32> {
        if self.is_vertex_valid(id) {
            Ok(id.raw())
        } else {
            Err(Error::InvalidArgument)
        }
    }

    /// Adds a vertex carrying `data`, returning its id. Fails with
    /// [`Error::OperationFailed`] at capacity.
    pub fn add_vertex(&mut self, data: Value) -> Result<VertexId> {
        if self.vertex_count == self.vertex_capacity() {
            return Err(Error::OperationFailed);
        }
        let id = self.free_head;
        debug_assert_ne!(id, NIL, "free list empty below capacity");
        match self.slots[id as usize] {
            VertexSlot::Free { next } => self.free_head = next,
            VertexSlot::Occupied { .. } => {
                debug_assert!(false, "free head pointed to live slot");
            }
        }
        self.slots[id as usize] = VertexSlot::Occupied { degree: 0, data };
        self.heads[id as usize] = NIL;
        self.valid_ids[self.vertex_count as usize] = id;
        self.id_to_valid_index[id as usize] = self.vertex_count;
        self.vertex_count += 1;
        Ok(VertexId::new(id))
    }

    /// Removes a vertex and every edge incident to it.
    ///
    /// Undirected removal unlinks the symmetric entry from each neighbor's
    /// list (O(1) expected per edge); directed removal additionally strips
    /// edges pointing at the victim from every other live vertex (O(V + E)).
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<()> {
        let vi = self.check_vertex(id)?;

        match self.mode {
            EdgeMode::Undirected => {
                let mut cursor = self.heads[vi as usize];
                while cursor != NIL {
                    let node = *self.edges.get(cursor).ok_or(Error::OperationFailed)?;
                    let symmetric = self.take_edge(node.dest, vi);
                    debug_assert!(symmetric.is_some(), "undirected edge missing its mirror");
                    if let Some(mirror) = symmetric {
                        self.edges.free(mirror)?;
                    }
                    self.edges.free(cursor)?;
                    self.edge_count -= 1;
                    cursor = node.next;
                }
            }
            EdgeMode::Directed => {
                let mut cursor = self.heads[vi as usize];
                while cursor != NIL {
                    let next = self.edges.get(cursor).ok_or(Error::OperationFailed)?.next;
                    self.edges.free(cursor)?;
                    self.edge_count -= 1;
                    cursor = next;
                }
                // Strip every edge pointing at the victim.
                for i in 0..self.vertex_count as usize {
                    let src = self.valid_ids[i];
                    if src == vi {
                        continue;
                    }
                    if let Some(node) = self.take_edge(src, vi) {
                        self.edges.free(node)?;
                        self.edge_count -= 1;
                    }
                }
            }
        }
        self.heads[vi as usize] = NIL;

        // Swap-with-last removal from the valid-id list, then free the slot.
        let index = self.id_to_valid_index[vi as usize];
        let last = self.vertex_count - 1;
        let moved = self.valid_ids[last as usize];
        self.valid_ids[index as usize] = moved;
        self.id_to_valid_index[moved as usize] = index;
        self.vertex_count = last;

        self.slots[vi as usize] = VertexSlot::Free {
            next: self.free_head,
        };
        self.free_head = vi;
        Ok(())
    }

    /// Finds `dst` in `src`'s adjacency list; unlinks the node and decrements
    /// `src`'s degree, returning the (still allocated) node index.
    fn take_edge(&mut self, src: u32, dst: u32) -> Option<u32> {
        let mut prev = NIL;
        let mut cursor = self.heads[src as usize];
        while cursor != NIL {
            let node = *self.edges.get(cursor)?;
            if node.dest == dst {
                if prev == NIL {
                    self.heads[src as usize] = node.next;
                } else {
                    self.edges.get_mut(prev)?.next = node.next;
                }
                if let VertexSlot::Occupied { degree, .. } = &mut self.slots[src as usize] {
                    *degree -= 1;
                }
                return Some(cursor);
            }
            prev = cursor;
            cursor = node.next;
        }
        None
    }

    /// Pushes a `src → dst` node at the head of `src`'s list and bumps its
    /// degree. The pool must have room (pre-checked by the caller).
    fn push_edge(&mut self, src: u32, dst: u32, weight: f32) -> Result<()> {
        let node = self.edges.alloc(EdgeNode {
            dest: dst,
            weight,
            next: self.heads[src as usize],
        })?;
        self.heads[src as usize] = node;
        if let VertexSlot::Occupied { degree, .. } = &mut self.slots[src as usize] {
            *degree += 1;
        }
        Ok(())
    }

    fn edge_index(&self, src: u32, dst: u32) -> Option<u32> {
        let mut cursor = self.heads[src as usize];
        while cursor != NIL {
            let node = self.edges.get(cursor)?;
            if node.dest == dst {
                return Some(cursor);
            }
            cursor = node.next;
        }
        None
    }

    /// Adds the edge `u → v` (and `v → u` when undirected).
    ///
    /// Re-adding an existing edge succeeds without changing anything.
    /// Self-edges and dead endpoints are [`Error::InvalidArgument`]; edge-pool
    /// exhaustion is [`Error::OperationFailed`]. Undirected insertion
    /// pre-checks room for both directions, so a failed insert never leaves an
    /// asymmetric edge behind.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<()> {
        let ui = self.check_vertex(u)?;
        let vi = self.check_vertex(v)?;
        if ui == vi {
            return Err(Error::InvalidArgument);
        }
        if self.edge_index(ui, vi).is_some() {
            return Ok(());
        }
        let needed = match self.mode {
            EdgeMode::Directed => 1,
            EdgeMode::Undirected => 2,
        };
        if self.edges.available() < needed {
            return Err(Error::OperationFailed);
        }
        self.push_edge(ui, vi, 1.0)?;
        if self.mode == EdgeMode::Undirected {
            debug_assert!(self.edge_index(vi, ui).is_none());
            self.push_edge(vi, ui, 1.0)?;
        }
        self.edge_count += 1;
        Ok(())
    }

    /// Removes the edge `u → v` (and `v → u` when undirected). A missing edge
    /// is [`Error::OperationFailed`].
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<()> {
        let ui = self.check_vertex(u)?;
        let vi = self.check_vertex(v)?;
        let forward = self.take_edge(ui, vi).ok_or(Error::OperationFailed)?;
        self.edges.free(forward)?;
        if self.mode == EdgeMode::Undirected {
            let mirror = self.take_edge(vi, ui);
            debug_assert!(mirror.is_some(), "undirected edge missing its mirror");
            if let Some(node) = mirror {
                self.edges.free(node)?;
            }
        }
        self.edge_count -= 1;
        Ok(())
    }

    /// Outgoing degree of a live vertex.
    pub fn degree(&self, id: VertexId) -> Result<u32> {
        self.check_vertex(id)?;
        match self.slots[id.index()] {
            VertexSlot::Occupied { degree, .. } => Ok(degree),
            VertexSlot::Free { .. } => Err(Error::InvalidArgument),
        }
    }

    /// The payload stored with a live vertex.
    pub fn vertex_data(&self, id: VertexId) -> Result<Value> {
        self.check_vertex(id)?;
        match self.slots[id.index()] {
            VertexSlot::Occupied { data, .. } => Ok(data),
            VertexSlot::Free { .. } => Err(Error::InvalidArgument),
        }
    }

    /// Replaces the payload stored with a live vertex.
    pub fn set_vertex_data(&mut self, id: VertexId, value: Value) -> Result<()> {
        self.check_vertex(id)?;
        match &mut self.slots[id.index()] {
            VertexSlot::Occupied { data, .. } => {
                *data = value;
                Ok(())
            }
            VertexSlot::Free { .. } => Err(Error::InvalidArgument),
        }
    }

    /// The weight stored on edge `u → v`. A missing edge is
    /// [`Error::OperationFailed`].
    pub fn edge_weight(&self, u: VertexId, v: VertexId) -> Result<f32> {
        let ui = self.check_vertex(u)?;
        let vi = self.check_vertex(v)?;
        let index = self.edge_index(ui, vi).ok_or(Error::OperationFailed)?;
        Ok(self.edges.get(index).ok_or(Error::OperationFailed)?.weight)
    }

    /// Iterates `id`'s outgoing destinations in adjacency-list order.
    pub fn neighbors(&self, id: VertexId) -> Result<Neighbors<'_>> {
        self.check_vertex(id)?;
        Ok(Neighbors {
            graph: self,
            cursor: self.heads[id.index()],
        })
    }

    /// Iterates every live vertex id in valid-id-list order (insertion order
    /// disturbed only by swap-with-last removals).
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.valid_ids[..self.vertex_count as usize]
            .iter()
            .map(|&id| VertexId::new(id))
    }

    /// Head of `slot`'s adjacency list (`NIL` when empty or dead). Traversal
    /// cursors snapshot these.
    #[inline]
    pub(crate) fn adjacency_head(&self, slot: u32) -> u32 {
        self.heads[slot as usize]
    }

    /// The adjacency node at `index`, or `None` for `NIL`/freed indices.
    #[inline]
    pub(crate) fn edge_node(&self, index: u32) -> Option<&EdgeNode> {
        self.edges.get(index)
    }

    /// Audits the full structure: adjacency destinations live and duplicate
    /// free, list lengths equal to recorded degrees, node totals matching the
    /// logical edge count, the free list covering exactly the dead slots, and
    /// the valid-id list agreeing with its reverse map. Any inconsistency is
    /// [`Error::OperationFailed`].
    pub fn validate(&self) -> Result<()> {
        let ok = self.validate_inner();
        #[cfg(feature = "tracing")]
        if ok.is_err() {
            tracing::debug!("graph validation failed");
        }
        ok
    }

    fn validate_inner(&self) -> Result<()> {
        let capacity = self.vertex_capacity();
        let live_slots = (0..capacity)
            .filter(|&i| matches!(self.slots[i as usize], VertexSlot::Occupied { .. }))
            .count() as u32;
        if live_slots != self.vertex_count {
            return Err(Error::OperationFailed);
        }

        // valid_ids and the reverse map must agree on the live prefix.
        for i in 0..self.vertex_count {
            let id = self.valid_ids[i as usize];
            if id >= capacity
                || !matches!(self.slots[id as usize], VertexSlot::Occupied { .. })
                || self.id_to_valid_index[id as usize] != i
            {
                return Err(Error::OperationFailed);
            }
        }

        // Adjacency lists: destinations live, no self-edges or duplicates,
        // lengths equal to recorded degrees; undirected lists mirrored.
        let mut total_nodes = 0u32;
        for i in 0..self.vertex_count {
            let src = self.valid_ids[i as usize];
            let degree = match self.slots[src as usize] {
                VertexSlot::Occupied { degree, .. } => degree,
                VertexSlot::Free { .. } => return Err(Error::OperationFailed),
            };
            let mut seen = Vec::with_capacity(degree as usize);
            let mut length = 0u32;
            let mut cursor = self.heads[src as usize];
            while cursor != NIL {
                let node = self.edges.get(cursor).ok_or(Error::OperationFailed)?;
                if node.dest == src
                    || node.dest >= capacity
                    || !matches!(self.slots[node.dest as usize], VertexSlot::Occupied { .. })
                    || seen.contains(&node.dest)
                {
                    return Err(Error::OperationFailed);
                }
                if self.mode == EdgeMode::Undirected && self.edge_index(node.dest, src).is_none() {
                    return Err(Error::OperationFailed);
                }
                seen.push(node.dest);
                length += 1;
                if length > self.edges.capacity() {
                    return Err(Error::OperationFailed); // cyclic list
                }
                cursor = node.next;
            }
            if length != degree {
                return Err(Error::OperationFailed);
            }
            total_nodes += length;
        }
        let per_edge = match self.mode {
            EdgeMode::Directed => 1,
            EdgeMode::Undirected => 2,
        };
        if total_nodes != self.edge_count * per_edge || total_nodes != self.edges.len() {
            return Err(Error::OperationFailed);
        }

        // The vertex free list must reach exactly the dead slots.
        let mut free_len = 0u32;
        let mut cursor = self.free_head;
        while cursor != NIL {
            if free_len > capacity
                || cursor >= capacity
                || matches!(self.slots[cursor as usize], VertexSlot::Occupied { .. })
            {
                return Err(Error::OperationFailed);
            }
            match self.slots[cursor as usize] {
                VertexSlot::Free { next } => cursor = next,
                VertexSlot::Occupied { .. } => unreachable!(),
            }
            free_len += 1;
        }
        if free_len != capacity - self.vertex_count {
            return Err(Error::OperationFailed);
        }

        // The edge pool's own free list must account for every dead node.
        match self.edges.free_list_len() {
            Some(len) if len == self.edges.available() => Ok(()),
            _ => Err(Error::OperationFailed),
        }
    }
}

/// Iterator over one vertex's outgoing destinations in list order.
pub struct Neighbors<'a> {
    graph: &'a AdjacencyGraph,
    cursor: u32,
}

impl Iterator for Neighbors<'_> {
    type Item = VertexId;

    #[inline]
    fn next(&mut self) -> Option<VertexId> {
        // NIL is out of pool range, so the lookup ends the walk.
        let node = self.graph.edges.get(self.cursor)?;
        self.cursor = node.next;
        Some(VertexId::new(node.dest))
    }
}

impl core::iter::FusedIterator for Neighbors<'_> {}
