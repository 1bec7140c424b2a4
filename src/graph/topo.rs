//! Topological ordering of a directed acyclic graph.
//!
//! Reverse post-order over a DFS forest: every live vertex is visited, and
//! each is written into the output from the back as it finishes, so edges
//! always point from earlier to later output positions.

use crate::error::{Error, Result};
use crate::graph::adjacency::{AdjacencyGraph, EdgeMode, VertexId};
use crate::graph::dfs::{Dfs, DfsVisitor, EdgeKind};

/// Writes finished vertices back-to-front and watches for back edges.
struct TopoVisitor<'a> {
    out: &'a mut [VertexId],
    next_free: usize,
    cycle: bool,
}

impl DfsVisitor for TopoVisitor<'_> {
    fn edge(&mut self, v0: VertexId, v1: VertexId, dfs: &Dfs) {
        if dfs.classify_edge(v0, v1) == Some(EdgeKind::Back) {
            self.cycle = true;
        }
    }

    fn vertex_late(&mut self, v: VertexId, _dfs: &Dfs) {
        self.next_free -= 1;
        self.out[self.next_free] = v;
    }
}

/// Computes a topological order of `graph`'s live vertices into `out`,
/// returning how many ids were written.
///
/// `dfs` is reset and then driven over every live vertex; callers may reuse
/// one state across sorts. An undirected graph or an `out` slice shorter than
/// the live vertex count is [`Error::InvalidArgument`]. A cycle is
/// [`Error::OperationFailed`]; the traversal still runs to completion but
/// `out`'s contents are then unspecified.
pub fn topological_sort(
    graph: &AdjacencyGraph,
    dfs: &mut Dfs,
    out: &mut [VertexId],
) -> Result<usize> {
    if graph.mode() == EdgeMode::Undirected {
        return Err(Error::InvalidArgument);
    }
    let count = graph.vertex_count() as usize;
    if out.len() < count {
        return Err(Error::InvalidArgument);
    }
    dfs.reset(graph)?;

    let mut visitor = TopoVisitor {
        out,
        next_free: count,
        cycle: false,
    };
    for root in graph.vertices() {
        if !dfs.processed(root) {
            dfs.run(graph, root, &mut visitor)?;
        }
    }
    debug_assert_eq!(visitor.next_free, 0);
    if visitor.cycle {
        return Err(Error::OperationFailed);
    }
    Ok(count)
}
