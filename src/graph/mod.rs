//! Graph storage and traversals over fixed capacities.

pub mod adjacency;
pub mod bfs;
pub mod dfs;
pub mod topo;

pub use adjacency::{AdjacencyGraph, EdgeMode, Neighbors, VertexId};
pub use bfs::{Bfs, BfsVisitor};
pub use dfs::{Dfs, DfsVisitor, EdgeKind};
pub use topo::topological_sort;
