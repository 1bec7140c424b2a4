//! # `ballast` - Fixed-Capacity Data Structure Toolkit
//!
//! Bounded containers and graph algorithms with exact, queryable memory
//! footprints. Every structure sizes its backing storage once at construction
//! and never allocates again, so memory use is fully predictable and failure
//! is an error value, never an OOM surprise mid-operation.
//!
//! ## Key Features
//!
//! - **Footprint contract**: every type pairs `footprint(params)` with
//!   `new(params)`; the former is the exact byte count the latter allocates
//! - **Index-based internals**: 32-bit slot indices instead of pointers, so
//!   structures relocate freely and link fields stay compact
//! - **Uniform element type**: a 4-byte untagged [`Value`] payload, as in a C
//!   union, carrying ints, floats, or raw handles
//! - **Composable traversals**: BFS/DFS states own their scratch containers
//!   and expose parents, flags, and timestamps through visitor hooks
//!
//! ## Example
//!
//! ```rust
//! use ballast::{AdjacencyGraph, Bfs, EdgeMode, Value};
//!
//! let mut graph = AdjacencyGraph::new(8, 8, EdgeMode::Undirected).unwrap();
//! let a = graph.add_vertex(Value::from_int(1)).unwrap();
//! let b = graph.add_vertex(Value::from_int(2)).unwrap();
//! graph.add_edge(a, b).unwrap();
//!
//! let mut bfs = Bfs::new(&graph).unwrap();
//! bfs.run(&graph, a, &mut ()).unwrap();
//! assert_eq!(bfs.parent(b), Some(a));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod alloc;
pub mod collections;
pub mod error;
pub mod graph;
pub mod value;

pub use alloc::FixedPool;
pub use collections::{FixedBitSet, FixedHeap, FixedQueue, FixedStack};
pub use error::{Error, Result};
pub use graph::{
    topological_sort, AdjacencyGraph, Bfs, BfsVisitor, Dfs, DfsVisitor, EdgeKind, EdgeMode,
    Neighbors, VertexId,
};
pub use value::Value;

// Compile-time assertions for the layout the footprint contract relies on.
const _: () = {
    use core::mem;

    // The universal element is a bare 4-byte payload.
    assert!(mem::size_of::<Value>() == 4);
    assert!(mem::align_of::<Value>() == 4);

    // Vertex ids are thin u32 wrappers.
    assert!(mem::size_of::<VertexId>() == 4);

    // Error values stay register-sized. The Result bound is intentionally
    // loose to avoid depending on niche-layout details.
    assert!(mem::size_of::<Error>() == 1);
    assert!(mem::size_of::<Result<()>>() <= 2);
};
