//! Bounded containers with exact, queryable footprints.

pub mod bit_set;
pub mod heap;
pub mod queue;
pub mod stack;

pub use bit_set::FixedBitSet;
pub use heap::FixedHeap;
pub use queue::FixedQueue;
pub use stack::FixedStack;
