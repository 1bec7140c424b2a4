//! `FixedQueue` — a bounded FIFO queue over a ring buffer.
//!
//! The ring holds `capacity + 1` slots; one sentinel slot is always empty so
//! that `head == tail` unambiguously means empty and
//! `head == (tail + 1) % node_count` unambiguously means full.

use crate::error::{Error, Result};
use crate::value::Value;

/// A bounded first-in-first-out queue of [`Value`]s.
#[derive(Clone, Debug)]
pub struct FixedQueue {
    nodes: Box<[Value]>,
    head: u32,
    tail: u32,
}

impl FixedQueue {
    /// Exact number of backing bytes [`FixedQueue::new`] will allocate for
    /// `capacity` elements (one extra sentinel slot included). `capacity` of
    /// zero is [`Error::InvalidArgument`].
    pub fn footprint(capacity: u32) -> Result<usize> {
        if capacity == 0 {
            return Err(Error::InvalidArgument);
        }
        Ok((capacity as usize + 1) * core::mem::size_of::<Value>())
    }

    /// Creates an empty queue holding at most `capacity` elements.
    pub fn new(capacity: u32) -> Result<Self> {
        Self::footprint(capacity)?;
        Ok(Self {
            nodes: vec![Value::default(); capacity as usize + 1].into_boxed_slice(),
            head: 0,
            tail: 0,
        })
    }

    #[inline]
    fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Inserts an element at the tail. Fails with [`Error::OperationFailed`]
    /// when full.
    #[inline]
    pub fn insert(&mut self, elem: Value) -> Result<()> {
        if self.is_full() {
            return Err(Error::OperationFailed);
        }
        self.nodes[self.tail as usize] = elem;
        self.tail = (self.tail + 1) % self.node_count();
        Ok(())
    }

    /// Removes the element at the head. Fails with [`Error::OperationFailed`]
    /// when empty.
    #[inline]
    pub fn remove(&mut self) -> Result<Value> {
        if self.is_empty() {
            return Err(Error::OperationFailed);
        }
        let elem = self.nodes[self.head as usize];
        self.head = (self.head + 1) % self.node_count();
        Ok(elem)
    }

    /// Maximum number of elements the queue can hold.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.node_count() - 1
    }

    /// Number of elements currently stored.
    #[inline]
    pub fn len(&self) -> u32 {
        (self.tail + self.node_count() - self.head) % self.node_count()
    }

    /// Returns `true` if the queue holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns `true` if the queue is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.head == (self.tail + 1) % self.node_count()
    }

    /// Drops every element.
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
    }
}
