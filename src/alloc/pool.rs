//! `FixedPool` — a fixed-capacity slot allocator with an intrusive free list.
//!
//! Provides O(1) allocation and deallocation of homogeneous slots from storage
//! sized once at construction. Useful for linked data structures (adjacency
//! lists, free-form node graphs) where nodes come and go individually but share
//! one backing store.
//!
//! Allocations hand out `u32` slot indices rather than pointers, so a pool (and
//! anything holding its indices) can be moved wholesale without fixups.
//!
//! # Performance
//! - `alloc`: O(1) (pop free-list head)
//! - `free`: O(1) (push free-list head; freed slots are reused LIFO)
//! - `get`/`get_mut`: O(1)

use crate::error::{Error, Result};

/// Sentinel index terminating intrusive free lists.
pub(crate) const NIL: u32 = u32::MAX;

/// A slot in the pool: either a live value or a link to the next free slot.
#[derive(Clone, Debug)]
enum Slot<T> {
    Occupied(T),
    Free(u32),
}

/// A fixed-capacity pool allocator.
///
/// Capacity is chosen at construction and never changes; `alloc` fails with
/// [`Error::OperationFailed`] once every slot is live.
#[derive(Clone, Debug)]
pub struct FixedPool<T> {
    slots: Box<[Slot<T>]>,
    free_head: u32,
    len: u32,
}

impl<T> FixedPool<T> {
    /// Exact number of backing bytes [`FixedPool::new`] will allocate for
    /// `capacity` slots. Deterministic; `capacity` of zero is
    /// [`Error::InvalidArgument`].
    pub fn footprint(capacity: u32) -> Result<usize> {
        if capacity == 0 {
            return Err(Error::InvalidArgument);
        }
        Ok(capacity as usize * core::mem::size_of::<Slot<T>>())
    }

    /// Creates a pool with every slot free, chained in index order so the
    /// first allocations come out as 0, 1, 2, ...
    pub fn new(capacity: u32) -> Result<Self> {
        Self::footprint(capacity)?;
        let slots = (0..capacity)
            .map(|i| {
                let next = if i + 1 < capacity { i + 1 } else { NIL };
                Slot::Free(next)
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Self {
            slots,
            free_head: 0,
            len: 0,
        })
    }

    /// Allocates a slot for `value`, returning its index.
    ///
    /// Fails with [`Error::OperationFailed`] when the pool is exhausted.
    #[inline]
    pub fn alloc(&mut self, value: T) -> Result<u32> {
        let index = self.free_head;
        if index == NIL {
            #[cfg(feature = "tracing")]
            tracing::trace!(capacity = self.capacity(), "pool exhausted");
            return Err(Error::OperationFailed);
        }
        match self.slots[index as usize] {
            Slot::Free(next) => self.free_head = next,
            Slot::Occupied(_) => debug_assert!(false, "free head pointed to occupied slot"),
        }
        self.slots[index as usize] = Slot::Occupied(value);
        self.len += 1;
        Ok(index)
    }

    /// Frees the slot at `index`, returning the value it held.
    ///
    /// The freed slot becomes the next one `alloc` hands out. Fails with
    /// [`Error::InvalidArgument`] if `index` is out of range or the slot is not
    /// live (double free).
    #[inline]
    pub fn free(&mut self, index: u32) -> Result<T> {
        let slot = self
            .slots
            .get_mut(index as usize)
            .ok_or(Error::InvalidArgument)?;
        if matches!(slot, Slot::Free(_)) {
            return Err(Error::InvalidArgument);
        }
        let old = core::mem::replace(slot, Slot::Free(self.free_head));
        self.free_head = index;
        self.len -= 1;
        match old {
            Slot::Occupied(value) => Ok(value),
            Slot::Free(_) => unreachable!(),
        }
    }

    /// Returns a shared reference to the value at `index`, or `None` if the
    /// slot is free or out of range.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&T> {
        match self.slots.get(index as usize) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value at `index`, or `None` if the
    /// slot is free or out of range.
    #[inline]
    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        match self.slots.get_mut(index as usize) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Number of live slots.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Returns `true` if no slot is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots still available to `alloc`.
    #[inline]
    pub fn available(&self) -> u32 {
        self.capacity() - self.len
    }

    /// Size of one element's payload type in bytes.
    #[inline]
    pub fn element_size(&self) -> usize {
        core::mem::size_of::<T>()
    }

    /// Walks the free list, returning its length, or `None` if it is cyclic,
    /// escapes the pool, or passes through a live slot.
    pub(crate) fn free_list_len(&self) -> Option<u32> {
        let mut count = 0u32;
        let mut cursor = self.free_head;
        while cursor != NIL {
            if count > self.capacity() {
                return None; // cycle
            }
            match self.slots.get(cursor as usize) {
                Some(Slot::Free(next)) => cursor = *next,
                _ => return None,
            }
            count += 1;
        }
        Some(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_is_deterministic() {
        assert_eq!(
            FixedPool::<u64>::footprint(16).unwrap(),
            FixedPool::<u64>::footprint(16).unwrap()
        );
        assert_eq!(FixedPool::<u64>::footprint(0), Err(Error::InvalidArgument));
    }

    #[test]
    fn alloc_in_index_order_when_fresh() {
        let mut pool = FixedPool::new(3).unwrap();
        assert_eq!(pool.alloc('a').unwrap(), 0);
        assert_eq!(pool.alloc('b').unwrap(), 1);
        assert_eq!(pool.alloc('c').unwrap(), 2);
        assert_eq!(pool.alloc('d'), Err(Error::OperationFailed));
    }

    #[test]
    fn freed_slots_reused_lifo() {
        let mut pool = FixedPool::new(3).unwrap();
        let a = pool.alloc('a').unwrap();
        let b = pool.alloc('b').unwrap();
        let c = pool.alloc('c').unwrap();
        assert_eq!(pool.free(b).unwrap(), 'b');
        assert_eq!(pool.alloc('B').unwrap(), b);
        pool.free(c).unwrap();
        pool.free(a).unwrap();
        assert_eq!(pool.alloc('A').unwrap(), a);
        assert_eq!(pool.alloc('C').unwrap(), c);
    }

    #[test]
    fn double_free_detected() {
        let mut pool = FixedPool::new(2).unwrap();
        let a = pool.alloc(1).unwrap();
        pool.free(a).unwrap();
        assert_eq!(pool.free(a), Err(Error::InvalidArgument));
        assert_eq!(pool.free(99), Err(Error::InvalidArgument));
    }

    #[test]
    fn counters_track_liveness() {
        let mut pool = FixedPool::new(4).unwrap();
        assert!(pool.is_empty());
        assert_eq!(pool.available(), 4);
        let a = pool.alloc(()).unwrap();
        pool.alloc(()).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.available(), 2);
        pool.free(a).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.free_list_len(), Some(3));
    }

    #[test]
    fn get_distinguishes_live_and_free() {
        let mut pool = FixedPool::new(2).unwrap();
        let a = pool.alloc(10).unwrap();
        assert_eq!(pool.get(a), Some(&10));
        *pool.get_mut(a).unwrap() = 11;
        assert_eq!(pool.get(a), Some(&11));
        pool.free(a).unwrap();
        assert_eq!(pool.get(a), None);
        assert_eq!(pool.get(7), None);
    }
}
