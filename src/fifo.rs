//! Linked-list FIFO built on a fixed node pool.
//!
//! Nodes are linked by index through a `next` array: one chain holds the
//! queued values from head to tail, the other chain is the free list.
//! `put` and `get` are each O(1) with no data movement.

use ufmt::derive::uDebug;

/// Index sentinel for "no node"
const NONE: u16 = u16::MAX;

/// FIFO errors
#[derive(Debug, uDebug, PartialEq, Eq)]
pub enum FifoError {
    /// The node pool is exhausted; the rejected value was not queued and
    /// existing entries are untouched
    Full,
}

/// A FIFO of up to `N` values of `T`
pub struct ListFifo<T: Copy + Default, const N: usize> {
    values: [T; N],
    next: [u16; N],
    head: u16,
    tail: u16,
    free: u16,
    len: usize,
}

impl<T: Copy + Default, const N: usize> ListFifo<T, N> {
    /// Build an empty FIFO with all nodes on the free list
    pub fn new() -> ListFifo<T, N> {
        let mut next = [NONE; N];
        let mut i = 0;
        while i < N {
            next[i] = if i + 1 < N { (i + 1) as u16 } else { NONE };
            i += 1;
        }
        ListFifo {
            values: [T::default(); N],
            next,
            head: NONE,
            tail: NONE,
            free: if N == 0 { NONE } else { 0 },
            len: 0,
        }
    }

    /// Append a value at the tail
    pub fn put(&mut self, value: T) -> Result<(), FifoError> {
        if self.free == NONE {
            return Err(FifoError::Full);
        }
        let idx = self.free as usize;
        self.free = self.next[idx];

        self.values[idx] = value;
        self.next[idx] = NONE;

        if self.tail == NONE {
            self.head = idx as u16;
        } else {
            self.next[self.tail as usize] = idx as u16;
        }
        self.tail = idx as u16;
        self.len += 1;
        Ok(())
    }

    /// Remove and return the value at the head, oldest first
    pub fn get(&mut self) -> Option<T> {
        if self.head == NONE {
            return None;
        }
        let idx = self.head as usize;
        let value = self.values[idx];

        self.head = self.next[idx];
        if self.head == NONE {
            self.tail = NONE;
        }

        // Recycle the node
        self.next[idx] = self.free;
        self.free = idx as u16;
        self.len -= 1;
        Some(value)
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of queued values
    pub fn capacity(&self) -> usize {
        N
    }
}

impl<T: Copy + Default, const N: usize> Default for ListFifo<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_in_fifo_order() {
        let mut fifo: ListFifo<u8, 4> = ListFifo::new();
        for v in [10, 20, 30] {
            fifo.put(v).unwrap();
        }
        assert_eq!(fifo.len(), 3);
        assert_eq!(fifo.get(), Some(10));
        assert_eq!(fifo.get(), Some(20));
        assert_eq!(fifo.get(), Some(30));
        assert_eq!(fifo.get(), None);
        assert!(fifo.is_empty());
    }

    #[test]
    fn full_put_fails_without_corrupting_entries() {
        let mut fifo: ListFifo<u8, 2> = ListFifo::new();
        fifo.put(1).unwrap();
        fifo.put(2).unwrap();
        assert_eq!(fifo.put(3), Err(FifoError::Full));
        assert_eq!(fifo.get(), Some(1));
        assert_eq!(fifo.get(), Some(2));
        assert_eq!(fifo.get(), None);
    }

    #[test]
    fn interleaved_put_get_recycles_nodes() {
        let mut fifo: ListFifo<u32, 2> = ListFifo::new();
        for round in 0..10 {
            fifo.put(round).unwrap();
            fifo.put(round + 100).unwrap();
            assert_eq!(fifo.get(), Some(round));
            fifo.put(round + 200).unwrap();
            assert_eq!(fifo.get(), Some(round + 100));
            assert_eq!(fifo.get(), Some(round + 200));
        }
    }
}
