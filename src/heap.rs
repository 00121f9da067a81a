//! Fixed-block heap: an array of equal-size word blocks with the free list
//! threaded through the first word of each free block.
//!
//! Allocation and release are both O(1) pointer swaps at the head of the
//! free list. There is no runtime double-free detection; instead the
//! [`BlockHandle`] is an affine token, so releasing the same block twice
//! does not compile.

/// End-of-free-list sentinel stored in the first word of the last free block
const FREE_END: u32 = u32::MAX;

/// Proof of ownership of one allocated block.
///
/// Not `Copy` or `Clone`: `release` consumes it, and `block_mut` borrows
/// it, so a handle can never name a block that is back on the free list.
#[derive(Debug, PartialEq, Eq)]
pub struct BlockHandle(u16);

impl BlockHandle {
    /// Index of the block this handle owns
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A pool of `NBLOCKS` blocks of `BLOCKWORDS` 32-bit words each.
///
/// `BLOCKWORDS` must be at least 1 because the first word of each free
/// block stores the free-list link.
pub struct BlockHeap<const NBLOCKS: usize, const BLOCKWORDS: usize> {
    blocks: [[u32; BLOCKWORDS]; NBLOCKS],
    free_head: u32,
    free_count: usize,
}

impl<const NBLOCKS: usize, const BLOCKWORDS: usize> BlockHeap<NBLOCKS, BLOCKWORDS> {
    /// Build a heap with every block on the free list, linked in order.
    pub const fn new() -> BlockHeap<NBLOCKS, BLOCKWORDS> {
        let mut blocks = [[0_u32; BLOCKWORDS]; NBLOCKS];
        let mut i = 0;
        while i < NBLOCKS {
            blocks[i][0] = if i + 1 < NBLOCKS {
                (i as u32) + 1
            } else {
                FREE_END
            };
            i += 1;
        }
        BlockHeap {
            blocks,
            free_head: if NBLOCKS == 0 { FREE_END } else { 0 },
            free_count: NBLOCKS,
        }
    }

    /// Pop a block off the free list.
    ///
    /// Returns `None` when the pool is exhausted. Block contents are
    /// unspecified on allocation; the caller writes before reading.
    pub fn allocate(&mut self) -> Option<BlockHandle> {
        if self.free_head == FREE_END {
            return None;
        }
        let idx = self.free_head;
        self.free_head = self.blocks[idx as usize][0];
        self.free_count -= 1;
        Some(BlockHandle(idx as u16))
    }

    /// Push a block back onto the head of the free list, consuming its handle.
    ///
    /// Handles are not tagged with the pool that issued them. One from a
    /// larger pool names no block here and is dropped without touching the
    /// free list; its block stays live in its own pool.
    pub fn release(&mut self, block: BlockHandle) {
        let idx = block.0 as usize;
        if idx >= NBLOCKS {
            return;
        }
        self.blocks[idx][0] = self.free_head;
        self.free_head = idx as u32;
        self.free_count += 1;
    }

    /// Shared access to an allocated block
    pub fn block(&self, handle: &BlockHandle) -> &[u32; BLOCKWORDS] {
        &self.blocks[handle.0 as usize]
    }

    /// Exclusive access to an allocated block
    pub fn block_mut(&mut self, handle: &BlockHandle) -> &mut [u32; BLOCKWORDS] {
        &mut self.blocks[handle.0 as usize]
    }

    /// Number of blocks currently on the free list
    pub fn free_blocks(&self) -> usize {
        self.free_count
    }

    /// Total number of blocks in the pool
    pub fn capacity(&self) -> usize {
        NBLOCKS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausts_after_n_distinct_allocations() {
        let mut heap: BlockHeap<4, 8> = BlockHeap::new();
        let mut seen = [false; 4];
        for _ in 0..4 {
            let h = heap.allocate().unwrap();
            assert!(!seen[h.index()], "block handed out twice");
            seen[h.index()] = true;
        }
        assert_eq!(heap.free_blocks(), 0);
        assert!(heap.allocate().is_none());
    }

    #[test]
    fn released_block_is_allocatable_again() {
        let mut heap: BlockHeap<2, 4> = BlockHeap::new();
        let a = heap.allocate().unwrap();
        let _b = heap.allocate().unwrap();
        assert!(heap.allocate().is_none());

        let idx = a.index();
        heap.release(a);
        assert_eq!(heap.free_blocks(), 1);

        // Release is insert-at-head, so the same block comes back first
        let c = heap.allocate().unwrap();
        assert_eq!(c.index(), idx);
    }

    #[test]
    fn ignores_handle_from_a_larger_pool() {
        let mut big: BlockHeap<4, 4> = BlockHeap::new();
        let mut small: BlockHeap<2, 4> = BlockHeap::new();

        // Walk the big pool until it hands out an index beyond the small pool
        let mut foreign = None;
        while let Some(h) = big.allocate() {
            if h.index() >= small.capacity() {
                foreign = Some(h);
                break;
            }
        }
        let foreign = foreign.unwrap();

        small.release(foreign);
        assert_eq!(small.free_blocks(), 2);
        // The small pool's own blocks still cycle normally
        let a = small.allocate().unwrap();
        let b = small.allocate().unwrap();
        assert!(small.allocate().is_none());
        small.release(a);
        small.release(b);
        assert_eq!(small.free_blocks(), 2);
    }

    #[test]
    fn block_data_survives_other_allocations() {
        let mut heap: BlockHeap<3, 4> = BlockHeap::new();
        let a = heap.allocate().unwrap();
        heap.block_mut(&a).copy_from_slice(&[1, 2, 3, 4]);

        let b = heap.allocate().unwrap();
        heap.block_mut(&b).copy_from_slice(&[9, 9, 9, 9]);
        heap.release(b);
        let _c = heap.allocate().unwrap();

        assert_eq!(heap.block(&a), &[1, 2, 3, 4]);
    }
}
