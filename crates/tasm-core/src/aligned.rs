//! 16-byte aligned growable byte storage.
//!
//! Stack elements must sit at addresses aligned to their own alignment. Standard
//! `Vec<u8>` provides no alignment guarantees for `u8`, so the bytes live in a
//! `Vec` of aligned blocks instead.

use std::collections::TryReserveError;

/// Largest element alignment the buffer can honour.
pub const MAX_ALIGN: usize = 16;

#[repr(C, align(16))]
#[derive(Clone, Copy)]
struct Block([u8; MAX_ALIGN]);

const ZERO_BLOCK: Block = Block([0; MAX_ALIGN]);

/// Growable byte storage whose first byte is 16-byte aligned.
///
/// Invariant: `len <= blocks.len() * MAX_ALIGN`.
#[derive(Default)]
pub struct AlignedBuf {
    blocks: Vec<Block>,
    len: usize,
}

impl AlignedBuf {
    pub const fn new() -> Self {
        Self {
            blocks: Vec::new(),
            len: 0,
        }
    }

    /// Resize to exactly `len` bytes. Newly exposed bytes are zero.
    ///
    /// Shrinking releases whole blocks back to the allocator.
    pub fn try_resize(&mut self, len: usize) -> Result<(), TryReserveError> {
        let num_blocks = len.div_ceil(MAX_ALIGN);
        if num_blocks > self.blocks.len() {
            self.blocks
                .try_reserve_exact(num_blocks - self.blocks.len())?;
            self.blocks.resize(num_blocks, ZERO_BLOCK);
        } else {
            self.blocks.truncate(num_blocks);
            self.blocks.shrink_to_fit();
        }

        let old_len = self.len.min(len);
        self.len = len;
        // Bytes past the old length may hold stale data from a previous shrink.
        self.as_mut_slice()[old_len..].fill(0);
        Ok(())
    }

    /// Drop all storage.
    pub fn release(&mut self) {
        self.blocks = Vec::new();
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True while a backing allocation exists.
    pub fn is_allocated(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Address of the first byte, used for alignment checks.
    pub fn addr(&self) -> usize {
        self.blocks.as_ptr() as usize
    }

    pub fn as_slice(&self) -> &[u8] {
        if self.blocks.is_empty() {
            return &[];
        }
        // SAFETY: Block is repr(C) with only [u8; 16], so the pointer cast is valid,
        // and `len` never exceeds the bytes owned by `blocks`.
        unsafe { std::slice::from_raw_parts(self.blocks.as_ptr() as *const u8, self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        if self.blocks.is_empty() {
            return &mut [];
        }
        // SAFETY: as in `as_slice`; the exclusive borrow of `self` covers the blocks.
        unsafe { std::slice::from_raw_parts_mut(self.blocks.as_mut_ptr() as *mut u8, self.len) }
    }
}

impl std::fmt::Debug for AlignedBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuf")
            .field("len", &self.len)
            .field("aligned", &self.addr().is_multiple_of(MAX_ALIGN))
            .finish()
    }
}

#[cfg(test)]
#[path = "aligned_tests.rs"]
mod aligned_tests;
