//! Reusable encode buffers.
//!
//! Marshal allocates a scratch buffer per call; the pool keeps those
//! allocations alive between calls so steady-state marshaling stops hitting
//! the allocator. Buffers hand their capacity back on drop, including when
//! the marshal that borrowed them failed.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

/// Buffers retained beyond this count are dropped instead of pooled.
const MAX_POOLED: usize = 32;

/// A pool of reusable byte buffers.
#[derive(Debug, Default)]
pub struct BufferPool {
    buffers: Mutex<Vec<Vec<u8>>>,
}

impl BufferPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a cleared buffer from the pool, or allocates a fresh one.
    ///
    /// The buffer returns to the pool when the guard drops.
    pub fn acquire(&self) -> PooledBuf<'_> {
        let buf = self.lock().pop().unwrap_or_default();
        PooledBuf { pool: self, buf }
    }

    /// Number of buffers currently idle in the pool.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.lock().len()
    }

    fn release(&self, mut buf: Vec<u8>) {
        let mut buffers = self.lock();
        if buffers.len() < MAX_POOLED {
            buf.clear();
            buffers.push(buf);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        // A poisoned pool only means another marshal panicked; its buffers
        // are still valid.
        self.buffers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// RAII guard around a pooled buffer.
#[derive(Debug)]
pub struct PooledBuf<'a> {
    pool: &'a BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuf<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuf<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuf<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}
