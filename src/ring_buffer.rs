//! RingBuffer: growable circular byte buffer.
//!
//! Reads and writes wrap at most once around the end of the backing
//! storage. A write that does not fit replaces the storage with a larger
//! one (at least 1.5x, or `available + len + 1024` when 1.5x is not
//! enough), moving the unread bytes to offset 0. Capacity never shrinks.

use std::io;

pub const DEFAULT_CAPACITY: usize = 1024;

/// Extra room added when 1.5x growth cannot hold a write.
const GROWTH_SLACK: usize = 1024;

#[derive(Debug, Clone)]
pub struct RingBuffer {
    buffer: Vec<u8>,
    read_pos: usize,
    write_pos: usize,
    available: usize,
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RingBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity],
            read_pos: 0,
            write_pos: 0,
            available: 0,
        }
    }

    /// Unread bytes currently buffered.
    pub fn available(&self) -> usize {
        self.available
    }
    pub fn is_empty(&self) -> bool {
        self.available == 0
    }
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Drop all buffered bytes; capacity is kept.
    pub fn clear(&mut self) {
        self.read_pos = 0;
        self.write_pos = 0;
        self.available = 0;
    }

    /// Copy up to `dest.len()` unread bytes into `dest` and consume them.
    pub fn read(&mut self, dest: &mut [u8]) -> usize {
        let len = dest.len().min(self.available);
        if len == 0 {
            return 0;
        }
        let cap = self.buffer.len();
        if self.read_pos + len > cap {
            let first = cap - self.read_pos;
            dest[..first].copy_from_slice(&self.buffer[self.read_pos..]);
            dest[first..len].copy_from_slice(&self.buffer[..len - first]);
            self.read_pos = len - first;
        } else {
            dest[..len].copy_from_slice(&self.buffer[self.read_pos..self.read_pos + len]);
            self.read_pos = (self.read_pos + len) % cap;
        }
        self.available -= len;
        len
    }

    /// Append all of `data`, growing first if it does not fit.
    pub fn write(&mut self, data: &[u8]) {
        let len = data.len();
        if len == 0 {
            return;
        }
        if self.capacity() - self.available < len {
            self.grow(len);
        }
        let cap = self.buffer.len();
        if self.write_pos + len > cap {
            let first = cap - self.write_pos;
            self.buffer[self.write_pos..].copy_from_slice(&data[..first]);
            self.buffer[..len - first].copy_from_slice(&data[first..]);
            self.write_pos = len - first;
        } else {
            self.buffer[self.write_pos..self.write_pos + len].copy_from_slice(data);
            self.write_pos = (self.write_pos + len) % cap;
        }
        self.available += len;
    }

    fn grow(&mut self, incoming: usize) {
        let old = self.buffer.len();
        let pending = self.available;
        let mut new = old * 3 / 2;
        if new < pending + incoming {
            new = pending + incoming + GROWTH_SLACK;
        }
        log::debug!(
            "ring buffer: growing from {} to {} bytes ({} pending, {} incoming)",
            old,
            new,
            pending,
            incoming
        );

        let mut buffer = vec![0; new];
        let moved = self.read(&mut buffer[..pending]);
        debug_assert_eq!(moved, pending);
        self.buffer = buffer;
        self.read_pos = 0;
        self.write_pos = pending;
        self.available = pending;
    }
}

impl io::Read for RingBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(RingBuffer::read(self, buf))
    }
}

impl io::Write for RingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        RingBuffer::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
