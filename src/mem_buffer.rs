//! MemBuffer: append-only byte buffer that grows in 64-byte blocks.

/// Capacity is always a multiple of this once anything has been written.
pub const BLOCK: usize = 64;

#[derive(Debug, Default, Clone)]
pub struct MemBuffer {
    buffer: Vec<u8>,
}

impl MemBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    fn put_inner(&mut self, data: &[u8], nul: bool) -> usize {
        let offset = self.buffer.len();
        let end = offset + data.len() + usize::from(nul);
        if end > self.buffer.capacity() {
            let rounded = (end + BLOCK - 1) & !(BLOCK - 1);
            self.buffer.reserve_exact(rounded - offset);
        }
        self.buffer.extend_from_slice(data);
        if nul {
            self.buffer.push(0);
        }
        offset
    }

    /// Append `data`; returns the offset it starts at.
    pub fn put(&mut self, data: &[u8]) -> usize {
        self.put_inner(data, false)
    }

    /// Append `s` followed by a NUL byte; returns the offset of `s`.
    pub fn put_string(&mut self, s: &str) -> usize {
        self.put_inner(s.as_bytes(), true)
    }

    /// Drop the contents and release the storage.
    pub fn clear(&mut self) {
        self.buffer = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_consecutive() {
        let mut m = MemBuffer::new();
        assert_eq!(m.put(b"abc"), 0);
        assert_eq!(m.put_string("de"), 3);
        assert_eq!(m.put(b"f"), 6);
        assert_eq!(m.as_bytes(), b"abcde\0f");
        assert_eq!(m.len(), 7);
    }

    #[test]
    fn grows_in_blocks() {
        let mut m = MemBuffer::new();
        m.put(&[1u8; 10]);
        assert!(m.capacity() >= BLOCK);
        m.put(&[2u8; 100]);
        assert!(m.capacity() >= 2 * BLOCK);
        assert_eq!(m.len(), 110);
    }

    #[test]
    fn clear_releases_storage() {
        let mut m = MemBuffer::new();
        m.put_string("hello");
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.capacity(), 0);
        assert_eq!(m.put(b"x"), 0);
    }
}
