//! StringArray: append-only string interning table with positional access.
//!
//! Strings are copied NUL-terminated into one `MemBuffer`. A fixed number
//! of hash buckets map each string to the positions holding it; the newest
//! position sits at the end of its bucket and is found first. Deleting a
//! position blanks it without renumbering the others.

use crate::checksum::string_hash;
use crate::mem_buffer::MemBuffer;

#[derive(Debug, Clone)]
pub struct StringArray {
    strings: MemBuffer,
    // (offset, len) into `strings`; `None` once deleted.
    spans: Vec<Option<(usize, usize)>>,
    buckets: Vec<Vec<usize>>,
}

impl StringArray {
    /// Panics when `buckets` is zero. The bucket count never changes.
    pub fn new(buckets: usize) -> Self {
        assert!(buckets > 0, "string array needs at least one bucket");
        Self {
            strings: MemBuffer::new(),
            spans: Vec::new(),
            buckets: vec![Vec::new(); buckets],
        }
    }

    /// Number of positions handed out, deleted ones included.
    pub fn len(&self) -> usize {
        self.spans.len()
    }
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn bucket(&self, s: &str) -> usize {
        string_hash(s.as_bytes()) as usize % self.buckets.len()
    }

    pub fn put(&mut self, s: &str) -> usize {
        let offset = self.strings.put_string(s);
        let pos = self.spans.len();
        self.spans.push(Some((offset, s.len())));
        let b = self.bucket(s);
        self.buckets[b].push(pos);
        pos
    }

    /// `None` when `pos` is out of range or was deleted.
    pub fn at(&self, pos: usize) -> Option<&str> {
        let (offset, len) = (*self.spans.get(pos)?)?;
        std::str::from_utf8(&self.strings.as_bytes()[offset..offset + len]).ok()
    }

    /// Most recent live position holding `s`.
    pub fn find(&self, s: &str) -> Option<usize> {
        self.buckets[self.bucket(s)]
            .iter()
            .rev()
            .copied()
            .find(|&pos| self.at(pos) == Some(s))
    }

    /// Blank `pos` and unlink it from its bucket. Returns `false` when `pos`
    /// is out of range or already deleted.
    pub fn delete(&mut self, pos: usize) -> bool {
        let Some(s) = self.at(pos) else {
            return false;
        };
        let b = self.bucket(s);
        let chain = &mut self.buckets[b];
        match chain.iter().position(|&p| p == pos) {
            Some(i) => {
                chain.remove(i);
            }
            None => {
                log::error!(
                    "string array: position {} missing from bucket {}",
                    pos,
                    b
                );
            }
        }
        self.spans[pos] = None;
        true
    }
}
