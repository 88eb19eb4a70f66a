//! Heap: bounded binary max-heap ordered by a caller-supplied comparator.
//!
//! Elements are stored once in a fixed-capacity `SlotMap` arena; the heap
//! itself is a vector of arena keys laid out as an implicit binary tree
//! (parent of `i` is `(i - 1) / 2`, children `2i + 1` and `2i + 2`).
//! Sifting only moves keys, never elements.

use crate::error::{ContainerError, Result};
use core::cmp::Ordering;
use slotmap::{DefaultKey, SlotMap};

pub struct Heap<T, F> {
    arena: SlotMap<DefaultKey, T>,
    order: Vec<DefaultKey>,
    capacity: usize,
    compare: F,
}

impl<T: Ord> Heap<T, fn(&T, &T) -> Ordering> {
    /// Heap ordered by `T: Ord`, largest first.
    pub fn with_natural_order(capacity: usize) -> Self {
        Self::new(capacity, |a: &T, b: &T| a.cmp(b))
    }
}

impl<T, F> Heap<T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    /// Storage for exactly `capacity` elements is reserved up front.
    pub fn new(capacity: usize, compare: F) -> Self {
        Self {
            arena: SlotMap::with_capacity_and_key(capacity),
            order: Vec::with_capacity(capacity),
            capacity,
            compare,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn greater(&mut self, a: DefaultKey, b: DefaultKey) -> bool {
        (self.compare)(&self.arena[a], &self.arena[b]) == Ordering::Greater
    }

    // Ties stay below their parent.
    fn sift_up(&mut self, mut pos: usize) {
        let node = self.order[pos];
        while pos > 0 {
            let parent = (pos - 1) / 2;
            let p = self.order[parent];
            if !self.greater(node, p) {
                break;
            }
            self.order[pos] = p;
            pos = parent;
        }
        self.order[pos] = node;
    }

    // Descend towards the larger child; the right child wins a tie.
    fn sift_down(&mut self, mut pos: usize) {
        let len = self.order.len();
        let node = self.order[pos];
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && !self.greater(self.order[left], self.order[right]) {
                child = right;
            }
            let c = self.order[child];
            if !self.greater(c, node) {
                break;
            }
            self.order[pos] = c;
            pos = child;
        }
        self.order[pos] = node;
    }

    /// Panics when the heap already holds `capacity` elements.
    pub fn push(&mut self, value: T) {
        if let Err(e) = self.try_push(value) {
            panic!("{e}");
        }
    }

    /// Like `push`, but reports a full heap instead of panicking. The
    /// rejected value is dropped.
    pub fn try_push(&mut self, value: T) -> Result<()> {
        if self.order.len() >= self.capacity {
            return Err(ContainerError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let k = self.arena.insert(value);
        self.order.push(k);
        self.sift_up(self.order.len() - 1);
        Ok(())
    }

    pub fn peek(&self) -> Option<&T> {
        self.order.first().and_then(|&k| self.arena.get(k))
    }

    /// Remove the maximum: the last element takes the root and sifts down.
    pub fn pop_max(&mut self) -> Option<T> {
        if self.order.is_empty() {
            return None;
        }
        let top = self.order.swap_remove(0);
        if !self.order.is_empty() {
            self.sift_down(0);
        }
        self.arena.remove(top)
    }

    /// Pop everything, largest first. Leaves the heap empty.
    pub fn drain_sorted_descending(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.order.len());
        while let Some(v) = self.pop_max() {
            out.push(v);
        }
        out
    }
}
