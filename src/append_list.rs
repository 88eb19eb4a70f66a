//! AppendList: singly linked list with O(1) append, prepend and length.
//!
//! Nodes live in a `SlotMap` arena and link to their successor by key.
//! The list value itself holds the head, the tail and (through the arena)
//! the element count, so neither prepending nor appending changes which
//! value is "the list".

use core::fmt;
use slotmap::{DefaultKey, SlotMap};

struct Node<T> {
    value: T,
    next: Option<DefaultKey>,
}

pub struct AppendList<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> Default for AppendList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AppendList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn append(&mut self, value: T) {
        let k = self.nodes.insert(Node { value, next: None });
        match self.tail {
            Some(t) => self.nodes[t].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    pub fn prepend(&mut self, value: T) {
        let k = self.nodes.insert(Node {
            value,
            next: self.head,
        });
        self.head = Some(k);
        if self.tail.is_none() {
            self.tail = Some(k);
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.head.and_then(|k| self.nodes.get(k)).map(|n| &n.value)
    }

    pub fn last(&self) -> Option<&T> {
        self.tail.and_then(|k| self.nodes.get(k)).map(|n| &n.value)
    }

    /// Free every node. Values are dropped with their nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            cur: self.head,
            remaining: self.nodes.len(),
        }
    }
}

impl<T: Clone> Clone for AppendList<T> {
    /// Rebuilds the chain node by node; values are cloned (shared when `T`
    /// is a reference or `Rc`).
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for AppendList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for AppendList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.append(v);
        }
    }
}

impl<T> FromIterator<T> for AppendList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = AppendList::new();
        list.extend(iter);
        list
    }
}

/// Iterator over list values, head to tail.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<DefaultKey, Node<T>>,
    cur: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let n = self.nodes.get(self.cur?)?;
        self.cur = n.next;
        self.remaining -= 1;
        Some(&n.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a AppendList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
