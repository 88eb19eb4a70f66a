//! Array: insertion-ordered (key, value) slots with hash-accelerated lookup.
//!
//! The dense slot vector is paired with a `Dict` mapping each key to its
//! position. The dictionary owns the key copies; a slot refers to its key
//! through the entry `Handle`. Equal keys may occupy several positions;
//! `find` resolves to the most recently appended one. There is no removal.

use crate::dict::{Dict, DictOptions, Handle};
use crate::error::{ContainerError, Result};
use crate::key_type::{KeyType, Text};

/// Slots are reserved this many at a time.
pub const GROW_BLOCK: usize = 64;

struct Slot<V> {
    key: Handle,
    value: V,
}

pub struct Array<V, T: KeyType = Text> {
    slots: Vec<Slot<V>>,
    entry2pos: Dict<usize, T>,
}

impl<V> Array<V> {
    pub fn new() -> Self {
        Self::with_options(DictOptions::default())
    }
}

impl<V, T: KeyType> Default for Array<V, T> {
    fn default() -> Self {
        Self::with_options(DictOptions::default())
    }
}

impl<V, T: KeyType> Array<V, T> {
    /// `options` configure the key index.
    pub fn with_options(options: DictOptions) -> Self {
        Self {
            slots: Vec::new(),
            entry2pos: Dict::with_options(options),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store `(key, value)` at the next position and index the key.
    pub fn append(&mut self, key: T::Borrowed<'_>, value: V) -> usize {
        if self.slots.len() == self.slots.capacity() {
            self.slots.reserve_exact(GROW_BLOCK);
        }
        let pos = self.slots.len();
        let key = self.entry2pos.put(key, pos);
        self.slots.push(Slot { key, value });
        pos
    }

    /// Position of the most recently appended slot with an equal key.
    pub fn find(&mut self, key: T::Borrowed<'_>) -> Option<usize> {
        self.entry2pos.lookup(key).copied()
    }

    /// Position of a slot whose key equals `key` and whose value equals
    /// `value`. Disambiguates equal keys holding different values.
    pub fn find_exact(&self, key: T::Borrowed<'_>, value: &V) -> Option<usize>
    where
        V: PartialEq,
    {
        self.entry2pos
            .chain(key)
            .filter(|(k, _)| T::equals(*k, key))
            .map(|(_, &pos)| pos)
            .find(|&pos| self.slots[pos].value == *value)
    }

    /// Overwrite the value at `find(key)`, or append when the key is new.
    pub fn update(&mut self, key: T::Borrowed<'_>, value: V) -> usize {
        match self.find(key) {
            Some(pos) => {
                self.slots[pos].value = value;
                pos
            }
            None => self.append(key, value),
        }
    }

    pub fn append_if_absent(&mut self, key: T::Borrowed<'_>, value: V) -> usize {
        match self.find(key) {
            Some(pos) => pos,
            None => self.append(key, value),
        }
    }

    fn check(&self, pos: usize) -> Result<&Slot<V>> {
        self.slots.get(pos).ok_or(ContainerError::OutOfBounds {
            index: pos,
            len: self.slots.len(),
        })
    }

    pub fn try_key_at(&self, pos: usize) -> Result<T::Borrowed<'_>> {
        let slot = self.check(pos)?;
        Ok(self
            .entry2pos
            .handle_key(slot.key)
            .expect("array keys are never removed from the index"))
    }

    pub fn try_value_at(&self, pos: usize) -> Result<&V> {
        self.check(pos).map(|s| &s.value)
    }

    /// Panics when `pos >= len()`.
    pub fn key_at(&self, pos: usize) -> T::Borrowed<'_> {
        match self.try_key_at(pos) {
            Ok(k) => k,
            Err(e) => panic!("{e}"),
        }
    }

    /// Panics when `pos >= len()`.
    pub fn value_at(&self, pos: usize) -> &V {
        match self.try_value_at(pos) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Panics when `pos >= len()`.
    pub fn value_at_mut(&mut self, pos: usize) -> &mut V {
        let len = self.slots.len();
        match self.slots.get_mut(pos) {
            Some(s) => &mut s.value,
            None => panic!("{}", ContainerError::OutOfBounds { index: pos, len }),
        }
    }

    /// Slots in position order.
    pub fn iter(&self) -> impl Iterator<Item = (T::Borrowed<'_>, &V)> + '_ {
        (0..self.slots.len()).map(move |pos| (self.key_at(pos), &self.slots[pos].value))
    }
}
