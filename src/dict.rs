//! Dict: chained hash dictionary keyed through a `KeyType` descriptor.
//!
//! Entries live in a `SlotMap` and carry their precomputed hash plus the
//! key of the next entry in the same bucket; `slots` holds the head of each
//! bucket chain. New entries go to the head of their chain, so among equal
//! keys the most recently put one is found first.
//!
//! Growth is lazy by default: a lookup that has to walk past the head of
//! a bucket while the load is at least 2/3 first rehashes the whole table
//! into the next size of the sequence 15, 31, 63, 127, ... Rehashing uses
//! the cached hashes and keeps the relative order of every chain.

use crate::key_type::{KeyType, Text};
use slotmap::{DefaultKey, SlotMap};

/// Bucket count used by `Dict::new`.
pub const INITIAL_BUCKETS: usize = 1;

/// Stable reference to a dictionary entry. Survives resizes; stops
/// resolving once the entry is deleted or the dictionary is cleared.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }

    pub fn key<'a, V, T: KeyType>(&self, dict: &'a Dict<V, T>) -> Option<T::Borrowed<'a>> {
        dict.handle_key(*self)
    }

    pub fn value<'a, V, T: KeyType>(&self, dict: &'a Dict<V, T>) -> Option<&'a V> {
        dict.handle_value(*self)
    }

    pub fn value_mut<'a, V, T: KeyType>(&self, dict: &'a mut Dict<V, T>) -> Option<&'a mut V> {
        dict.handle_value_mut(*self)
    }
}

/// When the 2/3 load trigger is evaluated.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ResizePolicy {
    /// Only when a lookup walks past the head of a bucket.
    #[default]
    OnProbe,
    /// After every put.
    OnInsert,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DictOptions {
    pub initial_buckets: usize,
    pub resize: ResizePolicy,
}

impl Default for DictOptions {
    fn default() -> Self {
        Self {
            initial_buckets: INITIAL_BUCKETS,
            resize: ResizePolicy::OnProbe,
        }
    }
}

struct Entry<K, V> {
    key: K,
    value: V,
    hash: u32,
    next: Option<DefaultKey>,
}

pub struct Dict<V, T: KeyType = Text> {
    slots: Vec<Option<DefaultKey>>,
    entries: SlotMap<DefaultKey, Entry<T::Owned, V>>,
    resize: ResizePolicy,
}

impl<V> Dict<V> {
    pub fn new() -> Self {
        Self::with_options(DictOptions::default())
    }
}

impl<V> Default for Dict<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Next bucket count for `num` entries, starting from `size`.
fn grown_size(num: usize, size: usize) -> usize {
    let mut n = size;
    while num * 3 >= n * 2 {
        n = if n < 15 { 15 } else { (n + 1) * 2 - 1 };
    }
    n
}

impl<V, T: KeyType> Dict<V, T> {
    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_options(DictOptions {
            initial_buckets: buckets,
            ..DictOptions::default()
        })
    }

    pub fn with_options(options: DictOptions) -> Self {
        assert!(
            options.initial_buckets > 0,
            "dictionary needs at least one bucket"
        );
        Self {
            slots: vec![None; options.initial_buckets],
            entries: SlotMap::with_key(),
            resize: options.resize,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn bucket_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn bucket(&self, hash: u32) -> usize {
        hash as usize % self.slots.len()
    }

    fn overloaded(&self) -> bool {
        self.entries.len() * 3 >= self.slots.len() * 2
    }

    fn grow(&mut self) {
        let old = self.slots.len();
        let new = grown_size(self.entries.len(), old);
        debug_assert!(new > old);
        log::trace!(
            "dict: growing from {} to {} buckets for {} entries",
            old,
            new,
            self.entries.len()
        );

        let mut slots: Vec<Option<DefaultKey>> = vec![None; new];
        let mut tails: Vec<Option<DefaultKey>> = vec![None; new];
        for head in std::mem::take(&mut self.slots) {
            let mut cur = head;
            while let Some(k) = cur {
                let e = &mut self.entries[k];
                cur = e.next.take();
                let b = e.hash as usize % new;
                match tails[b] {
                    Some(t) => self.entries[t].next = Some(k),
                    None => slots[b] = Some(k),
                }
                tails[b] = Some(k);
            }
        }
        self.slots = slots;
    }

    /// Insert a copy of `key` at the head of its bucket. Equal keys are not
    /// checked for; a later put shadows earlier ones for lookups.
    pub fn put(&mut self, key: T::Borrowed<'_>, value: V) -> Handle {
        let hash = T::hash(key);
        let b = self.bucket(hash);
        let entry = Entry {
            key: T::duplicate(key),
            value,
            hash,
            next: self.slots[b],
        };
        let k = self.entries.insert(entry);
        self.slots[b] = Some(k);
        if self.resize == ResizePolicy::OnInsert && self.overloaded() {
            self.grow();
        }
        Handle::new(k)
    }

    // Takes `&mut self` because a probe past the bucket head may resize.
    fn probe(&mut self, key: T::Borrowed<'_>) -> Option<DefaultKey> {
        if self.entries.is_empty() {
            return None;
        }
        let hash = T::hash(key);
        let mut cur = self.slots[self.bucket(hash)];

        if let Some(k) = cur {
            let e = &self.entries[k];
            if T::equals(T::borrow(&e.key), key) {
                return Some(k);
            }
            cur = e.next;
        }

        if cur.is_some() && self.resize == ResizePolicy::OnProbe && self.overloaded() {
            self.grow();
            cur = self.slots[self.bucket(hash)];
        }

        while let Some(k) = cur {
            let e = &self.entries[k];
            if T::equals(T::borrow(&e.key), key) {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    /// Value of the first entry in the key's chain that equals `key`.
    pub fn lookup(&mut self, key: T::Borrowed<'_>) -> Option<&V> {
        let k = self.probe(key)?;
        self.entries.get(k).map(|e| &e.value)
    }

    pub fn lookup_mut(&mut self, key: T::Borrowed<'_>) -> Option<&mut V> {
        let k = self.probe(key)?;
        self.entries.get_mut(k).map(|e| &mut e.value)
    }

    pub fn find(&mut self, key: T::Borrowed<'_>) -> Option<Handle> {
        self.probe(key).map(Handle::new)
    }

    pub fn contains_key(&mut self, key: T::Borrowed<'_>) -> bool {
        self.probe(key).is_some()
    }

    /// Unlink the first entry equal to `key` and hand back its value.
    /// The rest of the chain keeps its order.
    pub fn remove(&mut self, key: T::Borrowed<'_>) -> Option<V> {
        if self.entries.is_empty() {
            return None;
        }
        let b = self.bucket(T::hash(key));
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.slots[b];
        while let Some(k) = cur {
            let e = &self.entries[k];
            let next = e.next;
            if T::equals(T::borrow(&e.key), key) {
                match prev {
                    None => self.slots[b] = next,
                    Some(p) => self.entries[p].next = next,
                }
                let e = self.entries.remove(k)?;
                T::release(e.key);
                return Some(e.value);
            }
            prev = cur;
            cur = next;
        }
        None
    }

    pub fn delete(&mut self, key: T::Borrowed<'_>) -> bool {
        self.remove(key).is_some()
    }

    /// Every entry of the bucket `key` hashes to, head first. Unlike
    /// `lookup` this never resizes and does not filter by key.
    pub fn chain(&self, key: T::Borrowed<'_>) -> Chain<'_, V, T> {
        let cur = if self.entries.is_empty() {
            None
        } else {
            self.slots[self.bucket(T::hash(key))]
        };
        Chain {
            entries: &self.entries,
            cur,
        }
    }

    /// Entries in bucket order, each chain head first.
    pub fn iter(&self) -> Iter<'_, V, T> {
        Iter {
            slots: self.slots.iter(),
            chain: Chain {
                entries: &self.entries,
                cur: None,
            },
        }
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(T::Borrowed<'_>, &V),
    {
        for (k, v) in self.iter() {
            f(k, v);
        }
    }

    pub fn for_each_value<F>(&self, mut f: F)
    where
        F: FnMut(&V),
    {
        for (_, v) in self.iter() {
            f(v);
        }
    }

    /// Release every key and pass every value to `release`, in bucket order.
    /// The bucket count is kept.
    pub fn clear_with<F>(&mut self, mut release: F)
    where
        F: FnMut(V),
    {
        for b in 0..self.slots.len() {
            let mut cur = self.slots[b].take();
            while let Some(k) = cur {
                let Some(e) = self.entries.remove(k) else {
                    break;
                };
                cur = e.next;
                T::release(e.key);
                release(e.value);
            }
        }
        debug_assert!(self.entries.is_empty());
    }

    pub fn clear(&mut self) {
        self.clear_with(drop);
    }

    pub(crate) fn handle_key(&self, h: Handle) -> Option<T::Borrowed<'_>> {
        self.entries.get(h.raw_handle()).map(|e| T::borrow(&e.key))
    }

    pub(crate) fn handle_value(&self, h: Handle) -> Option<&V> {
        self.entries.get(h.raw_handle()).map(|e| &e.value)
    }

    pub(crate) fn handle_value_mut(&mut self, h: Handle) -> Option<&mut V> {
        self.entries.get_mut(h.raw_handle()).map(|e| &mut e.value)
    }
}

impl<V: Clone, T: KeyType> Clone for Dict<V, T> {
    /// Duplicates every key through the descriptor and shares values by
    /// cloning them. Same bucket count, same chain order.
    fn clone(&self) -> Self {
        let mut entries = SlotMap::with_capacity_and_key(self.entries.len());
        let mut slots = vec![None; self.slots.len()];
        for (b, head) in self.slots.iter().enumerate() {
            let mut tail: Option<DefaultKey> = None;
            let mut cur = *head;
            while let Some(k) = cur {
                let e = &self.entries[k];
                let nk = entries.insert(Entry {
                    key: T::duplicate(T::borrow(&e.key)),
                    value: e.value.clone(),
                    hash: e.hash,
                    next: None,
                });
                match tail {
                    Some(t) => entries[t].next = Some(nk),
                    None => slots[b] = Some(nk),
                }
                tail = Some(nk);
                cur = e.next;
            }
        }
        Self {
            slots,
            entries,
            resize: self.resize,
        }
    }
}

impl<V, T: KeyType> Drop for Dict<V, T> {
    fn drop(&mut self) {
        for (_, e) in self.entries.drain() {
            T::release(e.key);
        }
    }
}

/// Iterator over one bucket chain.
pub struct Chain<'a, V, T: KeyType> {
    entries: &'a SlotMap<DefaultKey, Entry<T::Owned, V>>,
    cur: Option<DefaultKey>,
}

impl<'a, V, T: KeyType> Iterator for Chain<'a, V, T> {
    type Item = (T::Borrowed<'a>, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.entries.get(self.cur?)?;
        self.cur = e.next;
        Some((T::borrow(&e.key), &e.value))
    }
}

/// Iterator over all entries in bucket order.
pub struct Iter<'a, V, T: KeyType> {
    slots: core::slice::Iter<'a, Option<DefaultKey>>,
    chain: Chain<'a, V, T>,
}

impl<'a, V, T: KeyType> Iterator for Iter<'a, V, T> {
    type Item = (T::Borrowed<'a>, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.next() {
                return Some(item);
            }
            self.chain.cur = *self.slots.next()?;
        }
    }
}
