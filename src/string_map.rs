//! StringMap: string-to-string map owning copies of both sides.

use crate::dict::Dict;

#[derive(Default)]
pub struct StringMap {
    d: Dict<Box<str>>,
}

impl StringMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.d.len()
    }
    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    /// A later put for an equal key shadows the earlier one.
    pub fn put(&mut self, key: &str, value: &str) {
        self.d.put(Some(key), Box::from(value));
    }

    pub fn lookup(&mut self, key: &str) -> Option<&str> {
        self.d.lookup(Some(key)).map(|v| &**v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.d.iter().filter_map(|(k, v)| k.map(|k| (k, &**v)))
    }
}
