//! Key type descriptors: the capability bundle a `Dict` is parameterized by.
//!
//! A descriptor names a borrowed query form and an owned stored form of a
//! key. `Dict::put` duplicates the borrowed form into an owned one and
//! every later comparison goes through `borrow` + `equals`.
//!
//! Implementations must keep `equals(a, b) => hash(a) == hash(b)`.

use crate::checksum::string_hash;

pub trait KeyType {
    /// Borrowed form used for queries and for reading stored keys.
    type Borrowed<'a>: Copy;

    /// Owned form stored in a dictionary entry.
    type Owned;

    fn equals(a: Self::Borrowed<'_>, b: Self::Borrowed<'_>) -> bool;
    fn hash(key: Self::Borrowed<'_>) -> u32;
    fn duplicate(key: Self::Borrowed<'_>) -> Self::Owned;
    fn borrow(owned: &Self::Owned) -> Self::Borrowed<'_>;

    /// Release a stored key. Dropping is enough for every owned form here.
    fn release(owned: Self::Owned) {
        drop(owned);
    }
}

/// Text keys. `None` is the null key: it only equals `None` and hashes to 0.
#[derive(Copy, Clone, Debug, Default)]
pub struct Text;

impl KeyType for Text {
    type Borrowed<'a> = Option<&'a str>;
    type Owned = Option<Box<str>>;

    #[inline]
    fn equals(a: Option<&str>, b: Option<&str>) -> bool {
        a == b
    }

    #[inline]
    fn hash(key: Option<&str>) -> u32 {
        key.map_or(0, |s| string_hash(s.as_bytes()))
    }

    fn duplicate(key: Option<&str>) -> Option<Box<str>> {
        key.map(Box::from)
    }

    #[inline]
    fn borrow(owned: &Option<Box<str>>) -> Option<&str> {
        owned.as_deref()
    }
}

/// Length-tagged byte spans, compared by length then content.
#[derive(Copy, Clone, Debug, Default)]
pub struct Bytes;

impl KeyType for Bytes {
    type Borrowed<'a> = &'a [u8];
    type Owned = Box<[u8]>;

    #[inline]
    fn equals(a: &[u8], b: &[u8]) -> bool {
        a.len() == b.len() && a == b
    }

    #[inline]
    fn hash(key: &[u8]) -> u32 {
        string_hash(key)
    }

    fn duplicate(key: &[u8]) -> Box<[u8]> {
        Box::from(key)
    }

    #[inline]
    fn borrow(owned: &Box<[u8]>) -> &[u8] {
        owned
    }
}
