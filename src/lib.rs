//! qcollections: single-threaded generic containers for a file-processing
//! toolkit: a chained hash dictionary, an ordered associative array on
//! top of it, a bounded max-heap, a growable ring buffer and an append list.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: small containers with fixed growth and lookup
//!   behavior, each owning all of its storage.
//! - Layers:
//!   - KeyType: capability bundle (equals, hash, duplicate, borrow,
//!     release) that parameterizes `Dict` over key representations.
//!     `Text` (nullable strings) and `Bytes` (byte spans) are provided.
//!   - Dict<V, T>: chained hash table. Entries live in a `SlotMap` and are
//!     linked per bucket by key; new entries go to the head of the chain.
//!   - Array<V, T>: dense slots plus a `Dict` from key to position.
//!   - Heap, RingBuffer, AppendList: independent leaves.
//!
//! Constraints
//! - Single-threaded and non-reentrant; every call runs to completion.
//!   Callers that share an instance across threads must serialize access.
//! - Keys are duplicated into the container; values are owned by the
//!   container only in the Rust sense. Use `Rc`/`&T` for shared values.
//! - Usage errors (out-of-range positions, pushing into a full heap)
//!   panic. `try_*` variants return `ContainerError` instead.
//! - Not-found results are `None`.
//!
//! Lookup order and rehashing
//! - Duplicate keys are allowed. Lookups return the most recently put
//!   entry among equal keys (head-of-chain first).
//! - Each entry caches its `u32` hash; resizes never rehash key content
//!   and keep the relative order of every chain, so a resize never changes
//!   a lookup result.
//! - By default growth happens lazily inside `lookup`, only when the probe
//!   has to walk past a bucket head and the load is at least 2/3. A table
//!   that is only ever put into can stay overloaded. `ResizePolicy::OnInsert`
//!   checks the same trigger after every put instead.
//!
//! Logging
//! - Through the `log` facade: `trace` on dictionary resizes, `debug` on
//!   ring buffer growth, `error` on internal inconsistencies that were
//!   recovered from.

pub mod append_list;
pub mod array;
pub mod checksum;
pub mod dict;
mod dict_proptest;
mod error;
pub mod heap;
pub mod key_type;
pub mod mem_buffer;
pub mod ring_buffer;
pub mod string_array;
pub mod string_map;

// Public surface
pub use append_list::AppendList;
pub use array::Array;
pub use dict::{Dict, DictOptions, Handle, ResizePolicy};
pub use error::{ContainerError, Result};
pub use heap::Heap;
pub use key_type::{Bytes, KeyType, Text};
pub use mem_buffer::MemBuffer;
pub use ring_buffer::RingBuffer;
pub use string_array::StringArray;
pub use string_map::StringMap;
