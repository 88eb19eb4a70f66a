//! Recoverable errors for the fallible twins of panicking accessors.

use thiserror::Error;

/// Errors returned by the `try_*` variants of positional and bounded
/// operations. The plain variants panic with the same information.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// Positional access outside `0..len`.
    #[error("reference to element {index} in array[{len}]")]
    OutOfBounds { index: usize, len: usize },

    /// Push into a heap that already holds `capacity` elements.
    #[error("heap capacity {capacity} exceeded")]
    CapacityExceeded { capacity: usize },
}

pub type Result<T> = core::result::Result<T, ContainerError>;
