//! Error types for queue operations.

use core::fmt;

/// Result alias for queue operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Failure of a queue operation.
///
/// A failed operation never leaves the queue partially modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An element slot or a value buffer could not be allocated.
    #[error("failed to allocate {what}")]
    AllocationFailure {
        /// What was being allocated.
        what: Allocation,
    },
    /// The queue was absent or an argument was unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Removal from a queue with no elements.
    #[error("queue is empty")]
    EmptyQueue,
}

impl Error {
    #[inline]
    pub(crate) const fn element() -> Self {
        Self::AllocationFailure {
            what: Allocation::Element,
        }
    }

    #[inline]
    pub(crate) const fn value(len: usize) -> Self {
        Self::AllocationFailure {
            what: Allocation::Value { len },
        }
    }

    /// Returns `true` for allocation failures.
    #[inline]
    pub const fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailure { .. })
    }
}

/// The allocation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// A slot for a new element.
    Element,
    /// The copy of an inserted string.
    Value {
        /// Length in bytes of the string being copied.
        len: usize,
    },
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allocation::Element => write!(f, "element slot"),
            Allocation::Value { len } => write!(f, "{len}-byte value"),
        }
    }
}
