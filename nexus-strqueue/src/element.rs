//! Queue elements.

use crate::{Key, Value};

/// One element of a queue: an owned value and the handle of its successor.
///
/// Elements live in an [`ElementStorage`] and are linked by handle. The
/// queue owns the links; callers only ever see the [`Value`].
///
/// [`ElementStorage`]: crate::ElementStorage
#[derive(Debug)]
pub struct Element<K: Key = u32> {
    pub(crate) value: Value,
    pub(crate) next: K,
}

impl<K: Key> Element<K> {
    /// Creates an element with no successor.
    #[inline]
    pub fn new(value: Value) -> Self {
        Self { value, next: K::NONE }
    }

    #[inline]
    pub(crate) fn with_next(value: Value, next: K) -> Self {
        Self { value, next }
    }

    /// The element's value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Handle of the successor, or `None` at the end of the sequence.
    #[inline]
    pub fn next(&self) -> Option<K> {
        if self.next.is_none() { None } else { Some(self.next) }
    }

    /// Consumes the element, returning its value.
    #[inline]
    pub fn into_value(self) -> Value {
        self.value
    }
}
