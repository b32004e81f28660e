//! Singly-linked string queue.
//!
//! # Example
//!
//! ```
//! use nexus_strqueue::StrQueue;
//!
//! let mut queue: StrQueue = StrQueue::new();
//! queue.insert_tail("b").unwrap();
//! queue.insert_tail("c").unwrap();
//! queue.insert_head("a").unwrap();
//! assert_eq!(queue.len(), 3);
//!
//! let mut buf = [0u8; 8];
//! assert_eq!(queue.remove_head(Some(&mut buf)), Ok(1));
//! assert_eq!(&buf[..2], b"a\0");
//!
//! queue.reverse();
//! assert_eq!(queue.pop_head().unwrap(), "c");
//! assert_eq!(queue.pop_head().unwrap(), "b");
//! assert!(queue.pop_head().is_err());
//! ```

use core::fmt;
use core::iter::FusedIterator;

use crate::observe::{Event, Observer, Op};
use crate::sort::merge_sort;
use crate::{Arena, Element, ElementStorage, Error, Key, QueueBuilder, Result, Value};

type BoxedObserver = Box<dyn Observer + Send>;

/// A queue of owned strings backed by a singly-linked list.
///
/// The queue tracks head, tail and length; elements live in its storage
/// `S` and are linked by handle. Insertion at either end, removal from the
/// head and length are O(1). [`reverse`](Self::reverse) and
/// [`sort`](Self::sort) relink elements in place without allocating.
///
/// Every inserted string is copied in. Every removed string is moved or
/// copied out and its element released. Dropping the queue releases all
/// remaining elements.
pub struct StrQueue<S: ElementStorage = Arena> {
    storage: S,
    head: S::Key,
    tail: S::Key,
    len: usize,
    observer: Option<BoxedObserver>,
}

impl StrQueue<Arena> {
    /// Creates an empty queue. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            storage: Arena::new(),
            head: u32::NONE,
            tail: u32::NONE,
            len: 0,
            observer: None,
        }
    }

    /// Creates an empty queue with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the slots cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self::with_storage(Arena::try_with_capacity(capacity)?))
    }

    /// Returns a builder for configuring a queue.
    #[inline]
    pub fn builder() -> QueueBuilder {
        QueueBuilder::new()
    }
}

impl Default for StrQueue<Arena> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ElementStorage> StrQueue<S> {
    /// Creates an empty queue over `storage`.
    ///
    /// Any elements already in `storage` are dropped.
    pub fn with_storage(mut storage: S) -> Self {
        storage.clear();
        Self {
            storage,
            head: S::Key::NONE,
            tail: S::Key::NONE,
            len: 0,
            observer: None,
        }
    }

    pub(crate) fn from_parts(storage: S, observer: Option<BoxedObserver>) -> Self {
        let mut queue = Self::with_storage(storage);
        queue.observer = observer;
        queue.notify(&Event::Create);
        queue
    }

    /// Installs an observer, replacing any previous one.
    pub fn set_observer<O>(&mut self, observer: O)
    where
        O: Observer + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Removes and returns the installed observer.
    pub fn take_observer(&mut self) -> Option<Box<dyn Observer + Send>> {
        self.observer.take()
    }

    /// The backing storage.
    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Number of elements. O(1).
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Number of elements, under the name the C-style queue API uses.
    ///
    /// Same as [`len`](Self::len). Kept so callers ported from that API
    /// (and [`handle::size`](crate::handle::size)) read the same way.
    #[inline]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if the queue has no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Inserts a copy of `value` at the head. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the element or the copy of
    /// `value` cannot be allocated. The queue is unchanged on failure.
    pub fn insert_head(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
        let bytes = value.as_ref();
        let copy = match self.storage.copy_value(bytes) {
            Ok(copy) => copy,
            Err(error) => return Err(self.reject(Op::InsertHead, error)),
        };
        let key = match self.storage.try_insert(Element::with_next(copy, self.head)) {
            Ok(key) => key,
            Err(error) => return Err(self.reject(Op::InsertHead, error)),
        };

        if self.tail.is_none() {
            self.tail = key;
        }
        self.head = key;
        self.len += 1;

        let len = self.len;
        self.notify(&Event::InsertHead { value: bytes, len });
        Ok(())
    }

    /// Inserts a copy of `value` at the tail. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the element or the copy of
    /// `value` cannot be allocated. The queue is unchanged on failure.
    pub fn insert_tail(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
        let bytes = value.as_ref();
        let copy = match self.storage.copy_value(bytes) {
            Ok(copy) => copy,
            Err(error) => return Err(self.reject(Op::InsertTail, error)),
        };
        let key = match self.storage.try_insert(Element::new(copy)) {
            Ok(key) => key,
            Err(error) => return Err(self.reject(Op::InsertTail, error)),
        };

        if self.tail.is_some() {
            // Safety: tail is occupied while is_some()
            unsafe { self.storage.get_unchecked_mut(self.tail) }.next = key;
        } else {
            self.head = key;
        }
        self.tail = key;
        self.len += 1;

        let len = self.len;
        self.notify(&Event::InsertTail { value: bytes, len });
        Ok(())
    }

    // ========================================================================
    // Remove
    // ========================================================================

    /// Removes the head element, copying its value into `out`.
    ///
    /// At most `out.len() - 1` bytes are copied, followed by a NUL byte;
    /// nothing past `out.len()` is written. With `out = None` the value is
    /// discarded. Returns the number of value bytes copied (0 when
    /// discarded).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `out` is a zero-length buffer
    /// - [`Error::EmptyQueue`] if there is nothing to remove
    ///
    /// The queue is unchanged on failure.
    pub fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<usize> {
        if out.as_ref().is_some_and(|buf| buf.is_empty()) {
            let error = Error::InvalidArgument("output buffer has zero capacity");
            return Err(self.reject(Op::RemoveHead, error));
        }
        let Some(value) = self.detach_head() else {
            return Err(self.reject(Op::RemoveHead, Error::EmptyQueue));
        };

        let copied = out.map(|buf| value.copy_to(buf));
        let len = self.len;
        self.notify(&Event::RemoveHead {
            value: value.as_bytes(),
            copied,
            len,
        });
        Ok(copied.unwrap_or(0))
    }

    /// Removes the head element and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if there is nothing to remove.
    pub fn pop_head(&mut self) -> Result<Value> {
        let Some(value) = self.detach_head() else {
            return Err(self.reject(Op::RemoveHead, Error::EmptyQueue));
        };

        let len = self.len;
        self.notify(&Event::RemoveHead {
            value: value.as_bytes(),
            copied: None,
            len,
        });
        Ok(value)
    }

    /// Removes every element. The queue stays usable.
    pub fn clear(&mut self) {
        let removed = self.release_all();
        self.notify(&Event::Clear { removed });
    }

    /// Removes every element, yielding values front to back.
    ///
    /// Elements not consumed by the iterator are released when it is
    /// dropped.
    pub fn drain(&mut self) -> Drain<'_, S> {
        let removed = self.len;
        self.notify(&Event::Clear { removed });
        Drain { queue: self }
    }

    /// Releases every element and the queue itself.
    ///
    /// Equivalent to dropping the queue, but reports
    /// [`Event::Destroy`] to the observer first.
    pub fn destroy(mut self) {
        let removed = self.release_all();
        self.notify(&Event::Destroy { removed });
    }

    // ========================================================================
    // Reorder
    // ========================================================================

    /// Reverses the queue in place.
    ///
    /// Only links change; no element or value is allocated or released.
    pub fn reverse(&mut self) {
        if self.len > 1 {
            let mut prev = S::Key::NONE;
            let mut curr = self.head;
            while curr.is_some() {
                // Safety: curr came from list traversal
                let node = unsafe { self.storage.get_unchecked_mut(curr) };
                let next = node.next;
                node.next = prev;
                prev = curr;
                curr = next;
            }
            self.tail = self.head;
            self.head = prev;
        }

        let len = self.len;
        self.notify(&Event::Reverse { len });
    }

    /// Sorts the queue in ascending byte-wise order.
    ///
    /// Merge sort over the links: O(n log n), no allocation, values are
    /// never moved. Equal values keep their relative order.
    pub fn sort(&mut self) {
        if self.len > 1 {
            // Safety: head starts a NONE-terminated chain of exactly len
            // occupied elements (queue invariant)
            let (head, tail) =
                unsafe { merge_sort(&mut self.storage, self.head, self.tail, self.len) };
            self.head = head;
            self.tail = tail;
        }

        let len = self.len;
        self.notify(&Event::Sort { len });
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// The head value.
    #[inline]
    pub fn front(&self) -> Option<&Value> {
        if self.head.is_none() {
            None
        } else {
            // Safety: head is occupied while is_some()
            Some(&unsafe { self.storage.get_unchecked(self.head) }.value)
        }
    }

    /// The tail value.
    #[inline]
    pub fn back(&self) -> Option<&Value> {
        if self.tail.is_none() {
            None
        } else {
            // Safety: tail is occupied while is_some()
            Some(&unsafe { self.storage.get_unchecked(self.tail) }.value)
        }
    }

    /// Iterates values front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, S> {
        Iter {
            storage: &self.storage,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Returns `true` if values are in non-decreasing byte order.
    pub fn is_sorted(&self) -> bool {
        let mut iter = self.iter();
        let Some(mut prev) = iter.next() else {
            return true;
        };
        for value in iter {
            if value < prev {
                return false;
            }
            prev = value;
        }
        true
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn detach_head(&mut self) -> Option<Value> {
        if self.head.is_none() {
            return None;
        }

        // Safety: head is occupied while is_some()
        let element = unsafe { self.storage.remove_unchecked(self.head) };
        self.head = element.next;
        if self.head.is_none() {
            self.tail = S::Key::NONE;
        }
        self.len -= 1;
        Some(element.value)
    }

    fn release_all(&mut self) -> usize {
        let removed = self.len;
        while self.detach_head().is_some() {}
        removed
    }

    #[inline]
    fn notify(&mut self, event: &Event<'_>) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(event);
        }
    }

    fn reject(&mut self, op: Op, error: Error) -> Error {
        self.notify(&Event::Rejected { op, error });
        error
    }
}

impl<S: ElementStorage> fmt::Debug for StrQueue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, S: ElementStorage> IntoIterator for &'a StrQueue<S> {
    type Item = &'a Value;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over queue values, front to back.
pub struct Iter<'a, S: ElementStorage> {
    storage: &'a S,
    current: S::Key,
    remaining: usize,
}

impl<'a, S: ElementStorage> Iterator for Iter<'a, S> {
    type Item = &'a Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }

        // Safety: queue invariants guarantee current is occupied
        let node = unsafe { self.storage.get_unchecked(self.current) };
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: ElementStorage> ExactSizeIterator for Iter<'_, S> {}

impl<S: ElementStorage> FusedIterator for Iter<'_, S> {}

/// Draining iterator returned by [`StrQueue::drain`].
pub struct Drain<'a, S: ElementStorage> {
    queue: &'a mut StrQueue<S>,
}

impl<S: ElementStorage> Iterator for Drain<'_, S> {
    type Item = Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.queue.detach_head()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<S: ElementStorage> ExactSizeIterator for Drain<'_, S> {}

impl<S: ElementStorage> Drop for Drain<'_, S> {
    fn drop(&mut self) {
        // Release whatever the caller did not consume
        self.queue.release_all();
    }
}
