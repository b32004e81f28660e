//! Queue configuration.

use core::fmt;

use crate::{Arena, ElementStorage, Observer, Result, StrQueue};

/// Builder for [`StrQueue`].
///
/// # Example
///
/// ```
/// use nexus_strqueue::{QueueBuilder, TracingObserver};
///
/// let mut queue = QueueBuilder::new()
///     .capacity(1024)
///     .observer(TracingObserver)
///     .build()
///     .unwrap();
///
/// queue.insert_tail("a").unwrap();
/// assert!(queue.storage().capacity() >= 1024);
/// ```
pub struct QueueBuilder<S: ElementStorage = Arena> {
    storage: S,
    capacity: usize,
    observer: Option<Box<dyn Observer + Send>>,
}

impl QueueBuilder<Arena> {
    /// Builder over a default [`Arena`], no reservation, no observer.
    pub const fn new() -> Self {
        Self {
            storage: Arena::new(),
            capacity: 0,
            observer: None,
        }
    }
}

impl Default for QueueBuilder<Arena> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ElementStorage> QueueBuilder<S> {
    /// Reserve room for at least this many elements up front. Default: 0.
    pub fn capacity(mut self, elements: usize) -> Self {
        self.capacity = elements;
        self
    }

    /// Install an observer. Default: none.
    pub fn observer<O>(mut self, observer: O) -> Self
    where
        O: Observer + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Use `storage` for elements instead of the default arena.
    pub fn storage<T: ElementStorage>(self, storage: T) -> QueueBuilder<T> {
        QueueBuilder {
            storage,
            capacity: self.capacity,
            observer: self.observer,
        }
    }

    /// Build the queue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`](crate::Error::AllocationFailure)
    /// if the requested capacity cannot be reserved.
    pub fn build(self) -> Result<StrQueue<S>> {
        let mut storage = self.storage;
        storage.clear();
        storage.try_reserve(self.capacity)?;
        Ok(StrQueue::from_parts(storage, self.observer))
    }
}

impl<S: ElementStorage> fmt::Debug for QueueBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueBuilder")
            .field("capacity", &self.capacity)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
