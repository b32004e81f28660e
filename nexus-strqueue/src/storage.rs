//! Element storage with stable handles.
//!
//! Storage owns every element of a queue and hands out handles that stay
//! valid until the element is removed. The queue only links handles; it
//! never holds a reference into storage across operations.
//!
//! Storage is also where allocation happens, for the element slot and for
//! the copy of the inserted string. Both are fallible so that running out of
//! memory surfaces as [`Error::AllocationFailure`] instead of aborting.

use core::cell::Cell;

use crate::{Element, Error, Key, Result, Value};

/// Slab-like storage for queue elements.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable handles**: a handle stays valid until explicitly removed
/// - **O(1)** insert, remove, get
/// - **Slot reuse**: removed slots may be handed out again
///
/// # Implementations
///
/// - [`Arena`] - growable, fallible growth (the default)
/// - [`Faulty`] - wrapper that fails allocations on request
/// - `slab::Slab` - growable, aborts on out-of-memory (feature `slab`)
pub trait ElementStorage {
    /// Handle type for this storage.
    type Key: Key;

    /// Inserts an element, returning its handle.
    ///
    /// On failure the element is dropped, releasing its value.
    fn try_insert(&mut self, element: Element<Self::Key>) -> Result<Self::Key>;

    /// Removes and returns the element at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<Element<Self::Key>>;

    /// Returns a reference to the element at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&Element<Self::Key>>;

    /// Returns a mutable reference to the element at `key`, if present.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut Element<Self::Key>>;

    /// Returns a reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &Element<Self::Key>;

    /// Returns a mutable reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut Element<Self::Key>;

    /// Removes an element without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn remove_unchecked(&mut self, key: Self::Key) -> Element<Self::Key>;

    /// Number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every element.
    fn clear(&mut self);

    /// Reserves room for at least `additional` more elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the reservation fails.
    fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let _ = additional;
        Ok(())
    }

    /// Copies an inserted string into an owned [`Value`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the copy cannot be allocated.
    #[inline]
    fn copy_value(&mut self, bytes: &[u8]) -> Result<Value> {
        Value::try_copy(bytes)
    }
}

// =============================================================================
// Arena - growable, free-stack slot reuse
// =============================================================================

#[derive(Debug)]
enum Slot<K: Key> {
    Occupied(Element<K>),
    Vacant,
}

/// Growable element storage with a free stack.
///
/// Slots live in one `Vec`. Removed slots are pushed on a free stack and
/// reused LIFO by later inserts. Growth uses `try_reserve`, so a failed
/// allocation is reported rather than aborting the process.
///
/// # Example
///
/// ```
/// use nexus_strqueue::{Arena, Element, ElementStorage, Value};
///
/// let mut arena: Arena = Arena::new();
/// let key = arena.try_insert(Element::new(Value::try_copy(b"a").unwrap())).unwrap();
/// assert_eq!(arena.get(key).map(|e| e.value().as_bytes()), Some(&b"a"[..]));
/// assert_eq!(arena.len(), 1);
/// ```
#[derive(Debug)]
pub struct Arena<K: Key = u32> {
    slots: Vec<Slot<K>>,
    /// Vacant slot positions. Capacity is kept >= `slots.len()` so that
    /// `remove` never allocates.
    free: Vec<K>,
    len: usize,
}

impl<K: Key> Arena<K> {
    /// Creates an empty arena without allocating.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates an arena with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the slots cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut arena = Self::new();
        arena.try_reserve(capacity)?;
        Ok(arena)
    }

    /// Number of elements that fit without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    fn max_slots() -> usize {
        K::NONE.as_usize()
    }
}

impl<K: Key> Default for Arena<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> ElementStorage for Arena<K> {
    type Key = K;

    fn try_insert(&mut self, element: Element<K>) -> Result<K> {
        if let Some(key) = self.free.pop() {
            self.slots[key.as_usize()] = Slot::Occupied(element);
            self.len += 1;
            return Ok(key);
        }

        let index = self.slots.len();
        if index >= Self::max_slots() {
            return Err(Error::element());
        }
        self.slots.try_reserve(1).map_err(|_| Error::element())?;
        self.free
            .try_reserve(index + 1 - self.free.len())
            .map_err(|_| Error::element())?;

        self.slots.push(Slot::Occupied(element));
        self.len += 1;
        Ok(K::from_usize(index))
    }

    fn remove(&mut self, key: K) -> Option<Element<K>> {
        let slot = self.slots.get_mut(key.as_usize())?;
        if matches!(slot, Slot::Vacant) {
            return None;
        }
        let Slot::Occupied(element) = core::mem::replace(slot, Slot::Vacant) else {
            return None;
        };
        // Capacity reserved on insert, never reallocates
        self.free.push(key);
        self.len -= 1;
        Some(element)
    }

    #[inline]
    fn get(&self, key: K) -> Option<&Element<K>> {
        match self.slots.get(key.as_usize()) {
            Some(Slot::Occupied(element)) => Some(element),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut Element<K>> {
        match self.slots.get_mut(key.as_usize()) {
            Some(Slot::Occupied(element)) => Some(element),
            _ => None,
        }
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: K) -> &Element<K> {
        match unsafe { self.slots.get_unchecked(key.as_usize()) } {
            Slot::Occupied(element) => element,
            Slot::Vacant => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: K) -> &mut Element<K> {
        match unsafe { self.slots.get_unchecked_mut(key.as_usize()) } {
            Slot::Occupied(element) => element,
            Slot::Vacant => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: K) -> Element<K> {
        let slot = unsafe { self.slots.get_unchecked_mut(key.as_usize()) };
        match core::mem::replace(slot, Slot::Vacant) {
            Slot::Occupied(element) => {
                self.free.push(key);
                self.len -= 1;
                element
            }
            Slot::Vacant => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let wanted = self.slots.len().saturating_add(additional);
        if wanted > Self::max_slots() {
            return Err(Error::element());
        }
        self.slots
            .try_reserve(additional)
            .map_err(|_| Error::element())?;
        self.free
            .try_reserve(wanted - self.free.len())
            .map_err(|_| Error::element())?;
        Ok(())
    }
}

// =============================================================================
// Faulty - allocation failure injection
// =============================================================================

/// Storage wrapper that fails allocations on request.
///
/// Each `fail_next_*` call arms a one-shot failure; the next matching
/// allocation returns [`Error::AllocationFailure`] and the wrapper disarms.
/// Everything else is forwarded to the inner storage.
///
/// # Example
///
/// ```
/// use nexus_strqueue::{Arena, Faulty, StrQueue};
///
/// let mut queue = StrQueue::with_storage(Faulty::new(Arena::<u32>::new()));
/// queue.insert_tail("a").unwrap();
///
/// queue.storage().fail_next_element();
/// assert!(queue.insert_head("b").is_err());
/// assert_eq!(queue.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Faulty<S> {
    inner: S,
    fail_element: Cell<bool>,
    fail_value: Cell<bool>,
}

impl<S: ElementStorage> Faulty<S> {
    /// Wraps `inner` with no failures armed.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_element: Cell::new(false),
            fail_value: Cell::new(false),
        }
    }

    /// Fails the next element slot allocation.
    pub fn fail_next_element(&self) {
        self.fail_element.set(true);
    }

    /// Fails the next value copy.
    pub fn fail_next_value(&self) {
        self.fail_value.set(true);
    }

    /// The wrapped storage.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: ElementStorage> ElementStorage for Faulty<S> {
    type Key = S::Key;

    fn try_insert(&mut self, element: Element<S::Key>) -> Result<S::Key> {
        if self.fail_element.take() {
            return Err(Error::element());
        }
        self.inner.try_insert(element)
    }

    #[inline]
    fn remove(&mut self, key: S::Key) -> Option<Element<S::Key>> {
        self.inner.remove(key)
    }

    #[inline]
    fn get(&self, key: S::Key) -> Option<&Element<S::Key>> {
        self.inner.get(key)
    }

    #[inline]
    fn get_mut(&mut self, key: S::Key) -> Option<&mut Element<S::Key>> {
        self.inner.get_mut(key)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: S::Key) -> &Element<S::Key> {
        unsafe { self.inner.get_unchecked(key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: S::Key) -> &mut Element<S::Key> {
        unsafe { self.inner.get_unchecked_mut(key) }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: S::Key) -> Element<S::Key> {
        unsafe { self.inner.remove_unchecked(key) }
    }

    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.inner.try_reserve(additional)
    }

    fn copy_value(&mut self, bytes: &[u8]) -> Result<Value> {
        if self.fail_value.take() {
            return Err(Error::value(bytes.len()));
        }
        self.inner.copy_value(bytes)
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl ElementStorage for slab::Slab<Element<usize>> {
    type Key = usize;

    /// `slab` grows with `reserve`, which aborts on out-of-memory; this
    /// never returns an error.
    #[inline]
    fn try_insert(&mut self, element: Element<usize>) -> Result<usize> {
        Ok(self.insert(element))
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<Element<usize>> {
        self.try_remove(key)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<&Element<usize>> {
        slab::Slab::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut Element<usize>> {
        slab::Slab::get_mut(self, key)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: usize) -> &Element<usize> {
        unsafe { slab::Slab::get_unchecked(self, key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: usize) -> &mut Element<usize> {
        unsafe { slab::Slab::get_unchecked_mut(self, key) }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: usize) -> Element<usize> {
        slab::Slab::remove(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }

    fn clear(&mut self) {
        slab::Slab::clear(self);
    }
}
