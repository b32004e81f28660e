//! Element handles.
//!
//! Elements are addressed by small copyable handles instead of pointers.
//! A handle type reserves one value (`NONE`) to mean "no element", which is
//! how the queue encodes an absent `next` link or an empty head/tail.

/// Handle type used to address elements in [`ElementStorage`].
///
/// Implemented for the unsigned integer types; `NONE` is the type's `MAX`,
/// so a storage indexed by `K` holds at most `K::NONE.as_usize()` elements.
///
/// # Example
///
/// ```
/// use nexus_strqueue::Key;
///
/// let key: u32 = 7;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::from_usize(7), key);
/// ```
///
/// [`ElementStorage`]: crate::ElementStorage
pub trait Key: Copy + Eq + core::fmt::Debug {
    /// Sentinel meaning "no element".
    const NONE: Self;

    /// Creates a handle from a slot position.
    fn from_usize(val: usize) -> Self;

    /// Returns the slot position this handle addresses.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this addresses an element.
    #[inline]
    fn is_some(&self) -> bool {
        *self != Self::NONE
    }
}

macro_rules! impl_key {
    ($($t:ty),*) => {$(
        impl Key for $t {
            const NONE: Self = <$t>::MAX;

            #[inline]
            fn from_usize(val: usize) -> Self {
                debug_assert!(val < <$t>::MAX as usize, "slot position overflows handle type");
                val as $t
            }

            #[inline]
            fn as_usize(&self) -> usize {
                *self as usize
            }
        }
    )*};
}

impl_key!(u16, u32, u64, usize);
