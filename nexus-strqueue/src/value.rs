//! Owned string values held by queue elements.

use core::fmt;

use crate::{Error, Result};

/// An owned byte string stored in one element.
///
/// Values are always copied in from the caller's buffer; the queue never
/// holds a reference to caller memory. Ordering is byte-wise lexicographic,
/// the same order `strcmp` gives for NUL-free strings.
///
/// # Example
///
/// ```
/// use nexus_strqueue::Value;
///
/// let value = Value::try_copy(b"hello").unwrap();
/// assert_eq!(value.len(), 5);
/// assert_eq!(value, "hello");
///
/// let mut buf = [0xffu8; 4];
/// assert_eq!(value.copy_to(&mut buf), 3);
/// assert_eq!(&buf, b"hel\0");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value(Box<[u8]>);

impl Value {
    /// Copies `bytes` into a freshly allocated value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the buffer cannot be allocated.
    pub fn try_copy(bytes: &[u8]) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes.len())
            .map_err(|_| Error::value(bytes.len()))?;
        buf.extend_from_slice(bytes);
        Ok(Self(buf.into_boxed_slice()))
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The value as UTF-8, if it is valid UTF-8.
    #[inline]
    pub fn to_str(&self) -> core::result::Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(&self.0)
    }

    /// Consumes the value, returning its bytes.
    #[inline]
    pub fn into_bytes(self) -> Box<[u8]> {
        self.0
    }

    /// Copies the value into `buf` as a NUL-terminated string.
    ///
    /// At most `buf.len() - 1` bytes are copied, followed by a NUL byte.
    /// Nothing past `buf.len()` is ever written. Returns the number of value
    /// bytes copied, excluding the terminator; an empty `buf` is left
    /// untouched and 0 is returned.
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        let Some(room) = buf.len().checked_sub(1) else {
            return 0;
        };
        let n = self.0.len().min(room);
        buf[..n].copy_from_slice(&self.0[..n]);
        buf[n] = 0;
        n
    }
}

impl AsRef<[u8]> for Value {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for Value {
    fn eq(&self, other: &[u8]) -> bool {
        *self.0 == *other
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        *self.0 == *other.as_bytes()
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        *self.0 == *other.as_bytes()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&String::from_utf8_lossy(&self.0), f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
