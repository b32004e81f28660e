//! Free-function surface tolerant of an absent queue.
//!
//! Drivers that hold a queue as `Option<StrQueue>` can call these without
//! checking for presence first. Mutating calls on an absent queue fail with
//! [`Error::InvalidArgument`]; `size` reports 0 and `reverse`/`sort` do
//! nothing.
//!
//! ```
//! use nexus_strqueue::handle;
//!
//! let mut q = Some(handle::create().unwrap());
//! handle::insert_tail(q.as_mut(), "a").unwrap();
//! assert_eq!(handle::size(q.as_ref()), 1);
//!
//! handle::destroy(q.take());
//! assert_eq!(handle::size(q.as_ref()), 0);
//! assert!(handle::insert_tail(q.as_mut(), "b").is_err());
//! ```

use crate::{ElementStorage, Error, QueueBuilder, Result, StrQueue};

const ABSENT: Error = Error::InvalidArgument("queue is absent");

/// Creates an empty queue.
///
/// # Errors
///
/// Returns [`Error::AllocationFailure`] if the queue cannot be allocated.
pub fn create() -> Result<StrQueue> {
    QueueBuilder::new().build()
}

/// Releases the queue and every element. Does nothing for `None`.
pub fn destroy<S: ElementStorage>(queue: Option<StrQueue<S>>) {
    if let Some(queue) = queue {
        queue.destroy();
    }
}

/// Inserts a copy of `value` at the head.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for an absent queue, otherwise as
/// [`StrQueue::insert_head`].
pub fn insert_head<S: ElementStorage>(
    queue: Option<&mut StrQueue<S>>,
    value: impl AsRef<[u8]>,
) -> Result<()> {
    queue.ok_or(ABSENT)?.insert_head(value)
}

/// Inserts a copy of `value` at the tail.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for an absent queue, otherwise as
/// [`StrQueue::insert_tail`].
pub fn insert_tail<S: ElementStorage>(
    queue: Option<&mut StrQueue<S>>,
    value: impl AsRef<[u8]>,
) -> Result<()> {
    queue.ok_or(ABSENT)?.insert_tail(value)
}

/// Removes the head element, copying it NUL-terminated into `out`.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for an absent queue, otherwise as
/// [`StrQueue::remove_head`].
pub fn remove_head<S: ElementStorage>(
    queue: Option<&mut StrQueue<S>>,
    out: Option<&mut [u8]>,
) -> Result<usize> {
    queue.ok_or(ABSENT)?.remove_head(out)
}

/// Number of elements; 0 for an absent queue.
pub fn size<S: ElementStorage>(queue: Option<&StrQueue<S>>) -> usize {
    queue.map_or(0, StrQueue::len)
}

/// Reverses the queue in place. Does nothing for `None`.
pub fn reverse<S: ElementStorage>(queue: Option<&mut StrQueue<S>>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

/// Sorts the queue in place. Does nothing for `None`.
pub fn sort<S: ElementStorage>(queue: Option<&mut StrQueue<S>>) {
    if let Some(queue) = queue {
        queue.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arena;

    #[test]
    fn absent_queue() {
        let mut absent: Option<StrQueue> = None;

        assert_eq!(size(absent.as_ref()), 0);
        assert_eq!(insert_head(absent.as_mut(), "a"), Err(ABSENT));
        assert_eq!(insert_tail(absent.as_mut(), "a"), Err(ABSENT));
        assert_eq!(remove_head(absent.as_mut(), None), Err(ABSENT));
        reverse(absent.as_mut());
        sort(absent.as_mut());
        destroy(absent);
    }

    #[test]
    fn absent_check_precedes_buffer_check() {
        let mut buf: [u8; 0] = [];
        assert_eq!(
            remove_head::<Arena>(None, Some(&mut buf)),
            Err(ABSENT)
        );
    }

    #[test]
    fn present_queue() {
        let mut q = Some(create().unwrap());

        insert_head(q.as_mut(), "a").unwrap();
        insert_head(q.as_mut(), "b").unwrap();
        insert_head(q.as_mut(), "c").unwrap();
        assert_eq!(size(q.as_ref()), 3);

        reverse(q.as_mut());
        let mut buf = [0u8; 8];
        assert_eq!(remove_head(q.as_mut(), Some(&mut buf)), Ok(1));
        assert_eq!(&buf[..2], b"a\0");

        insert_tail(q.as_mut(), "0").unwrap();
        sort(q.as_mut());
        assert_eq!(remove_head(q.as_mut(), Some(&mut buf)), Ok(1));
        assert_eq!(&buf[..2], b"0\0");

        destroy(q);
    }

    #[test]
    fn destroy_empty() {
        destroy(Some(create().unwrap()));
    }
}
