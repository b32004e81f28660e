//! Bottom-up merge sort over linked element handles.
//!
//! Values never move: sorting only rewrites `next` links. Each pass walks
//! the chain once, cutting it into runs of `width` elements, merging
//! neighbouring runs and appending the result to the output chain. Widths
//! double until one run covers the whole chain, so the sort takes
//! O(n log n) comparisons and O(1) extra space with no recursion.

use crate::{ElementStorage, Key};

/// Sorts the `len`-element chain starting at `head` in ascending byte order.
///
/// Returns the new `(head, tail)`. Equal values keep their relative order.
///
/// # Safety
///
/// `head` must start a `NONE`-terminated chain of exactly `len` occupied
/// elements in `storage`.
pub(crate) unsafe fn merge_sort<S: ElementStorage>(
    storage: &mut S,
    head: S::Key,
    tail: S::Key,
    len: usize,
) -> (S::Key, S::Key) {
    let mut head = head;
    let mut tail = tail;
    let mut width = 1;

    while width < len {
        let mut out_head = S::Key::NONE;
        let mut out_tail = S::Key::NONE;
        let mut rest = head;

        while rest.is_some() {
            let left = rest;
            // Safety: every handle reached by walking the chain is occupied
            let right = unsafe { cut_after(storage, left, width) };
            rest = unsafe { cut_after(storage, right, width) };

            let (merged_head, merged_tail) = unsafe { merge(storage, left, right) };
            if out_tail.is_some() {
                unsafe { storage.get_unchecked_mut(out_tail) }.next = merged_head;
            } else {
                out_head = merged_head;
            }
            out_tail = merged_tail;
        }

        head = out_head;
        tail = out_tail;
        width = width.saturating_mul(2);
    }

    (head, tail)
}

/// Detaches the run of at most `n` elements starting at `start`.
///
/// Returns the first handle after the run, or `NONE` if the chain ended.
///
/// # Safety
///
/// `start` must be `NONE` or start a `NONE`-terminated chain of occupied
/// elements.
unsafe fn cut_after<S: ElementStorage>(storage: &mut S, start: S::Key, n: usize) -> S::Key {
    if start.is_none() {
        return S::Key::NONE;
    }

    let mut last = start;
    for _ in 1..n {
        let next = unsafe { storage.get_unchecked(last) }.next;
        if next.is_none() {
            return S::Key::NONE;
        }
        last = next;
    }

    let node = unsafe { storage.get_unchecked_mut(last) };
    let rest = node.next;
    node.next = S::Key::NONE;
    rest
}

/// Merges two sorted `NONE`-terminated chains.
///
/// `left` must be non-empty. On equal values the left element goes first.
///
/// # Safety
///
/// Both chains must consist of occupied elements and share no handles.
unsafe fn merge<S: ElementStorage>(
    storage: &mut S,
    mut left: S::Key,
    mut right: S::Key,
) -> (S::Key, S::Key) {
    let mut head = S::Key::NONE;
    let mut tail = S::Key::NONE;

    while left.is_some() && right.is_some() {
        let l = unsafe { storage.get_unchecked(left) };
        let r = unsafe { storage.get_unchecked(right) };

        let taken = if l.value <= r.value {
            let key = left;
            left = l.next;
            key
        } else {
            let key = right;
            right = r.next;
            key
        };

        if tail.is_some() {
            unsafe { storage.get_unchecked_mut(tail) }.next = taken;
        } else {
            head = taken;
        }
        tail = taken;
    }

    let mut remaining = if left.is_some() { left } else { right };
    if tail.is_some() {
        unsafe { storage.get_unchecked_mut(tail) }.next = remaining;
    } else {
        head = remaining;
    }

    // Walk the leftover run to find the merged tail
    while remaining.is_some() {
        tail = remaining;
        remaining = unsafe { storage.get_unchecked(remaining) }.next;
    }

    (head, tail)
}
