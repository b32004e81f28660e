//! String queue over a singly-linked list with handle-indexed storage.
//!
//! [`StrQueue`] holds owned byte strings and supports insertion at either
//! end, removal from the head, O(1) length, and in-place reversal and
//! sorting. It works as a FIFO (insert at tail) or a LIFO (insert at head).
//!
//! # Design
//!
//! The list is separated from the memory that holds its elements:
//!
//! ```text
//! ElementStorage (Arena) - owns elements, hands out stable handles
//! StrQueue               - links handles: head, tail, len
//! ```
//!
//! Elements are addressed by small integer handles ([`Key`]) rather than
//! pointers. Reversal and sorting only rewrite `next` handles; values are
//! never moved or copied once inserted.
//!
//! Every allocation is fallible. Running out of memory while inserting
//! returns [`Error::AllocationFailure`] and leaves the queue untouched.
//!
//! # Quick Start
//!
//! ```
//! use nexus_strqueue::StrQueue;
//!
//! let mut queue: StrQueue = StrQueue::new();
//! queue.insert_tail("pear").unwrap();
//! queue.insert_tail("apple").unwrap();
//! queue.insert_head("fig").unwrap();
//!
//! queue.sort();
//! let sorted: Vec<_> = queue.iter().map(|v| v.to_string()).collect();
//! assert_eq!(sorted, ["apple", "fig", "pear"]);
//!
//! // Copy out into a fixed buffer, truncated and NUL-terminated
//! let mut buf = [0u8; 4];
//! assert_eq!(queue.remove_head(Some(&mut buf)), Ok(3));
//! assert_eq!(&buf, b"app\0");
//! ```
//!
//! # Operations
//!
//! | Operation | Cost | Allocates |
//! |-----------|------|-----------|
//! | `insert_head` / `insert_tail` | O(1) | element slot (amortized) + value |
//! | `remove_head` / `pop_head` | O(1) | no |
//! | `len` | O(1) | no |
//! | `reverse` | O(n) | no |
//! | `sort` | O(n log n) | no |
//!
//! # Observing
//!
//! Install an [`Observer`] to receive an [`Event`] per operation, or use
//! [`TracingObserver`] to forward them to `tracing`. Nothing is reported
//! unless an observer is installed.
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`ElementStorage`] impl for `slab::Slab`

#![warn(missing_docs)]

mod builder;
mod element;
mod error;
pub mod handle;
mod key;
pub mod observe;
mod queue;
mod sort;
mod storage;
mod value;

pub use builder::QueueBuilder;
pub use element::Element;
pub use error::{Allocation, Error, Result};
pub use key::Key;
pub use observe::{Event, Observer, Op, TracingObserver};
pub use queue::{Drain, Iter, StrQueue};
pub use storage::{Arena, ElementStorage, Faulty};
pub use value::Value;
