//! Operation events and observers.
//!
//! A queue reports every operation boundary to an optional [`Observer`].
//! No observer is installed by default, in which case nothing is reported.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use nexus_strqueue::{Event, StrQueue};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let mut queue: StrQueue = StrQueue::new();
//! queue.set_observer(move |event: &Event<'_>| sink.lock().unwrap().push(event.op()));
//!
//! queue.insert_tail("a").unwrap();
//! queue.reverse();
//! assert_eq!(seen.lock().unwrap().len(), 2);
//! ```

use core::fmt;

use crate::Error;

/// Queue operation kinds, as reported in [`Event`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Queue construction.
    Create,
    /// `insert_head`.
    InsertHead,
    /// `insert_tail`.
    InsertTail,
    /// `remove_head` and `pop_head`.
    RemoveHead,
    /// `reverse`.
    Reverse,
    /// `sort`.
    Sort,
    /// `clear` and `drain`.
    Clear,
    /// `destroy`.
    Destroy,
}

impl Op {
    /// Operation name in snake case.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Op::Create => "create",
            Op::InsertHead => "insert_head",
            Op::InsertTail => "insert_tail",
            Op::RemoveHead => "remove_head",
            Op::Reverse => "reverse",
            Op::Sort => "sort",
            Op::Clear => "clear",
            Op::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed (or rejected) queue operation.
///
/// `len` fields are the queue length after the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Event<'a> {
    /// A queue was built.
    Create,
    /// A value was linked at the head.
    InsertHead {
        /// The inserted bytes.
        value: &'a [u8],
        /// Queue length after insertion.
        len: usize,
    },
    /// A value was linked at the tail.
    InsertTail {
        /// The inserted bytes.
        value: &'a [u8],
        /// Queue length after insertion.
        len: usize,
    },
    /// The head element was removed.
    RemoveHead {
        /// The removed bytes.
        value: &'a [u8],
        /// Bytes copied into the caller's buffer, if one was given.
        copied: Option<usize>,
        /// Queue length after removal.
        len: usize,
    },
    /// The queue was reversed.
    Reverse {
        /// Queue length.
        len: usize,
    },
    /// The queue was sorted.
    Sort {
        /// Queue length.
        len: usize,
    },
    /// Every element was removed.
    Clear {
        /// Number of elements released.
        removed: usize,
    },
    /// The queue was destroyed.
    Destroy {
        /// Number of elements released.
        removed: usize,
    },
    /// An operation failed without modifying the queue.
    Rejected {
        /// The failed operation.
        op: Op,
        /// Why it failed.
        error: Error,
    },
}

impl Event<'_> {
    /// The operation this event reports.
    pub const fn op(&self) -> Op {
        match self {
            Event::Create => Op::Create,
            Event::InsertHead { .. } => Op::InsertHead,
            Event::InsertTail { .. } => Op::InsertTail,
            Event::RemoveHead { .. } => Op::RemoveHead,
            Event::Reverse { .. } => Op::Reverse,
            Event::Sort { .. } => Op::Sort,
            Event::Clear { .. } => Op::Clear,
            Event::Destroy { .. } => Op::Destroy,
            Event::Rejected { op, .. } => *op,
        }
    }
}

/// Receives queue events.
///
/// Any `FnMut(&Event)` closure is an observer.
pub trait Observer {
    /// Called once per operation, after it completes or is rejected.
    fn on_event(&mut self, event: &Event<'_>);
}

impl<F> Observer for F
where
    F: FnMut(&Event<'_>),
{
    #[inline]
    fn on_event(&mut self, event: &Event<'_>) {
        self(event)
    }
}

/// Forwards events to [`tracing`].
///
/// Successful operations are `debug` events; rejections are `debug`, except
/// allocation failures which are `warn`. Values are logged lossily as UTF-8.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&mut self, event: &Event<'_>) {
        match *event {
            Event::Create => tracing::debug!(op = "create", "queue created"),
            Event::InsertHead { value, len } | Event::InsertTail { value, len } => {
                tracing::debug!(
                    op = event.op().as_str(),
                    value = %String::from_utf8_lossy(value),
                    len,
                    "value inserted"
                );
            }
            Event::RemoveHead { value, copied, len } => {
                tracing::debug!(
                    op = "remove_head",
                    value = %String::from_utf8_lossy(value),
                    copied = ?copied,
                    len,
                    "value removed"
                );
            }
            Event::Reverse { len } => tracing::debug!(op = "reverse", len, "queue reversed"),
            Event::Sort { len } => tracing::debug!(op = "sort", len, "queue sorted"),
            Event::Clear { removed } => tracing::debug!(op = "clear", removed, "queue cleared"),
            Event::Destroy { removed } => {
                tracing::debug!(op = "destroy", removed, "queue destroyed");
            }
            Event::Rejected { op, error } if error.is_allocation_failure() => {
                tracing::warn!(op = op.as_str(), %error, "operation rejected");
            }
            Event::Rejected { op, error } => {
                tracing::debug!(op = op.as_str(), %error, "operation rejected");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        capture.contents()
    }

    #[test]
    fn event_op() {
        assert_eq!(Event::Create.op(), Op::Create);
        assert_eq!(Event::Sort { len: 3 }.op(), Op::Sort);
        assert_eq!(
            Event::Rejected {
                op: Op::RemoveHead,
                error: Error::EmptyQueue
            }
            .op(),
            Op::RemoveHead
        );
    }

    #[test]
    fn closure_observer() {
        let mut lens = Vec::new();
        {
            let mut observer = |event: &Event<'_>| {
                if let Event::InsertTail { len, .. } = event {
                    lens.push(*len);
                }
            };
            observer.on_event(&Event::InsertTail { value: b"a", len: 1 });
            observer.on_event(&Event::Reverse { len: 1 });
            observer.on_event(&Event::InsertTail { value: b"b", len: 2 });
        }
        assert_eq!(lens, vec![1, 2]);
    }

    #[test]
    fn tracing_observer_logs_inserts() {
        let out = capture(|| {
            TracingObserver.on_event(&Event::InsertHead {
                value: b"hello",
                len: 1,
            });
        });
        assert!(out.contains("value inserted"), "{out}");
        assert!(out.contains("op=\"insert_head\""), "{out}");
        assert!(out.contains("value=hello"), "{out}");
    }

    #[test]
    fn tracing_observer_warns_on_allocation_failure() {
        let out = capture(|| {
            TracingObserver.on_event(&Event::Rejected {
                op: Op::InsertTail,
                error: Error::element(),
            });
        });
        assert!(out.contains("WARN"), "{out}");
        assert!(out.contains("failed to allocate element slot"), "{out}");
    }

    #[test]
    fn op_names() {
        assert_eq!(Op::InsertHead.to_string(), "insert_head");
        assert_eq!(Op::RemoveHead.as_str(), "remove_head");
    }
}
