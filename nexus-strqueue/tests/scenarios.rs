//! End-to-end queue behavior, including a randomized comparison against a
//! `VecDeque` model.

use std::collections::VecDeque;

use nexus_strqueue::{Arena, ElementStorage, Error, Faulty, StrQueue, handle};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn drain_all(queue: &mut StrQueue) -> Vec<String> {
    let mut out = Vec::new();
    let mut buf = [0u8; 64];
    while let Ok(n) = queue.remove_head(Some(&mut buf)) {
        out.push(String::from_utf8(buf[..n].to_vec()).unwrap());
    }
    out
}

#[test]
fn insert_tail_sort_remove() {
    let mut queue: StrQueue = StrQueue::new();
    for s in ["a", "b", "c"] {
        queue.insert_tail(s).unwrap();
    }
    queue.sort();
    assert_eq!(drain_all(&mut queue), ["a", "b", "c"]);
}

#[test]
fn insert_head_reverse_remove() {
    let mut queue: StrQueue = StrQueue::new();
    for s in ["a", "b", "c"] {
        queue.insert_head(s).unwrap();
    }
    assert_eq!(queue.size(), 3);
    queue.reverse();
    assert_eq!(drain_all(&mut queue), ["a", "b", "c"]);
}

#[test]
fn remove_from_new_queue_fails() {
    let mut queue: StrQueue = StrQueue::new();
    let mut buf = [0u8; 8];
    assert_eq!(queue.remove_head(Some(&mut buf)), Err(Error::EmptyQueue));
    assert_eq!(queue.size(), 0);
}

#[test]
fn removes_release_storage_slots() {
    let mut queue: StrQueue = StrQueue::new();
    for s in ["a", "b", "c"] {
        queue.insert_tail(s).unwrap();
    }
    assert_eq!(queue.storage().len(), 3);

    queue.remove_head(None).unwrap();
    queue.pop_head().unwrap();
    assert_eq!(queue.storage().len(), 1);
    assert!(!queue.storage().is_empty());

    queue.remove_head(None).unwrap();
    assert!(queue.storage().is_empty());
}

#[test]
fn insert_head_under_allocation_failure() {
    let mut queue = StrQueue::with_storage(Faulty::new(Arena::<u32>::new()));
    queue.insert_tail("x").unwrap();
    queue.insert_tail("y").unwrap();

    queue.storage().fail_next_element();
    assert!(queue.insert_head("new").unwrap_err().is_allocation_failure());
    queue.storage().fail_next_value();
    assert!(queue.insert_head("new").unwrap_err().is_allocation_failure());

    assert_eq!(queue.size(), 2);
    let values: Vec<_> = queue.iter().map(|v| v.to_string()).collect();
    assert_eq!(values, ["x", "y"]);
}

#[test]
fn size_counts_every_insert() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut queue: StrQueue = StrQueue::new();
    for n in 1..=500 {
        let value = format!("v{}", rng.gen_range(0..1000));
        if rng.gen_bool(0.5) {
            queue.insert_head(&value).unwrap();
        } else {
            queue.insert_tail(&value).unwrap();
        }
        assert_eq!(queue.size(), n);
    }
}

#[test]
fn truncation_never_overruns() {
    let long = "0123456789abcdef";
    for k in 1..=20 {
        let mut queue: StrQueue = StrQueue::new();
        queue.insert_tail(long).unwrap();

        let mut backing = [0xeeu8; 32];
        let copied = queue.remove_head(Some(&mut backing[..k])).unwrap();

        let expected = long.len().min(k - 1);
        assert_eq!(copied, expected);
        assert_eq!(&backing[..expected], &long.as_bytes()[..expected]);
        assert_eq!(backing[expected], 0);
        assert!(backing[k..].iter().all(|&b| b == 0xee), "overrun at k={k}");
    }
}

#[test]
fn absent_queue_through_handle() {
    let mut q: Option<StrQueue> = None;
    assert_eq!(handle::size(q.as_ref()), 0);
    assert!(matches!(
        handle::insert_head(q.as_mut(), "a"),
        Err(Error::InvalidArgument(_))
    ));
    handle::reverse(q.as_mut());
    handle::sort(q.as_mut());
    handle::destroy(q);
}

#[derive(Debug, Clone, Copy)]
enum Action {
    InsertHead,
    InsertTail,
    RemoveHead,
    Reverse,
    Sort,
}

fn random_action(rng: &mut SmallRng) -> Action {
    match rng.gen_range(0..10) {
        0..=2 => Action::InsertHead,
        3..=5 => Action::InsertTail,
        6..=7 => Action::RemoveHead,
        8 => Action::Reverse,
        _ => Action::Sort,
    }
}

fn random_value(rng: &mut SmallRng) -> Vec<u8> {
    let len = rng.gen_range(0..8);
    (0..len).map(|_| rng.gen_range(b'a'..=b'e')).collect()
}

#[test]
fn matches_vecdeque_model() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let mut queue: StrQueue = StrQueue::new();
    let mut model: VecDeque<Vec<u8>> = VecDeque::new();

    for step in 0..5_000 {
        let action = random_action(&mut rng);
        match action {
            Action::InsertHead => {
                let value = random_value(&mut rng);
                queue.insert_head(&value).unwrap();
                model.push_front(value);
            }
            Action::InsertTail => {
                let value = random_value(&mut rng);
                queue.insert_tail(&value).unwrap();
                model.push_back(value);
            }
            Action::RemoveHead => {
                let cap = rng.gen_range(1..6);
                let mut buf = vec![0xffu8; cap];
                match model.pop_front() {
                    Some(expected) => {
                        let n = queue.remove_head(Some(buf.as_mut_slice())).unwrap();
                        let want = expected.len().min(cap - 1);
                        assert_eq!(n, want, "step {step}");
                        assert_eq!(&buf[..n], &expected[..want], "step {step}");
                        assert_eq!(buf[n], 0, "step {step}");
                    }
                    None => {
                        assert_eq!(
                            queue.remove_head(Some(buf.as_mut_slice())),
                            Err(Error::EmptyQueue)
                        );
                    }
                }
            }
            Action::Reverse => {
                queue.reverse();
                model.make_contiguous().reverse();
            }
            Action::Sort => {
                queue.sort();
                model.make_contiguous().sort();
            }
        }

        assert_eq!(queue.len(), model.len(), "step {step} after {action:?}");
        assert_eq!(
            queue.front().map(|v| v.as_bytes()),
            model.front().map(Vec::as_slice),
            "step {step} after {action:?}"
        );
        assert_eq!(
            queue.back().map(|v| v.as_bytes()),
            model.back().map(Vec::as_slice),
            "step {step} after {action:?}"
        );
        assert_eq!(queue.storage().len(), model.len());
    }

    let rest: Vec<Vec<u8>> = queue.drain().map(|v| v.into_bytes().into_vec()).collect();
    assert_eq!(rest, Vec::from(model));
}

#[test]
fn reverse_is_an_involution() {
    let mut rng = SmallRng::seed_from_u64(99);
    for len in [0usize, 1, 2, 3, 10, 101] {
        let mut queue: StrQueue = StrQueue::new();
        for _ in 0..len {
            queue.insert_tail(random_value(&mut rng)).unwrap();
        }
        let before: Vec<_> = queue.iter().cloned().collect();
        queue.reverse();
        queue.reverse();
        let after: Vec<_> = queue.iter().cloned().collect();
        assert_eq!(before, after, "len {len}");
    }
}

#[test]
fn sort_is_ordered_and_idempotent() {
    let mut rng = SmallRng::seed_from_u64(1234);
    for len in [0usize, 1, 2, 5, 16, 33, 1000] {
        let mut queue: StrQueue = StrQueue::new();
        for _ in 0..len {
            queue.insert_head(random_value(&mut rng)).unwrap();
        }
        queue.sort();
        assert!(queue.is_sorted(), "len {len}");
        let once: Vec<_> = queue.iter().cloned().collect();
        queue.sort();
        let twice: Vec<_> = queue.iter().cloned().collect();
        assert_eq!(once, twice, "len {len}");
    }
}
