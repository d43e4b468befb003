//! Keyed stream partitioner.
//!
//! [`key_split`] splits one sequence into per-key sub-queues that fill on
//! demand from the shared upstream.  The upstream cursor is owned by a single
//! shared cell; pulling from any sub-queue may advance it and route items
//! into sibling queues.  Items are never dropped and never duplicated across
//! queues, and each queue preserves source order.
//!
//! Access is single-threaded and single-consumer-at-a-time by design; the
//! shared state is an `Rc<RefCell<_>>`, not a lock.

use std::{cell::RefCell, collections::VecDeque, hash::Hash, iter::Fuse, rc::Rc};

use indexmap::IndexMap;
use tracing::trace;

use crate::error::Error;

struct Shared<I: Iterator, F, K> {
    source: Fuse<I>,
    classify: F,
    // first-seen key order, which `first_queues` relies on
    queues: IndexMap<K, VecDeque<I::Item>>,
}

impl<I, F, K> Shared<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
{
    /// Pulls one item from upstream and routes it into its queue.  Returns
    /// false once the upstream is exhausted.
    fn fetch(&mut self) -> bool {
        match self.source.next() {
            Some(item) => {
                let key = (self.classify)(&item);
                if !self.queues.contains_key(&key) {
                    trace!(queues = self.queues.len() + 1, "opening sub-queue");
                }
                self.queues.entry(key).or_default().push_back(item);
                true
            }
            None => {
                trace!("upstream exhausted");
                false
            }
        }
    }
}

/// Splits `iter` into sub-queues keyed by the value `classify` returns for
/// each item.
///
/// Sub-queues are obtained from the returned [`KeySplit`]; pulling from one
/// advances the shared upstream just far enough and buffers items for the
/// others.
///
/// ```
/// let split = riffle::key_split(0..99u32, |n| n % 3);
/// let mut zeros = split.queue(0).unwrap();
/// let mut ones = split.queue(1).unwrap();
/// let mut twos = split.queue(2).unwrap();
/// assert_eq!(zeros.next(), Some(0));
/// assert_eq!(zeros.next(), Some(3));
/// assert_eq!(ones.next(), Some(1));
/// assert_eq!(twos.next(), Some(2));
/// assert_eq!(ones.next(), Some(4));
/// ```
pub fn key_split<I, F, K>(iter: I, classify: F) -> KeySplit<I::IntoIter, F, K>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
{
    KeySplit {
        shared: Rc::new(RefCell::new(Shared {
            source: iter.into_iter().fuse(),
            classify,
            queues: IndexMap::new(),
        })),
    }
}

/// A sequence partitioned into per-key sub-queues, created by [`key_split`].
pub struct KeySplit<I: Iterator, F, K> {
    shared: Rc<RefCell<Shared<I, F, K>>>,
}

impl<I, F, K> KeySplit<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
{
    /// A handle on the sub-queue for `key`.
    ///
    /// Pulls upstream (buffering items for other queues) until the key
    /// appears.  Fails with [`Error::KeyNotFound`] if the upstream exhausts
    /// first; this is distinguishable from a queue that simply runs out of
    /// items later.
    ///
    /// Handles for the same key share one buffer; each item is delivered to
    /// exactly one of them.
    pub fn queue(&self, key: K) -> Result<SplitQueue<I, F, K>, Error> {
        let mut shared = self.shared.borrow_mut();
        while !shared.queues.contains_key(&key) {
            if !shared.fetch() {
                return Err(Error::KeyNotFound);
            }
        }
        drop(shared);
        Ok(self.handle(key))
    }

    /// Pulls until `n` distinct keys have been seen (or the upstream
    /// exhausts) and returns the first `n` sub-queues in first-seen order,
    /// padded with empty queues if fewer than `n` keys exist.
    pub fn first_queues(&self, n: usize) -> Vec<SplitQueue<I, F, K>>
    where
        K: Clone,
    {
        let mut shared = self.shared.borrow_mut();
        while shared.queues.len() < n {
            if !shared.fetch() {
                break;
            }
        }
        let keys: Vec<K> = shared.queues.keys().take(n).cloned().collect();
        drop(shared);

        let mut queues: Vec<SplitQueue<I, F, K>> =
            keys.into_iter().map(|key| self.handle(key)).collect();
        queues.resize_with(n, || SplitQueue {
            shared: Rc::clone(&self.shared),
            key: None,
        });
        queues
    }

    fn handle(&self, key: K) -> SplitQueue<I, F, K> {
        SplitQueue {
            shared: Rc::clone(&self.shared),
            key: Some(key),
        }
    }
}

/// One sub-queue of a [`KeySplit`], yielding the items that share its key in
/// source order.
///
/// When its buffer is empty, pulling from the queue advances the shared
/// upstream, which may buffer items for sibling queues.  Upstream exhaustion
/// is ordinary end-of-iteration, not an error.
pub struct SplitQueue<I: Iterator, F, K> {
    shared: Rc<RefCell<Shared<I, F, K>>>,
    // `None` marks a padding queue with no key; it is always empty
    key: Option<K>,
}

impl<I, F, K> Iterator for SplitQueue<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.key.as_ref()?;
        let mut shared = self.shared.borrow_mut();
        loop {
            if let Some(item) = shared.queues.get_mut(key).and_then(VecDeque::pop_front) {
                return Some(item);
            }
            if !shared.fetch() {
                return None;
            }
        }
    }
}

/// Splits a sequence into the items failing and the items satisfying a
/// predicate, lazily.
///
/// Both halves draw from the same upstream; consuming one buffers items for
/// the other.
///
/// ```
/// let (even, odd) = riffle::bisect(0..5u32, |n| n % 2 == 1);
/// assert_eq!(odd.collect::<Vec<u32>>(), vec![1, 3]);
/// assert_eq!(even.collect::<Vec<u32>>(), vec![0, 2, 4]);
/// ```
pub fn bisect<I, P>(
    iter: I,
    predicate: P,
) -> (
    SplitQueue<I::IntoIter, P, bool>,
    SplitQueue<I::IntoIter, P, bool>,
)
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    let split = key_split(iter, predicate);
    (split.handle(false), split.handle(true))
}

#[cfg(test)]
mod test {
    use super::{bisect, key_split};
    use crate::error::Error;

    #[test]
    fn unseen_key_after_exhaustion_is_an_error() {
        let split = key_split(["Test", "30"], |s: &&str| !s.is_empty());
        assert!(matches!(split.queue(false), Err(Error::KeyNotFound)));
    }

    #[test]
    fn interleaved_queues_share_the_upstream() {
        let split = key_split(0..9u32, |n| n % 3);
        let mut zeros = split.queue(0).unwrap();
        let mut ones = split.queue(1).unwrap();
        let mut twos = split.queue(2).unwrap();
        assert_eq!(zeros.next(), Some(0));
        assert_eq!(zeros.next(), Some(3));
        assert_eq!(ones.next(), Some(1));
        assert_eq!(twos.next(), Some(2));
        assert_eq!(ones.next(), Some(4));
        assert_eq!(zeros.collect::<Vec<u32>>(), vec![6]);
        assert_eq!(twos.collect::<Vec<u32>>(), vec![5, 8]);
        assert_eq!(ones.collect::<Vec<u32>>(), vec![7]);
    }

    #[test]
    fn truth_split_routes_all_items() {
        let split = key_split(["Test", "", "30", ""], |s: &&str| !s.is_empty());
        let falsy = split.queue(false).unwrap();
        let truthy = split.queue(true).unwrap();
        assert_eq!(falsy.collect::<Vec<&str>>(), vec!["", ""]);
        assert_eq!(truthy.collect::<Vec<&str>>(), vec!["Test", "30"]);
    }

    #[test]
    fn missing_key_is_distinguishable() {
        let split = key_split(0..10u32, |n| n % 2);
        assert!(matches!(split.queue(7), Err(Error::KeyNotFound)));
        // the probe buffered everything; the real queues are intact
        let evens = split.queue(0).unwrap();
        assert_eq!(evens.count(), 5);
    }

    #[test]
    fn first_queues_pads_with_empty() {
        let split = key_split(0..10u32, |n| n % 2);
        let queues = split.first_queues(4);
        assert_eq!(queues.len(), 4);
        let collected: Vec<Vec<u32>> = queues.into_iter().map(Iterator::collect).collect();
        assert_eq!(collected[0], vec![0, 2, 4, 6, 8]);
        assert_eq!(collected[1], vec![1, 3, 5, 7, 9]);
        assert!(collected[2].is_empty());
        assert!(collected[3].is_empty());
    }

    #[test]
    fn bisect_is_lazy_over_an_endless_source() {
        let (_other, zeros) = bisect(0.., |n: &u64| *n == 0);
        assert_eq!(zeros.take(1).collect::<Vec<u64>>(), vec![0]);
    }

    #[test]
    fn bisect_reversed_range() {
        let (other, zeros) = bisect((0..5u32).rev(), |n| *n == 0);
        assert_eq!(zeros.collect::<Vec<u32>>(), vec![0]);
        assert_eq!(other.collect::<Vec<u32>>(), vec![4, 3, 2, 1]);
    }
}
