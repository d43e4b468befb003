//! Ordered collation of keyed revision sequences.
//!
//! [`collate_revs`] merges two ordered sequences of keyed revisions into one
//! ordered sequence, preferring newer values and preserving relative order.
//! Both inputs are materialized into order-preserving key maps up front; the
//! merge itself is not streaming.

use std::{cmp::Ordering, collections::VecDeque, fmt, hash::Hash, iter::Peekable};

use indexmap::IndexMap;

/// Collates revision sets `old` and `new` into one ordered sequence:
///
/// - every key present in either input appears exactly once;
/// - items only in `old` are yielded in old's order, in place;
/// - items only in `new` are yielded in new's order, after all resolved old
///   items;
/// - when a key exists in both, the items are combined with
///   `merge(old, new)` and yielded at the position old's order dictates,
///   except that new items preceding the match (in new's order) are flushed
///   first, each merged against a not-yet-yielded old counterpart when one
///   exists.
///
/// Within a single input, a repeated key keeps its first position and its
/// last value.
///
/// ```
/// let merged: Vec<char> = riffle::collate_revs(
///     vec!['a', 'b', 'c'],
///     vec!['a', 'd', 'c'],
///     |c| *c,
///     |_, new| new,
/// )
/// .collect();
/// assert_eq!(merged, vec!['a', 'b', 'd', 'c']);
/// ```
pub fn collate_revs<I, J, K, FK, FM>(
    old: I,
    new: J,
    mut key: FK,
    merge: FM,
) -> Collate<I::Item, K, FM>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    K: Hash + Eq,
    FK: FnMut(&I::Item) -> K,
    FM: FnMut(I::Item, I::Item) -> I::Item,
{
    Collate {
        old: index_by(old, &mut key),
        new: index_by(new, &mut key),
        merge,
        pending: VecDeque::new(),
    }
}

fn index_by<I, K, FK>(items: I, key: &mut FK) -> IndexMap<K, I::Item>
where
    I: IntoIterator,
    K: Hash + Eq,
    FK: FnMut(&I::Item) -> K,
{
    let mut map = IndexMap::new();
    for item in items {
        // replacing keeps the first position, which is what collation wants
        map.insert(key(&item), item);
    }
    map
}

/// Iterator returned by [`collate_revs`].
pub struct Collate<T, K, FM> {
    old: IndexMap<K, T>,
    new: IndexMap<K, T>,
    merge: FM,
    pending: VecDeque<T>,
}

impl<T, K, FM> Iterator for Collate<T, K, FM>
where
    K: Hash + Eq,
    FM: FnMut(T, T) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(item) = self.pending.pop_front() {
            return Some(item);
        }

        if let Some((old_key, old_item)) = self.old.shift_remove_index(0) {
            if !self.new.contains_key(&old_key) {
                return Some(old_item);
            }

            // flush the new items that precede the match, merging each
            // against a not-yet-yielded old counterpart when one exists
            let (before, matched, after) = partition_map(std::mem::take(&mut self.new), &old_key);
            self.new = after;
            for (new_key, new_item) in before {
                let item = match self.old.shift_remove(&new_key) {
                    Some(old_match) => (self.merge)(old_match, new_item),
                    None => new_item,
                };
                self.pending.push_back(item);
            }
            let item = match matched {
                Some(new_match) => (self.merge)(old_item, new_match),
                None => old_item,
            };
            self.pending.push_back(item);
            return self.pending.pop_front();
        }

        // whatever is left over in new, in new's order
        self.new.shift_remove_index(0).map(|(_key, item)| item)
    }
}

/// Splits an ordered map around `key`, returning the entries before it, the
/// keyed entry's value if present, and the entries after it.
///
/// When the key is absent, all entries land in `before` and `after` is
/// empty.
pub fn partition_map<K, V>(
    mut map: IndexMap<K, V>,
    key: &K,
) -> (IndexMap<K, V>, Option<V>, IndexMap<K, V>)
where
    K: Hash + Eq,
{
    match map.get_index_of(key) {
        Some(index) => {
            let mut after = map.split_off(index);
            let matched = after.shift_remove_index(0).map(|(_key, value)| value);
            (map, matched, after)
        }
        None => (map, None, IndexMap::new()),
    }
}

/// Yields the matching pair for every key present in both of two sequences
/// sorted by `key`.
///
/// Keys present in only one input are never reported.  The inputs must be
/// sorted; an unsorted input silently misses matches.
///
/// ```
/// let pairs: Vec<(u32, u32)> = riffle::duplicates([1, 2, 3], [0, 3, 4, 5, 6], |n| *n).collect();
/// assert_eq!(pairs, vec![(3, 3)]);
/// ```
pub fn duplicates<I, J, K, FK>(a: I, b: J, key: FK) -> Duplicates<I::IntoIter, J::IntoIter, FK>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    K: Ord,
    FK: FnMut(&I::Item) -> K,
{
    Duplicates {
        a: a.into_iter().peekable(),
        b: b.into_iter().peekable(),
        key,
    }
}

/// Iterator returned by [`duplicates`].
pub struct Duplicates<A: Iterator, B: Iterator, FK> {
    a: Peekable<A>,
    b: Peekable<B>,
    key: FK,
}

impl<A, B, K, FK> Iterator for Duplicates<A, B, FK>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
    K: Ord,
    FK: FnMut(&A::Item) -> K,
{
    type Item = (A::Item, A::Item);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let order = {
                let ka = (self.key)(self.a.peek()?);
                let kb = (self.key)(self.b.peek()?);
                ka.cmp(&kb)
            };
            match order {
                Ordering::Less => {
                    self.a.next();
                }
                Ordering::Greater => {
                    self.b.next();
                }
                Ordering::Equal => {
                    let item_a = self.a.next()?;
                    let item_b = self.b.next()?;
                    return Some((item_a, item_b));
                }
            }
        }
    }
}

/// Passes items through while asserting they are ordered.
///
/// # Panics
///
/// The returned iterator panics on the first adjacent pair that is out of
/// order.
pub fn assert_ordered<I>(
    iter: I,
) -> AssertOrdered<
    I::IntoIter,
    impl FnMut(&I::Item) -> I::Item,
    impl FnMut(&I::Item, &I::Item) -> bool,
    I::Item,
>
where
    I: IntoIterator,
    I::Item: Clone + PartialOrd + fmt::Debug,
{
    assert_ordered_by(iter, |item: &I::Item| item.clone(), |a, b| a <= b)
}

/// Like [`assert_ordered`], with a caller-supplied key extractor and
/// comparison.
///
/// # Panics
///
/// The returned iterator panics on the first adjacent key pair for which
/// `comp` does not hold.
pub fn assert_ordered_by<I, K, FK, C>(iter: I, key: FK, comp: C) -> AssertOrdered<I::IntoIter, FK, C, K>
where
    I: IntoIterator,
    K: fmt::Debug,
    FK: FnMut(&I::Item) -> K,
    C: FnMut(&K, &K) -> bool,
{
    AssertOrdered {
        iter: iter.into_iter(),
        key,
        comp,
        last: None,
    }
}

/// Iterator returned by [`assert_ordered`] and [`assert_ordered_by`].
pub struct AssertOrdered<I: Iterator, FK, C, K> {
    iter: I,
    key: FK,
    comp: C,
    last: Option<K>,
}

impl<I, K, FK, C> Iterator for AssertOrdered<I, FK, C, K>
where
    I: Iterator,
    K: fmt::Debug,
    FK: FnMut(&I::Item) -> K,
    C: FnMut(&K, &K) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        let key = (self.key)(&item);
        if let Some(prev) = self.last.take() {
            assert!(
                (self.comp)(&prev, &key),
                "items out of order: {prev:?} may not precede {key:?}",
            );
        }
        self.last = Some(key);
        Some(item)
    }
}
