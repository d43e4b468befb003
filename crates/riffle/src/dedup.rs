//! Run thinning, consecutive de-duplication, and interleaving.

use std::collections::VecDeque;
use std::iter::Fuse;

/// Yields every other item, starting with the first.
///
/// ```
/// let kept: String = riffle::every_other("abcdefg".chars()).collect();
/// assert_eq!(kept, "aceg");
/// ```
pub fn every_other<I>(iter: I) -> EveryOther<I::IntoIter>
where
    I: IntoIterator,
{
    EveryOther {
        iter: iter.into_iter().fuse(),
    }
}

/// Iterator returned by [`every_other`].
pub struct EveryOther<I: Iterator> {
    iter: Fuse<I>,
}

impl<I: Iterator> Iterator for EveryOther<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        self.iter.next();
        Some(item)
    }
}

/// Collapses each run of equal consecutive items to every other member of
/// the run, so sequential duplicates thin out without triplicates vanishing
/// entirely.
///
/// ```
/// let thinned: String = riffle::remove_duplicates("aaaabbbbb".chars()).collect();
/// assert_eq!(thinned, "aabbb");
/// ```
pub fn remove_duplicates<I>(
    iter: I,
) -> RemoveDuplicates<I::IntoIter, impl FnMut(&I::Item) -> I::Item, I::Item>
where
    I: IntoIterator,
    I::Item: Clone + PartialEq,
{
    remove_duplicates_by_key(iter, |item: &I::Item| item.clone())
}

/// Like [`remove_duplicates`], with runs determined by a key function.
pub fn remove_duplicates_by_key<I, K, FK>(iter: I, key: FK) -> RemoveDuplicates<I::IntoIter, FK, K>
where
    I: IntoIterator,
    K: PartialEq,
    FK: FnMut(&I::Item) -> K,
{
    RemoveDuplicates {
        iter: iter.into_iter().fuse(),
        key,
        run: None,
    }
}

/// Iterator returned by [`remove_duplicates`] and
/// [`remove_duplicates_by_key`].
pub struct RemoveDuplicates<I: Iterator, FK, K> {
    iter: Fuse<I>,
    key: FK,
    // current run key and the offset within the run
    run: Option<(K, usize)>,
}

impl<I, K, FK> Iterator for RemoveDuplicates<I, FK, K>
where
    I: Iterator,
    K: PartialEq,
    FK: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.iter.next()?;
            let key = (self.key)(&item);
            match &mut self.run {
                Some((run_key, offset)) if *run_key == key => {
                    *offset += 1;
                    if *offset % 2 == 0 {
                        return Some(item);
                    }
                }
                _ => {
                    self.run = Some((key, 0));
                    return Some(item);
                }
            }
        }
    }
}

/// Keeps only the first item of each run of consecutive key-equal items.
///
/// ```
/// let unique: String = riffle::dedup_consecutive("aabbccaa".chars()).collect();
/// assert_eq!(unique, "abca");
/// ```
pub fn dedup_consecutive<I>(
    iter: I,
) -> DedupConsecutive<I::IntoIter, impl FnMut(&I::Item) -> I::Item, I::Item>
where
    I: IntoIterator,
    I::Item: Clone + PartialEq,
{
    dedup_consecutive_by_key(iter, |item: &I::Item| item.clone())
}

/// Like [`dedup_consecutive`], with runs determined by a key function.
pub fn dedup_consecutive_by_key<I, K, FK>(iter: I, key: FK) -> DedupConsecutive<I::IntoIter, FK, K>
where
    I: IntoIterator,
    K: PartialEq,
    FK: FnMut(&I::Item) -> K,
{
    DedupConsecutive {
        iter: iter.into_iter().fuse(),
        key,
        last: None,
    }
}

/// Iterator returned by [`dedup_consecutive`] and
/// [`dedup_consecutive_by_key`].
pub struct DedupConsecutive<I: Iterator, FK, K> {
    iter: Fuse<I>,
    key: FK,
    last: Option<K>,
}

impl<I, K, FK> Iterator for DedupConsecutive<I, FK, K>
where
    I: Iterator,
    K: PartialEq,
    FK: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.iter.next()?;
            let key = (self.key)(&item);
            if self.last.as_ref() != Some(&key) {
                self.last = Some(key);
                return Some(item);
            }
        }
    }
}

/// Interleaves a collection of iterators, visiting each in turn and skipping
/// exhausted ones until all are exhausted.
///
/// ```
/// let mixed: String = riffle::roundrobin(vec!["ABC".chars(), "D".chars(), "EF".chars()]).collect();
/// assert_eq!(mixed, "ADEBFC");
/// ```
pub fn roundrobin<I>(iters: impl IntoIterator<Item = I>) -> RoundRobin<I::IntoIter>
where
    I: IntoIterator,
{
    RoundRobin {
        active: iters.into_iter().map(IntoIterator::into_iter).collect(),
    }
}

/// Iterator returned by [`roundrobin`].
pub struct RoundRobin<I: Iterator> {
    active: VecDeque<I>,
}

impl<I: Iterator> Iterator for RoundRobin<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut iter = self.active.pop_front()?;
            match iter.next() {
                Some(item) => {
                    self.active.push_back(iter);
                    return Some(item);
                }
                None => continue,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{dedup_consecutive, every_other, remove_duplicates, roundrobin};

    #[test]
    fn every_other_keeps_even_offsets() {
        let kept: Vec<u32> = every_other(0..7).collect();
        assert_eq!(kept, vec![0, 2, 4, 6]);
        assert_eq!(every_other(0..0).count(), 0);
    }

    #[test]
    fn remove_duplicates_thins_runs() {
        let thinned: String = remove_duplicates("abcaabbccaaabbbcccbcbc".chars()).collect();
        assert_eq!(thinned, "abcabcaabbccbcbc");
    }

    #[test]
    fn remove_duplicates_keeps_triplicate_survivors() {
        let thinned: String = remove_duplicates("aaaabbbbb".chars()).collect();
        assert_eq!(thinned, "aabbb");
    }

    #[test]
    fn dedup_consecutive_keeps_run_heads() {
        let unique: String = dedup_consecutive("aabbccaa".chars()).collect();
        assert_eq!(unique, "abca");
    }

    #[test]
    fn roundrobin_interleaves() {
        let mixed: String = roundrobin(vec!["ABC".chars(), "D".chars(), "EF".chars()]).collect();
        assert_eq!(mixed, "ADEBFC");
    }

    #[test]
    fn roundrobin_of_nothing() {
        assert_eq!(roundrobin(Vec::<Vec<u8>>::new()).count(), 0);
    }
}
