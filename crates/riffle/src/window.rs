//! Adjacency and windowed-context adapters.
//!
//! All adapters here are single pass over the source and clone items only to
//! keep the sliding context alive.

use std::collections::VecDeque;
use std::iter::Fuse;

/// Yields adjacent pairs: `s -> (s0, s1), (s1, s2), ...`.
pub fn pairwise<I>(iter: I) -> Pairwise<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Clone,
{
    Pairwise {
        iter: iter.into_iter().fuse(),
        last: None,
    }
}

/// Iterator returned by [`pairwise`].
pub struct Pairwise<I: Iterator> {
    iter: Fuse<I>,
    last: Option<I::Item>,
}

impl<I: Iterator> Iterator for Pairwise<I>
where
    I::Item: Clone,
{
    type Item = (I::Item, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let prev = match self.last.take() {
            Some(item) => item,
            None => self.iter.next()?,
        };
        let next = self.iter.next()?;
        self.last = Some(next.clone());
        Some((prev, next))
    }
}

/// Like [`pairwise`], except yields sliding windows of `size` adjacent items:
/// `s -> [s0..sn], [s1..sn+1], ...`.
///
/// A source shorter than `size` yields nothing.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn nwise<I>(iter: I, size: usize) -> Nwise<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Clone,
{
    assert!(size > 0, "window size must be positive");
    Nwise {
        iter: iter.into_iter().fuse(),
        window: VecDeque::with_capacity(size),
        size,
    }
}

/// Iterator returned by [`nwise`].
pub struct Nwise<I: Iterator> {
    iter: Fuse<I>,
    window: VecDeque<I::Item>,
    size: usize,
}

impl<I: Iterator> Iterator for Nwise<I>
where
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.window.len() < self.size {
            self.window.push_back(self.iter.next()?);
        }
        let out: Vec<I::Item> = self.window.iter().cloned().collect();
        self.window.pop_front();
        Some(out)
    }
}

/// Context frame yielded by [`window`]: the preceding items, the item itself,
/// and the following items, with `None` padding at the boundaries.
pub type Frame<T> = (Vec<Option<T>>, T, Vec<Option<T>>);

/// Yields every item together with `pre_size` items of preceding and
/// `post_size` items of following context.
///
/// The context vectors always have exactly the requested length; positions
/// beyond either end of the source are `None`.  The middle element of the
/// `i`-th frame is the source's `i`-th item.
///
/// ```
/// let mut frames = riffle::window(0..10, 2, 1);
/// let (pre, item, post) = frames.next().unwrap();
/// assert_eq!(pre, vec![None, None]);
/// assert_eq!(item, 0);
/// assert_eq!(post, vec![Some(1)]);
/// assert_eq!(frames.next().unwrap(), (vec![None, Some(0)], 1, vec![Some(2)]));
/// assert_eq!(frames.last().unwrap(), (vec![Some(7), Some(8)], 9, vec![None]));
/// ```
pub fn window<I>(iter: I, pre_size: usize, post_size: usize) -> Window<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Clone,
{
    let mut pre = VecDeque::with_capacity(pre_size + 1);
    pre.resize_with(pre_size, || None);
    Window {
        iter: iter.into_iter().fuse(),
        pre,
        ahead: VecDeque::with_capacity(post_size + 1),
        pre_size,
        post_size,
    }
}

/// Iterator returned by [`window`].
pub struct Window<I: Iterator> {
    iter: Fuse<I>,
    pre: VecDeque<Option<I::Item>>,
    ahead: VecDeque<I::Item>,
    pre_size: usize,
    post_size: usize,
}

impl<I: Iterator> Iterator for Window<I>
where
    I::Item: Clone,
{
    type Item = Frame<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.ahead.len() < self.post_size + 1 {
            match self.iter.next() {
                Some(item) => self.ahead.push_back(item),
                None => break,
            }
        }
        let item = self.ahead.pop_front()?;
        let post: Vec<Option<I::Item>> = (0..self.post_size)
            .map(|i| self.ahead.get(i).cloned())
            .collect();
        let pre: Vec<Option<I::Item>> = self.pre.iter().cloned().collect();
        self.pre.push_back(Some(item.clone()));
        if self.pre.len() > self.pre_size {
            self.pre.pop_front();
        }
        Some((pre, item, post))
    }
}

#[cfg(test)]
mod test {
    use super::{nwise, pairwise, window};

    #[test]
    fn pairwise_adjacent() {
        let pairs: Vec<(u32, u32)> = pairwise(0..5).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn pairwise_needs_two() {
        assert_eq!(pairwise(0..1).count(), 0);
        assert_eq!(pairwise(0..0).count(), 0);
    }

    #[test]
    fn nwise_slides_by_one() {
        let windows: Vec<Vec<u32>> = nwise(0..5, 3).collect();
        assert_eq!(windows, vec![vec![0, 1, 2], vec![1, 2, 3], vec![2, 3, 4]]);
    }

    #[test]
    fn nwise_short_source_is_empty() {
        assert_eq!(nwise(0..2, 3).count(), 0);
    }

    #[test]
    fn window_pads_boundaries() {
        let frames: Vec<_> = window(0..3, 1, 1).collect();
        assert_eq!(
            frames,
            vec![
                (vec![None], 0, vec![Some(1)]),
                (vec![Some(0)], 1, vec![Some(2)]),
                (vec![Some(1)], 2, vec![None]),
            ],
        );
    }

    #[test]
    fn window_zero_context() {
        let frames: Vec<_> = window(0..3, 0, 0).collect();
        assert_eq!(
            frames,
            vec![(vec![], 0, vec![]), (vec![], 1, vec![]), (vec![], 2, vec![])],
        );
    }
}
