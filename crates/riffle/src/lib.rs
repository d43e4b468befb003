// Warn about missing docs, but not for items declared with `#[cfg(test)]`.
#![cfg_attr(not(test), warn(missing_docs))]

//! Tools for working with iterators.
//!
//! This crate collects generic iterable-manipulation helpers: chunking,
//! windowing, peeking, de-duplication, partitioning, merging of ordered
//! sequences, and small stateful predicate objects for use with take-while
//! filtering.  Every sequence is advanced exactly when a consumer requests
//! the next item; there is no parallelism and no background work.
//!
//! Two facilities carry most of the structure:
//!
//! * The keyed stream partitioner ([`key_split`]) splits one sequence into
//!   per-key sub-queues filled on demand from the shared upstream, without
//!   materializing the input.
//!
//! * The ordered revision collator ([`collate_revs`]) merges two ordered
//!   sequences of keyed revisions into one ordered sequence, preferring
//!   newer values and preserving relative order.
//!
//! Everything else is a small, independent helper.  Key extraction, merging,
//! and blankness are always explicit caller-supplied functions; the crate
//! imposes no trait of its own at those seams.

mod error;
pub use error::Error;

pub mod chunk;
pub use chunk::{
    balanced_rows, chunks, chunks_padded, make_rows, partition_items, Chunks, ChunksPadded,
};

pub mod collate;
pub use collate::{
    assert_ordered, assert_ordered_by, collate_revs, duplicates, partition_map, AssertOrdered,
    Collate, Duplicates,
};

pub mod dedup;
pub use dedup::{
    dedup_consecutive, dedup_consecutive_by_key, every_other, remove_duplicates,
    remove_duplicates_by_key, roundrobin, DedupConsecutive, EveryOther, RemoveDuplicates,
    RoundRobin,
};

pub mod peek;
pub use peek::{peekable, take_while_peek, Peekable, TakeWhilePeek};

pub mod single;
pub use single::{maybe_single, one};

pub mod split;
pub use split::{bisect, key_split, KeySplit, SplitQueue};

pub mod stop;
pub use stop::{counted, Count, Counted, LessThanNBlanks, LessThanNConsecutiveBlanks};

pub mod window;
pub use window::{nwise, pairwise, window, Frame, Nwise, Pairwise, Window};
