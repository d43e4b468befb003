//! Error type shared by the fallible riffle operations.

use thiserror::Error;

/// Failure conditions that are distinguishable from ordinary exhaustion.
///
/// Running out of items is never an error in this crate; iterators simply
/// stop.  These variants cover the cases where a caller asked for something
/// the sequence cannot provide.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The upstream sequence was exhausted before the requested key appeared.
    #[error("upstream exhausted before the requested key appeared")]
    KeyNotFound,

    /// Exactly one item was expected, but the sequence was empty.
    #[error("expected exactly one item, found none")]
    NoItems,

    /// Exactly one item was expected, but more items remained.
    #[error("expected exactly one item, found more")]
    ExtraItems,
}
