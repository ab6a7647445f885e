//! Error types for sequence operations.
//!
//! Only indexed operations can fail. Every other precondition (reading the
//! back of an empty sequence, dereferencing a past-the-end cursor) is
//! expressed through `Option` instead of an error.

/// An index argument fell outside the range an operation accepts.
///
/// `at`, `at_mut` and `remove` accept `[0, length)`; `insert` accepts
/// `[0, length]`. The operation fails before touching the sequence.
///
/// # Examples
///
/// ```rust
/// use chainseq::{OrderedSequence, OutOfRange};
///
/// let sequence: OrderedSequence<i32> = [1, 2, 3].into();
/// let error = sequence.at(5).unwrap_err();
/// assert_eq!(error, OutOfRange { length: 3, index: 5 });
/// assert_eq!(
///     error.to_string(),
///     "sequence index out of range: length is 3, requested index 5"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("sequence index out of range: length is {length}, requested index {index}")]
pub struct OutOfRange {
    /// Length of the sequence when the operation was attempted.
    pub length: usize,
    /// The rejected index.
    pub index: usize,
}

impl OutOfRange {
    #[inline]
    pub(crate) const fn new(length: usize, index: usize) -> Self {
        Self { length, index }
    }
}

static_assertions::assert_impl_all!(OutOfRange: std::error::Error, Send, Sync, Copy);
