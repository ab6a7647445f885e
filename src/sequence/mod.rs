//! Node-owning ordered sequence.
//!
//! - [`OrderedSequence`]: singly-linked sequence with a cached tail
//! - [`Cursor`] / [`CursorMut`]: forward cursors; [`CursorMut`] can remove
//!   elements mid-traversal without losing its place
//! - [`Iter`], [`IterMut`], [`IntoIter`]: standard iterators
//!
//! Sorting is a link-based merge sort that rewrites successor links only.

mod cursor;
mod iter;
mod list;
mod merge_sort;
mod node;

pub use cursor::Cursor;
pub use cursor::CursorMut;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::IterMut;
pub use list::OrderedSequence;
