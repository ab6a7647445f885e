//! # chainseq
//!
//! A node-owning, singly-linked ordered sequence for batch corpus
//! processing.
//!
//! ## Overview
//!
//! [`OrderedSequence`] keeps its elements in linked nodes owned by the
//! sequence and caches the last node, so appending is O(1). On top of that
//! it offers:
//!
//! - **Indexed access**: checked [`OrderedSequence::at`] returning
//!   [`OutOfRange`], and panicking `[]` indexing
//! - **Mid-sequence edits**: `insert`, `remove`, `pop`, `truncate`, `resize`
//! - **Cursors**: [`CursorMut::remove_current`] removes an element during a
//!   traversal and leaves the cursor on the following element
//! - **Whole-sequence operations**: in-place `reverse`, link-based merge sort,
//!   deep copy through `Clone`, and O(1) `transfer_to`
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`OrderedSequence`] as a plain
//!   sequence
//!
//! ## Example
//!
//! ```rust
//! use chainseq::prelude::*;
//!
//! let mut syllables: OrderedSequence<&str> = ["pho", "ne", "me"].into();
//! syllables.sort();
//! assert_eq!(syllables.to_string(), "[me, ne, pho]");
//!
//! let mut cursor = syllables.cursor_front_mut();
//! cursor.remove_current();
//! assert_eq!(cursor.current(), Some(&"ne"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use chainseq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::OutOfRange;
    pub use crate::sequence::{Cursor, CursorMut, OrderedSequence};
}

pub mod error;
pub mod sequence;

pub use error::OutOfRange;
pub use sequence::{Cursor, CursorMut, IntoIter, Iter, IterMut, OrderedSequence};
