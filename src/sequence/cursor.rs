//! Forward cursors over an [`OrderedSequence`].
//!
//! A cursor denotes either an element of a sequence or the past-the-end
//! position. Cursors borrow their sequence, so the borrow checker rules out
//! structural changes behind a cursor's back; the only mutation allowed
//! during a traversal goes through [`CursorMut`].
//!
//! # Removal at a cursor
//!
//! [`CursorMut::remove_current`] does not invalidate the cursor. An interior
//! element is removed by moving its successor's element into the current
//! node, so afterwards the cursor already denotes the element that followed
//! the removed one. Removing the last element leaves the cursor past-the-end.
//!
//! ```rust
//! use chainseq::OrderedSequence;
//!
//! let mut sequence: OrderedSequence<i32> = (1..=5).collect();
//! let mut cursor = sequence.cursor_front_mut();
//! while let Some(&value) = cursor.current() {
//!     if value % 2 == 0 {
//!         cursor.remove_current();
//!     } else {
//!         cursor.move_next();
//!     }
//! }
//! assert_eq!(sequence, OrderedSequence::from([1, 3, 5]));
//! ```

use std::fmt;
use std::ptr;

use super::OrderedSequence;
use super::node::{Arena, NodeKey, next_of};

/// Where a cursor stands: the node it denotes and its distance from head.
#[derive(Debug, Clone, Copy)]
struct Position {
    current: Option<NodeKey>,
    index: usize,
}

impl Position {
    fn element<T>(self, nodes: &Arena<T>) -> Option<&T> {
        self.current.map(|key| &nodes[key].element)
    }

    fn successor<T>(self, nodes: &Arena<T>) -> Option<NodeKey> {
        self.current.and_then(|key| next_of(nodes, key))
    }

    fn move_next<T>(&mut self, nodes: &Arena<T>) {
        if let Some(key) = self.current {
            self.current = next_of(nodes, key);
            self.index += 1;
        }
    }

    fn advance_by<T>(&mut self, nodes: &Arena<T>, steps: usize) {
        for _ in 0..steps {
            if self.current.is_none() {
                break;
            }
            self.move_next(nodes);
        }
    }
}

/// A read-only cursor over an [`OrderedSequence`].
///
/// Cursors compare equal when they denote the same node of the same
/// sequence; all past-the-end cursors of a sequence are equal.
pub struct Cursor<'a, T> {
    sequence: &'a OrderedSequence<T>,
    position: Position,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) const fn new(
        sequence: &'a OrderedSequence<T>,
        current: Option<NodeKey>,
        index: usize,
    ) -> Self {
        Self {
            sequence,
            position: Position { current, index },
        }
    }

    /// Returns the element under the cursor, or `None` past-the-end.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        let sequence = self.sequence;
        self.position.element(&sequence.nodes)
    }

    /// Returns the element after the one under the cursor.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a T> {
        let sequence = self.sequence;
        self.position
            .successor(&sequence.nodes)
            .map(|key| &sequence.nodes[key].element)
    }

    /// Moves to the next element. Past-the-end stays past-the-end.
    pub fn move_next(&mut self) {
        self.position.move_next(&self.sequence.nodes);
    }

    /// Moves forward `steps` elements, stopping at past-the-end.
    pub fn advance_by(&mut self, steps: usize) {
        self.position.advance_by(&self.sequence.nodes, steps);
    }

    /// Returns a copy of this cursor moved forward `steps` elements.
    ///
    /// `cursor.advanced(1)` is the post-increment counterpart of
    /// [`move_next`](Self::move_next): `cursor` itself stays put.
    #[must_use]
    pub fn advanced(mut self, steps: usize) -> Self {
        self.advance_by(steps);
        self
    }

    /// Returns `false` exactly when the cursor is past-the-end.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.position.current.is_some()
    }

    /// Returns `true` if the element under the cursor has a successor.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position.successor(&self.sequence.nodes).is_some()
    }

    /// Position of the cursor counted from the front; `len()` past-the-end.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.position.index
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.sequence, other.sequence) && self.position.current == other.position.current
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Cursor")
            .field("index", &self.index())
            .field("current", &self.current())
            .finish()
    }
}

static_assertions::assert_impl_all!(Cursor<'static, String>: Copy, Eq);

/// A cursor over an [`OrderedSequence`] that can modify and remove elements.
pub struct CursorMut<'a, T> {
    sequence: &'a mut OrderedSequence<T>,
    position: Position,
}

impl<'a, T> CursorMut<'a, T> {
    pub(super) const fn new(
        sequence: &'a mut OrderedSequence<T>,
        current: Option<NodeKey>,
        index: usize,
    ) -> Self {
        Self {
            sequence,
            position: Position { current, index },
        }
    }

    /// Returns the element under the cursor, or `None` past-the-end.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.position.element(&self.sequence.nodes)
    }

    /// Returns the element under the cursor mutably, or `None` past-the-end.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.position
            .current
            .map(|key| &mut self.sequence.nodes[key].element)
    }

    /// Returns the element after the one under the cursor.
    #[must_use]
    pub fn peek_next(&self) -> Option<&T> {
        self.as_cursor().peek_next()
    }

    /// Moves to the next element. Past-the-end stays past-the-end.
    pub fn move_next(&mut self) {
        self.position.move_next(&self.sequence.nodes);
    }

    /// Moves forward `steps` elements, stopping at past-the-end.
    pub fn advance_by(&mut self, steps: usize) {
        self.position.advance_by(&self.sequence.nodes, steps);
    }

    /// Returns `false` exactly when the cursor is past-the-end.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.position.current.is_some()
    }

    /// Returns `true` if the element under the cursor has a successor.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.as_cursor().has_next()
    }

    /// Position of the cursor counted from the front; `len()` past-the-end.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.position.index
    }

    /// Removes the element under the cursor and returns it.
    ///
    /// The cursor keeps its index and now denotes the element that followed
    /// the removed one, or is past-the-end if the removed element was last.
    /// Returns `None` when the cursor is already past-the-end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainseq::OrderedSequence;
    ///
    /// let mut sequence: OrderedSequence<char> = ['a', 'b', 'c'].into();
    /// let mut cursor = sequence.cursor_front_mut();
    /// cursor.move_next();
    /// assert_eq!(cursor.remove_current(), Some('b'));
    /// assert_eq!(cursor.current(), Some(&'c'));
    /// assert_eq!(cursor.remove_current(), Some('c'));
    /// assert!(!cursor.is_valid());
    /// assert_eq!(sequence, OrderedSequence::from(['a']));
    /// ```
    pub fn remove_current(&mut self) -> Option<T> {
        let key = self.position.current?;
        let (element, current) = self.sequence.remove_node(key);
        self.position.current = current;
        Some(element)
    }

    /// Returns a read-only view of this cursor.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor {
            sequence: &*self.sequence,
            position: self.position,
        }
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor {
            sequence: cursor.sequence,
            position: cursor.position,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CursorMut")
            .field("index", &self.index())
            .field("current", &self.current())
            .finish()
    }
}
