//! Mutable singly-linked sequence with a cached tail.
//!
//! This module provides [`OrderedSequence`], an ordered container whose
//! elements live in singly-linked nodes owned by the sequence.
//!
//! # Overview
//!
//! - O(1) append (`add`) through the cached tail
//! - O(1) `len`, `front` and `back`
//! - O(n) indexed access, insertion and removal
//! - Removal at a cursor keeps the cursor usable: it moves onto the next
//!   element instead of dangling
//! - In-place `reverse` and link-based merge sort
//!
//! # Examples
//!
//! ```rust
//! use chainseq::OrderedSequence;
//!
//! let mut sequence = OrderedSequence::new();
//! sequence.add(10);
//! sequence.add(20);
//! sequence.add(30);
//! assert_eq!(sequence.at(1), Ok(&20));
//!
//! sequence.remove(0).unwrap();
//! sequence.insert(1, 99).unwrap();
//! assert_eq!(sequence, OrderedSequence::from([20, 99, 30]));
//!
//! sequence.sort();
//! assert_eq!(sequence, OrderedSequence::from([20, 30, 99]));
//! ```
//!
//! # Storage
//!
//! Nodes are kept in an arena owned by the sequence and linked by key:
//!
//! ```text
//! head ──► [a] ──► [b] ──► [c] ──► ∅
//!                           ▲
//!                          tail
//! ```
//!
//! Dropping or clearing the sequence releases the arena in one pass, so
//! arbitrarily long chains are torn down without recursion.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::mem;
use std::ops::{Index, IndexMut};

use super::cursor::{Cursor, CursorMut};
use super::iter::{IntoIter, Iter, IterMut};
use super::merge_sort::merge_sort;
use super::node::{Arena, Node, NodeKey, next_of, terminal_of, walk};
use crate::error::OutOfRange;

/// An ordered, singly-linked sequence.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `len`          | O(1)       |
/// | `front`/`back` | O(1)       |
/// | `add`          | O(1)       |
/// | `pop_front`    | O(1)       |
/// | `at`/`get`     | O(index)   |
/// | `insert`       | O(index)   |
/// | `remove`       | O(index), O(n) for the last element |
/// | `pop`          | O(n)       |
/// | `reverse`      | O(n)       |
/// | `sort_*`       | O(n log n) |
///
/// # Examples
///
/// ```rust
/// use chainseq::OrderedSequence;
///
/// let mut sequence: OrderedSequence<&str> = ["ba", "na", "na"].into();
/// assert_eq!(sequence.len(), 3);
/// assert_eq!(sequence.back(), Some(&"na"));
///
/// let copy = sequence.clone();
/// sequence.add("s");
/// assert_eq!(copy.len(), 3);
/// ```
pub struct OrderedSequence<T> {
    /// Arena owning every node; its length is the element count.
    pub(super) nodes: Arena<T>,
    /// Key of the first node.
    pub(super) head: Option<NodeKey>,
    /// Key of the terminal node.
    pub(super) tail: Option<NodeKey>,
}

impl<T> OrderedSequence<T> {
    /// Creates an empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainseq::OrderedSequence;
    ///
    /// let sequence: OrderedSequence<i32> = OrderedSequence::new();
    /// assert!(sequence.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty sequence with room for `capacity` nodes.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Number of nodes the sequence can hold without reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Releases node slots that are not in use.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn key_at(&self, index: usize) -> Option<NodeKey> {
        if index >= self.len() {
            return None;
        }
        walk(&self.nodes, self.head, index)
    }

    /// Returns a reference to the element at `index`, or `None` when out of
    /// range.
    ///
    /// # Complexity
    ///
    /// O(index)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.key_at(index).map(|key| &self.nodes[key].element)
    }

    /// Returns a mutable reference to the element at `index`, or `None` when
    /// out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.key_at(index).map(|key| &mut self.nodes[key].element)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] when `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainseq::{OrderedSequence, OutOfRange};
    ///
    /// let sequence: OrderedSequence<i32> = [10, 20, 30].into();
    /// assert_eq!(sequence.at(1), Ok(&20));
    /// assert_eq!(sequence.at(3), Err(OutOfRange { length: 3, index: 3 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        self.get(index)
            .ok_or_else(|| OutOfRange::new(self.len(), index))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] when `index >= self.len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let length = self.len();
        self.get_mut(index)
            .ok_or_else(|| OutOfRange::new(length, index))
    }

    /// Returns the first element, or `None` if the sequence is empty.
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|key| &self.nodes[key].element)
    }

    /// Returns the first element mutably, or `None` if the sequence is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|key| &mut self.nodes[key].element)
    }

    /// Returns the last element, or `None` if the sequence is empty.
    ///
    /// # Complexity
    ///
    /// O(1) - the terminal node is cached
    #[inline]
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|key| &self.nodes[key].element)
    }

    /// Returns the last element mutably, or `None` if the sequence is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|key| &mut self.nodes[key].element)
    }

    /// Appends `element` as the new last element.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainseq::OrderedSequence;
    ///
    /// let mut sequence = OrderedSequence::new();
    /// sequence.add(1);
    /// sequence.add(2);
    /// assert_eq!(sequence.back(), Some(&2));
    /// ```
    pub fn add(&mut self, element: T) {
        let key = self.nodes.insert(Node::new(element, None));
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Inserts `element` before the element currently at `index`.
    ///
    /// `insert(len(), element)` is the same as `add(element)`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] when `index > self.len()`. The sequence is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainseq::OrderedSequence;
    ///
    /// let mut sequence: OrderedSequence<i32> = [1, 3].into();
    /// sequence.insert(1, 2).unwrap();
    /// sequence.insert(3, 4).unwrap();
    /// assert_eq!(sequence, OrderedSequence::from([1, 2, 3, 4]));
    /// assert!(sequence.insert(9, 0).is_err());
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> Result<(), OutOfRange> {
        let length = self.len();
        if index > length {
            return Err(OutOfRange::new(length, index));
        }
        if index == length {
            self.add(element);
            return Ok(());
        }
        if index == 0 {
            let key = self.nodes.insert(Node::new(element, self.head));
            self.head = Some(key);
            return Ok(());
        }

        let previous =
            walk(&self.nodes, self.head, index - 1).ok_or(OutOfRange::new(length, index))?;
        let next = self.nodes[previous].next;
        let key = self.nodes.insert(Node::new(element, next));
        self.nodes[previous].next = Some(key);
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// An interior element is removed by shifting its successor's element
    /// into its node and freeing the successor's node. The last element is
    /// unlinked directly, and the new tail is found by scanning from the
    /// head.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] when `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainseq::OrderedSequence;
    ///
    /// let mut sequence: OrderedSequence<i32> = [10, 20, 30].into();
    /// assert_eq!(sequence.remove(0), Ok(10));
    /// assert_eq!(sequence.remove(1), Ok(30));
    /// assert_eq!(sequence, OrderedSequence::from([20]));
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, OutOfRange> {
        let key = self
            .key_at(index)
            .ok_or_else(|| OutOfRange::new(self.len(), index))?;
        let (element, _) = self.remove_node(key);
        Ok(element)
    }

    /// Removes the element held by node `key`.
    ///
    /// Returns the element and the key that now denotes the position `key`
    /// had: `key` itself after a shift-left removal, `None` when the terminal
    /// node was removed.
    pub(super) fn remove_node(&mut self, key: NodeKey) -> (T, Option<NodeKey>) {
        match self.nodes[key].next {
            Some(next) => {
                let successor = self.nodes.remove(next);
                let node = &mut self.nodes[key];
                node.next = successor.next;
                let element = mem::replace(&mut node.element, successor.element);
                if self.tail == Some(next) {
                    self.tail = Some(key);
                }
                (element, Some(key))
            }
            None => (self.unlink_terminal(key), None),
        }
    }

    /// Unlinks the terminal node `key` and rescans for its predecessor.
    fn unlink_terminal(&mut self, key: NodeKey) -> T {
        let previous = if self.head == Some(key) {
            None
        } else {
            walk(&self.nodes, self.head, self.len() - 2)
        };
        match previous {
            Some(previous) => self.nodes[previous].next = None,
            None => self.head = None,
        }
        self.tail = previous;
        self.nodes.remove(key).element
    }

    /// Removes and returns the last element, or `None` if the sequence is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(n) - nodes have no backward links, so the new last node is found by
    /// a scan from the head
    pub fn pop(&mut self) -> Option<T> {
        let tail = self.tail?;
        Some(self.unlink_terminal(tail))
    }

    /// Removes and returns the first element, or `None` if the sequence is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        let node = self.nodes.remove(head);
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Some(node.element)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        tracing::trace!(length = self.len(), "clearing sequence");
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Shortens the sequence to `length` elements, dropping the rest.
    ///
    /// Does nothing when `length >= self.len()`.
    pub fn truncate(&mut self, length: usize) {
        if length >= self.len() {
            return;
        }
        tracing::trace!(from = self.len(), to = length, "truncating sequence");
        if length == 0 {
            self.clear();
            return;
        }

        let Some(new_tail) = walk(&self.nodes, self.head, length - 1) else {
            return;
        };
        let mut surplus = self.nodes[new_tail].next.take();
        while let Some(key) = surplus {
            surplus = self.nodes.remove(key).next;
        }
        self.tail = Some(new_tail);
    }

    /// Resizes the sequence to exactly `length` elements, filling new slots
    /// with values produced by `fill`.
    pub fn resize_with<F>(&mut self, length: usize, mut fill: F)
    where
        F: FnMut() -> T,
    {
        if length <= self.len() {
            self.truncate(length);
            return;
        }
        tracing::trace!(from = self.len(), to = length, "growing sequence");
        for _ in self.len()..length {
            self.add(fill());
        }
    }

    /// Moves the whole chain into `other` without copying any element.
    ///
    /// `other`'s previous contents are dropped and `self` is left empty.
    ///
    /// # Complexity
    ///
    /// O(1) plus dropping `other`'s previous contents
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainseq::OrderedSequence;
    ///
    /// let mut source: OrderedSequence<i32> = [1, 2, 3].into();
    /// let mut destination: OrderedSequence<i32> = [9].into();
    /// source.transfer_to(&mut destination);
    /// assert!(source.is_empty());
    /// assert_eq!(destination, OrderedSequence::from([1, 2, 3]));
    /// ```
    pub fn transfer_to(&mut self, other: &mut Self) {
        tracing::trace!(
            length = self.len(),
            replaced = other.len(),
            "transferring sequence"
        );
        *other = mem::take(self);
    }

    /// Reverses the order of the elements in place.
    ///
    /// # Complexity
    ///
    /// O(n) time, O(1) extra space
    pub fn reverse(&mut self) {
        tracing::trace!(length = self.len(), "reversing sequence");
        let mut previous = None;
        let mut current = self.head;
        while let Some(key) = current {
            let node = &mut self.nodes[key];
            current = node.next;
            node.next = previous;
            previous = Some(key);
        }
        self.tail = self.head;
        self.head = previous;
    }

    /// Sorts the sequence with a strict "comes before" predicate.
    ///
    /// `before(a, b)` returns `true` when `a` must precede `b`. Elements for
    /// which neither is before the other keep their relative order. Only
    /// links are rewritten; no element is moved or cloned.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainseq::OrderedSequence;
    ///
    /// let mut sequence: OrderedSequence<i32> = [3, 1, 2].into();
    /// sequence.sort_with(|a, b| a > b);
    /// assert_eq!(sequence, OrderedSequence::from([3, 2, 1]));
    /// ```
    pub fn sort_with<F>(&mut self, mut before: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        tracing::trace!(length = self.len(), "sorting sequence");
        let mut guard = SortGuard {
            sequence: self,
            finished: false,
        };
        let head = guard.sequence.head;
        let sorted = merge_sort(&mut guard.sequence.nodes, head, &mut before);
        guard.sequence.head = sorted;
        guard.sequence.tail = terminal_of(&guard.sequence.nodes, sorted);
        guard.finished = true;
    }

    /// Links every occupied slot into one chain in slot order.
    ///
    /// Used to recover from an interrupted sort, when the links no longer
    /// form a single chain but every element is still in the arena.
    fn relink_occupied(&mut self) {
        let mut following = None;
        let mut tail = None;
        for (key, node) in self.nodes.iter_mut().rev() {
            node.next = following;
            following = Some(key);
            tail = tail.or(following);
        }
        self.head = following;
        self.tail = tail;
    }

    /// Sorts the sequence with a comparator function.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.sort_with(|a, b| compare(a, b) == Ordering::Less);
    }

    /// Sorts the sequence by a key extracted from each element.
    pub fn sort_by_key<K, F>(&mut self, mut key: F)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.sort_with(|a, b| key(a) < key(b));
    }

    /// Keeps only the elements for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainseq::OrderedSequence;
    ///
    /// let mut sequence: OrderedSequence<i32> = (1..=6).collect();
    /// sequence.retain(|value| value % 3 != 0);
    /// assert_eq!(sequence, OrderedSequence::from([1, 2, 4, 5]));
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.cursor_front_mut();
        while let Some(element) = cursor.current() {
            if keep(element) {
                cursor.move_next();
            } else {
                cursor.remove_current();
            }
        }
    }

    /// Checks that the cached tail is the node `len() - 1` hops from the
    /// head and that it terminates the chain.
    ///
    /// This is a diagnostic; every operation keeps it `true`.
    #[must_use]
    pub fn check_last(&self) -> bool {
        match (self.head, self.tail) {
            (None, None) => self.nodes.is_empty(),
            (Some(_), Some(tail)) => {
                self.len()
                    .checked_sub(1)
                    .is_some_and(|hops| walk(&self.nodes, self.head, hops) == Some(tail))
                    && next_of(&self.nodes, tail).is_none()
            }
            _ => false,
        }
    }

    /// Returns a read-only cursor on the first element.
    #[inline]
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.head, 0)
    }

    /// Returns a read-only cursor past the last element.
    #[inline]
    #[must_use]
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, None, self.len())
    }

    /// Returns a cursor on the first element that can modify and remove
    /// elements while traversing.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let head = self.head;
        CursorMut::new(self, head, 0)
    }

    /// Returns an iterator over references to the elements, front to back.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.head)
    }

    /// Returns an iterator over mutable references to the elements, front to
    /// back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.nodes, self.head)
    }
}

impl<T: Clone> OrderedSequence<T> {
    /// Resizes the sequence to exactly `length` elements.
    ///
    /// Surplus elements are dropped; missing ones are clones of `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainseq::OrderedSequence;
    ///
    /// let mut sequence: OrderedSequence<i32> = [20, 30, 99].into();
    /// sequence.resize(5, 0);
    /// assert_eq!(sequence, OrderedSequence::from([20, 30, 99, 0, 0]));
    /// sequence.resize(2, 0);
    /// assert_eq!(sequence, OrderedSequence::from([20, 30]));
    /// ```
    pub fn resize(&mut self, length: usize, value: T) {
        let current = self.len();
        if length <= current {
            self.truncate(length);
            return;
        }
        tracing::trace!(from = current, to = length, "growing sequence");
        for _ in current + 1..length {
            self.add(value.clone());
        }
        self.add(value);
    }
}

impl<T: Default> OrderedSequence<T> {
    /// Resizes the sequence to exactly `length` elements, filling new slots
    /// with `T::default()`.
    pub fn resize_default(&mut self, length: usize) {
        self.resize_with(length, T::default);
    }
}

impl<T: Ord> OrderedSequence<T> {
    /// Sorts the sequence in ascending order.
    pub fn sort(&mut self) {
        self.sort_with(|a, b| a < b);
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for OrderedSequence<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for OrderedSequence<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len());
        copy.extend(self.iter().cloned());
        copy
    }

    /// Overwrites `self` with a deep copy of `source`, reusing the nodes
    /// `self` already owns.
    fn clone_from(&mut self, source: &Self) {
        tracing::trace!(
            length = self.len(),
            source = source.len(),
            "copying sequence in place"
        );
        let mut sources = source.iter();
        let mut destination = self.head;
        while let Some(key) = destination {
            let Some(element) = sources.next() else {
                break;
            };
            let node = &mut self.nodes[key];
            node.element.clone_from(element);
            destination = node.next;
        }
        self.truncate(source.len());
        self.extend(sources.cloned());
    }
}

impl<T> FromIterator<T> for OrderedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Self::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T> Extend<T> for OrderedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for OrderedSequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> From<Vec<T>> for OrderedSequence<T> {
    fn from(elements: Vec<T>) -> Self {
        let mut sequence = Self::with_capacity(elements.len());
        sequence.extend(elements);
        sequence
    }
}

impl<T, const N: usize> From<[T; N]> for OrderedSequence<T> {
    fn from(elements: [T; N]) -> Self {
        let mut sequence = Self::with_capacity(N);
        sequence.extend(elements);
        sequence
    }
}

impl<T> IntoIterator for OrderedSequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a OrderedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut OrderedSequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Unchecked indexing.
///
/// # Panics
///
/// Panics with the [`OutOfRange`] message when `index >= len()`. Use
/// [`OrderedSequence::at`] for a recoverable error.
impl<T> Index<usize> for OrderedSequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.at(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> IndexMut<usize> for OrderedSequence<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.at_mut(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T: PartialEq> PartialEq for OrderedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for OrderedSequence<T> {}

/// Hashes the length first, then every element in order, so equal
/// sequences hash equally.
impl<T: Hash> Hash for OrderedSequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.iter().for_each(|element| element.hash(state));
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for OrderedSequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("[")?;
        let mut elements = self.iter();
        if let Some(first) = elements.next() {
            write!(formatter, "{first}")?;
            for element in elements {
                write!(formatter, ", {element}")?;
            }
        }
        formatter.write_str("]")
    }
}

// =============================================================================
// Sort Recovery
// =============================================================================

/// Keeps the chain whole when the comparator of a sort panics.
///
/// Until `finished` is set the links may be split into fragments, so
/// dropping an unfinished guard relinks every node. The resulting order is
/// unspecified but no element is lost.
struct SortGuard<'a, T> {
    sequence: &'a mut OrderedSequence<T>,
    finished: bool,
}

impl<T> Drop for SortGuard<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::trace!(
                length = self.sequence.len(),
                "sort interrupted, relinking sequence"
            );
            self.sequence.relink_occupied();
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for OrderedSequence<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedSequenceVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> OrderedSequenceVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for OrderedSequenceVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = OrderedSequence<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut sequence = OrderedSequence::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            sequence.add(element);
        }
        Ok(sequence)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for OrderedSequence<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(OrderedSequenceVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
