//! Iterators over an [`OrderedSequence`].

use std::iter::FusedIterator;

use super::OrderedSequence;
use super::node::{Arena, NodeKey, chain_keys};

/// An iterator over references to the elements of an [`OrderedSequence`].
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    current: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(nodes: &'a Arena<T>, head: Option<NodeKey>) -> Self {
        Self {
            nodes,
            current: head,
            remaining: nodes.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.current?];
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            current: self.current,
            remaining: self.remaining,
        }
    }
}

/// An iterator over mutable references to the elements of an
/// [`OrderedSequence`].
///
/// Creating it walks the chain once to order the arena's slots by link
/// position; iteration itself is O(1) per element.
pub struct IterMut<'a, T> {
    elements: std::vec::IntoIter<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(nodes: &'a mut Arena<T>, head: Option<NodeKey>) -> Self {
        let order = chain_keys(nodes, head);
        let span = order.iter().max().map_or(0, |key| key + 1);

        let mut slots: Vec<Option<&'a mut T>> = Vec::with_capacity(span);
        slots.resize_with(span, || None);
        for (key, node) in nodes.iter_mut() {
            if let Some(slot) = slots.get_mut(key) {
                *slot = Some(&mut node.element);
            }
        }

        let elements: Vec<&'a mut T> = order
            .into_iter()
            .filter_map(|key| slots.get_mut(key).and_then(Option::take))
            .collect();
        Self {
            elements: elements.into_iter(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.elements.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// An owning iterator over the elements of an [`OrderedSequence`].
pub struct IntoIter<T> {
    sequence: OrderedSequence<T>,
}

impl<T> IntoIter<T> {
    pub(super) const fn new(sequence: OrderedSequence<T>) -> Self {
        Self { sequence }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.sequence.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.sequence.len(), Some(self.sequence.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_iter_is_exact_size() {
        let sequence: OrderedSequence<i32> = [1, 2, 3].into();
        let mut iter = sequence.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<_>>(), vec![&2, &3]);
    }

    #[rstest]
    fn test_iter_follows_links_not_slots() {
        let mut sequence: OrderedSequence<i32> = [1, 2, 3].into();
        sequence.insert(0, 0).unwrap();
        sequence.reverse();
        let collected: Vec<i32> = sequence.iter().copied().collect();
        assert_eq!(collected, vec![3, 2, 1, 0]);
    }

    #[rstest]
    fn test_iter_mut_follows_links() {
        let mut sequence: OrderedSequence<i32> = [3, 1, 2].into();
        sequence.remove(0).unwrap();
        sequence.insert(0, 10).unwrap();
        sequence.sort();
        for (offset, element) in sequence.iter_mut().enumerate() {
            *element += i32::try_from(offset).unwrap() * 100;
        }
        assert_eq!(sequence, OrderedSequence::from([1, 102, 210]));
    }

    #[rstest]
    fn test_iter_mut_empty() {
        let mut sequence: OrderedSequence<String> = OrderedSequence::new();
        assert_eq!(sequence.iter_mut().len(), 0);
    }

    #[rstest]
    fn test_into_iter_yields_owned_values() {
        let sequence: OrderedSequence<String> =
            ["a", "b", "c"].into_iter().map(String::from).collect();
        let mut iter = sequence.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some("a".to_string()));
        assert_eq!(iter.collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[rstest]
    fn test_for_loop_over_mutable_reference() {
        let mut sequence: OrderedSequence<i32> = [1, 2].into();
        for element in &mut sequence {
            *element *= 10;
        }
        let mut total = 0;
        for element in &sequence {
            total += element;
        }
        assert_eq!(total, 30);
    }
}
